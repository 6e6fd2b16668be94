use super::sha::{ShaContext, BLOCK_BYTES, BLOCK_WORDS, DIGEST_WORDS};
use super::CodecError;

/// Trailing signature: checksum (u32 LE), error flag, last chunk size, 2 reserved.
pub const SIGNATURE_SIZE: usize = 8;

/// Fixed table the password digest is XORed into.
const KEY_TABLE: [u32; BLOCK_WORDS] = [
    2908958655, 4146550480, 658981742, 1113311088,
    3927878744, 679301322, 1760465731, 3305370375,
    2269115995, 3928541685, 580724401, 2607446661,
    2233092279, 2416822349, 4106933702, 3046442503,
];

struct Signature {
    checksum: u32,
    error: u8,
    last_chunk_size: u8,
}

impl Signature {
    fn read(bytes: &[u8]) -> Self {
        Self {
            checksum: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            error: bytes[4],
            last_chunk_size: bytes[5],
        }
    }
}

/// The password repeated cyclically until it fills one 64-byte block.
fn password_block(password: &[u8]) -> [u32; BLOCK_WORDS] {
    let mut block = [0u32; BLOCK_WORDS];
    if password.is_empty() {
        return block;
    }
    for (i, word) in block.iter_mut().enumerate() {
        let base = i * 4;
        *word = u32::from_le_bytes([
            password[base % password.len()],
            password[(base + 1) % password.len()],
            password[(base + 2) % password.len()],
            password[(base + 3) % password.len()],
        ]);
    }
    block
}

/// Builds the cipher's running state for `password`.
fn init_key(password: &[u8]) -> ShaContext {
    let mut digest_ctx = ShaContext::new();
    digest_ctx.update(&password_block(password));
    let digest = digest_ctx.result();

    let mut key = KEY_TABLE;
    for (i, word) in key.iter_mut().enumerate() {
        *word ^= digest[(i + 3) % DIGEST_WORDS];
    }

    let mut context = ShaContext::new();
    context.update(&key);
    context
}

// Save payloads are little-endian words on disk.
fn load_block(bytes: &[u8]) -> [u32; BLOCK_WORDS] {
    let mut words = [0u32; BLOCK_WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

fn store_block(words: &[u32; BLOCK_WORDS], bytes: &mut [u8]) {
    for (word, chunk) in words.iter().zip(bytes.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

fn xor_block(digest: &[u32; DIGEST_WORDS], words: &mut [u32; BLOCK_WORDS]) {
    for (i, word) in words.iter_mut().enumerate() {
        *word ^= digest[i % DIGEST_WORDS];
    }
}

/// Decrypts `buf` in place with `password`.
///
/// `buf` is whole 64-byte blocks followed by the 8-byte signature. On success
/// returns the number of meaningful plaintext bytes at the front of `buf`
/// (the last block is padded). On failure the buffer contents are
/// unspecified; decode a copy when trying several passwords.
pub fn decode(buf: &mut [u8], password: &str) -> Result<usize, CodecError> {
    let size = buf.len();
    if size <= SIGNATURE_SIZE {
        return Err(CodecError::InvalidLength(size));
    }
    let payload = size - SIGNATURE_SIZE;
    if payload % BLOCK_BYTES != 0 {
        return Err(CodecError::InvalidLength(size));
    }

    let mut context = init_key(password.as_bytes());
    let (blocks, signature) = buf.split_at_mut(payload);
    for chunk in blocks.chunks_exact_mut(BLOCK_BYTES) {
        let mut words = load_block(chunk);
        // Keystream is a snapshot of the state; the state then absorbs the plaintext.
        let keystream = context.result();
        xor_block(&keystream, &mut words);
        context.update(&words);
        store_block(&words, chunk);
    }

    let sig = Signature::read(signature);
    if sig.error != 0 {
        return Err(CodecError::SignatureFlag(sig.error));
    }
    let computed = context.result()[0];
    if sig.checksum != computed {
        return Err(CodecError::ChecksumMismatch {
            stored: sig.checksum,
            computed,
        });
    }
    if sig.last_chunk_size as usize > BLOCK_BYTES {
        return Err(CodecError::InvalidChunkSize(sig.last_chunk_size));
    }

    Ok(payload + sig.last_chunk_size as usize - BLOCK_BYTES)
}

/// Size of the encoded form of `src_bytes` plaintext bytes.
pub fn encoded_len(src_bytes: usize) -> usize {
    let padded = src_bytes.div_ceil(BLOCK_BYTES) * BLOCK_BYTES;
    padded + SIGNATURE_SIZE
}

/// Encoding is not implemented; the vault never writes saves.
pub fn encode(_buf: &mut [u8], _password: &str) -> Result<usize, CodecError> {
    Err(CodecError::EncodeUnsupported)
}
