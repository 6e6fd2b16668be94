//! Diablo's SHA-1 variant.
//!
//! Same round structure and constants as SHA-1, with two deviations the save
//! codec depends on:
//! - the circular shift fills with ones when the sign bit is set, because the
//!   game shifted a signed integer;
//! - the message schedule has no 1-bit rotate.
//!
//! There is no padding, length suffix or finalization. [`ShaContext::update`]
//! runs one compression over exactly 16 words and [`ShaContext::result`] reads
//! the running state without touching it.
//!
//! Do not "fix" either deviation: every save ever written depends on them.

/// Words per compression block.
pub const BLOCK_WORDS: usize = 16;
/// Bytes per compression block.
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 4;
/// Words in the state / digest.
pub const DIGEST_WORDS: usize = 5;

const INITIAL_STATE: [u32; DIGEST_WORDS] = [
    0x6745_2301,
    0xEFCD_AB89,
    0x98BA_DCFE,
    0x1032_5476,
    0xC3D2_E1F0,
];

/// Running compression state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaContext {
    state: [u32; DIGEST_WORDS],
}

impl ShaContext {
    pub fn new() -> Self {
        Self { state: INITIAL_STATE }
    }

    /// Digest of everything fed so far. Does not mutate the context.
    pub fn result(&self) -> [u32; DIGEST_WORDS] {
        self.state
    }

    /// Feeds one 16-word block through the compression function.
    pub fn update(&mut self, block: &[u32; BLOCK_WORDS]) {
        let mut w = [0u32; 80];
        w[..BLOCK_WORDS].copy_from_slice(block);
        for i in BLOCK_WORDS..80 {
            // Standard SHA-1 rotates this left by one. The legacy schedule does not.
            w[i] = w[i - 16] ^ w[i - 14] ^ w[i - 8] ^ w[i - 3];
        }

        let [mut a, mut b, mut c, mut d, mut e] = self.state;
        for (i, &wi) in w.iter().enumerate() {
            let (f, k) = match i {
                0..=19 => ((b & c) | (!b & d), 0x5A82_7999),
                20..=39 => (b ^ c ^ d, 0x6ED9_EBA1),
                40..=59 => ((b & c) | (b & d) | (c & d), 0x8F1B_BCDC),
                _ => (b ^ c ^ d, 0xCA62_C1D6),
            };
            let temp = circular_shift(a, 5)
                .wrapping_add(f)
                .wrapping_add(e)
                .wrapping_add(wi)
                .wrapping_add(k);
            e = d;
            d = c;
            c = circular_shift(b, 30);
            b = a;
            a = temp;
        }

        for (s, v) in self.state.iter_mut().zip([a, b, c, d, e]) {
            *s = s.wrapping_add(v);
        }
    }
}

impl Default for ShaContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Left "rotate" as the game implemented it.
///
/// With the sign bit set the high bits come out as ones (arithmetic shift of a
/// signed word) instead of carrying the rotated-out bits.
fn circular_shift(word: u32, bits: u32) -> u32 {
    if word & 0x8000_0000 != 0 {
        return (u32::MAX << bits) | (word >> (32 - bits));
    }
    word.rotate_left(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_shift_positive_is_rotate() {
        assert_eq!(circular_shift(0x1234_5678, 5), 0x468A_CF02);
        assert_eq!(circular_shift(0x1234_5678, 30), 0x1234_5678u32.rotate_left(30));
    }

    #[test]
    fn test_circular_shift_sign_bit_fills_ones() {
        // A real rotate would give 0x00000030.
        assert_eq!(circular_shift(0x8000_0001, 5), 0xFFFF_FFF0);
        assert_ne!(circular_shift(0x8000_0001, 5), 0x8000_0001u32.rotate_left(5));
    }

    #[test]
    fn test_zero_block_digest() {
        let mut ctx = ShaContext::new();
        ctx.update(&[0u32; BLOCK_WORDS]);
        assert_eq!(
            ctx.result(),
            [0x96E5_0BD4, 0x09F4_F994, 0x7CA6_C196, 0xF341_3260, 0x0F9D_83E3]
        );
    }

    #[test]
    fn test_result_does_not_mutate() {
        let mut ctx = ShaContext::new();
        ctx.update(&[7u32; BLOCK_WORDS]);
        let first = ctx.result();
        let second = ctx.result();
        assert_eq!(first, second);

        let mut advanced = ctx;
        advanced.update(&[7u32; BLOCK_WORDS]);
        assert_ne!(advanced.result(), first);
    }

    #[test]
    fn test_fresh_context_result_is_initial_state() {
        assert_eq!(ShaContext::default().result(), INITIAL_STATE);
    }
}
