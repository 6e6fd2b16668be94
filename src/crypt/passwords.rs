//! Fixed save passwords and the order they are tried in.

use super::{codec, CodecError};

pub const PASSWORD_SINGLE: &str = "xrgyrkj1";
pub const PASSWORD_MULTI: &str = "szqnlsk1";
pub const PASSWORD_SPAWN_SINGLE: &str = "adslhfb1";
pub const PASSWORD_SPAWN_MULTI: &str = "lshbkfg1";

/// Fallback order after the preferred password.
pub const ALL_PASSWORDS: [&str; 4] = [
    PASSWORD_SINGLE,
    PASSWORD_MULTI,
    PASSWORD_SPAWN_SINGLE,
    PASSWORD_SPAWN_MULTI,
];

/// Password most likely to match a save named `stem` (no extension).
pub fn preferred_password(stem: &str) -> &'static str {
    let stem = stem.to_ascii_lowercase();
    if stem.starts_with("multi_") {
        PASSWORD_MULTI
    } else if stem.starts_with("spawn_") {
        PASSWORD_SPAWN_SINGLE
    } else {
        PASSWORD_SINGLE
    }
}

/// Preferred password first, then the rest of [`ALL_PASSWORDS`] in order.
pub fn candidate_passwords(stem: &str) -> Vec<&'static str> {
    let preferred = preferred_password(stem);
    let mut out = Vec::with_capacity(ALL_PASSWORDS.len());
    out.push(preferred);
    out.extend(ALL_PASSWORDS.iter().copied().filter(|pw| *pw != preferred));
    out
}

/// Plaintext recovered from a packed save stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSave {
    pub password: &'static str,
    pub data: Vec<u8>,
}

/// Tries each candidate on a copy of `raw`; the first that decodes wins.
pub fn decode_with_candidates(
    raw: &[u8],
    candidates: &[&'static str],
) -> Result<DecodedSave, CodecError> {
    for &password in candidates {
        let mut buf = raw.to_vec();
        match codec::decode(&mut buf, password) {
            Ok(len) => {
                tracing::debug!("[codec] password '{password}' accepted len={len}");
                buf.truncate(len);
                return Ok(DecodedSave { password, data: buf });
            }
            Err(e) => tracing::debug!("[codec] password '{password}' rejected: {e}"),
        }
    }
    Err(CodecError::NoPasswordMatched {
        tried: candidates.len(),
    })
}

/// Decodes a save stream from a container named `stem`.
pub fn decode_save(raw: &[u8], stem: &str) -> Result<DecodedSave, CodecError> {
    decode_with_candidates(raw, &candidate_passwords(stem))
}
