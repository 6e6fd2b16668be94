//! Header of the unpacked shared-stash files (`spstashitems`, `mpstashitems`).

use bytes::Buf;

/// version (u8) + gold (u32 LE) + pages (u32 LE).
pub const STASH_HEADER_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StashSummary {
    pub version: u8,
    pub gold: u32,
    pub pages: u32,
}

impl StashSummary {
    /// Reads the header at the front of `bytes`; None on a short read.
    pub fn parse(mut bytes: &[u8]) -> Option<Self> {
        if bytes.remaining() < STASH_HEADER_LEN {
            return None;
        }
        Some(Self {
            version: bytes.get_u8(),
            gold: bytes.get_u32_le(),
            pages: bytes.get_u32_le(),
        })
    }
}
