//! The 16-bit `create_info` field stored with every item.

pub const CF_LEVEL: u16 = (1 << 6) - 1;
pub const CF_ONLYGOOD: u16 = 1 << 6;
pub const CF_UPER15: u16 = 1 << 7;
pub const CF_UPER1: u16 = 1 << 8;
pub const CF_UNIQUE: u16 = 1 << 9;
pub const CF_SMITH: u16 = 1 << 10;
pub const CF_SMITHPREMIUM: u16 = 1 << 11;
pub const CF_BOY: u16 = 1 << 12;
pub const CF_WITCH: u16 = 1 << 13;
pub const CF_UIDOFFSET: u16 = ((1 << 4) - 1) << 1;
pub const CF_PREGEN: u16 = 1 << 15;

/// Where an item came from. At most one vendor flag is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    Dropped,
    SmithPremium,
    Boy,
    Witch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateInfo {
    pub raw: u16,
    pub level: i32,
    /// Requested "only good" affixes. Vendor stock always asks for it.
    pub only_good: bool,
    pub uper15: bool,
    pub uper1: bool,
    pub unique: bool,
    pub unique_offset: usize,
    pub source: ItemSource,
}

impl CreateInfo {
    pub fn decode(raw: u16) -> Self {
        let source = if raw & CF_SMITHPREMIUM != 0 {
            ItemSource::SmithPremium
        } else if raw & CF_BOY != 0 {
            ItemSource::Boy
        } else if raw & CF_WITCH != 0 {
            ItemSource::Witch
        } else {
            ItemSource::Dropped
        };
        Self {
            raw,
            level: i32::from(raw & CF_LEVEL),
            only_good: raw & (CF_ONLYGOOD | CF_SMITHPREMIUM | CF_BOY | CF_WITCH) != 0,
            uper15: raw & CF_UPER15 != 0,
            uper1: raw & CF_UPER1 != 0,
            unique: raw & CF_UNIQUE != 0,
            unique_offset: usize::from((raw & CF_UIDOFFSET) >> 1),
            source,
        }
    }

    /// Items with no creation info are plain base items.
    pub fn is_plain(&self) -> bool {
        self.raw == 0
    }
}
