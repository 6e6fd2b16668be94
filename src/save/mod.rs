pub mod pack;
pub mod record;
pub mod stash;

pub use pack::{ItemPack, PlayerPack};
pub use record::{ItemSlot, PlayerRecord, SlotLocation, IDX_NONE};
pub use stash::StashSummary;

/// Internal name of the player record inside a save container.
pub const HERO_ENTRY: &str = "hero";
/// Stash summary files of an unpacked shared stash, with their display labels.
pub const STASH_FILES: [(&str, &str); 2] = [("spstashitems", "SP Stash"), ("mpstashitems", "MP Stash")];
