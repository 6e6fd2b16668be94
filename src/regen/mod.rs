//! Item regeneration.
//!
//! A packed item stores only its base index, seed and creation flags. The
//! display identity (unique name, magic affixes) is rebuilt here by replaying
//! the game's RNG from the seed in the order the game consumed it.
//!
//! Nothing in this module fails: missing data degrades to a plainer view.

pub mod affix;
pub mod create_info;
pub mod rng;
pub mod unique;

use serde::{Deserialize, Serialize};

use crate::database::{BaseItemRow, ItemDb, ItemMiscId};
use crate::save::{ItemSlot, IDX_NONE};
pub use create_info::{CreateInfo, ItemSource};
pub use rng::DiabloRng;

/// Upper bound applied to the lower end of every affix level range.
pub const MAX_MIN_LEVEL: i32 = 25;

/// Display identity of one item. Recomputed on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnpackedItemView {
    pub name: String,
    pub base_name: String,
    pub quality: String,
    pub affixes: String,
    pub req_str: i32,
    pub req_mag: i32,
    pub req_dex: i32,
    pub ilvl: i32,
}

/// Content set the item index was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentVariant {
    /// Original game: indices are shifted to the Hellfire table before lookup.
    Diablo,
    /// Indices match the loaded table directly.
    Hellfire,
}

/// How to choose a [`ContentVariant`] for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantPolicy {
    /// Follow the record's own Hellfire flag.
    #[default]
    Auto,
    Diablo,
    Hellfire,
}

impl VariantPolicy {
    pub fn resolve(self, record_is_hellfire: bool) -> ContentVariant {
        match self {
            VariantPolicy::Auto if record_is_hellfire => ContentVariant::Hellfire,
            VariantPolicy::Auto => ContentVariant::Diablo,
            VariantPolicy::Diablo => ContentVariant::Diablo,
            VariantPolicy::Hellfire => ContentVariant::Hellfire,
        }
    }
}

/// Inclusive level window affixes must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    pub min: i32,
    pub max: i32,
}

impl LevelRange {
    fn from_base_level(iblvl: i32) -> Self {
        Self {
            min: iblvl / 2,
            max: iblvl,
        }
    }
}

/// Maps an original-game item index onto the Hellfire table.
pub fn remap_item_index(idx: u16) -> u16 {
    // Sorcerer's staff moved to the end of the table.
    if idx == 5 {
        return 166;
    }
    let mut i = idx;
    if i >= 156 {
        i = i.wrapping_add(5);
    }
    if i >= 88 {
        i = i.wrapping_add(1);
    }
    if i >= 83 {
        i = i.wrapping_add(4);
    }
    i
}

fn is_jewelry_or_staff(misc: ItemMiscId) -> bool {
    matches!(misc, ItemMiscId::Staff | ItemMiscId::Ring | ItemMiscId::Amulet)
}

/// Base level of a dropped item. The second roll only happens when the
/// first one misses.
fn item_base_level(rng: &mut DiabloRng, ci: &CreateInfo, misc: ItemMiscId) -> i32 {
    let mut iblvl = -1;
    if rng.generate_rnd(100) <= 10
        || rng.generate_rnd(100) <= ci.level
        || ci.only_good
        || is_jewelry_or_staff(misc)
    {
        iblvl = ci.level;
    }
    if ci.uper15 {
        iblvl = ci.level + 4;
    }
    iblvl
}

/// Consumes the source-specific draws and returns the affix level window.
/// Expects the attribute draw to have been taken already.
pub fn level_range(rng: &mut DiabloRng, ci: &CreateInfo, base: &BaseItemRow) -> LevelRange {
    let lvl = ci.level;
    let mut range = match ci.source {
        ItemSource::SmithPremium => {
            rng.discard(2);
            LevelRange { min: lvl / 2, max: lvl }
        }
        ItemSource::Boy => {
            rng.discard(2);
            LevelRange { min: lvl, max: lvl * 2 }
        }
        ItemSource::Witch => {
            rng.discard(2);
            let mut iblvl = -1;
            if rng.generate_rnd(100) <= 5 {
                iblvl = 2 * lvl;
            }
            if iblvl == -1 && base.misc_id == ItemMiscId::Staff {
                iblvl = 2 * lvl;
            }
            LevelRange::from_base_level(iblvl)
        }
        ItemSource::Dropped => {
            let range = LevelRange::from_base_level(item_base_level(rng, ci, base.misc_id));
            // Unique check roll.
            rng.discard(1);
            range
        }
    };
    range.min = range.min.min(MAX_MIN_LEVEL);
    range
}

/// Rebuilds the display identity of `slot`.
///
/// Pure function of its inputs: the same slot, variant and loaded tables
/// always give the same view.
pub fn regenerate(slot: &ItemSlot, variant: ContentVariant, db: &ItemDb) -> UnpackedItemView {
    let mut view = UnpackedItemView::default();
    if slot.mapping_index == IDX_NONE {
        return view;
    }

    let identified = slot.is_identified();
    view.quality = if identified { "identified" } else { "unidentified" }.to_string();

    let mapping_id = match variant {
        ContentVariant::Diablo => remap_item_index(slot.mapping_index),
        ContentVariant::Hellfire => slot.mapping_index,
    };
    let Some(base) = db.item(usize::from(mapping_id)) else {
        view.name = "(unknown item)".to_string();
        return view;
    };

    view.base_name = base.name.clone();
    view.req_str = base.min_strength;
    view.req_mag = base.min_magic;
    view.req_dex = base.min_dexterity;

    let ci = CreateInfo::decode(slot.create_info);
    view.ilvl = ci.level;
    if ci.is_plain() {
        view.name = base.name.clone();
        return view;
    }

    let mut rng = DiabloRng::new(slot.seed);
    // Attribute roll.
    rng.discard(1);
    let range = level_range(&mut rng, &ci, base);

    if ci.unique {
        if let Some(u) =
            unique::pick_unique_by_offset(db, base.unique_base_item, range.max, ci.unique_offset)
        {
            view.name = if identified { u.name.clone() } else { base.name.clone() };
            view.quality.push_str(", unique");
            view.affixes = "unique".to_string();
            return view;
        }
    }

    let affix_type = base.item_type.affix_type();
    if affix_type.is_none() || range.max < 0 {
        view.name = base.name.clone();
        return view;
    }

    // Affixes are rolled even when unidentified so the view stays in step
    // with what identification would reveal.
    let chosen = affix::choose_prefix_and_suffix(&mut rng, db, range, affix_type, ci.only_good);
    view.name = if identified {
        chosen.item_name(&base.name)
    } else {
        base.name.clone()
    };
    view.quality.push_str(", magic");
    view.affixes = chosen.describe();
    view
}
