use std::fmt;

use chrono::{DateTime, Utc};

use super::pack::{
    player_pack_from_bytes, ItemPack, PlayerPack, INV_GRID_CELLS, MAX_BELT_ITEMS, NUM_INV_LOC,
};

/// Packed index meaning "no item".
pub const IDX_NONE: u16 = 0xFFFF;

/// 100ns intervals between 1601-01-01 and 1970-01-01.
const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

/// One packed item slot in host byte order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemSlot {
    pub seed: u32,
    pub create_info: u16,
    pub mapping_index: u16,
    pub identified: u8,
    pub durability: u8,
    pub max_durability: u8,
    pub charges: u8,
    pub max_charges: u8,
    pub value: u16,
    pub buff_flags: u32,
}

impl ItemSlot {
    /// Index 0 marks an empty slot; [`IDX_NONE`] is the game's own "no item".
    pub fn is_occupied(&self) -> bool {
        self.mapping_index != 0 && self.mapping_index != IDX_NONE
    }

    pub fn is_identified(&self) -> bool {
        self.identified & 1 != 0
    }
}

impl From<&ItemPack> for ItemSlot {
    fn from(pack: &ItemPack) -> Self {
        Self {
            seed: u32::from_le(pack.seed),
            create_info: u16::from_le(pack.create_info),
            mapping_index: u16::from_le(pack.idx),
            identified: pack.identified,
            durability: pack.durability,
            max_durability: pack.max_durability,
            charges: pack.charges,
            max_charges: pack.max_charges,
            value: u16::from_le(pack.value),
            buff_flags: u32::from_le(pack.buff),
        }
    }
}

/// Where a slot lives on the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLocation {
    Body(usize),
    Inventory(usize),
    Belt(usize),
}

impl fmt::Display for SlotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotLocation::Body(i) => write!(f, "Body[{i}]"),
            SlotLocation::Inventory(i) => write!(f, "Inventory[{i}]"),
            SlotLocation::Belt(i) => write!(f, "Belt[{i}]"),
        }
    }
}

/// Decoded `hero` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub saved_at: Option<DateTime<Utc>>,
    pub name: String,
    pub class: u8,
    pub base_str: u8,
    pub base_mag: u8,
    pub base_dex: u8,
    pub base_vit: u8,
    pub level: u8,
    pub stat_points: u8,
    pub experience: u32,
    pub gold: i32,
    pub hp_base: i32,
    pub max_hp_base: i32,
    pub mana_base: i32,
    pub max_mana_base: i32,
    pub dungeon_level: u8,
    pub is_hellfire: bool,
    pub difficulty: u32,
    pub body: [ItemSlot; NUM_INV_LOC],
    pub inventory: [ItemSlot; INV_GRID_CELLS],
    pub belt: [ItemSlot; MAX_BELT_ITEMS],
}

impl PlayerRecord {
    /// Decodes the record at the front of `bytes`.
    /// Returns None if the buffer is shorter than a `PlayerPack`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        player_pack_from_bytes(bytes).map(|pack| Self::from(&pack))
    }

    /// Every slot in listing order: body, inventory, belt.
    pub fn slots(&self) -> impl Iterator<Item = (SlotLocation, &ItemSlot)> {
        let body = self.body.iter().enumerate().map(|(i, s)| (SlotLocation::Body(i), s));
        let inv = self
            .inventory
            .iter()
            .enumerate()
            .map(|(i, s)| (SlotLocation::Inventory(i), s));
        let belt = self.belt.iter().enumerate().map(|(i, s)| (SlotLocation::Belt(i), s));
        body.chain(inv).chain(belt)
    }

    /// Occupied slots only.
    pub fn items(&self) -> impl Iterator<Item = (SlotLocation, &ItemSlot)> {
        self.slots().filter(|(_, s)| s.is_occupied())
    }
}

impl From<&PlayerPack> for PlayerRecord {
    fn from(pack: &PlayerPack) -> Self {
        let name_len = pack.name.iter().position(|&b| b == 0).unwrap_or(pack.name.len());
        let body = pack.inv_body;
        let inv = pack.inv_list;
        let belt = pack.belt;
        Self {
            saved_at: filetime_to_utc(
                u32::from_le(pack.low_date_time),
                u32::from_le(pack.high_date_time),
            ),
            name: String::from_utf8_lossy(&pack.name[..name_len]).into_owned(),
            class: pack.class,
            base_str: pack.base_str,
            base_mag: pack.base_mag,
            base_dex: pack.base_dex,
            base_vit: pack.base_vit,
            level: pack.level,
            stat_points: pack.stat_points,
            experience: u32::from_le(pack.experience),
            gold: i32::from_le(pack.gold),
            hp_base: i32::from_le(pack.hp_base),
            max_hp_base: i32::from_le(pack.max_hp_base),
            mana_base: i32::from_le(pack.mana_base),
            max_mana_base: i32::from_le(pack.max_mana_base),
            dungeon_level: pack.dungeon_level,
            is_hellfire: pack.is_hellfire != 0,
            difficulty: u32::from_le(pack.difficulty),
            body: body.map(|p| ItemSlot::from(&p)),
            inventory: inv.map(|p| ItemSlot::from(&p)),
            belt: belt.map(|p| ItemSlot::from(&p)),
        }
    }
}

/// Windows FILETIME (100ns ticks since 1601) to UTC. Zero means "not set".
fn filetime_to_utc(low: u32, high: u32) -> Option<DateTime<Utc>> {
    let ticks = (u64::from(high) << 32) | u64::from(low);
    if ticks == 0 {
        return None;
    }
    let since_unix = ticks.checked_sub(FILETIME_UNIX_EPOCH)?;
    let secs = i64::try_from(since_unix / 10_000_000).ok()?;
    let nanos = (since_unix % 10_000_000) as u32 * 100;
    DateTime::from_timestamp(secs, nanos)
}
