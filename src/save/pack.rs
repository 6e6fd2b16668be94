//! On-disk layouts of the `hero` record.
//!
//! MUST match the game's packed structs byte-for-byte: same field order, same
//! widths, no padding, multi-byte fields little-endian. Verified size of
//! `PlayerPack`: 1266 bytes (0x4F2).
//!
//! Fields hold the raw little-endian values; use [`super::record`] for
//! host-order views.
use bytemuck::{Pod, Zeroable};

pub const PLAYER_NAME_LEN: usize = 32;
pub const NUM_INV_LOC: usize = 7;
pub const INV_GRID_CELLS: usize = 40;
pub const MAX_BELT_ITEMS: usize = 8;
pub const SPELL_LEVELS: usize = 37;
pub const SPELL_LEVELS_EXT: usize = 10;

// ── Item ──────────────────────────────────────────────────────────────────────

#[repr(C, packed)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct ItemPack {
    pub seed: u32,
    pub create_info: u16,
    pub idx: u16,
    pub identified: u8,
    pub durability: u8,
    pub max_durability: u8,
    pub charges: u8,
    pub max_charges: u8,
    pub value: u16,
    pub buff: u32,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[repr(C, packed)]
#[derive(Copy, Clone)]
pub struct PlayerPack {
    pub low_date_time: u32,
    pub high_date_time: u32,
    pub dest_action: i8,
    pub dest_param1: i8,
    pub dest_param2: i8,
    pub dungeon_level: u8,
    pub px: u8,
    pub py: u8,
    pub targx: u8,
    pub targy: u8,
    pub name: [u8; PLAYER_NAME_LEN],
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
    pub spell_levels: [u8; SPELL_LEVELS],
    pub memorized_spells: u64,
    pub inv_body: [ItemPack; NUM_INV_LOC],
    pub inv_list: [ItemPack; INV_GRID_CELLS],
    pub inv_grid: [i8; INV_GRID_CELLS],
    pub num_inv: u8,
    pub belt: [ItemPack; MAX_BELT_ITEMS],
    pub town_warps: i8,
    pub dungeon_msgs: i8,
    pub level_load: i8,
    pub battle_net: u8,
    pub mana_shield: u8,
    pub dungeon_msgs2: u8,
    pub is_hellfire: i8,
    pub reserved: u8,
    pub reflections: u16,
    pub reserved2: [u8; 2],
    pub spell_levels_ext: [u8; SPELL_LEVELS_EXT],
    pub reserved8: i16,
    pub diablo_kill_level: u32,
    pub difficulty: u32,
    pub dam_ac_flags: u32,
    pub reserved3: [u8; 20],
}

// Safety: every field is an integer or an array of integers / ItemPack, and
// `packed` removes all padding. Implemented by hand because the derive does
// not cover the 37- and 40-element arrays.
unsafe impl Zeroable for PlayerPack {}
unsafe impl Pod for PlayerPack {}

/// Copies a `PlayerPack` out of the front of `bytes`.
/// Returns None if the slice is too short.
pub fn player_pack_from_bytes(bytes: &[u8]) -> Option<PlayerPack> {
    let raw = bytes.get(..std::mem::size_of::<PlayerPack>())?;
    Some(bytemuck::pod_read_unaligned(raw))
}

// ── Size verification tests ───────────────────────────────────────────────────
