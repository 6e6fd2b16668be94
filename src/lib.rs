//! dvault - Diablo save vault
//!
//! Reads legacy Diablo / Hellfire save games and recovers a readable identity
//! (name, affixes, quality, requirements) for every stored item.
//! Read-only: nothing in this crate writes save data.

// ============================================
// Save data
// ============================================

/// Save-game stream cipher and its SHA-1 variant
pub mod crypt;
/// Byte-exact player/item records and stash headers
pub mod save;

// ============================================
// Game data & item regeneration
// ============================================

/// TSV item tables (itemdat, uniques, prefixes, suffixes)
pub mod database;
/// Replays the legacy item RNG to name packed items
pub mod regen;

// ============================================
// Workspace
// ============================================

/// Tool configuration (replaces the GUI settings store)
pub mod config;
/// Save-directory scanning and item listing
pub mod workspace;
