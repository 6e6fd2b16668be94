//! Item tables loaded from a `txtdata` directory.
//!
//! Four files make up one load: base items, uniques, prefixes and suffixes.
//! A load builds every table first and swaps them in only when all four
//! parsed, so a failed reload leaves the previous tables untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::tsv::{read_tsv_file, TsvRow, TsvTable};
use super::types::{AffixItemType, Alignment, ItemMiscId, ItemType};
use super::DbError;

pub const ITEMDAT_FILE: &str = "itemdat.tsv";
pub const UNIQUE_ITEMDAT_FILE: &str = "unique_itemdat.tsv";
pub const PREFIXES_FILE: &str = "item_prefixes.tsv";
pub const SUFFIXES_FILE: &str = "item_suffixes.tsv";

const ITEM_COLUMNS: &[&str] = &[
    "name",
    "itemType",
    "miscId",
    "uniqueBaseItem",
    "minStrength",
    "minMagic",
    "minDexterity",
];
const UNIQUE_COLUMNS: &[&str] = &["name", "uniqueBaseItem", "minLevel"];
const AFFIX_COLUMNS: &[&str] = &["name", "minLevel", "chance", "itemTypes", "alignment"];

/// Row of `itemdat.tsv`. `mapping_id` is the row position and is what the
/// packed item index refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseItemRow {
    pub mapping_id: usize,
    pub item_type: ItemType,
    pub misc_id: ItemMiscId,
    /// Shared with [`UniqueItemRow::unique_base_item`]; None when the row has no unique base.
    pub unique_base_item: Option<u32>,
    pub name: String,
    pub short_name: String,
    pub min_monster_level: i32,
    pub durability: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub min_armor: i32,
    pub max_armor: i32,
    pub min_strength: i32,
    pub min_magic: i32,
    pub min_dexterity: i32,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueItemRow {
    pub mapping_id: usize,
    pub unique_base_item: Option<u32>,
    pub name: String,
    pub min_level: i32,
    pub value: i32,
}

/// Row of `item_prefixes.tsv` / `item_suffixes.tsv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRow {
    pub name: String,
    pub min_level: i32,
    pub chance: i32,
    pub item_types: AffixItemType,
    pub alignment: Alignment,
    pub min_val: i32,
    pub max_val: i32,
    pub mult_val: i32,
    /// False for affixes that only make an item worse. Defaults to true.
    pub useful: bool,
}

#[derive(Debug, Default)]
struct Tables {
    items: Vec<BaseItemRow>,
    uniques: Vec<UniqueItemRow>,
    prefixes: Vec<AffixRow>,
    suffixes: Vec<AffixRow>,
}

/// Allocates the integer ids shared by base items and uniques, in
/// first-seen order.
#[derive(Default)]
struct UniqueBaseIds(HashMap<String, u32>);

impl UniqueBaseIds {
    fn resolve(&mut self, token: &str) -> Option<u32> {
        if token.is_empty() || token.eq_ignore_ascii_case("none") {
            return None;
        }
        let next = self.0.len() as u32;
        Some(*self.0.entry(token.to_string()).or_insert(next))
    }
}

/// The loaded item tables. Construct once, load, then share by reference.
#[derive(Debug, Default)]
pub struct ItemDb {
    tables: Option<Tables>,
    txtdata_dir: Option<PathBuf>,
    generation: u64,
}

impl ItemDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// New store loaded from `dir`.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self, DbError> {
        let mut db = Self::new();
        db.load_from_directory(dir)?;
        Ok(db)
    }

    /// Loads all four tables from `dir`. On error the store keeps whatever
    /// it held before the call.
    pub fn load_from_directory(&mut self, dir: impl AsRef<Path>) -> Result<(), DbError> {
        let dir = dir.as_ref();
        match load_tables(dir) {
            Ok(tables) => {
                tracing::info!(
                    "[item_db] read done items={} uniques={} prefixes={} suffixes={}",
                    tables.items.len(),
                    tables.uniques.len(),
                    tables.prefixes.len(),
                    tables.suffixes.len()
                );
                self.tables = Some(tables);
                self.txtdata_dir = Some(dir.to_path_buf());
                self.generation += 1;
                Ok(())
            }
            Err(e) => {
                tracing::error!("[item_db] load failed: {e}");
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.tables.is_some()
    }

    /// Directory of the last successful load.
    pub fn txtdata_dir(&self) -> Option<&Path> {
        self.txtdata_dir.as_deref()
    }

    /// Bumped by every successful load. Mapping ids from different
    /// generations must not be mixed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn item(&self, mapping_id: usize) -> Option<&BaseItemRow> {
        self.items().get(mapping_id)
    }

    pub fn unique(&self, index: usize) -> Option<&UniqueItemRow> {
        self.uniques().get(index)
    }

    pub fn prefix(&self, index: usize) -> Option<&AffixRow> {
        self.prefixes().get(index)
    }

    pub fn suffix(&self, index: usize) -> Option<&AffixRow> {
        self.suffixes().get(index)
    }

    pub fn items(&self) -> &[BaseItemRow] {
        self.tables.as_ref().map(|t| t.items.as_slice()).unwrap_or_default()
    }

    pub fn uniques(&self) -> &[UniqueItemRow] {
        self.tables.as_ref().map(|t| t.uniques.as_slice()).unwrap_or_default()
    }

    pub fn prefixes(&self) -> &[AffixRow] {
        self.tables.as_ref().map(|t| t.prefixes.as_slice()).unwrap_or_default()
    }

    pub fn suffixes(&self) -> &[AffixRow] {
        self.tables.as_ref().map(|t| t.suffixes.as_slice()).unwrap_or_default()
    }
}

fn read_table(dir: &Path, file: &str, required: &[&'static str]) -> Result<TsvTable, DbError> {
    let path = dir.join(file);
    let table = read_tsv_file(&path)?;
    if let Some(column) = required.iter().copied().find(|c| !table.has_column(c)) {
        return Err(DbError::MissingColumn { path, column });
    }
    Ok(table)
}

fn load_tables(dir: &Path) -> Result<Tables, DbError> {
    let item_table = read_table(dir, ITEMDAT_FILE, ITEM_COLUMNS)?;
    let unique_table = read_table(dir, UNIQUE_ITEMDAT_FILE, UNIQUE_COLUMNS)?;
    let prefix_table = read_table(dir, PREFIXES_FILE, AFFIX_COLUMNS)?;
    let suffix_table = read_table(dir, SUFFIXES_FILE, AFFIX_COLUMNS)?;

    // Base items allocate unique-base ids first; uniques reuse them and
    // allocate only for bases no item row names.
    let mut ids = UniqueBaseIds::default();
    let items: Vec<BaseItemRow> = item_table
        .rows
        .iter()
        .enumerate()
        .map(|(mapping_id, row)| base_item_row(mapping_id, row, &mut ids))
        .collect();
    let uniques: Vec<UniqueItemRow> = unique_table
        .rows
        .iter()
        .enumerate()
        .map(|(mapping_id, row)| UniqueItemRow {
            mapping_id,
            unique_base_item: ids.resolve(row.get("uniqueBaseItem")),
            name: row.get("name").to_string(),
            min_level: row.get_int("minLevel").unwrap_or(0),
            value: row.get_int("value").unwrap_or(0),
        })
        .collect();

    Ok(Tables {
        items,
        uniques,
        prefixes: prefix_table.rows.iter().map(affix_row).collect(),
        suffixes: suffix_table.rows.iter().map(affix_row).collect(),
    })
}

fn base_item_row(mapping_id: usize, row: &TsvRow, ids: &mut UniqueBaseIds) -> BaseItemRow {
    let int = |key: &str| row.get_int(key).unwrap_or(0);
    BaseItemRow {
        mapping_id,
        item_type: ItemType::from_column(row.get("itemType")),
        misc_id: ItemMiscId::from_column(row.get("miscId")),
        unique_base_item: ids.resolve(row.get("uniqueBaseItem")),
        name: row.get("name").to_string(),
        short_name: row.get("shortName").to_string(),
        min_monster_level: int("minMonsterLevel"),
        durability: int("durability"),
        min_damage: int("minDamage"),
        max_damage: int("maxDamage"),
        min_armor: int("minArmor"),
        max_armor: int("maxArmor"),
        min_strength: int("minStrength"),
        min_magic: int("minMagic"),
        min_dexterity: int("minDexterity"),
        value: int("value"),
    }
}

fn affix_row(row: &TsvRow) -> AffixRow {
    let int = |key: &str| row.get_int(key).unwrap_or(0);
    AffixRow {
        name: row.get("name").to_string(),
        min_level: int("minLevel"),
        chance: int("chance"),
        item_types: AffixItemType::from_tokens(row.get_list("itemTypes")),
        alignment: Alignment::from_column(row.get("alignment")),
        min_val: int("minVal"),
        max_val: int("maxVal"),
        mult_val: int("multVal"),
        useful: row.get_bool("useful", true),
    }
}
