use crate::database::{ItemDb, UniqueItemRow};

/// Picks a unique for a base item without drawing from the RNG.
///
/// Eligible rows share the base's unique id and have `min_level <= max_level`,
/// kept in table order. `offset` counts back from the last eligible row.
/// None when nothing is eligible or the offset is past the front.
pub fn pick_unique_by_offset(
    db: &ItemDb,
    unique_base_item: Option<u32>,
    max_level: i32,
    offset: usize,
) -> Option<&UniqueItemRow> {
    let base = unique_base_item?;
    let valid: Vec<&UniqueItemRow> = (0..)
        .map_while(|i| db.unique(i))
        .filter(|u| u.unique_base_item == Some(base) && u.min_level <= max_level)
        .collect();
    let from_end = valid.len().checked_sub(1)?.checked_sub(offset)?;
    valid.get(from_end).copied()
}
