//! Magic prefix / suffix selection.

use super::rng::DiabloRng;
use super::LevelRange;
use crate::database::{AffixItemType, AffixRow, Alignment, ItemDb};

/// Affixes picked for one item. Either slot may stay empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChosenAffixes<'a> {
    pub prefix: Option<&'a AffixRow>,
    pub suffix: Option<&'a AffixRow>,
}

impl ChosenAffixes<'_> {
    /// `[prefix ]base[ of suffix]`
    pub fn item_name(&self, base_name: &str) -> String {
        let mut out = String::new();
        if let Some(p) = self.prefix {
            out.push_str(&p.name);
            out.push(' ');
        }
        out.push_str(base_name);
        if let Some(s) = self.suffix {
            out.push_str(" of ");
            out.push_str(&s.name);
        }
        out
    }

    /// `prefix=X, suffix=Y`, leaving out empty slots.
    pub fn describe(&self) -> String {
        let parts: Vec<String> = [("prefix", self.prefix), ("suffix", self.suffix)]
            .into_iter()
            .filter_map(|(label, row)| row.map(|r| format!("{label}={}", r.name)))
            .collect();
        parts.join(", ")
    }
}

fn is_eligible(affix: &AffixRow, item_type: AffixItemType, range: LevelRange, goe: Alignment) -> bool {
    item_type.intersects(affix.item_types)
        && affix.min_level >= range.min
        && affix.min_level <= range.max
        && !goe.conflicts_with(affix.alignment)
}

/// Weighted pick: every eligible row enters the pool `chance` times. An empty
/// pool returns None without drawing. A negative draw (state at `i32::MIN`)
/// also returns None, after drawing.
pub fn select_affix<'a>(
    rng: &mut DiabloRng,
    affixes: &'a [AffixRow],
    item_type: AffixItemType,
    range: LevelRange,
    goe: Alignment,
) -> Option<&'a AffixRow> {
    let mut pool: Vec<&AffixRow> = Vec::new();
    for affix in affixes
        .iter()
        .filter(|a| is_eligible(a, item_type, range, goe))
    {
        for _ in 0..affix.chance.max(0) {
            pool.push(affix);
        }
    }
    if pool.is_empty() {
        return None;
    }
    let len = i32::try_from(pool.len()).unwrap_or(i32::MAX);
    let pick = rng.generate_rnd(len);
    usize::try_from(pick).ok().and_then(|i| pool.get(i).copied())
}

/// Decides which slots to fill and fills them, prefix first. A chosen
/// prefix pins the alignment the suffix must respect.
pub fn choose_prefix_and_suffix<'a>(
    rng: &mut DiabloRng,
    db: &'a ItemDb,
    range: LevelRange,
    item_type: AffixItemType,
    only_good: bool,
) -> ChosenAffixes<'a> {
    let mut want_prefix = rng.flip_coin(4);
    let mut want_suffix = !rng.flip_coin(3);
    if !want_prefix && !want_suffix {
        if rng.flip_coin(2) {
            want_prefix = true;
        } else {
            want_suffix = true;
        }
    }

    let mut goe = Alignment::Any;
    // Only-good upgrade roll. The tables carry no "bad power" marker, so the
    // result does not change the pools; the draw is still consumed.
    if !only_good {
        rng.discard(1);
    }

    let mut chosen = ChosenAffixes::default();
    if want_prefix {
        chosen.prefix = select_affix(rng, db.prefixes(), item_type, range, goe);
        if let Some(p) = chosen.prefix {
            goe = p.alignment;
        }
    }
    if want_suffix {
        chosen.suffix = select_affix(rng, db.suffixes(), item_type, range, goe);
    }
    chosen
}
