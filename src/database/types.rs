//! Enumerations parsed from the textual table columns.
//!
//! Parsing ignores case, underscores and spaces, so `LightArmor`,
//! `light_armor` and `LIGHT ARMOR` are the same value. Unrecognised text maps
//! to the type's neutral default instead of failing the load.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemType {
    #[default]
    None,
    Misc,
    Sword,
    Axe,
    Bow,
    Mace,
    Shield,
    LightArmor,
    Helm,
    MediumArmor,
    HeavyArmor,
    Staff,
    Gold,
    Ring,
    Amulet,
}

impl ItemType {
    pub fn from_column(s: &str) -> Self {
        match normalize(s).as_str() {
            "misc" => Self::Misc,
            "sword" => Self::Sword,
            "axe" => Self::Axe,
            "bow" => Self::Bow,
            "mace" => Self::Mace,
            "shield" => Self::Shield,
            "lightarmor" => Self::LightArmor,
            "helm" => Self::Helm,
            "mediumarmor" => Self::MediumArmor,
            "heavyarmor" => Self::HeavyArmor,
            "staff" => Self::Staff,
            "gold" => Self::Gold,
            "ring" => Self::Ring,
            "amulet" => Self::Amulet,
            _ => Self::None,
        }
    }

    /// Which affix group can roll on this category.
    pub fn affix_type(self) -> AffixItemType {
        match self {
            Self::Sword | Self::Axe | Self::Mace => AffixItemType::WEAPON,
            Self::Bow => AffixItemType::BOW,
            Self::Shield => AffixItemType::SHIELD,
            Self::LightArmor | Self::Helm | Self::MediumArmor | Self::HeavyArmor => {
                AffixItemType::ARMOR
            }
            Self::Staff => AffixItemType::STAFF,
            Self::Ring | Self::Amulet => AffixItemType::MISC,
            _ => AffixItemType::NONE,
        }
    }
}

/// Subset of misc ids that affects item generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemMiscId {
    #[default]
    None,
    Staff,
    Ring,
    Amulet,
    Book,
    Ear,
}

impl ItemMiscId {
    pub fn from_column(s: &str) -> Self {
        match normalize(s).as_str() {
            "staff" => Self::Staff,
            "ring" => Self::Ring,
            "amulet" => Self::Amulet,
            "book" => Self::Book,
            "ear" => Self::Ear,
            _ => Self::None,
        }
    }
}

/// "Good or evil" of an affix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Any,
    Evil,
    Good,
}

impl Alignment {
    pub fn from_column(s: &str) -> Self {
        match normalize(s).as_str() {
            "good" | "goegood" => Self::Good,
            "evil" | "goeevil" => Self::Evil,
            _ => Self::Any,
        }
    }

    /// Good and evil exclude each other; `Any` conflicts with nothing.
    pub fn conflicts_with(self, other: Alignment) -> bool {
        matches!(
            (self, other),
            (Self::Good, Self::Evil) | (Self::Evil, Self::Good)
        )
    }
}

/// Bitmask of item groups an affix applies to.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AffixItemType(u8);

impl AffixItemType {
    pub const NONE: Self = Self(0);
    pub const MISC: Self = Self(1 << 0);
    pub const BOW: Self = Self(1 << 1);
    pub const STAFF: Self = Self(1 << 2);
    pub const WEAPON: Self = Self(1 << 3);
    pub const SHIELD: Self = Self(1 << 4);
    pub const ARMOR: Self = Self(1 << 5);

    const NAMES: [(Self, &'static str); 6] = [
        (Self::MISC, "Misc"),
        (Self::BOW, "Bow"),
        (Self::STAFF, "Staff"),
        (Self::WEAPON, "Weapon"),
        (Self::SHIELD, "Shield"),
        (Self::ARMOR, "Armor"),
    ];

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    fn from_token(token: &str) -> Self {
        match normalize(token).as_str() {
            "misc" => Self::MISC,
            "bow" => Self::BOW,
            "staff" => Self::STAFF,
            "weapon" => Self::WEAPON,
            "shield" => Self::SHIELD,
            "armor" => Self::ARMOR,
            _ => Self::NONE,
        }
    }

    /// ORs together every recognised token; unknown tokens add nothing.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        tokens
            .into_iter()
            .fold(Self::NONE, |acc, t| acc | Self::from_token(t))
    }
}

impl BitOr for AffixItemType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AffixItemType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for AffixItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("None");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.intersects(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_parsing() {
        assert_eq!(ItemType::from_column("LightArmor"), ItemType::LightArmor);
        assert_eq!(ItemType::from_column("light_armor"), ItemType::LightArmor);
        assert_eq!(ItemType::from_column("HEAVY ARMOR"), ItemType::HeavyArmor);
        assert_eq!(ItemType::from_column("Sword"), ItemType::Sword);
        assert_eq!(ItemType::from_column("Polearm"), ItemType::None);
        assert_eq!(ItemType::from_column(""), ItemType::None);
    }

    #[test]
    fn test_affix_type_mapping() {
        assert_eq!(ItemType::Axe.affix_type(), AffixItemType::WEAPON);
        assert_eq!(ItemType::Helm.affix_type(), AffixItemType::ARMOR);
        assert_eq!(ItemType::Amulet.affix_type(), AffixItemType::MISC);
        assert_eq!(ItemType::Staff.affix_type(), AffixItemType::STAFF);
        assert!(ItemType::Gold.affix_type().is_none());
        assert!(ItemType::Misc.affix_type().is_none());
    }

    #[test]
    fn test_misc_id_parsing() {
        assert_eq!(ItemMiscId::from_column("Staff"), ItemMiscId::Staff);
        assert_eq!(ItemMiscId::from_column("FullHeal"), ItemMiscId::None);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(Alignment::from_column("Good"), Alignment::Good);
        assert_eq!(Alignment::from_column("GOE_EVIL"), Alignment::Evil);
        assert_eq!(Alignment::from_column("whatever"), Alignment::Any);
        assert!(Alignment::Good.conflicts_with(Alignment::Evil));
        assert!(!Alignment::Good.conflicts_with(Alignment::Any));
        assert!(!Alignment::Any.conflicts_with(Alignment::Evil));
    }

    #[test]
    fn test_affix_mask() {
        let mask = AffixItemType::from_tokens(["Weapon", "bow", "Nonsense"]);
        assert_eq!(mask, AffixItemType::WEAPON | AffixItemType::BOW);
        assert!(mask.intersects(AffixItemType::BOW));
        assert!(!mask.intersects(AffixItemType::ARMOR));
        assert_eq!(format!("{mask:?}"), "Bow|Weapon");
        assert!(AffixItemType::from_tokens(Vec::<&str>::new()).is_none());
    }
}
