//! Shared enums for the affix model

use serde::{Deserialize, Serialize};

/// Damage types a modifier can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
    Chaos,
}

/// How a modifier's value combines with the stat it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Added directly to the base value
    Flat,
    /// Summed with other increases, then applied once
    Increased,
    /// Multiplies the result independently
    More,
    /// Negative increased
    Reduced,
    /// Negative more
    Less,
}

/// Whether a modifier alters the item's own base stats or the character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierScope {
    Local,
    Global,
}

/// Which affix list a template fills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    #[default]
    Prefix,
    Suffix,
    /// Item families that do not distinguish prefixes from suffixes
    Unified,
}

/// Weapon handedness restriction on a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    #[default]
    Both,
    OneHand,
    TwoHand,
}

/// Item rarity, always derived from the affix lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Normal,
    Magic,
    Rare,
    Unique,
}

impl Rarity {
    /// Derive rarity from the random affix counts
    pub fn from_affix_counts(prefixes: usize, suffixes: usize, is_unique: bool) -> Self {
        if is_unique {
            return Rarity::Unique;
        }
        match prefixes + suffixes {
            0 => Rarity::Normal,
            1..=2 => Rarity::Magic,
            _ => Rarity::Rare,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Normal => "Normal",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Unique => "Unique",
        }
    }
}

/// Broad item category; the first level of the content pool tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Weapon,
    Armour,
    Jewellery,
    /// Puzzle-piece trinkets with a unified affix pool
    Trinket,
}

impl ItemCategory {
    /// Whether items of this category draw from one unified pool
    pub fn uses_unified_pool(&self) -> bool {
        matches!(self, ItemCategory::Trinket)
    }
}

/// Closed set of stat families used by the compatibility rules
///
/// Families replace substring matching on stat names: every modifier is
/// authored with its family, and the scope table in [`crate::compat`] matches
/// on this enum exhaustively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatFamily {
    PhysicalDamage,
    ElementalDamage,
    ChaosDamage,
    CriticalChance,
    CriticalMultiplier,
    AttackSpeed,
    CastSpeed,
    Accuracy,
    Armour,
    Evasion,
    EnergyShield,
    BlockChance,
    Life,
    Mana,
    Attributes,
    Resistance,
    Leech,
    MovementSpeed,
    ItemFind,
    #[default]
    Other,
}

impl StatFamily {
    /// Families that only roll as Local on weapons; their Global versions are
    /// reserved for armour and jewellery
    pub fn is_weapon_local_only(&self) -> bool {
        matches!(
            self,
            StatFamily::PhysicalDamage
                | StatFamily::ElementalDamage
                | StatFamily::CriticalChance
                | StatFamily::AttackSpeed
                | StatFamily::CastSpeed
        )
    }
}

/// The three core attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
}

impl Attribute {
    pub fn all() -> &'static [Attribute] {
        &[Attribute::Strength, Attribute::Dexterity, Attribute::Intelligence]
    }

    /// Stat name used by modifiers targeting this attribute
    pub fn stat_name(&self) -> &'static str {
        match self {
            Attribute::Strength => STRENGTH,
            Attribute::Dexterity => DEXTERITY,
            Attribute::Intelligence => INTELLIGENCE,
        }
    }
}

pub const STRENGTH: &str = "Strength";
pub const DEXTERITY: &str = "Dexterity";
pub const INTELLIGENCE: &str = "Intelligence";
/// Synthetic stat produced by the whole-attribute-set merge
pub const ALL_ATTRIBUTES: &str = "AllAttributes";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_from_counts() {
        assert_eq!(Rarity::from_affix_counts(0, 0, false), Rarity::Normal);
        assert_eq!(Rarity::from_affix_counts(1, 0, false), Rarity::Magic);
        assert_eq!(Rarity::from_affix_counts(1, 1, false), Rarity::Magic);
        assert_eq!(Rarity::from_affix_counts(2, 1, false), Rarity::Rare);
        assert_eq!(Rarity::from_affix_counts(3, 3, false), Rarity::Rare);
        assert_eq!(Rarity::from_affix_counts(0, 0, true), Rarity::Unique);
        assert_eq!(Rarity::from_affix_counts(3, 3, true), Rarity::Unique);
    }

    #[test]
    fn test_weapon_local_only_families() {
        assert!(StatFamily::PhysicalDamage.is_weapon_local_only());
        assert!(StatFamily::CastSpeed.is_weapon_local_only());
        assert!(!StatFamily::Life.is_weapon_local_only());
        assert!(!StatFamily::Armour.is_weapon_local_only());
    }
}
