//! Item kinds and their base stats

use crate::types::{Handedness, ItemCategory};
use serde::{Deserialize, Serialize};

/// Closed set of item kinds, each with its own base-stat fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Weapon(WeaponBase),
    Armour(ArmourBase),
    Jewellery(JewelleryBase),
    Trinket(TrinketBase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    Sword,
    Axe,
    Mace,
    Dagger,
    Claw,
    Bow,
    Staff,
    Wand,
}

impl WeaponClass {
    pub fn tag(&self) -> &'static str {
        match self {
            WeaponClass::Sword => "sword",
            WeaponClass::Axe => "axe",
            WeaponClass::Mace => "mace",
            WeaponClass::Dagger => "dagger",
            WeaponClass::Claw => "claw",
            WeaponClass::Bow => "bow",
            WeaponClass::Staff => "staff",
            WeaponClass::Wand => "wand",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponBase {
    pub class: WeaponClass,
    /// OneHand or TwoHand
    pub handedness: Handedness,
    #[serde(default)]
    pub physical_min: i32,
    #[serde(default)]
    pub physical_max: i32,
    /// Base critical strike chance in percent
    #[serde(default)]
    pub critical_chance: f64,
    /// Attacks per second
    #[serde(default)]
    pub attack_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmourSlot {
    Helmet,
    BodyArmour,
    Gloves,
    Boots,
    Shield,
}

impl ArmourSlot {
    pub fn tag(&self) -> &'static str {
        match self {
            ArmourSlot::Helmet => "helmet",
            ArmourSlot::BodyArmour => "body_armour",
            ArmourSlot::Gloves => "gloves",
            ArmourSlot::Boots => "boots",
            ArmourSlot::Shield => "shield",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmourBase {
    pub slot: ArmourSlot,
    #[serde(default)]
    pub armour: i32,
    #[serde(default)]
    pub evasion: i32,
    #[serde(default)]
    pub energy_shield: i32,
    /// Block chance in percent (shields)
    #[serde(default)]
    pub block_chance: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JewellerySlot {
    Ring,
    Amulet,
    Belt,
}

impl JewellerySlot {
    pub fn tag(&self) -> &'static str {
        match self {
            JewellerySlot::Ring => "ring",
            JewellerySlot::Amulet => "amulet",
            JewellerySlot::Belt => "belt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JewelleryBase {
    pub slot: JewellerySlot,
}

/// Puzzle-piece trinket; footprint in inventory cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrinketBase {
    #[serde(default = "default_cells")]
    pub width: u8,
    #[serde(default = "default_cells")]
    pub height: u8,
}

impl Default for TrinketBase {
    fn default() -> Self {
        TrinketBase { width: 1, height: 1 }
    }
}

fn default_cells() -> u8 {
    1
}

/// Base stats a Local modifier or a `<x>_base` tag can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseStat {
    PhysicalDamage,
    CriticalChance,
    AttackSpeed,
    Armour,
    Evasion,
    EnergyShield,
    BlockChance,
}

impl BaseStat {
    /// Parse the `<x>` part of a `<x>_base` compatibility tag
    pub fn from_key(key: &str) -> Option<BaseStat> {
        match key {
            "physicaldamage" => Some(BaseStat::PhysicalDamage),
            "critchance" => Some(BaseStat::CriticalChance),
            "attackspeed" => Some(BaseStat::AttackSpeed),
            "armour" => Some(BaseStat::Armour),
            "evasion" => Some(BaseStat::Evasion),
            "energyshield" => Some(BaseStat::EnergyShield),
            "blockchance" => Some(BaseStat::BlockChance),
            _ => None,
        }
    }
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Weapon(_) => ItemCategory::Weapon,
            ItemKind::Armour(_) => ItemCategory::Armour,
            ItemKind::Jewellery(_) => ItemCategory::Jewellery,
            ItemKind::Trinket(_) => ItemCategory::Trinket,
        }
    }

    /// Value of a base stat; 0 when the kind has no such stat
    pub fn base_stat(&self, stat: BaseStat) -> f64 {
        match (self, stat) {
            (ItemKind::Weapon(w), BaseStat::PhysicalDamage) => w.physical_max as f64,
            (ItemKind::Weapon(w), BaseStat::CriticalChance) => w.critical_chance,
            (ItemKind::Weapon(w), BaseStat::AttackSpeed) => w.attack_speed,
            (ItemKind::Armour(a), BaseStat::Armour) => a.armour as f64,
            (ItemKind::Armour(a), BaseStat::Evasion) => a.evasion as f64,
            (ItemKind::Armour(a), BaseStat::EnergyShield) => a.energy_shield as f64,
            (ItemKind::Armour(a), BaseStat::BlockChance) => a.block_chance as f64,
            _ => 0.0,
        }
    }

    /// Static tags implied by the kind itself
    pub fn static_tags(&self) -> Vec<&'static str> {
        match self {
            ItemKind::Weapon(w) => {
                let hands = match w.handedness {
                    Handedness::TwoHand => "two_hand",
                    _ => "one_hand",
                };
                vec!["weapon", w.class.tag(), hands]
            }
            ItemKind::Armour(a) => vec!["armour", a.slot.tag()],
            ItemKind::Jewellery(j) => vec!["jewellery", j.slot.tag()],
            ItemKind::Trinket(_) => vec!["trinket"],
        }
    }

    pub fn handedness(&self) -> Option<Handedness> {
        match self {
            ItemKind::Weapon(w) => Some(w.handedness),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tags() {
        let axe = ItemKind::Weapon(WeaponBase {
            class: WeaponClass::Axe,
            handedness: Handedness::TwoHand,
            physical_min: 20,
            physical_max: 40,
            critical_chance: 5.0,
            attack_speed: 1.2,
        });
        assert_eq!(axe.static_tags(), vec!["weapon", "axe", "two_hand"]);

        let shield = ItemKind::Armour(ArmourBase {
            slot: ArmourSlot::Shield,
            armour: 30,
            evasion: 0,
            energy_shield: 0,
            block_chance: 24,
        });
        assert!(shield.static_tags().contains(&"shield"));
    }

    #[test]
    fn test_base_stat_lookup() {
        let ring = ItemKind::Jewellery(JewelleryBase { slot: JewellerySlot::Ring });
        assert_eq!(ring.base_stat(BaseStat::PhysicalDamage), 0.0);
        assert_eq!(BaseStat::from_key("energyshield"), Some(BaseStat::EnergyShield));
        assert_eq!(BaseStat::from_key("mana"), None);
    }

    #[test]
    fn test_parse_kind_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: ItemKind,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
kind = { type = "armour", slot = "gloves", evasion = 45 }
"#,
        )
        .unwrap();
        assert_eq!(parsed.kind.base_stat(BaseStat::Evasion), 45.0);
        assert_eq!(parsed.kind.category(), ItemCategory::Armour);
    }
}
