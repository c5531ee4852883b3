//! Base item catalog loading

use super::ConfigError;
use crate::affix::Affix;
use crate::item::{BaseItem, ItemKind};
use crate::roll::roll_affix;
use crate::seed::derive_seed;
use crate::types::Handedness;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A catalog entry that stamps out fresh Normal items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTemplate {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Rolled once per instance; never counted as random affixes
    #[serde(default)]
    pub implicits: Vec<Affix>,
}

impl BaseTemplate {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        BaseTemplate {
            name: name.into(),
            kind,
            tags: Vec::new(),
            implicits: Vec::new(),
        }
    }

    pub fn with_implicit(mut self, implicit: Affix) -> Self {
        self.implicits.push(implicit);
        self
    }

    /// Create a Normal item at `item_level`, rolling implicits from `seed`
    pub fn instantiate(&self, item_level: u32, seed: u64) -> BaseItem {
        let mut item = BaseItem::new(self.name.clone(), self.kind.clone(), item_level);
        item.tags = self.tags.clone();
        for (index, implicit) in self.implicits.iter().enumerate() {
            if let Some(rolled) = roll_affix(implicit, derive_seed(seed, index as u64)) {
                item = item.with_implicit(rolled);
            }
        }
        item
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kind.handedness() == Some(Handedness::Both) {
            return Err(ConfigError::ValidationError(format!(
                "weapon base '{}' must be one_hand or two_hand",
                self.name
            )));
        }
        for implicit in &self.implicits {
            implicit.validate()?;
        }
        Ok(())
    }
}

/// Named collection of base templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseCatalog {
    #[serde(rename = "base", default)]
    pub bases: Vec<BaseTemplate>,
}

impl BaseCatalog {
    pub fn get(&self, name: &str) -> Option<&BaseTemplate> {
        self.bases.iter().find(|base| base.name == name)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for base in &self.bases {
            base.validate()?;
        }
        Ok(())
    }
}

/// Load a base catalog from a TOML file
pub fn load_bases(path: &Path) -> Result<BaseCatalog, ConfigError> {
    let catalog: BaseCatalog = super::load_toml(path)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Load a base catalog from a TOML string
pub fn parse_bases(content: &str) -> Result<BaseCatalog, ConfigError> {
    let catalog: BaseCatalog = super::parse_toml(content)?;
    catalog.validate()?;
    Ok(catalog)
}

/// Get the bundled sample catalog
pub fn default_bases() -> BaseCatalog {
    let toml = include_str!("../../config/bases.toml");
    parse_bases(toml).unwrap_or_else(|e| {
        log::error!("bundled base catalog failed to load: {}", e);
        BaseCatalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemCategory, Rarity};

    #[test]
    fn test_parse_bases() {
        let toml = r#"
[[base]]
name = "Rusted Sword"
tags = ["starter"]

[base.kind]
type = "weapon"
class = "sword"
handedness = "one_hand"
physical_min = 4
physical_max = 9
critical_chance = 5.0
attack_speed = 1.55

[[base.implicits]]
name = "Rusted Sword Implicit"
description = "+# to Accuracy Rating"
tier = 9
weight = 0

[[base.implicits.modifiers]]
stat = "Accuracy"
family = "accuracy"
kind = "flat"
scope = "global"
range = [20, 30]

[[base]]
name = "Iron Ring"

[base.kind]
type = "jewellery"
slot = "ring"
"#;

        let catalog = parse_bases(toml).unwrap();
        assert_eq!(catalog.len(), 2);

        let sword = catalog.get("Rusted Sword").unwrap();
        assert_eq!(sword.kind.category(), ItemCategory::Weapon);
        assert_eq!(sword.kind.handedness(), Some(Handedness::OneHand));

        let item = sword.instantiate(12, 77);
        assert_eq!(item.item_level, 12);
        assert_eq!(item.rarity(), Rarity::Normal);
        assert!(item.has_tag("starter"));
        assert_eq!(item.implicits().len(), 1);
        let accuracy = item.sum_stat("Accuracy");
        assert!((20.0..=30.0).contains(&accuracy));

        // same seed, same implicit roll
        assert_eq!(sword.instantiate(12, 77), item);
    }

    #[test]
    fn test_weapon_base_needs_concrete_handedness() {
        let toml = r#"
[[base]]
name = "Ambiguous Blade"

[base.kind]
type = "weapon"
class = "sword"
handedness = "both"
physical_min = 4
physical_max = 9
critical_chance = 5.0
attack_speed = 1.55
"#;
        assert!(matches!(parse_bases(toml), Err(ConfigError::ValidationError(_))));

        let two_hand = toml.replace("\"both\"", "\"two_hand\"");
        let catalog = parse_bases(&two_hand).unwrap();
        assert_eq!(catalog.bases[0].kind.handedness(), Some(Handedness::TwoHand));
    }

    #[test]
    fn test_default_bases_load() {
        let catalog = default_bases();
        assert!(!catalog.is_empty());
        let categories: Vec<_> = catalog.bases.iter().map(|b| b.kind.category()).collect();
        assert!(categories.contains(&ItemCategory::Weapon));
        assert!(categories.contains(&ItemCategory::Armour));
        assert!(categories.contains(&ItemCategory::Jewellery));
        assert!(categories.contains(&ItemCategory::Trinket));
    }
}
