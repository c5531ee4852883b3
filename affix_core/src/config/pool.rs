//! Affix pool configuration loading

use super::ConfigError;
use crate::affix::Affix;
use crate::pool::ContentPool;
use crate::types::{ItemCategory, SlotKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root of an affix pool file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolFile {
    #[serde(rename = "group", default)]
    pub groups: Vec<AffixGroup>,
}

/// One sub-category of templates for a category and slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixGroup {
    pub category: ItemCategory,
    pub slot: SlotKind,
    pub name: String,
    #[serde(rename = "affix", default)]
    pub affixes: Vec<Affix>,
}

impl PoolFile {
    /// Validate and build the immutable pool
    pub fn into_pool(self) -> Result<ContentPool, ConfigError> {
        self.groups
            .into_iter()
            .fold(ContentPool::builder(), |builder, group| {
                builder.group(group.category, group.slot, group.name, group.affixes)
            })
            .build()
    }
}

/// Load an affix pool from a TOML file
pub fn load_pool(path: &Path) -> Result<ContentPool, ConfigError> {
    let file: PoolFile = super::load_toml(path)?;
    file.into_pool()
}

/// Load an affix pool from a TOML string
pub fn parse_pool(content: &str) -> Result<ContentPool, ConfigError> {
    let file: PoolFile = super::parse_toml(content)?;
    file.into_pool()
}

/// Get the bundled sample pool
pub fn default_pool() -> ContentPool {
    let toml = include_str!("../../config/affixes.toml");
    parse_pool(toml).unwrap_or_else(|e| {
        log::error!("bundled affix pool failed to load: {}", e);
        ContentPool::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool() {
        let toml = r##"
[[group]]
category = "weapon"
slot = "prefix"
name = "physical"

[[group.affix]]
name = "Heavy"
description = "#% increased Physical Damage"
tier = 8
weight = 1000
min_level = 1
compatible_tags = ["physicaldamage_base"]

[[group.affix.modifiers]]
stat = "IncreasedPhysicalDamage"
family = "physical_damage"
kind = "increased"
scope = "local"
range = [40, 49]

[[group]]
category = "weapon"
slot = "suffix"
name = "speed"

[[group.affix]]
name = "of Skill"
tier = 9
weight = 800

[[group.affix.modifiers]]
stat = "IncreasedAttackSpeed"
family = "attack_speed"
kind = "increased"
scope = "local"
range = [5, 7]
"##;

        let pool = parse_pool(toml).unwrap();
        assert_eq!(pool.len(), 2);

        let heavy = pool.find("Heavy").unwrap();
        assert_eq!(heavy.slot, SlotKind::Prefix);
        assert_eq!(heavy.tier, 8);
        assert_eq!(heavy.description, "#% increased Physical Damage");
        assert_eq!(heavy.compatible_tags, vec!["physicaldamage_base".to_string()]);

        // slot comes from the group, not the entry
        assert_eq!(pool.find("of Skill").unwrap().slot, SlotKind::Suffix);
    }

    #[test]
    fn test_parse_pool_rejects_invalid_affix() {
        let toml = r#"
[[group]]
category = "armour"
slot = "suffix"
name = "broken"

[[group.affix]]
name = "of Nothing"
tier = 12
weight = 10

[[group.affix.modifiers]]
stat = "Life"
kind = "flat"
scope = "global"
range = [1, 2]
"#;
        assert!(matches!(parse_pool(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_default_pool_loads() {
        let pool = default_pool();
        assert!(!pool.is_empty());
        for category in [ItemCategory::Weapon, ItemCategory::Armour, ItemCategory::Jewellery] {
            assert!(pool.templates(category, SlotKind::Prefix).count() > 0, "{:?} prefixes", category);
            assert!(pool.templates(category, SlotKind::Suffix).count() > 0, "{:?} suffixes", category);
        }
        assert!(pool.templates(ItemCategory::Trinket, SlotKind::Unified).count() > 0);
    }
}
