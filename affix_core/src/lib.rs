//! affix_core - Item affix generation and modifier resolution
//!
//! This library provides:
//! - Affix / AffixModifier: authored templates with single or dual value ranges
//! - ContentPool: immutable template tree with weighted, level-gated selection
//! - Compatibility: local/global scope and tag rules per item kind
//! - Rolling: seeded value rolls, including the all-attributes merge
//! - Generation: rarity-driven affix counts, rerolls and batch generation
//! - BaseItem: the item aggregate with derived rarity and stat queries

pub mod affix;
pub mod compat;
pub mod config;
pub mod generate;
pub mod item;
pub mod modifier;
pub mod pool;
pub mod prelude;
pub mod roll;
pub mod seed;
pub mod stat_value;
pub mod types;

// Re-export core types for convenience
pub use affix::{Affix, RolledAffix};
pub use compat::is_compatible;
pub use config::{default_bases, default_pool, BaseCatalog, BaseTemplate, ConfigError, GenerationConstants};
pub use generate::{
    add_random_affix, generate_affixes, generate_batch, reroll_affixes, AffixGenerator, GeneratedItem,
    GenerationReport, RarityRoll, TargetRarity,
};
pub use item::{BaseItem, ItemKind, LocalStats};
pub use modifier::{AffixModifier, RolledModifier, RolledValue, ValueRange};
pub use pool::{eligible_affixes, select_random_affix, ContentPool};
pub use roll::roll_affix;
pub use stat_value::StatValue;
pub use types::{Attribute, DamageType, Handedness, ItemCategory, ModifierKind, ModifierScope, Rarity, SlotKind, StatFamily};
