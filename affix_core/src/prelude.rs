//! Prelude module for convenient imports
//!
//! ```rust
//! use affix_core::prelude::*;
//! ```

// Model
pub use crate::affix::{Affix, RolledAffix};
pub use crate::modifier::{AffixModifier, RolledModifier, ValueRange};
pub use crate::types::{Attribute, Handedness, ItemCategory, ModifierKind, ModifierScope, Rarity, SlotKind, StatFamily};

// Items
pub use crate::item::{BaseItem, ItemKind, LocalStats};

// Pool and generation
pub use crate::generate::{generate_affixes, AffixGenerator, RarityRoll, TargetRarity};
pub use crate::pool::ContentPool;
pub use crate::roll::roll_affix;

// Config
pub use crate::config::{default_bases, default_pool, GenerationConstants};
