//! Item aggregate - implicits, rolled prefixes/suffixes and their queries

mod kind;
mod local;

pub use kind::{
    ArmourBase, ArmourSlot, BaseStat, ItemKind, JewelleryBase, JewellerySlot, TrinketBase, WeaponBase,
    WeaponClass,
};
pub use local::LocalStats;

use crate::affix::RolledAffix;
use crate::modifier::RolledModifier;
use crate::stat_value::StatValue;
use crate::types::{Attribute, Handedness, ItemCategory, Rarity, SlotKind, ALL_ATTRIBUTES};
use serde::{Deserialize, Serialize};

/// Maximum prefixes on a standard item
pub const MAX_PREFIXES: usize = 3;
/// Maximum suffixes on a standard item
pub const MAX_SUFFIXES: usize = 3;
/// Combined cap for unified-pool items
pub const MAX_UNIFIED_AFFIXES: usize = 4;

/// An equipment instance and the affixes it owns
///
/// Rarity is never stored; [`BaseItem::rarity`] derives it from the affix
/// lists and the unique flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseItem {
    pub name: String,
    pub kind: ItemKind,
    pub item_level: u32,
    /// Authored tags on top of the kind's static tags
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    implicits: Vec<RolledAffix>,
    #[serde(default)]
    prefixes: Vec<RolledAffix>,
    #[serde(default)]
    suffixes: Vec<RolledAffix>,
    #[serde(default)]
    is_unique: bool,
}

impl BaseItem {
    /// Create a Normal item with no affixes
    pub fn new(name: impl Into<String>, kind: ItemKind, item_level: u32) -> Self {
        BaseItem {
            name: name.into(),
            kind,
            item_level,
            tags: Vec::new(),
            implicits: Vec::new(),
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            is_unique: false,
        }
    }

    /// Create a unique item with a fixed affix set
    ///
    /// Caps are not applied to hand-authored uniques.
    pub fn unique(
        name: impl Into<String>,
        kind: ItemKind,
        item_level: u32,
        prefixes: Vec<RolledAffix>,
        suffixes: Vec<RolledAffix>,
    ) -> Self {
        BaseItem {
            prefixes,
            suffixes,
            is_unique: true,
            ..Self::new(name, kind, item_level)
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_implicit(mut self, implicit: RolledAffix) -> Self {
        self.implicits.push(implicit);
        self
    }

    // === Kind queries ===

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }

    pub fn handedness(&self) -> Option<Handedness> {
        self.kind.handedness()
    }

    pub fn uses_unified_pool(&self) -> bool {
        self.category().uses_unified_pool()
    }

    pub fn base_stat(&self, stat: BaseStat) -> f64 {
        self.kind.base_stat(stat)
    }

    /// Literal tag match against static kind tags and authored tags
    pub fn has_tag(&self, tag: &str) -> bool {
        self.kind.static_tags().contains(&tag) || self.tags.iter().any(|t| t == tag)
    }

    // === Affix state ===

    pub fn rarity(&self) -> Rarity {
        Rarity::from_affix_counts(self.prefixes.len(), self.suffixes.len(), self.is_unique)
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    pub fn implicits(&self) -> &[RolledAffix] {
        &self.implicits
    }

    pub fn prefixes(&self) -> &[RolledAffix] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[RolledAffix] {
        &self.suffixes
    }

    /// Prefixes + suffixes (implicits excluded)
    pub fn random_affix_count(&self) -> usize {
        self.prefixes.len() + self.suffixes.len()
    }

    /// Implicits + prefixes + suffixes
    pub fn total_affix_count(&self) -> usize {
        self.implicits.len() + self.random_affix_count()
    }

    pub fn can_add_prefix(&self) -> bool {
        if self.is_unique {
            return false;
        }
        if self.uses_unified_pool() {
            self.random_affix_count() < MAX_UNIFIED_AFFIXES
        } else {
            self.prefixes.len() < MAX_PREFIXES
        }
    }

    pub fn can_add_suffix(&self) -> bool {
        if self.is_unique {
            return false;
        }
        if self.uses_unified_pool() {
            self.random_affix_count() < MAX_UNIFIED_AFFIXES
        } else {
            self.suffixes.len() < MAX_SUFFIXES
        }
    }

    /// Append a rolled affix to the prefix list; false when full
    pub fn add_prefix(&mut self, affix: RolledAffix) -> bool {
        if !self.can_add_prefix() {
            return false;
        }
        self.prefixes.push(affix);
        true
    }

    /// Append a rolled affix to the suffix list; false when full
    pub fn add_suffix(&mut self, affix: RolledAffix) -> bool {
        if !self.can_add_suffix() {
            return false;
        }
        self.suffixes.push(affix);
        true
    }

    /// Append to the list matching `slot`; unified affixes fill prefixes first
    pub fn add_affix(&mut self, slot: SlotKind, affix: RolledAffix) -> bool {
        match slot {
            SlotKind::Prefix => self.add_prefix(affix),
            SlotKind::Suffix => self.add_suffix(affix),
            SlotKind::Unified => {
                if self.prefixes.len() <= self.suffixes.len() {
                    self.add_prefix(affix)
                } else {
                    self.add_suffix(affix)
                }
            }
        }
    }

    /// Drop every random affix; implicits stay. No-op on uniques.
    pub fn clear_random_affixes(&mut self) {
        if self.is_unique {
            return;
        }
        self.prefixes.clear();
        self.suffixes.clear();
    }

    // === Aggregation ===

    /// Every modifier the item owns: implicits, then prefixes, then suffixes
    pub fn modifiers(&self) -> impl Iterator<Item = &RolledModifier> {
        self.implicits
            .iter()
            .chain(self.prefixes.iter())
            .chain(self.suffixes.iter())
            .flat_map(|affix| affix.modifiers().iter())
    }

    fn rolled_modifiers_for<'a>(&'a self, stat: &'a str) -> impl Iterator<Item = &'a RolledModifier> + 'a {
        self.modifiers().filter(move |m| m.is_rolled() && m.stat() == stat)
    }

    /// Sum of a stat across all owned modifiers (first value for dual rolls)
    pub fn sum_stat(&self, stat: &str) -> f64 {
        self.rolled_modifiers_for(stat).map(|m| m.sum_value() as f64).sum()
    }

    /// Componentwise (min, max) sum; single rolls count toward both ends
    pub fn sum_dual_stat(&self, stat: &str) -> (f64, f64) {
        self.rolled_modifiers_for(stat).fold((0.0, 0.0), |(lo, hi), m| {
            let (first, second) = m.band();
            (lo + first as f64, hi + second as f64)
        })
    }

    /// Attribute stat plus the merged all-attributes value, counted once
    pub fn attribute_total(&self, attribute: Attribute) -> f64 {
        self.sum_stat(attribute.stat_name()) + self.sum_stat(ALL_ATTRIBUTES)
    }

    /// Fold every modifier on `stat` into a Flat → Increased → More container
    pub fn stat_value(&self, stat: &str) -> StatValue {
        let mut value = StatValue::default();
        for modifier in self.rolled_modifiers_for(stat) {
            value.apply(modifier.kind(), modifier.sum_value() as f64);
        }
        value
    }

    /// Base stats after applying Local modifiers
    pub fn local_stats(&self) -> LocalStats {
        LocalStats::resolve(self)
    }
}
