//! Content pool and weighted affix selection
//!
//! The pool is a read-only tree: item category → slot → sub-category →
//! templates, built once at content load and shared by reference.

use crate::affix::Affix;
use crate::compat::is_compatible;
use crate::config::ConfigError;
use crate::item::BaseItem;
use crate::types::{ItemCategory, SlotKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// A named sub-category of templates (e.g. "physical", "resistances")
#[derive(Debug, Clone, PartialEq)]
pub struct SubCategory {
    pub name: String,
    pub affixes: Vec<Affix>,
}

/// Immutable tree of affix templates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPool {
    tree: BTreeMap<ItemCategory, BTreeMap<SlotKind, Vec<SubCategory>>>,
}

impl ContentPool {
    pub fn builder() -> ContentPoolBuilder {
        ContentPoolBuilder::default()
    }

    /// Templates for a category and slot, in stable authoring order
    pub fn templates(&self, category: ItemCategory, slot: SlotKind) -> impl Iterator<Item = &Affix> {
        self.tree
            .get(&category)
            .and_then(|slots| slots.get(&slot))
            .into_iter()
            .flatten()
            .flat_map(|sub| sub.affixes.iter())
    }

    /// Sub-categories for a category and slot
    pub fn sub_categories(&self, category: ItemCategory, slot: SlotKind) -> &[SubCategory] {
        self.tree
            .get(&category)
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a template by name anywhere in the pool
    pub fn find(&self, name: &str) -> Option<&Affix> {
        self.tree
            .values()
            .flat_map(|slots| slots.values())
            .flatten()
            .flat_map(|sub| sub.affixes.iter())
            .find(|affix| affix.name == name)
    }

    pub fn len(&self) -> usize {
        self.tree
            .values()
            .flat_map(|slots| slots.values())
            .flatten()
            .map(|sub| sub.affixes.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collects sub-categories, then validates into a [`ContentPool`]
#[derive(Debug, Default)]
pub struct ContentPoolBuilder {
    groups: Vec<(ItemCategory, SlotKind, SubCategory)>,
}

impl ContentPoolBuilder {
    /// Add a sub-category; every template takes the group's slot
    pub fn group(mut self, category: ItemCategory, slot: SlotKind, name: impl Into<String>, affixes: Vec<Affix>) -> Self {
        let affixes = affixes
            .into_iter()
            .map(|mut affix| {
                affix.slot = slot;
                affix
            })
            .collect();
        self.groups.push((
            category,
            slot,
            SubCategory {
                name: name.into(),
                affixes,
            },
        ));
        self
    }

    pub fn build(self) -> Result<ContentPool, ConfigError> {
        let mut tree: BTreeMap<ItemCategory, BTreeMap<SlotKind, Vec<SubCategory>>> = BTreeMap::new();
        for (category, slot, sub) in self.groups {
            let unified_slot = slot == SlotKind::Unified;
            if unified_slot != category.uses_unified_pool() {
                return Err(ConfigError::ValidationError(format!(
                    "group '{}' uses slot {:?} but category {:?} {} a unified pool",
                    sub.name,
                    slot,
                    category,
                    if category.uses_unified_pool() { "requires" } else { "does not use" }
                )));
            }
            for affix in &sub.affixes {
                affix.validate()?;
            }
            tree.entry(category).or_default().entry(slot).or_default().push(sub);
        }
        Ok(ContentPool { tree })
    }
}

/// Whether a template's tier is unlocked under `max_tier`
///
/// `max_tier` is the best tier the item level allows. Tier 1 is the best, so
/// a template is unlocked when its tier number is at or above the ceiling.
pub fn tier_unlocked(tier: u8, max_tier: u8) -> bool {
    tier >= max_tier
}

/// Templates that may roll in `slot` on `item` at `item_level`
///
/// Filters tier, minimum level, positive weight and compatibility, keeping
/// pool order so seeded draws are reproducible.
pub fn eligible_affixes<'a>(
    pool: &'a ContentPool,
    item: &BaseItem,
    slot: SlotKind,
    item_level: u32,
    max_tier: u8,
) -> Vec<&'a Affix> {
    pool.templates(item.category(), pool_slot(item, slot))
        .filter(|affix| tier_unlocked(affix.tier, max_tier))
        .filter(|affix| affix.min_level <= item_level)
        .filter(|affix| affix.weight > 0.0)
        .filter(|affix| is_compatible(affix, item))
        .collect()
}

/// Unified-pool items always query the unified slot
fn pool_slot(item: &BaseItem, slot: SlotKind) -> SlotKind {
    if item.uses_unified_pool() {
        SlotKind::Unified
    } else {
        slot
    }
}

/// Weighted random pick; float rounding falls back to the first entry
pub fn weighted_pick<'a, R: Rng + ?Sized>(candidates: &[&'a Affix], rng: &mut R) -> Option<&'a Affix> {
    let first = *candidates.first()?;
    let total: f64 = candidates.iter().map(|affix| affix.weight).sum();
    if !(total > 0.0) {
        return None;
    }
    let roll = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for affix in candidates {
        cumulative += affix.weight;
        if roll < cumulative {
            return Some(affix);
        }
    }
    Some(first)
}

/// Select one eligible template by weight, or `None` when nothing qualifies
pub fn select_random_affix<'a, R: Rng + ?Sized>(
    pool: &'a ContentPool,
    item: &BaseItem,
    slot: SlotKind,
    item_level: u32,
    max_tier: u8,
    rng: &mut R,
) -> Option<&'a Affix> {
    let candidates = eligible_affixes(pool, item, slot, item_level, max_tier);
    if candidates.is_empty() {
        log::debug!(
            "no eligible {:?} affix for '{}' (level {}, tier ceiling {})",
            slot,
            item.name,
            item_level,
            max_tier
        );
        return None;
    }
    weighted_pick(&candidates, rng)
}

/// Seeded form of [`select_random_affix`]
pub fn select_random_affix_seeded<'a>(
    pool: &'a ContentPool,
    item: &BaseItem,
    slot: SlotKind,
    item_level: u32,
    max_tier: u8,
    seed: u64,
) -> Option<&'a Affix> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    select_random_affix(pool, item, slot, item_level, max_tier, &mut rng)
}
