//! Generation policy - rarity → affix counts → filled item
//!
//! Every operation takes a seed and builds one `ChaCha8Rng` from it; the
//! rarity draw, the count draws, each selection and each value roll all
//! consume that one stream in a fixed order.

use crate::config::{BaseTemplate, GenerationConstants, RarityChances};
use crate::item::{BaseItem, MAX_PREFIXES, MAX_SUFFIXES};
use crate::pool::{select_random_affix, ContentPool};
use crate::roll::roll_affix_with;
use crate::seed::derive_seed;
use crate::types::{Rarity, SlotKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Rarity a generation run aims for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRarity {
    Normal,
    Magic,
    Rare,
}

impl TargetRarity {
    /// `None` for uniques, which never generate
    pub fn from_rarity(rarity: Rarity) -> Option<Self> {
        match rarity {
            Rarity::Normal => Some(TargetRarity::Normal),
            Rarity::Magic => Some(TargetRarity::Magic),
            Rarity::Rare => Some(TargetRarity::Rare),
            Rarity::Unique => None,
        }
    }

    pub fn rarity(&self) -> Rarity {
        match self {
            TargetRarity::Normal => Rarity::Normal,
            TargetRarity::Magic => Rarity::Magic,
            TargetRarity::Rare => Rarity::Rare,
        }
    }
}

/// Forced rarity or probability thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityRoll {
    Forced(TargetRarity),
    /// Checked against one uniform draw: rare first, then magic
    Chances { rare_chance: f64, magic_chance: f64 },
}

impl From<RarityChances> for RarityRoll {
    fn from(chances: RarityChances) -> Self {
        RarityRoll::Chances {
            rare_chance: chances.rare_chance,
            magic_chance: chances.magic_chance,
        }
    }
}

impl From<TargetRarity> for RarityRoll {
    fn from(target: TargetRarity) -> Self {
        RarityRoll::Forced(target)
    }
}

impl RarityRoll {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> TargetRarity {
        match *self {
            RarityRoll::Forced(target) => target,
            RarityRoll::Chances {
                rare_chance,
                magic_chance,
            } => {
                let draw: f64 = rng.gen();
                if draw < rare_chance {
                    TargetRarity::Rare
                } else if draw < magic_chance {
                    TargetRarity::Magic
                } else {
                    TargetRarity::Normal
                }
            }
        }
    }
}

/// What a generation run asked for and what it managed to add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub rarity: TargetRarity,
    pub requested_prefixes: usize,
    pub requested_suffixes: usize,
    pub added_prefixes: usize,
    pub added_suffixes: usize,
}

impl GenerationReport {
    pub fn requested(&self) -> usize {
        self.requested_prefixes + self.requested_suffixes
    }

    pub fn added(&self) -> usize {
        self.added_prefixes + self.added_suffixes
    }

    /// Requested slots that stayed empty (pool exhausted or cap reached)
    pub fn unfilled(&self) -> usize {
        self.requested().saturating_sub(self.added())
    }
}

/// An item produced by batch generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItem {
    pub item: BaseItem,
    pub report: Option<GenerationReport>,
}

/// Draw prefix/suffix counts for a target rarity
pub fn affix_counts<R: Rng + ?Sized>(target: TargetRarity, rng: &mut R) -> (usize, usize) {
    match target {
        TargetRarity::Normal => (0, 0),
        TargetRarity::Magic => {
            let prefixes = rng.gen_range(0..=1);
            let suffixes = rng.gen_range(0..=1);
            if prefixes + suffixes == 0 {
                if rng.gen_bool(0.5) {
                    (1, 0)
                } else {
                    (0, 1)
                }
            } else {
                (prefixes, suffixes)
            }
        }
        TargetRarity::Rare => {
            let mut prefixes = rng.gen_range(1..=MAX_PREFIXES);
            let mut suffixes = rng.gen_range(1..=MAX_SUFFIXES);
            while prefixes + suffixes < 3 {
                let prefix_open = prefixes < MAX_PREFIXES;
                let suffix_open = suffixes < MAX_SUFFIXES;
                if prefix_open && (!suffix_open || rng.gen_bool(0.5)) {
                    prefixes += 1;
                } else {
                    suffixes += 1;
                }
            }
            (prefixes, suffixes)
        }
    }
}

/// Pool plus tunables; the free functions below use default constants
#[derive(Debug, Clone, Copy)]
pub struct AffixGenerator<'a> {
    pool: &'a ContentPool,
    constants: &'a GenerationConstants,
}

impl<'a> AffixGenerator<'a> {
    pub fn new(pool: &'a ContentPool, constants: &'a GenerationConstants) -> Self {
        AffixGenerator { pool, constants }
    }

    /// Clear and regenerate an item's random affixes
    ///
    /// Uniques are left untouched and yield `None`.
    pub fn generate(
        &self,
        item: &mut BaseItem,
        item_level: u32,
        rarity_roll: RarityRoll,
        seed: u64,
    ) -> Option<GenerationReport> {
        if item.is_unique() {
            log::warn!("refusing to generate affixes on unique item '{}'", item.name);
            return None;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        item.clear_random_affixes();

        let rarity = rarity_roll.resolve(&mut rng);
        let (requested_prefixes, requested_suffixes) = affix_counts(rarity, &mut rng);

        let added_prefixes = self.fill(item, SlotKind::Prefix, requested_prefixes, item_level, &mut rng);
        let added_suffixes = self.fill(item, SlotKind::Suffix, requested_suffixes, item_level, &mut rng);

        Some(GenerationReport {
            rarity,
            requested_prefixes,
            requested_suffixes,
            added_prefixes,
            added_suffixes,
        })
    }

    /// Regenerate keeping the item's current rarity
    pub fn reroll(&self, item: &mut BaseItem, seed: u64) -> Option<GenerationReport> {
        match TargetRarity::from_rarity(item.rarity()) {
            Some(target) => {
                let level = item.item_level;
                self.generate(item, level, RarityRoll::Forced(target), seed)
            }
            None => {
                log::warn!("refusing to reroll unique item '{}'", item.name);
                None
            }
        }
    }

    /// Add one affix to a random open slot
    ///
    /// Returns the list the affix landed in, or `None` when the item is
    /// unique, full, or no eligible template exists.
    pub fn add_random(&self, item: &mut BaseItem, seed: u64) -> Option<SlotKind> {
        if item.is_unique() {
            log::warn!("refusing to add an affix to unique item '{}'", item.name);
            return None;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut open = Vec::with_capacity(2);
        if item.uses_unified_pool() {
            if item.can_add_prefix() {
                // unified items balance the two lists
                let slot = if item.prefixes().len() <= item.suffixes().len() {
                    SlotKind::Prefix
                } else {
                    SlotKind::Suffix
                };
                open.push(slot);
            }
        } else {
            if item.can_add_prefix() {
                open.push(SlotKind::Prefix);
            }
            if item.can_add_suffix() {
                open.push(SlotKind::Suffix);
            }
        }
        open.shuffle(&mut rng);

        let level = item.item_level;
        for slot in open {
            if self.fill(item, slot, 1, level, &mut rng) == 1 {
                return Some(slot);
            }
        }
        None
    }

    /// Instantiate and generate one item per base
    ///
    /// Each base gets seeds derived from `run_seed` and its index, so the
    /// batch is reproducible and independent of other entries.
    pub fn generate_batch(
        &self,
        bases: &[BaseTemplate],
        item_level: u32,
        rarity_roll: RarityRoll,
        run_seed: u64,
    ) -> Vec<GeneratedItem> {
        bases
            .iter()
            .enumerate()
            .map(|(index, base)| {
                let item_seed = derive_seed(run_seed, index as u64);
                let mut item = base.instantiate(item_level, derive_seed(item_seed, 0));
                let report = self.generate(&mut item, item_level, rarity_roll, derive_seed(item_seed, 1));
                GeneratedItem { item, report }
            })
            .collect()
    }

    /// Add up to `count` affixes to one list; returns how many landed
    fn fill<R: Rng + ?Sized>(
        &self,
        item: &mut BaseItem,
        slot: SlotKind,
        count: usize,
        item_level: u32,
        rng: &mut R,
    ) -> usize {
        let max_tier = self.constants.tiers.max_tier_for_level(item_level);
        let mut added = 0;

        for _ in 0..count {
            let has_room = match slot {
                SlotKind::Suffix => item.can_add_suffix(),
                _ => item.can_add_prefix(),
            };
            if !has_room {
                break;
            }

            let Some(template) = select_random_affix(self.pool, item, slot, item_level, max_tier, rng) else {
                log::warn!(
                    "no eligible {:?} affixes for '{}' at level {}; leaving slot empty",
                    slot,
                    item.name,
                    item_level
                );
                break;
            };

            let Some(rolled) = roll_affix_with(template, rng) else {
                continue;
            };
            let landed = match slot {
                SlotKind::Suffix => item.add_suffix(rolled),
                _ => item.add_prefix(rolled),
            };
            if landed {
                added += 1;
            }
        }

        added
    }
}

/// Generate affixes with the default tier ladder
pub fn generate_affixes(
    item: &mut BaseItem,
    pool: &ContentPool,
    item_level: u32,
    rarity_roll: RarityRoll,
    seed: u64,
) -> Option<GenerationReport> {
    let constants = GenerationConstants::default();
    AffixGenerator::new(pool, &constants).generate(item, item_level, rarity_roll, seed)
}

/// Regenerate keeping the item's current rarity
pub fn reroll_affixes(item: &mut BaseItem, pool: &ContentPool, seed: u64) -> Option<GenerationReport> {
    let constants = GenerationConstants::default();
    AffixGenerator::new(pool, &constants).reroll(item, seed)
}

/// Add one random affix to an open slot
pub fn add_random_affix(item: &mut BaseItem, pool: &ContentPool, seed: u64) -> Option<SlotKind> {
    let constants = GenerationConstants::default();
    AffixGenerator::new(pool, &constants).add_random(item, seed)
}

/// Vendor-style batch generation over a list of bases
pub fn generate_batch(
    bases: &[BaseTemplate],
    pool: &ContentPool,
    item_level: u32,
    rarity_roll: RarityRoll,
    run_seed: u64,
) -> Vec<GeneratedItem> {
    let constants = GenerationConstants::default();
    AffixGenerator::new(pool, &constants).generate_batch(bases, item_level, rarity_roll, run_seed)
}
