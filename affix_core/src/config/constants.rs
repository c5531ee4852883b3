//! Generation constants configuration

use super::ConfigError;
use crate::affix::WORST_TIER;
use serde::{Deserialize, Serialize};

/// Tunable generation constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConstants {
    #[serde(default)]
    pub rarity: RarityChances,
    #[serde(default)]
    pub tiers: TierLadder,
}

impl GenerationConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rarity.validate()?;
        self.tiers.validate()
    }
}

/// Thresholds checked against one uniform draw, rare first
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityChances {
    #[serde(default = "default_rare_chance")]
    pub rare_chance: f64,
    #[serde(default = "default_magic_chance")]
    pub magic_chance: f64,
}

impl Default for RarityChances {
    fn default() -> Self {
        RarityChances {
            rare_chance: default_rare_chance(),
            magic_chance: default_magic_chance(),
        }
    }
}

impl RarityChances {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, chance) in [("rare_chance", self.rare_chance), ("magic_chance", self.magic_chance)] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within 0..=1, got {}",
                    name, chance
                )));
            }
        }
        Ok(())
    }
}

fn default_rare_chance() -> f64 {
    0.10
}
fn default_magic_chance() -> f64 {
    0.40
}

/// Level → best available tier ladder
///
/// `unlock_levels[i]` is the minimum item level for tier `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierLadder {
    #[serde(default = "default_unlock_levels")]
    pub unlock_levels: Vec<u32>,
}

impl Default for TierLadder {
    fn default() -> Self {
        TierLadder {
            unlock_levels: default_unlock_levels(),
        }
    }
}

fn default_unlock_levels() -> Vec<u32> {
    vec![80, 70, 60, 50, 40, 30, 20, 10, 1]
}

impl TierLadder {
    /// Best (lowest-numbered) tier an item of `level` may roll
    ///
    /// Levels below the last threshold get the ladder's last tier; the
    /// template's own `min_level` gate filters them further.
    pub fn max_tier_for_level(&self, level: u32) -> u8 {
        self.unlock_levels
            .iter()
            .position(|&unlock| level >= unlock)
            .unwrap_or(self.unlock_levels.len().saturating_sub(1)) as u8
            + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unlock_levels.is_empty() || self.unlock_levels.len() > WORST_TIER as usize {
            return Err(ConfigError::ValidationError(format!(
                "tier ladder needs 1..={} entries, got {}",
                WORST_TIER,
                self.unlock_levels.len()
            )));
        }
        if self.unlock_levels.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::ValidationError(
                "tier unlock levels must strictly decrease from tier 1".to_string(),
            ));
        }
        Ok(())
    }
}
