//! Affix templates and their rolled instances

use crate::config::ConfigError;
use crate::modifier::{AffixModifier, RolledModifier};
use crate::types::{Handedness, SlotKind};
use serde::{Deserialize, Serialize};

/// Lowest (best) and highest authored tier
pub const BEST_TIER: u8 = 1;
pub const WORST_TIER: u8 = 9;

/// An authored affix template
///
/// Templates are created at content-load time and never mutated afterwards.
/// `weight` and `min_level` gate eligibility only; they never affect values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub name: String,
    /// Tooltip text; each `#` is replaced by a rolled value
    #[serde(default)]
    pub description: String,
    /// Assigned from the owning pool group when loaded from a pool file
    #[serde(default)]
    pub slot: SlotKind,
    /// 1 = best, 9 = worst
    pub tier: u8,
    /// Drop weight; 0 never drops randomly
    pub weight: f64,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default)]
    pub handedness: Handedness,
    /// Item matches if it has any of these (literal tag or `<stat>_base`)
    #[serde(default)]
    pub compatible_tags: Vec<String>,
    /// Legacy AND-tags, only consulted when `compatible_tags` is empty
    #[serde(default)]
    pub required_tags: Vec<String>,
    pub modifiers: Vec<AffixModifier>,
}

impl Affix {
    pub fn new(name: impl Into<String>, slot: SlotKind, tier: u8, weight: f64) -> Self {
        Affix {
            name: name.into(),
            description: String::new(),
            slot,
            tier,
            weight,
            min_level: 0,
            handedness: Handedness::Both,
            compatible_tags: Vec::new(),
            required_tags: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_min_level(mut self, min_level: u32) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn with_compatible_tag(mut self, tag: impl Into<String>) -> Self {
        self.compatible_tags.push(tag.into());
        self
    }

    pub fn with_required_tag(mut self, tag: impl Into<String>) -> Self {
        self.required_tags.push(tag.into());
        self
    }

    pub fn with_modifier(mut self, modifier: AffixModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Check authoring invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modifiers.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "affix '{}' has no modifiers",
                self.name
            )));
        }
        if !(BEST_TIER..=WORST_TIER).contains(&self.tier) {
            return Err(ConfigError::ValidationError(format!(
                "affix '{}' has tier {} outside {}..={}",
                self.name, self.tier, BEST_TIER, WORST_TIER
            )));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "affix '{}' has invalid weight {}",
                self.name, self.weight
            )));
        }
        if let Some(modifier) = self.modifiers.iter().find(|m| !m.range.is_ordered()) {
            return Err(ConfigError::ValidationError(format!(
                "affix '{}' modifier '{}' has min > max",
                self.name, modifier.stat
            )));
        }
        Ok(())
    }
}

/// A template whose modifiers have all been resolved
///
/// Owned by exactly one item and never modified after the roll; regenerating
/// an item replaces its rolled affixes instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledAffix {
    name: String,
    description: String,
    slot: SlotKind,
    tier: u8,
    modifiers: Vec<RolledModifier>,
}

impl RolledAffix {
    pub(crate) fn new(template: &Affix, modifiers: Vec<RolledModifier>) -> Self {
        RolledAffix {
            name: template.name.clone(),
            description: template.description.clone(),
            slot: template.slot,
            tier: template.tier,
            modifiers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slot(&self) -> SlotKind {
        self.slot
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    pub fn modifiers(&self) -> &[RolledModifier] {
        &self.modifiers
    }

    /// Whether every modifier carries a valid roll
    pub fn is_fully_rolled(&self) -> bool {
        self.modifiers.iter().all(|m| m.is_rolled())
    }

    /// Description with each `#` replaced by the rolled values in order
    ///
    /// Leftover placeholders stay as `#`; surplus values are dropped.
    pub fn describe(&self) -> String {
        let mut values = self.modifiers.iter().flat_map(|m| m.display_values());
        let mut out = String::with_capacity(self.description.len());
        for ch in self.description.chars() {
            match ch {
                '#' => match values.next() {
                    Some(v) => out.push_str(&v.to_string()),
                    None => out.push('#'),
                },
                _ => out.push(ch),
            }
        }
        out
    }
}
