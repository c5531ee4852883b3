//! StatValue - The triple modifier container (Flat → Increased → More)

use crate::types::ModifierKind;
use serde::{Deserialize, Serialize};

/// Represents a stat that follows the Flat → Increased → More model
///
/// Final value is calculated as:
/// `(base + flat) × (1 + increased) × Π(1 + more)`
///
/// - `base`: The item's own base value (0 for character-level stats)
/// - `flat`: Sum of all flat additions
/// - `increased`: Sum of all increased% minus reduced% (as decimal)
/// - `more`: List of more% / less% multipliers (as decimal, less is negative)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub flat: f64,
    pub increased: f64,
    pub more: Vec<f64>,
}

impl StatValue {
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Default::default()
        }
    }

    /// Calculate final value: (base + flat) × (1 + increased) × Π(1 + more)
    pub fn compute(&self) -> f64 {
        self.total_flat() * self.total_increased_multiplier() * self.total_more_multiplier()
    }

    /// Fold a rolled modifier value in, by kind
    ///
    /// Percent kinds take whole percentages (40 = 40%).
    pub fn apply(&mut self, kind: ModifierKind, value: f64) {
        match kind {
            ModifierKind::Flat => self.flat += value,
            ModifierKind::Increased => self.increased += value / 100.0,
            ModifierKind::Reduced => self.increased -= value / 100.0,
            ModifierKind::More => self.more.push(value / 100.0),
            ModifierKind::Less => self.more.push(-value / 100.0),
        }
    }

    /// Get the total flat value (base + flat additions)
    pub fn total_flat(&self) -> f64 {
        self.base + self.flat
    }

    /// Get the total increased multiplier (1 + sum of increased%)
    pub fn total_increased_multiplier(&self) -> f64 {
        1.0 + self.increased
    }

    /// Get the total more multiplier (product of all more multipliers)
    pub fn total_more_multiplier(&self) -> f64 {
        self.more.iter().map(|m| 1.0 + m).product()
    }
}
