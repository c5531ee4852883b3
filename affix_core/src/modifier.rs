//! Modifier model - a single numeric effect inside an affix

use crate::types::{DamageType, ModifierKind, ModifierScope, StatFamily};
use serde::{Deserialize, Serialize};

/// Value range of a modifier template
///
/// In TOML a single range is written `range = [40, 49]` and a dual range
/// `range = { first = [6, 9], second = [13, 15] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueRange {
    Single([i32; 2]),
    /// "Adds (a-b) to (c-d)" pattern, rolled in two stages
    Dual { first: [i32; 2], second: [i32; 2] },
}

impl ValueRange {
    pub fn single(min: i32, max: i32) -> Self {
        ValueRange::Single([min, max])
    }

    pub fn dual(first: (i32, i32), second: (i32, i32)) -> Self {
        ValueRange::Dual {
            first: [first.0, first.1],
            second: [second.0, second.1],
        }
    }

    pub fn is_dual(&self) -> bool {
        matches!(self, ValueRange::Dual { .. })
    }

    /// Every declared range has min <= max
    pub fn is_ordered(&self) -> bool {
        match self {
            ValueRange::Single([min, max]) => min <= max,
            ValueRange::Dual { first, second } => first[0] <= first[1] && second[0] <= second[1],
        }
    }
}

/// A modifier template: stat, range and how it applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixModifier {
    /// Stat name matched case-sensitively by aggregation queries
    pub stat: String,
    /// Family used by the compatibility rules
    #[serde(default)]
    pub family: StatFamily,
    pub kind: ModifierKind,
    pub scope: ModifierScope,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    pub range: ValueRange,
}

impl AffixModifier {
    /// Create a global flat modifier
    pub fn new(stat: impl Into<String>, family: StatFamily, range: ValueRange) -> Self {
        AffixModifier {
            stat: stat.into(),
            family,
            kind: ModifierKind::Flat,
            scope: ModifierScope::Global,
            damage_type: None,
            range,
        }
    }

    pub fn with_kind(mut self, kind: ModifierKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn local(mut self) -> Self {
        self.scope = ModifierScope::Local;
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }
}

/// Rolled value(s) of a modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RolledValue {
    Single { value: i32 },
    /// `first`/`second` form the damage band, `value` is the final scalar
    Dual { first: i32, second: i32, value: i32 },
}

/// A modifier resolved to concrete numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledModifier {
    stat: String,
    family: StatFamily,
    kind: ModifierKind,
    scope: ModifierScope,
    damage_type: Option<DamageType>,
    value: RolledValue,
    is_rolled: bool,
}

impl RolledModifier {
    pub(crate) fn new(template: &AffixModifier, value: RolledValue, is_rolled: bool) -> Self {
        RolledModifier {
            stat: template.stat.clone(),
            family: template.family,
            kind: template.kind,
            scope: template.scope,
            damage_type: template.damage_type,
            value,
            is_rolled,
        }
    }

    /// Invalid ranges roll to zero and stay unrolled
    pub(crate) fn unrolled(template: &AffixModifier) -> Self {
        let value = if template.range.is_dual() {
            RolledValue::Dual { first: 0, second: 0, value: 0 }
        } else {
            RolledValue::Single { value: 0 }
        };
        Self::new(template, value, false)
    }

    pub(crate) fn renamed(mut self, stat: impl Into<String>) -> Self {
        self.stat = stat.into();
        self
    }

    pub fn stat(&self) -> &str {
        &self.stat
    }

    pub fn family(&self) -> StatFamily {
        self.family
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn scope(&self) -> ModifierScope {
        self.scope
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn rolled_value(&self) -> RolledValue {
        self.value
    }

    pub fn is_rolled(&self) -> bool {
        self.is_rolled
    }

    pub fn is_dual(&self) -> bool {
        matches!(self.value, RolledValue::Dual { .. })
    }

    /// Single scalar: the rolled value, or the final value of a dual roll
    pub fn value(&self) -> i32 {
        match self.value {
            RolledValue::Single { value } => value,
            RolledValue::Dual { value, .. } => value,
        }
    }

    /// Value used by per-stat sums: the rolled value, or the first value of a
    /// dual roll
    pub fn sum_value(&self) -> i32 {
        match self.value {
            RolledValue::Single { value } => value,
            RolledValue::Dual { first, .. } => first,
        }
    }

    /// Min/max band: (first, second) for dual rolls, (value, value) otherwise
    pub fn band(&self) -> (i32, i32) {
        match self.value {
            RolledValue::Single { value } => (value, value),
            RolledValue::Dual { first, second, .. } => (first, second),
        }
    }

    /// Values substituted into a description, in placeholder order
    pub fn display_values(&self) -> Vec<i32> {
        match self.value {
            RolledValue::Single { value } => vec![value],
            RolledValue::Dual { first, second, .. } => vec![first, second],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_ordering() {
        assert!(ValueRange::single(5, 10).is_ordered());
        assert!(ValueRange::single(7, 7).is_ordered());
        assert!(!ValueRange::single(10, 5).is_ordered());
        assert!(ValueRange::dual((6, 9), (13, 15)).is_ordered());
        assert!(!ValueRange::dual((6, 9), (15, 13)).is_ordered());
    }

    #[test]
    fn test_parse_single_and_dual_ranges() {
        #[derive(Deserialize)]
        struct Wrapper {
            modifiers: Vec<AffixModifier>,
        }

        let toml = r#"
[[modifiers]]
stat = "IncreasedPhysicalDamage"
family = "physical_damage"
kind = "increased"
scope = "local"
range = [40, 49]

[[modifiers]]
stat = "AddedPhysicalDamage"
family = "physical_damage"
kind = "flat"
scope = "local"
damage_type = "physical"
range = { first = [6, 9], second = [13, 15] }
"#;
        let parsed: Wrapper = toml::from_str(toml).unwrap();
        assert_eq!(parsed.modifiers[0].range, ValueRange::single(40, 49));
        assert_eq!(parsed.modifiers[1].range, ValueRange::dual((6, 9), (13, 15)));
        assert_eq!(parsed.modifiers[1].damage_type, Some(DamageType::Physical));
    }

    #[test]
    fn test_rolled_value_accessors() {
        let template = AffixModifier::new("AddedFireDamage", StatFamily::ElementalDamage, ValueRange::dual((2, 4), (8, 10)));
        let rolled = RolledModifier::new(&template, RolledValue::Dual { first: 3, second: 9, value: 5 }, true);

        assert_eq!(rolled.value(), 5);
        assert_eq!(rolled.sum_value(), 3);
        assert_eq!(rolled.band(), (3, 9));
        assert_eq!(rolled.display_values(), vec![3, 9]);
    }

    #[test]
    fn test_unrolled_is_zero() {
        let template = AffixModifier::new("Life", StatFamily::Life, ValueRange::single(0, 0));
        let rolled = RolledModifier::unrolled(&template);
        assert!(!rolled.is_rolled());
        assert_eq!(rolled.value(), 0);
    }
}
