//! Value roller - resolve a template into a rolled affix
//!
//! Rolling is pure in (template, seed): the same pair always yields the same
//! values. Templates are read, never modified.

use crate::affix::{Affix, RolledAffix};
use crate::modifier::{AffixModifier, RolledModifier, RolledValue, ValueRange};
use crate::types::{ALL_ATTRIBUTES, DEXTERITY, INTELLIGENCE, STRENGTH};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ALL_ATTRIBUTES_TEXT: &str = "all attributes";

/// Roll a template with a fresh generator seeded from `seed`
pub fn roll_affix(template: &Affix, seed: u64) -> Option<RolledAffix> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    roll_affix_with(template, &mut rng)
}

/// Roll a template from a caller-owned generator
///
/// Returns `None` for a template without modifiers.
pub fn roll_affix_with<R: Rng + ?Sized>(template: &Affix, rng: &mut R) -> Option<RolledAffix> {
    if template.modifiers.is_empty() {
        log::error!("affix '{}' has no modifiers; skipping roll", template.name);
        return None;
    }

    let modifiers = if is_all_attributes(template) {
        roll_merged_attributes(template, rng)
    } else {
        template.modifiers.iter().map(|m| roll_modifier(m, rng)).collect()
    };

    Some(RolledAffix::new(template, modifiers))
}

/// Roll one modifier; invalid ranges give an unrolled zero
pub fn roll_modifier<R: Rng + ?Sized>(modifier: &AffixModifier, rng: &mut R) -> RolledModifier {
    let rolled = match modifier.range {
        ValueRange::Single([min, max]) => roll_range(min, max, rng).map(|value| RolledValue::Single { value }),
        ValueRange::Dual { first, second } => roll_range(first[0], first[1], rng).and_then(|a| {
            let b = roll_range(second[0], second[1], rng)?;
            let value = rng.gen_range(a.min(b)..=a.max(b));
            Some(RolledValue::Dual {
                first: a,
                second: b,
                value,
            })
        }),
    };

    match rolled {
        Some(value) => RolledModifier::new(modifier, value, true),
        None => {
            log::warn!("modifier '{}' has an invalid range {:?}; rolled as 0", modifier.stat, modifier.range);
            RolledModifier::unrolled(modifier)
        }
    }
}

/// Uniform integer in `[min, max]`
///
/// `min == max > 0` is a fixed value and draws nothing. Ranges entirely at or
/// below zero, or inverted ranges, are invalid.
fn roll_range<R: Rng + ?Sized>(min: i32, max: i32, rng: &mut R) -> Option<i32> {
    if max <= 0 || min > max {
        return None;
    }
    if min == max {
        return Some(min);
    }
    Some(rng.gen_range(min..=max))
}

fn is_attribute_stat(stat: &str) -> bool {
    matches!(stat, STRENGTH | DEXTERITY | INTELLIGENCE | ALL_ATTRIBUTES)
}

/// Whether a template's attribute modifiers should roll as one shared value
pub fn is_all_attributes(template: &Affix) -> bool {
    let range_of = |stat: &str| template.modifiers.iter().find(|m| m.stat == stat).map(|m| m.range);

    let has_attributes = template.modifiers.iter().any(|m| is_attribute_stat(&m.stat));
    if !has_attributes {
        return false;
    }

    let all_three_same = match (range_of(STRENGTH), range_of(DEXTERITY), range_of(INTELLIGENCE)) {
        (Some(str_range), Some(dex_range), Some(int_range)) => str_range == dex_range && dex_range == int_range,
        _ => false,
    };

    all_three_same
        || range_of(ALL_ATTRIBUTES).is_some()
        || template.description.to_lowercase().contains(ALL_ATTRIBUTES_TEXT)
}

/// Attribute modifiers collapse into one "AllAttributes" modifier at the
/// position of the first attribute modifier; others roll normally
fn roll_merged_attributes<R: Rng + ?Sized>(template: &Affix, rng: &mut R) -> Vec<RolledModifier> {
    let source = template
        .modifiers
        .iter()
        .find(|m| m.stat == ALL_ATTRIBUTES)
        .or_else(|| template.modifiers.iter().find(|m| is_attribute_stat(&m.stat)));

    let mut merged_done = false;
    let mut out = Vec::with_capacity(template.modifiers.len());
    for modifier in &template.modifiers {
        if !is_attribute_stat(&modifier.stat) {
            out.push(roll_modifier(modifier, rng));
            continue;
        }
        if merged_done {
            continue;
        }
        if let Some(source) = source {
            out.push(roll_modifier(source, rng).renamed(ALL_ATTRIBUTES));
        }
        merged_done = true;
    }
    out
}
