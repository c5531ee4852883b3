//! Local modifier resolution against an item's own base stats

use super::{BaseItem, ItemKind};
use crate::stat_value::StatValue;
use crate::types::{DamageType, ModifierKind, ModifierScope, StatFamily};
use serde::{Deserialize, Serialize};

/// An item's base stats after its Local modifiers are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalStats {
    pub physical_min: f64,
    pub physical_max: f64,
    /// Added non-physical damage bands from Local flat modifiers
    pub added_damage: Vec<(DamageType, f64, f64)>,
    pub attack_speed: f64,
    pub critical_chance: f64,
    pub armour: f64,
    pub evasion: f64,
    pub energy_shield: f64,
    pub block_chance: f64,
}

impl LocalStats {
    pub(crate) fn resolve(item: &BaseItem) -> Self {
        let mut physical_min = StatValue::default();
        let mut physical_max = StatValue::default();
        let mut attack_speed = StatValue::default();
        let mut critical_chance = StatValue::default();
        let mut armour = StatValue::default();
        let mut evasion = StatValue::default();
        let mut energy_shield = StatValue::default();
        let mut block_chance = StatValue::default();
        let mut added_damage = Vec::new();

        match &item.kind {
            ItemKind::Weapon(w) => {
                physical_min.base = w.physical_min as f64;
                physical_max.base = w.physical_max as f64;
                attack_speed.base = w.attack_speed;
                critical_chance.base = w.critical_chance;
            }
            ItemKind::Armour(a) => {
                armour.base = a.armour as f64;
                evasion.base = a.evasion as f64;
                energy_shield.base = a.energy_shield as f64;
                block_chance.base = a.block_chance as f64;
            }
            ItemKind::Jewellery(_) | ItemKind::Trinket(_) => {}
        }

        let local = item
            .modifiers()
            .filter(|m| m.is_rolled() && m.scope() == ModifierScope::Local);

        for modifier in local {
            let kind = modifier.kind();
            let (first, second) = modifier.band();
            match modifier.family() {
                StatFamily::PhysicalDamage => {
                    if kind == ModifierKind::Flat {
                        physical_min.apply(kind, first as f64);
                        physical_max.apply(kind, second as f64);
                    } else {
                        physical_min.apply(kind, modifier.value() as f64);
                        physical_max.apply(kind, modifier.value() as f64);
                    }
                }
                StatFamily::ElementalDamage | StatFamily::ChaosDamage if kind == ModifierKind::Flat => {
                    match modifier.damage_type() {
                        Some(damage_type) => added_damage.push((damage_type, first as f64, second as f64)),
                        None => log::debug!("local added damage '{}' has no damage type", modifier.stat()),
                    }
                }
                StatFamily::AttackSpeed => attack_speed.apply(kind, modifier.value() as f64),
                StatFamily::CriticalChance => critical_chance.apply(kind, modifier.value() as f64),
                StatFamily::Armour => armour.apply(kind, modifier.value() as f64),
                StatFamily::Evasion => evasion.apply(kind, modifier.value() as f64),
                StatFamily::EnergyShield => energy_shield.apply(kind, modifier.value() as f64),
                StatFamily::BlockChance => block_chance.apply(kind, modifier.value() as f64),
                _ => {}
            }
        }

        LocalStats {
            physical_min: physical_min.compute(),
            physical_max: physical_max.compute(),
            added_damage,
            attack_speed: attack_speed.compute(),
            critical_chance: critical_chance.compute(),
            armour: armour.compute(),
            evasion: evasion.compute(),
            energy_shield: energy_shield.compute(),
            block_chance: block_chance.compute(),
        }
    }

    /// Total added damage band of one type
    pub fn added(&self, damage_type: DamageType) -> (f64, f64) {
        self.added_damage
            .iter()
            .filter(|(dt, _, _)| *dt == damage_type)
            .fold((0.0, 0.0), |(lo, hi), (_, min, max)| (lo + min, hi + max))
    }
}
