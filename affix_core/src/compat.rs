//! Compatibility resolver - may this template legally roll on this item?
//!
//! Three independent checks, all pure:
//! - handedness: one/two-hand templates need a weapon of that handedness
//! - scope: every modifier's Local/Global scope must suit the item
//! - tags: compatible tags (any-of) or, failing those, legacy required tags

use crate::affix::Affix;
use crate::item::{BaseItem, BaseStat};
use crate::modifier::AffixModifier;
use crate::types::{Handedness, ModifierScope, StatFamily};

/// Suffix marking a tag as "item base stat is present and positive"
const BASE_TAG_SUFFIX: &str = "_base";
const SHIELD_TAG: &str = "shield";

/// What a Local modifier of a family needs from the item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalRequirement {
    /// Item must have this base stat above zero
    BaseStat(BaseStat),
    /// Item must be a weapon
    Weapon,
    /// Item must carry the shield tag
    Shield,
    /// No base stat needed
    None,
}

impl LocalRequirement {
    /// Family → requirement table for Local modifiers
    pub fn for_family(family: StatFamily) -> Self {
        match family {
            StatFamily::PhysicalDamage => LocalRequirement::BaseStat(BaseStat::PhysicalDamage),
            StatFamily::CriticalChance => LocalRequirement::BaseStat(BaseStat::CriticalChance),
            StatFamily::AttackSpeed => LocalRequirement::BaseStat(BaseStat::AttackSpeed),
            StatFamily::ElementalDamage | StatFamily::ChaosDamage | StatFamily::CastSpeed => LocalRequirement::Weapon,
            StatFamily::Armour => LocalRequirement::BaseStat(BaseStat::Armour),
            StatFamily::Evasion => LocalRequirement::BaseStat(BaseStat::Evasion),
            StatFamily::EnergyShield => LocalRequirement::BaseStat(BaseStat::EnergyShield),
            StatFamily::BlockChance => LocalRequirement::Shield,
            StatFamily::CriticalMultiplier
            | StatFamily::Accuracy
            | StatFamily::Life
            | StatFamily::Mana
            | StatFamily::Attributes
            | StatFamily::Resistance
            | StatFamily::Leech
            | StatFamily::MovementSpeed
            | StatFamily::ItemFind
            | StatFamily::Other => LocalRequirement::None,
        }
    }

    fn is_met_by(&self, item: &BaseItem) -> bool {
        match self {
            LocalRequirement::BaseStat(stat) => item.base_stat(*stat) > 0.0,
            LocalRequirement::Weapon => item.is_weapon(),
            LocalRequirement::Shield => item.has_tag(SHIELD_TAG),
            LocalRequirement::None => true,
        }
    }
}

/// Whether `template` may roll on `item`
pub fn is_compatible(template: &Affix, item: &BaseItem) -> bool {
    handedness_allows(template.handedness, item)
        && template.modifiers.iter().all(|m| scope_allows(m, item))
        && tags_allow(template, item)
}

/// Handedness restriction: `Both` is universal, the others need a matching weapon
pub fn handedness_allows(handedness: Handedness, item: &BaseItem) -> bool {
    match handedness {
        Handedness::Both => true,
        restricted => item.handedness() == Some(restricted),
    }
}

/// Scope check for one modifier
pub fn scope_allows(modifier: &AffixModifier, item: &BaseItem) -> bool {
    match modifier.scope {
        ModifierScope::Local => LocalRequirement::for_family(modifier.family).is_met_by(item),
        ModifierScope::Global => !(item.is_weapon() && modifier.family.is_weapon_local_only()),
    }
}

/// Tag check: compatible tags (any-of), else legacy required tags (all-of)
pub fn tags_allow(template: &Affix, item: &BaseItem) -> bool {
    if !template.compatible_tags.is_empty() {
        return template.compatible_tags.iter().any(|tag| tag_matches(tag, item));
    }
    let static_tags = item.kind.static_tags();
    template
        .required_tags
        .iter()
        .all(|tag| static_tags.contains(&tag.as_str()))
}

/// Match one compatible tag, literal or `<x>_base` sentinel
pub fn tag_matches(tag: &str, item: &BaseItem) -> bool {
    match tag.strip_suffix(BASE_TAG_SUFFIX) {
        Some(key) => match BaseStat::from_key(key) {
            Some(stat) => item.base_stat(stat) > 0.0,
            None => {
                log::debug!("unknown base-stat tag '{}'", tag);
                false
            }
        },
        None => item.has_tag(tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ArmourBase, ArmourSlot, ItemKind, JewelleryBase, JewellerySlot, WeaponBase, WeaponClass};
    use crate::modifier::ValueRange;
    use crate::types::{ModifierKind, SlotKind};

    fn weapon(handedness: Handedness) -> BaseItem {
        BaseItem::new(
            "Test Weapon",
            ItemKind::Weapon(WeaponBase {
                class: WeaponClass::Axe,
                handedness,
                physical_min: 10,
                physical_max: 20,
                critical_chance: 5.0,
                attack_speed: 1.3,
            }),
            50,
        )
    }

    fn armour(slot: ArmourSlot, armour: i32, energy_shield: i32) -> BaseItem {
        BaseItem::new(
            "Test Armour",
            ItemKind::Armour(ArmourBase {
                slot,
                armour,
                evasion: 0,
                energy_shield,
                block_chance: if slot == ArmourSlot::Shield { 20 } else { 0 },
            }),
            50,
        )
    }

    fn ring() -> BaseItem {
        BaseItem::new("Iron Ring", ItemKind::Jewellery(JewelleryBase { slot: JewellerySlot::Ring }), 50)
    }

    fn template(modifier: AffixModifier) -> Affix {
        Affix::new("Test", SlotKind::Prefix, 5, 100.0).with_modifier(modifier)
    }

    fn local_increased_physical() -> Affix {
        template(
            AffixModifier::new("IncreasedPhysicalDamage", StatFamily::PhysicalDamage, ValueRange::single(40, 49))
                .with_kind(ModifierKind::Increased)
                .local(),
        )
    }

    #[test]
    fn test_local_physical_rejected_on_jewellery() {
        assert!(!is_compatible(&local_increased_physical(), &ring()));
        assert!(is_compatible(&local_increased_physical(), &weapon(Handedness::OneHand)));
    }

    #[test]
    fn test_global_weapon_families_rejected_on_weapons() {
        let global_speed = template(
            AffixModifier::new("IncreasedAttackSpeed", StatFamily::AttackSpeed, ValueRange::single(5, 7))
                .with_kind(ModifierKind::Increased),
        );
        assert!(!is_compatible(&global_speed, &weapon(Handedness::OneHand)));
        assert!(is_compatible(&global_speed, &ring()));
        assert!(is_compatible(&global_speed, &armour(ArmourSlot::Gloves, 20, 0)));
    }

    #[test]
    fn test_local_defences_need_base_value() {
        let local_es = template(
            AffixModifier::new("IncreasedEnergyShield", StatFamily::EnergyShield, ValueRange::single(20, 30))
                .with_kind(ModifierKind::Increased)
                .local(),
        );
        assert!(!is_compatible(&local_es, &armour(ArmourSlot::Helmet, 50, 0)));
        assert!(is_compatible(&local_es, &armour(ArmourSlot::Helmet, 0, 30)));
    }

    #[test]
    fn test_local_block_needs_shield() {
        let block = template(
            AffixModifier::new("BlockChance", StatFamily::BlockChance, ValueRange::single(2, 4)).local(),
        );
        assert!(is_compatible(&block, &armour(ArmourSlot::Shield, 40, 0)));
        assert!(!is_compatible(&block, &armour(ArmourSlot::BodyArmour, 40, 0)));
        assert!(is_compatible(&block, &armour(ArmourSlot::BodyArmour, 40, 0).with_tag("shield")));
    }

    #[test]
    fn test_unlisted_families_default_compatible() {
        let life = template(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)).local());
        assert!(is_compatible(&life, &ring()));
        assert!(is_compatible(&life, &weapon(Handedness::TwoHand)));
    }

    #[test]
    fn test_any_failing_modifier_rejects_template() {
        let mixed = local_increased_physical()
            .with_modifier(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)));
        assert!(!is_compatible(&mixed, &ring()));
    }

    #[test]
    fn test_compatible_tags_any_of() {
        let affix = template(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)))
            .with_compatible_tag("energyshield_base")
            .with_compatible_tag("ring");

        assert!(is_compatible(&affix, &ring()));
        assert!(is_compatible(&affix, &armour(ArmourSlot::Boots, 0, 15)));
        assert!(!is_compatible(&affix, &armour(ArmourSlot::Boots, 15, 0)));
    }

    #[test]
    fn test_unknown_base_tag_never_matches() {
        let affix = template(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)))
            .with_compatible_tag("mana_base");
        assert!(!is_compatible(&affix, &ring()));
    }

    #[test]
    fn test_required_tags_and_semantics() {
        let affix = template(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)))
            .with_required_tag("armour")
            .with_required_tag("helmet");
        assert!(is_compatible(&affix, &armour(ArmourSlot::Helmet, 10, 0)));
        assert!(!is_compatible(&affix, &armour(ArmourSlot::Boots, 10, 0)));
        // authored tags are not part of the static mapping
        assert!(!is_compatible(&affix, &ring().with_tag("armour").with_tag("helmet")));
    }

    #[test]
    fn test_compatible_tags_subsume_required_tags() {
        let affix = template(AffixModifier::new("Life", StatFamily::Life, ValueRange::single(10, 20)))
            .with_compatible_tag("ring")
            .with_required_tag("helmet");
        assert!(is_compatible(&affix, &ring()));
    }

    #[test]
    fn test_handedness() {
        let two_hand_only = local_increased_physical().with_handedness(Handedness::TwoHand);
        assert!(is_compatible(&two_hand_only, &weapon(Handedness::TwoHand)));
        assert!(!is_compatible(&two_hand_only, &weapon(Handedness::OneHand)));
        assert!(!handedness_allows(Handedness::OneHand, &ring()));
        assert!(handedness_allows(Handedness::Both, &ring()));
    }
}
