//! Attack power calculator: base attack, attribute scaling, spell scaling and requirement
//! penalties for one weapon at one upgrade level.

mod error;

pub use error::{CalcError, Result};

use crate::config::DEFAULT_INEFFECTIVE_ATTRIBUTE_PENALTY;
use crate::model::{
    AttackPowerMap, AttackPowerType, Attribute, AttributeCorrect, Attributes, Weapon,
    ALL_DAMAGE_TYPES, ALL_STATUS_TYPES,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Equip and upgrade options for one calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponAttackOptions {
    pub two_handing: bool,
    /// Level on the weapon's own scale. Callers clamp with [`Weapon::clamp_upgrade_level`].
    pub upgrade_level: usize,
    /// Use the unadjusted Strength for damage scaling even when two handing.
    pub disable_two_handing_attack_power_bonus: bool,
    /// Apply the Arcane-driven status buildup curve to status effects.
    pub include_arcane_bonus: bool,
    pub ineffective_attribute_penalty: f64,
}

impl WeaponAttackOptions {
    pub fn new(upgrade_level: usize) -> Self {
        Self {
            two_handing: false,
            upgrade_level,
            disable_two_handing_attack_power_bonus: false,
            include_arcane_bonus: false,
            ineffective_attribute_penalty: DEFAULT_INEFFECTIVE_ATTRIBUTE_PENALTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponAttackResult {
    pub upgrade_level: usize,
    pub base_attack_power: AttackPowerMap,
    pub attack_power: AttackPowerMap,
    /// Percent figure for sorcery/incantation tools (100 = no bonus).
    pub spell_scaling: AttackPowerMap,
    pub guard_cut_rate: AttackPowerMap,
    pub stability: f64,
    pub ineffective_attributes: BTreeSet<Attribute>,
    pub ineffective_attack_power_types: BTreeSet<AttackPowerType>,
}

impl WeaponAttackResult {
    pub fn is_effective(&self) -> bool {
        self.ineffective_attributes.is_empty()
    }
}

/// Apply the 50% Strength bonus for two handing. Paired weapons never get it; bows and
/// ballistae always do.
pub fn adjust_attributes_for_two_handing(
    weapon: &Weapon,
    attributes: &Attributes,
    two_handing: bool,
) -> Attributes {
    let bonus = if weapon.weapon_type.forces_two_handing() {
        true
    } else {
        two_handing && !weapon.paired
    };
    if bonus {
        let strength = u64::from(attributes.strength) * 3 / 2;
        attributes.with(Attribute::Str, u32::try_from(strength).unwrap_or(u32::MAX))
    } else {
        *attributes
    }
}

/// Compute the attack power breakdown of `weapon` for the given attributes and options.
pub fn compute_attack(
    weapon: &Weapon,
    attributes: &Attributes,
    options: &WeaponAttackOptions,
) -> Result<WeaponAttackResult> {
    let level = options.upgrade_level;
    let level_attack = weapon
        .attack
        .get(level)
        .ok_or_else(|| CalcError::UpgradeLevelOutOfRange {
            weapon: weapon.name.clone(),
            requested: level,
            max: weapon.max_upgrade_level(),
        })?;
    if weapon.attribute_scaling.len() <= level {
        return Err(CalcError::MissingScalingTable {
            weapon: weapon.name.clone(),
            level,
        });
    }

    let adjusted = adjust_attributes_for_two_handing(weapon, attributes, options.two_handing);

    let ineffective_attributes: BTreeSet<Attribute> = weapon
        .requirements
        .iter()
        .filter(|&(&attribute, &requirement)| adjusted.get(attribute) < requirement)
        .map(|(&attribute, _)| attribute)
        .collect();

    let mut ineffective_attack_power_types = BTreeSet::new();
    let mut base_attack_power = AttackPowerMap::new();
    let mut attack_power = AttackPowerMap::new();
    let mut spell_scaling = AttackPowerMap::new();

    for attack_power_type in ALL_DAMAGE_TYPES.iter().chain(ALL_STATUS_TYPES.iter()).copied() {
        let is_damage_type = attack_power_type.is_damage_type();
        let current_base = level_attack.get(&attack_power_type).copied().unwrap_or(0.0);
        // Spell tools need spell scaling even without base attack on the channel.
        if current_base == 0.0 && !weapon.is_spell_tool() {
            continue;
        }

        let scaling_attributes = weapon.attack_element_correct.get(&attack_power_type);
        let requirement_unmet = is_damage_type
            && scaling_attributes.is_some_and(|correct| {
                ineffective_attributes
                    .iter()
                    .any(|a| correct.get(a).is_some_and(AttributeCorrect::is_active))
            });

        let mut total_scaling = 1.0;
        if requirement_unmet {
            total_scaling = 1.0 - options.ineffective_attribute_penalty;
            ineffective_attack_power_types.insert(attack_power_type);
        } else if let Some(scaling_attributes) = scaling_attributes {
            let effective = if is_damage_type && !options.disable_two_handing_attack_power_bonus {
                &adjusted
            } else {
                attributes
            };
            for (&attribute, correct) in scaling_attributes {
                let scaling = match *correct {
                    AttributeCorrect::Flag(true) => weapon.scaling_at(level, attribute),
                    AttributeCorrect::Weight(weight) if weight != 0.0 => {
                        let base = weapon.scaling_at(0, attribute);
                        if base == 0.0 {
                            0.0
                        } else {
                            weight * weapon.scaling_at(level, attribute) / base
                        }
                    }
                    _ => continue,
                };
                if scaling != 0.0 {
                    let value = effective.get(attribute);
                    total_scaling +=
                        calc_correct(weapon, attack_power_type, attribute, value)? * scaling;
                }
            }
        }

        if current_base != 0.0 {
            let mut base = current_base;
            if options.include_arcane_bonus && !is_damage_type {
                if let Some(graph) = &weapon.status_additional_calc_correct_graph {
                    let arcane = adjusted.arcane;
                    let curve = graph.get(arcane).ok_or_else(|| {
                        CalcError::MissingStatusGraphValue {
                            weapon: weapon.name.clone(),
                            value: arcane,
                        }
                    })?;
                    base *= 100.0 * curve;
                }
            }
            base_attack_power.insert(attack_power_type, base);
            attack_power.insert(attack_power_type, base * total_scaling);
        }

        if is_damage_type && weapon.is_spell_tool() {
            spell_scaling.insert(attack_power_type, 100.0 * total_scaling);
        }
    }

    Ok(WeaponAttackResult {
        upgrade_level: level,
        base_attack_power,
        attack_power,
        spell_scaling,
        guard_cut_rate: weapon.guard_cut_rate.get(level).cloned().unwrap_or_default(),
        stability: weapon.stability.get(level).copied().unwrap_or(0.0),
        ineffective_attributes,
        ineffective_attack_power_types,
    })
}

fn calc_correct(
    weapon: &Weapon,
    attack_power_type: AttackPowerType,
    attribute: Attribute,
    value: u32,
) -> Result<f64> {
    let graph = weapon
        .calc_correct_graphs
        .get(&attack_power_type)
        .ok_or_else(|| CalcError::MissingCalcCorrectGraph {
            weapon: weapon.name.clone(),
            attack_power_type,
        })?;
    graph
        .get(value)
        .ok_or_else(|| CalcError::MissingCalcCorrectValue {
            weapon: weapon.name.clone(),
            attack_power_type,
            attribute,
            value,
        })
}
