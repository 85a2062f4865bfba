//! Weapon data model: attributes, attack power channels, weapon tables.

mod attack_power;
mod attributes;
mod weapon;

pub use attack_power::{
    AttackPowerType, WeakRateType, ALL_DAMAGE_TYPES, ALL_STATUS_TYPES, ALL_WEAK_RATE_TYPES,
    TOTAL_ATTACK_TYPES,
};
pub use attributes::{Attribute, Attributes, ALL_ATTRIBUTES};
pub use weapon::{
    to_special_upgrade_level, upgrade_level_label, AttributeCorrect, CalcCorrectGraph, Weapon,
    WeaponType,
};

#[cfg(test)]
pub(crate) use weapon::fixtures;

use std::collections::BTreeMap;

/// Sparse per-channel values; a missing key means "not applicable".
pub type AttackPowerMap = BTreeMap<AttackPowerType, f64>;

/// Sparse per-attribute values.
pub type AttributeMap<T> = BTreeMap<Attribute, T>;

/// Sum of attack power over the channels that make up total damage.
pub fn total_damage_attack_power(attack_power: &AttackPowerMap) -> f64 {
    TOTAL_ATTACK_TYPES
        .iter()
        .map(|t| attack_power.get(t).copied().unwrap_or(0.0))
        .sum()
}
