//! Attack power channels (damage and status effects) and enemy weak-rate categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One attack power channel. Damage types and status types are disjoint; the numeric
/// code is what sort keys and table columns refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackPowerType {
    Physical,
    Magic,
    Fire,
    Lightning,
    Holy,
    Poison,
    ScarletRot,
    Bleed,
    Frost,
    Sleep,
    Madness,
    DeathBlight,
    Stance,
}

/// Damage types, in display order.
pub const ALL_DAMAGE_TYPES: [AttackPowerType; 6] = [
    AttackPowerType::Physical,
    AttackPowerType::Magic,
    AttackPowerType::Fire,
    AttackPowerType::Lightning,
    AttackPowerType::Holy,
    AttackPowerType::Stance,
];

pub const ALL_STATUS_TYPES: [AttackPowerType; 7] = [
    AttackPowerType::Poison,
    AttackPowerType::ScarletRot,
    AttackPowerType::Bleed,
    AttackPowerType::Frost,
    AttackPowerType::Sleep,
    AttackPowerType::Madness,
    AttackPowerType::DeathBlight,
];

/// Damage types that add up to the "total attack" figure. Stance damage is not part of it.
pub const TOTAL_ATTACK_TYPES: [AttackPowerType; 5] = [
    AttackPowerType::Physical,
    AttackPowerType::Magic,
    AttackPowerType::Fire,
    AttackPowerType::Lightning,
    AttackPowerType::Holy,
];

impl AttackPowerType {
    pub fn code(self) -> u8 {
        match self {
            AttackPowerType::Physical => 0,
            AttackPowerType::Magic => 1,
            AttackPowerType::Fire => 2,
            AttackPowerType::Lightning => 3,
            AttackPowerType::Holy => 4,
            AttackPowerType::Poison => 5,
            AttackPowerType::ScarletRot => 6,
            AttackPowerType::Bleed => 7,
            AttackPowerType::Frost => 8,
            AttackPowerType::Sleep => 9,
            AttackPowerType::Madness => 10,
            AttackPowerType::DeathBlight => 11,
            AttackPowerType::Stance => 12,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        ALL_DAMAGE_TYPES
            .iter()
            .chain(ALL_STATUS_TYPES.iter())
            .copied()
            .find(|t| t.code() == code)
    }

    pub fn is_damage_type(self) -> bool {
        ALL_DAMAGE_TYPES.contains(&self)
    }

    pub fn is_status_type(self) -> bool {
        !self.is_damage_type()
    }

    pub fn label(self) -> &'static str {
        match self {
            AttackPowerType::Physical => "Physical",
            AttackPowerType::Magic => "Magic",
            AttackPowerType::Fire => "Fire",
            AttackPowerType::Lightning => "Lightning",
            AttackPowerType::Holy => "Holy",
            AttackPowerType::Poison => "Poison",
            AttackPowerType::ScarletRot => "Scarlet Rot",
            AttackPowerType::Bleed => "Bleed",
            AttackPowerType::Frost => "Frost",
            AttackPowerType::Sleep => "Sleep",
            AttackPowerType::Madness => "Madness",
            AttackPowerType::DeathBlight => "Death Blight",
            AttackPowerType::Stance => "Stance",
        }
    }
}

impl fmt::Display for AttackPowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enemy categories a weapon can deal bonus damage against (A..F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeakRateType {
    A,
    B,
    C,
    D,
    E,
    F,
}

pub const ALL_WEAK_RATE_TYPES: [WeakRateType; 6] = [
    WeakRateType::A,
    WeakRateType::B,
    WeakRateType::C,
    WeakRateType::D,
    WeakRateType::E,
    WeakRateType::F,
];

impl WeakRateType {
    pub fn code(self) -> u8 {
        match self {
            WeakRateType::A => 0,
            WeakRateType::B => 1,
            WeakRateType::C => 2,
            WeakRateType::D => 3,
            WeakRateType::E => 4,
            WeakRateType::F => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        ALL_WEAK_RATE_TYPES.iter().copied().find(|t| t.code() == code)
    }
}
