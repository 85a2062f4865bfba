//! Errors raised when weapon data cannot support a calculation.

use crate::model::{AttackPowerType, Attribute};
use thiserror::Error;

/// Data-integrity failures. Any of these aborts the calculation for the weapon; no
/// value is substituted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{weapon}: upgrade level +{requested} exceeds max +{max}")]
    UpgradeLevelOutOfRange {
        weapon: String,
        requested: usize,
        max: usize,
    },

    #[error("{weapon}: no attribute scaling table for upgrade level +{level}")]
    MissingScalingTable { weapon: String, level: usize },

    #[error("{weapon}: no calc correct graph for {attack_power_type}")]
    MissingCalcCorrectGraph {
        weapon: String,
        attack_power_type: AttackPowerType,
    },

    #[error("{weapon}: {attack_power_type} graph has no value for {attribute} = {value}")]
    MissingCalcCorrectValue {
        weapon: String,
        attack_power_type: AttackPowerType,
        attribute: Attribute,
        value: u32,
    },

    #[error("{weapon}: status graph has no value for arc = {value}")]
    MissingStatusGraphValue { weapon: String, value: u32 },
}

pub type Result<T> = std::result::Result<T, CalcError>;
