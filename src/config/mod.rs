//! Configuration loading and defaults.

use crate::model::{Attributes, WeaponType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Highest upgrade level of regular (smithing stone) weapons.
pub const MAX_REGULAR_UPGRADE_LEVEL: usize = 25;

/// Highest upgrade level of special (somber) weapons.
pub const MAX_SPECIAL_UPGRADE_LEVEL: usize = 10;

/// Fraction of attack power lost on a damage type whose requirements are not met.
pub const DEFAULT_INEFFECTIVE_ATTRIBUTE_PENALTY: f64 = 0.4;

pub const DEFAULT_ATTRIBUTE_VALUE: u32 = 30;

/// Maximum size in bytes for a weapon data document (bound input size).
pub const MAX_WEAPON_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// Maximum size in bytes for a config file.
pub const MAX_CONFIG_FILE_BYTES: u64 = 64 * 1024;

/// Affinity ids for "Standard" and "Special" (unique weapons).
pub const DEFAULT_AFFINITY_IDS: [i32; 2] = [0, -1];

pub const DEFAULT_SORT_BY: &str = "totalAttack";

/// User-selectable attributes, filters and display options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub attributes: Attributes,
    pub two_handing: bool,
    /// Upgrade level on the regular (+25) scale; special weapons are mapped onto +10.
    pub upgrade_level: usize,
    /// Weapon classes to list. Empty means every class.
    pub weapon_types: Vec<WeaponType>,
    /// Affinities to list. Empty means every affinity.
    pub affinity_ids: Vec<i32>,
    pub include_dlc: bool,
    pub include_arcane_bonus: bool,
    pub effective_only: bool,
    pub split_damage: bool,
    pub show_base_damage: bool,
    pub group_weapon_types: bool,
    pub numerical_scaling: bool,
    pub sort_by: String,
    pub reverse: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            attributes: Attributes::uniform(DEFAULT_ATTRIBUTE_VALUE),
            two_handing: false,
            upgrade_level: MAX_REGULAR_UPGRADE_LEVEL,
            weapon_types: Vec::new(),
            affinity_ids: DEFAULT_AFFINITY_IDS.to_vec(),
            include_dlc: true,
            include_arcane_bonus: false,
            effective_only: false,
            split_damage: true,
            show_base_damage: false,
            group_weapon_types: false,
            numerical_scaling: false,
            sort_by: DEFAULT_SORT_BY.to_string(),
            reverse: false,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let meta = fs::metadata(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            return Err(format!(
                "config file too large: {} bytes (max {})",
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
        }
        let s = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, String> {
        let cfg: AppConfig = toml::from_str(s).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.upgrade_level > MAX_REGULAR_UPGRADE_LEVEL {
            return Err(format!(
                "upgrade_level {} exceeds +{}",
                self.upgrade_level, MAX_REGULAR_UPGRADE_LEVEL
            ));
        }
        Ok(())
    }
}
