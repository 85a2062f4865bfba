//! Row filtering by weapon class, affinity, expansion content and effectiveness.

use super::WeaponRow;
use crate::config::AppConfig;
use crate::model::{Weapon, WeaponType};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponFilter {
    /// Empty means every weapon class.
    pub weapon_types: BTreeSet<WeaponType>,
    /// Empty means every affinity.
    pub affinity_ids: BTreeSet<i32>,
    pub include_dlc: bool,
    /// Drop rows whose requirements are not met.
    pub effective_only: bool,
}

impl Default for WeaponFilter {
    fn default() -> Self {
        Self {
            weapon_types: BTreeSet::new(),
            affinity_ids: BTreeSet::new(),
            include_dlc: true,
            effective_only: false,
        }
    }
}

impl WeaponFilter {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            weapon_types: cfg.weapon_types.iter().copied().collect(),
            affinity_ids: cfg.affinity_ids.iter().copied().collect(),
            include_dlc: cfg.include_dlc,
            effective_only: cfg.effective_only,
        }
    }

    /// Static checks that need no calculation.
    pub fn matches(&self, weapon: &Weapon) -> bool {
        if !self.include_dlc && (weapon.dlc || weapon.weapon_type.is_dlc()) {
            return false;
        }
        if !self.weapon_types.is_empty() && !self.weapon_types.contains(&weapon.weapon_type) {
            return false;
        }
        self.affinity_ids.is_empty() || self.affinity_ids.contains(&weapon.affinity_id)
    }
}

pub fn filter_weapons<'a>(weapons: &'a [Weapon], filter: &WeaponFilter) -> Vec<&'a Weapon> {
    weapons.iter().filter(|w| filter.matches(w)).collect()
}

/// Apply the `effective_only` check, which needs calculated rows.
pub fn retain_effective<'a>(rows: Vec<WeaponRow<'a>>, filter: &WeaponFilter) -> Vec<WeaponRow<'a>> {
    if !filter.effective_only {
        return rows;
    }
    rows.into_iter().filter(|r| r.result.is_effective()).collect()
}
