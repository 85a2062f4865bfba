//! Weapon list building: calculate rows, filter, group and sort them for display.

mod filter;
mod sort;

pub use filter::{filter_weapons, retain_effective, WeaponFilter};
pub use sort::{sort_value, sort_weapons, SortBy, SortValue};

use crate::calculator::{compute_attack, CalcError, WeaponAttackOptions, WeaponAttackResult};
use crate::config::AppConfig;
use crate::model::{Attributes, Weapon, WeaponType};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One table row: a weapon and its calculated attack at the selected level.
#[derive(Debug, Clone, Serialize)]
pub struct WeaponRow<'a> {
    pub weapon: &'a Weapon,
    pub result: WeaponAttackResult,
}

/// Rows sharing a weapon class, or every row when grouping is off.
#[derive(Debug, Clone, Serialize)]
pub struct WeaponRowGroup<'a> {
    pub weapon_type: Option<WeaponType>,
    pub rows: Vec<WeaponRow<'a>>,
}

/// Calculation options for one weapon from the user's settings. The configured level is on
/// the regular scale and is clamped onto the weapon's own.
pub fn attack_options(weapon: &Weapon, cfg: &AppConfig) -> WeaponAttackOptions {
    let mut options = WeaponAttackOptions::new(weapon.clamp_upgrade_level(cfg.upgrade_level));
    options.two_handing = cfg.two_handing;
    options.include_arcane_bonus = cfg.include_arcane_bonus;
    options
}

/// Calculate every weapon in parallel. Weapons whose data cannot support the calculation
/// are returned separately with their error; row order follows `weapons`.
pub fn compute_rows<'a>(
    weapons: &[&'a Weapon],
    attributes: &Attributes,
    cfg: &AppConfig,
) -> (Vec<WeaponRow<'a>>, Vec<CalcError>) {
    let results: Vec<Result<WeaponRow<'a>, CalcError>> = weapons
        .par_iter()
        .map(|&weapon| {
            compute_attack(weapon, attributes, &attack_options(weapon, cfg))
                .map(|result| WeaponRow { weapon, result })
        })
        .collect();
    let mut rows = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for r in results {
        match r {
            Ok(row) => rows.push(row),
            Err(e) => errors.push(e),
        }
    }
    (rows, errors)
}

/// Sort rows, optionally split into one group per weapon class (in class order).
pub fn group_rows<'a>(
    rows: &[WeaponRow<'a>],
    group_by_type: bool,
    sort_by: &SortBy,
    reverse: bool,
) -> Vec<WeaponRowGroup<'a>> {
    if !group_by_type {
        return vec![WeaponRowGroup {
            weapon_type: None,
            rows: sort_weapons(rows, sort_by, reverse),
        }];
    }
    let mut by_type: BTreeMap<WeaponType, Vec<WeaponRow<'a>>> = BTreeMap::new();
    for row in rows {
        by_type
            .entry(row.weapon.weapon_type)
            .or_default()
            .push(row.clone());
    }
    by_type
        .into_iter()
        .map(|(weapon_type, rows)| WeaponRowGroup {
            weapon_type: Some(weapon_type),
            rows: sort_weapons(&rows, sort_by, reverse),
        })
        .collect()
}
