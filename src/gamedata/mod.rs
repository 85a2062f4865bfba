//! Load the decoded weapon document (JSON array of weapons).

use crate::config::{MAX_REGULAR_UPGRADE_LEVEL, MAX_SPECIAL_UPGRADE_LEVEL, MAX_WEAPON_FILE_BYTES};
use crate::model::Weapon;
use crate::util::{check_file_size, normalize_id};
use std::fs;
use std::path::Path;

/// Read and validate a weapon document from disk.
pub fn load_weapons(path: &Path) -> Result<Vec<Weapon>, String> {
    check_file_size(path, MAX_WEAPON_FILE_BYTES)?;
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let weapons = parse_weapons(&content)?;
    tracing::info!("loaded {} weapon(s) from {}", weapons.len(), path.display());
    Ok(weapons)
}

pub fn parse_weapons(content: &str) -> Result<Vec<Weapon>, String> {
    let weapons: Vec<Weapon> = serde_json::from_str(content).map_err(|e| e.to_string())?;
    for w in &weapons {
        validate_weapon(w)?;
    }
    Ok(weapons)
}

/// Structural checks on per-level tables. Curve coverage is checked when a value is looked up.
pub fn validate_weapon(weapon: &Weapon) -> Result<(), String> {
    if weapon.attack.is_empty() {
        return Err(format!("{}: empty attack table", weapon.name));
    }
    if weapon.attribute_scaling.len() != weapon.attack.len() {
        return Err(format!(
            "{}: {} attack levels but {} scaling levels",
            weapon.name,
            weapon.attack.len(),
            weapon.attribute_scaling.len()
        ));
    }
    let max = weapon.max_upgrade_level();
    if max > MAX_REGULAR_UPGRADE_LEVEL {
        return Err(format!(
            "{}: {} upgrade levels (max +{})",
            weapon.name, max, MAX_REGULAR_UPGRADE_LEVEL
        ));
    }
    if max != MAX_REGULAR_UPGRADE_LEVEL && max != MAX_SPECIAL_UPGRADE_LEVEL && max != 0 {
        tracing::debug!("{}: unusual max upgrade level +{}", weapon.name, max);
    }
    for (label, len) in [
        ("guard cut rate", weapon.guard_cut_rate.len()),
        ("stability", weapon.stability.len()),
    ] {
        if len != 0 && len != weapon.attack.len() {
            return Err(format!(
                "{}: {} table has {} levels, expected {}",
                weapon.name,
                label,
                len,
                weapon.attack.len()
            ));
        }
    }
    Ok(())
}

/// Find a weapon by display name, case-insensitively.
pub fn find_weapon<'a>(weapons: &'a [Weapon], name: &str) -> Option<&'a Weapon> {
    let key = normalize_id(name);
    weapons.iter().find(|w| normalize_id(&w.name) == key)
}
