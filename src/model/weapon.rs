//! Static weapon data as decoded from the weapon document.
//! Per-level tables are indexed by upgrade level; per-type maps are sparse.

use super::{AttackPowerMap, AttackPowerType, Attribute, AttributeMap, WeakRateType};
use crate::config::{MAX_REGULAR_UPGRADE_LEVEL, MAX_SPECIAL_UPGRADE_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    Dagger,
    StraightSword,
    Greatsword,
    ColossalSword,
    CurvedSword,
    CurvedGreatsword,
    Katana,
    Twinblade,
    ThrustingSword,
    HeavyThrustingSword,
    Axe,
    Greataxe,
    Hammer,
    GreatHammer,
    Flail,
    Spear,
    GreatSpear,
    Halberd,
    Reaper,
    Fist,
    Claw,
    Whip,
    ColossalWeapon,
    LightBow,
    Bow,
    Greatbow,
    Crossbow,
    Ballista,
    GlintstoneStaff,
    SacredSeal,
    SmallShield,
    MediumShield,
    Greatshield,
    Torch,
    HandToHand,
    PerfumeBottle,
    ThrustingShield,
    ThrowingBlade,
    BackhandBlade,
    LightGreatsword,
    GreatKatana,
    BeastClaw,
}

impl WeaponType {
    /// Bows and ballistae can only be wielded with both hands.
    pub fn forces_two_handing(self) -> bool {
        matches!(
            self,
            WeaponType::LightBow | WeaponType::Bow | WeaponType::Greatbow | WeaponType::Ballista
        )
    }

    /// Weapon classes introduced by the expansion.
    pub fn is_dlc(self) -> bool {
        matches!(
            self,
            WeaponType::HandToHand
                | WeaponType::PerfumeBottle
                | WeaponType::ThrustingShield
                | WeaponType::ThrowingBlade
                | WeaponType::BackhandBlade
                | WeaponType::LightGreatsword
                | WeaponType::GreatKatana
                | WeaponType::BeastClaw
        )
    }
}

/// Per-attribute entry of a weapon's attack element correction: `true` means the raw scaling
/// value is used directly, a number is a weight applied relative to the +0 scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeCorrect {
    Flag(bool),
    Weight(f64),
}

impl AttributeCorrect {
    pub fn is_active(&self) -> bool {
        match *self {
            AttributeCorrect::Flag(on) => on,
            AttributeCorrect::Weight(w) => w != 0.0,
        }
    }
}

/// Scaling curve sampled at every integer attribute value (index = attribute value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalcCorrectGraph(pub Vec<f64>);

impl CalcCorrectGraph {
    pub fn get(&self, attribute_value: u32) -> Option<f64> {
        self.0.get(attribute_value as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    /// Full display name including affinity, e.g. "Heavy Claymore".
    pub name: String,
    /// Base weapon name shared by every affinity.
    pub weapon_name: String,
    pub affinity_id: i32,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub dlc: bool,
    #[serde(default)]
    pub paired: bool,
    #[serde(default)]
    pub sorcery_tool: bool,
    #[serde(default)]
    pub incantation_tool: bool,

    #[serde(default)]
    pub requirements: AttributeMap<u32>,
    pub attack: Vec<AttackPowerMap>,
    pub attribute_scaling: Vec<AttributeMap<f64>>,
    #[serde(default)]
    pub attack_element_correct: BTreeMap<AttackPowerType, AttributeMap<AttributeCorrect>>,
    #[serde(default)]
    pub calc_correct_graphs: BTreeMap<AttackPowerType, CalcCorrectGraph>,
    #[serde(default)]
    pub status_additional_calc_correct_graph: Option<CalcCorrectGraph>,
    /// Descending (threshold, grade) pairs, e.g. (1.75, "S").
    #[serde(default)]
    pub scaling_tiers: Vec<(f64, String)>,

    #[serde(default)]
    pub poise: f64,
    #[serde(default)]
    pub stam_dmg: f64,
    #[serde(default)]
    pub stam_cost: f64,
    #[serde(default)]
    pub crit: f64,
    /// Range modifier for bows; -1 when not applicable.
    #[serde(default = "default_bow_dist")]
    pub bow_dist: f64,
    #[serde(default)]
    pub weak_rate: BTreeMap<WeakRateType, f64>,
    #[serde(default)]
    pub guard_cut_rate: Vec<AttackPowerMap>,
    #[serde(default)]
    pub stability: Vec<f64>,
}

fn default_bow_dist() -> f64 {
    -1.0
}

impl Weapon {
    pub fn max_upgrade_level(&self) -> usize {
        self.attack.len().saturating_sub(1)
    }

    /// Somber weapons upgrade to +10 instead of +25.
    pub fn is_special(&self) -> bool {
        self.max_upgrade_level() <= MAX_SPECIAL_UPGRADE_LEVEL
    }

    /// Map a level on the regular (+25) scale onto this weapon's own scale.
    pub fn clamp_upgrade_level(&self, regular_level: usize) -> usize {
        let level = if self.is_special() {
            to_special_upgrade_level(regular_level)
        } else {
            regular_level
        };
        level.min(self.max_upgrade_level())
    }

    pub fn is_spell_tool(&self) -> bool {
        self.sorcery_tool || self.incantation_tool
    }

    pub fn requirement(&self, attribute: Attribute) -> u32 {
        self.requirements.get(&attribute).copied().unwrap_or(0)
    }

    /// Raw scaling value at a level; absent entries read as zero.
    pub fn scaling_at(&self, upgrade_level: usize, attribute: Attribute) -> f64 {
        self.attribute_scaling
            .get(upgrade_level)
            .and_then(|m| m.get(&attribute))
            .copied()
            .unwrap_or(0.0)
    }

    /// Letter grade for a scaling value, from the weapon's scaling tiers.
    pub fn scaling_grade(&self, scaling: f64) -> Option<&str> {
        if scaling == 0.0 {
            return None;
        }
        self.scaling_tiers
            .iter()
            .find(|(threshold, _)| scaling >= *threshold)
            .map(|(_, label)| label.as_str())
    }

    /// Bonus multiplier against an enemy category; 1.0 (no bonus) when absent.
    pub fn weak_rate(&self, weak_rate_type: WeakRateType) -> f64 {
        self.weak_rate.get(&weak_rate_type).copied().unwrap_or(1.0)
    }
}

/// Convert a regular (+0..+25) upgrade level to the equivalent somber (+0..+10) level.
pub fn to_special_upgrade_level(regular_level: usize) -> usize {
    ((regular_level as f64 + 1.0) / 2.5).floor() as usize
}

/// Label for a level in the upgrade picker: "+25 / +10" on the regular scale.
pub fn upgrade_level_label(level: usize, max_upgrade_level: usize) -> String {
    if max_upgrade_level == MAX_REGULAR_UPGRADE_LEVEL {
        format!("+{} / +{}", level, to_special_upgrade_level(level))
    } else {
        format!("+{}", level)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::straight_sword;
    use super::*;

    #[test]
    fn special_level_conversion() {
        assert_eq!(to_special_upgrade_level(0), 0);
        assert_eq!(to_special_upgrade_level(1), 0);
        assert_eq!(to_special_upgrade_level(4), 2);
        assert_eq!(to_special_upgrade_level(24), 10);
        assert_eq!(to_special_upgrade_level(25), 10);
    }

    #[test]
    fn clamp_on_regular_and_special_weapons() {
        let mut w = straight_sword();
        assert_eq!(w.max_upgrade_level(), 25);
        assert_eq!(w.clamp_upgrade_level(30), 25);
        assert_eq!(w.clamp_upgrade_level(7), 7);
        w.attack.truncate(MAX_SPECIAL_UPGRADE_LEVEL + 1);
        assert!(w.is_special());
        assert_eq!(w.clamp_upgrade_level(25), 10);
        assert_eq!(w.clamp_upgrade_level(9), 4);
    }

    #[test]
    fn scaling_grade_picks_first_matching_tier() {
        let w = straight_sword();
        assert_eq!(w.scaling_grade(0.5), Some("D"));
        assert_eq!(w.scaling_grade(1.8), Some("S"));
        assert_eq!(w.scaling_grade(0.0), None);
    }

    #[test]
    fn attribute_correct_decodes_bool_or_number() {
        let parsed: BTreeMap<Attribute, AttributeCorrect> =
            serde_json::from_str(r#"{"str": true, "dex": 0.5, "int": false}"#).unwrap();
        assert_eq!(parsed[&Attribute::Str], AttributeCorrect::Flag(true));
        assert_eq!(parsed[&Attribute::Dex], AttributeCorrect::Weight(0.5));
        assert!(!parsed[&Attribute::Int].is_active());
    }

    #[test]
    fn level_labels() {
        assert_eq!(upgrade_level_label(25, 25), "+25 / +10");
        assert_eq!(upgrade_level_label(3, 10), "+3");
    }
}
