//! Sort keys and ordering of weapon table rows.

use super::WeaponRow;
use crate::model::{total_damage_attack_power, AttackPowerType, Attribute, WeakRateType};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Range modifier projection for weapons without one, so they sort last.
const NO_BOW_DIST_SORT_VALUE: f64 = 999_999.0;

/// Column a weapon list can be sorted by. Parsed from the same string keys the table uses,
/// e.g. `totalAttack`, `0Attack`, `strScaling`, `3WeakRate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortBy {
    Name,
    TotalAttack,
    Poise,
    StamDmg,
    StamCost,
    BowDist,
    Crit,
    Stability,
    Attack(AttackPowerType),
    SpellScaling(AttackPowerType),
    Scaling(Attribute),
    Requirement(Attribute),
    GuardCutRate(AttackPowerType),
    WeakRate(WeakRateType),
    /// Unrecognized key; every row compares equal.
    Unknown(String),
}

impl SortBy {
    pub fn parse(key: &str) -> SortBy {
        match key {
            "name" => return SortBy::Name,
            "totalAttack" => return SortBy::TotalAttack,
            "poise" => return SortBy::Poise,
            "stamDmg" => return SortBy::StamDmg,
            "stamCost" => return SortBy::StamCost,
            "bowDist" => return SortBy::BowDist,
            "crit" => return SortBy::Crit,
            "stability" => return SortBy::Stability,
            _ => {}
        }
        let parsed = if let Some(code) = key.strip_suffix("SpellScaling") {
            attack_power_type(code).map(SortBy::SpellScaling)
        } else if let Some(code) = key.strip_suffix("Attack") {
            attack_power_type(code).map(SortBy::Attack)
        } else if let Some(code) = key.strip_suffix("Scaling") {
            code.parse::<Attribute>().ok().map(SortBy::Scaling)
        } else if let Some(code) = key.strip_suffix("Requirement") {
            code.parse::<Attribute>().ok().map(SortBy::Requirement)
        } else if let Some(code) = key.strip_suffix("GuardCutRate") {
            attack_power_type(code).map(SortBy::GuardCutRate)
        } else if let Some(code) = key.strip_suffix("WeakRate") {
            code.parse::<u8>()
                .ok()
                .and_then(WeakRateType::from_code)
                .map(SortBy::WeakRate)
        } else {
            None
        };
        parsed.unwrap_or_else(|| SortBy::Unknown(key.to_string()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SortBy::Unknown(_))
    }
}

fn attack_power_type(code: &str) -> Option<AttackPowerType> {
    code.parse::<u8>().ok().and_then(AttackPowerType::from_code)
}

impl FromStr for SortBy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortBy::parse(s))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Name => f.write_str("name"),
            SortBy::TotalAttack => f.write_str("totalAttack"),
            SortBy::Poise => f.write_str("poise"),
            SortBy::StamDmg => f.write_str("stamDmg"),
            SortBy::StamCost => f.write_str("stamCost"),
            SortBy::BowDist => f.write_str("bowDist"),
            SortBy::Crit => f.write_str("crit"),
            SortBy::Stability => f.write_str("stability"),
            SortBy::Attack(t) => write!(f, "{}Attack", t.code()),
            SortBy::SpellScaling(t) => write!(f, "{}SpellScaling", t.code()),
            SortBy::Scaling(a) => write!(f, "{}Scaling", a.code()),
            SortBy::Requirement(a) => write!(f, "{}Requirement", a.code()),
            SortBy::GuardCutRate(t) => write!(f, "{}GuardCutRate", t.code()),
            SortBy::WeakRate(w) => write!(f, "{}WeakRate", w.code()),
            SortBy::Unknown(key) => f.write_str(key),
        }
    }
}

/// Value a row is ordered by. Ascending order is the "best first" display order.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn sparse(map: &crate::model::AttackPowerMap, t: AttackPowerType) -> f64 {
    map.get(&t).copied().unwrap_or(0.0)
}

/// Projection of one row for a sort key. Larger-is-better fields are negated.
pub fn sort_value(row: &WeaponRow<'_>, sort_by: &SortBy) -> SortValue {
    let WeaponRow { weapon, result } = row;
    let n = match *sort_by {
        SortBy::Name => {
            return SortValue::Text(format!("{},{:0>4}", weapon.weapon_name, weapon.affinity_id))
        }
        SortBy::TotalAttack => -total_damage_attack_power(&result.attack_power),
        SortBy::Poise => -weapon.poise,
        SortBy::StamDmg => -weapon.stam_dmg,
        SortBy::StamCost => -weapon.stam_cost,
        SortBy::Crit => -weapon.crit,
        SortBy::BowDist => {
            if weapon.bow_dist == -1.0 {
                NO_BOW_DIST_SORT_VALUE
            } else {
                -weapon.bow_dist
            }
        }
        SortBy::Stability => -result.stability,
        SortBy::Attack(t) => -sparse(&result.attack_power, t),
        SortBy::SpellScaling(t) => -sparse(&result.spell_scaling, t),
        SortBy::Scaling(a) => -weapon.scaling_at(result.upgrade_level, a),
        SortBy::Requirement(a) => -(weapon.requirement(a) as f64),
        SortBy::GuardCutRate(t) => -sparse(&result.guard_cut_rate, t),
        SortBy::WeakRate(w) => -weapon.weak_rate(w),
        SortBy::Unknown(_) => 0.0,
    };
    SortValue::Number(n)
}

/// Return the rows ordered by `sort_by`, best first unless `reverse`. The input is left
/// untouched. Rows with equal projections keep their input order in both directions.
pub fn sort_weapons<'a>(
    rows: &[WeaponRow<'a>],
    sort_by: &SortBy,
    reverse: bool,
) -> Vec<WeaponRow<'a>> {
    let mut keyed: Vec<(SortValue, &WeaponRow<'a>)> =
        rows.iter().map(|r| (sort_value(r, sort_by), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{compute_attack, WeaponAttackOptions};
    use crate::model::fixtures::straight_sword;
    use crate::model::{Attributes, Weapon};

    fn weapons() -> Vec<Weapon> {
        let specs = [
            ("Zweihander", 0, 12.0, 130.0, -1.0),
            ("Claymore", 0, 10.0, 110.0, -1.0),
            ("Claymore", 100, 10.0, 145.0, -1.0),
            ("Longbow", 0, 4.0, 60.0, 10.0),
            ("Greatbow", 0, 20.0, 170.0, 25.0),
        ];
        specs
            .iter()
            .map(|&(name, affinity, poise, base, bow_dist)| {
                let mut w = straight_sword();
                w.weapon_name = name.to_string();
                w.name = name.to_string();
                w.affinity_id = affinity;
                w.poise = poise;
                w.bow_dist = bow_dist;
                for row in &mut w.attack {
                    row.insert(AttackPowerType::Physical, base);
                }
                w
            })
            .collect()
    }

    fn rows(weapons: &[Weapon]) -> Vec<WeaponRow<'_>> {
        weapons
            .iter()
            .map(|w| WeaponRow {
                weapon: w,
                result: compute_attack(w, &Attributes::uniform(30), &WeaponAttackOptions::new(25))
                    .unwrap(),
            })
            .collect()
    }

    fn names(rows: &[WeaponRow<'_>]) -> Vec<String> {
        rows.iter()
            .map(|r| format!("{}/{}", r.weapon.weapon_name, r.weapon.affinity_id))
            .collect()
    }

    #[test]
    fn parse_literal_and_parametric_keys() {
        assert_eq!(SortBy::parse("totalAttack"), SortBy::TotalAttack);
        assert_eq!(SortBy::parse("stability"), SortBy::Stability);
        assert_eq!(
            SortBy::parse("1Attack"),
            SortBy::Attack(AttackPowerType::Magic)
        );
        assert_eq!(
            SortBy::parse("4SpellScaling"),
            SortBy::SpellScaling(AttackPowerType::Holy)
        );
        assert_eq!(SortBy::parse("dexScaling"), SortBy::Scaling(Attribute::Dex));
        assert_eq!(
            SortBy::parse("arcRequirement"),
            SortBy::Requirement(Attribute::Arc)
        );
        assert_eq!(
            SortBy::parse("0GuardCutRate"),
            SortBy::GuardCutRate(AttackPowerType::Physical)
        );
        assert_eq!(SortBy::parse("5WeakRate"), SortBy::WeakRate(WeakRateType::F));
        assert!(SortBy::parse("bogusKey").is_unknown());
        assert!(SortBy::parse("99Attack").is_unknown());
        assert!(SortBy::parse("lckScaling").is_unknown());
    }

    #[test]
    fn keys_display_back_to_source() {
        for key in [
            "name",
            "bowDist",
            "12Attack",
            "2SpellScaling",
            "faiScaling",
            "strRequirement",
            "3GuardCutRate",
            "0WeakRate",
            "bogusKey",
        ] {
            assert_eq!(SortBy::parse(key).to_string(), key);
        }
    }

    #[test]
    fn total_attack_best_first() {
        let ws = weapons();
        let sorted = sort_weapons(&rows(&ws), &SortBy::TotalAttack, false);
        assert_eq!(
            names(&sorted),
            vec![
                "Greatbow/0",
                "Claymore/100",
                "Zweihander/0",
                "Claymore/0",
                "Longbow/0"
            ]
        );
    }

    #[test]
    fn reverse_is_exact_inverse_without_ties() {
        let ws = weapons();
        let rs = rows(&ws);
        let forward = names(&sort_weapons(&rs, &SortBy::TotalAttack, false));
        let mut backward = names(&sort_weapons(&rs, &SortBy::TotalAttack, true));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let ws = weapons();
        let rs = rows(&ws);
        for key in ["poise", "totalAttack", "name", "bowDist"] {
            let key = SortBy::parse(key);
            let once = sort_weapons(&rs, &key, false);
            let twice = sort_weapons(&once, &key, false);
            let a: Vec<SortValue> = once.iter().map(|r| sort_value(r, &key)).collect();
            let b: Vec<SortValue> = twice.iter().map(|r| sort_value(r, &key)).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn name_sorts_by_weapon_then_affinity() {
        let ws = weapons();
        let sorted = sort_weapons(&rows(&ws), &SortBy::Name, false);
        assert_eq!(
            names(&sorted),
            vec![
                "Claymore/0",
                "Claymore/100",
                "Greatbow/0",
                "Longbow/0",
                "Zweihander/0"
            ]
        );
        assert_eq!(
            sort_value(&sorted[1], &SortBy::Name),
            SortValue::Text("Claymore,0100".to_string())
        );
    }

    #[test]
    fn missing_bow_dist_sorts_last() {
        let ws = weapons();
        let sorted = sort_weapons(&rows(&ws), &SortBy::BowDist, false);
        let n = names(&sorted);
        assert_eq!(&n[..2], &["Greatbow/0", "Longbow/0"]);
        assert!(sorted[2..].iter().all(|r| r.weapon.bow_dist == -1.0));
    }

    #[test]
    fn unknown_key_keeps_every_row() {
        let ws = weapons();
        let rs = rows(&ws);
        let sorted = sort_weapons(&rs, &SortBy::parse("bogusKey"), false);
        let mut got = names(&sorted);
        let mut want = names(&rs);
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    #[test]
    fn sparse_values_read_as_zero() {
        let ws = weapons();
        let mut rs = rows(&ws);
        rs[3]
            .result
            .attack_power
            .insert(AttackPowerType::Fire, 80.0);
        let sorted = sort_weapons(&rs, &SortBy::Attack(AttackPowerType::Fire), false);
        assert_eq!(sorted[0].weapon.weapon_name, "Longbow");
        assert_eq!(
            sort_value(&sorted[1], &SortBy::Attack(AttackPowerType::Fire)),
            SortValue::Number(-0.0)
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let ws = weapons();
        let rs = rows(&ws);
        let before = names(&rs);
        let _ = sort_weapons(&rs, &SortBy::Poise, false);
        assert_eq!(names(&rs), before);
    }
}
