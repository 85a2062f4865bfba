//! Text and JSON rendering of calculated weapon rows.

use crate::config::AppConfig;
use crate::model::{
    total_damage_attack_power, upgrade_level_label, AttackPowerType, Weapon, ALL_ATTRIBUTES,
    ALL_DAMAGE_TYPES, ALL_STATUS_TYPES, ALL_WEAK_RATE_TYPES,
};
use crate::search::{SortBy, WeaponRow, WeaponRowGroup};

const BLANK: &str = "-";

/// Spell scaling of a tool with no attribute bonus.
const NEUTRAL_SPELL_SCALING: f64 = 100.0;

/// Truncate for display. The small offset keeps values like 299.99999999 from showing as 299.
pub fn round_down(value: f64) -> f64 {
    (value + 0.000000001).floor()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Attack power cell; `*` marks a damage type weakened by unmet requirements.
pub fn format_attack(row: &WeaponRow<'_>, t: AttackPowerType, show_base: bool) -> String {
    let Some(&value) = row.result.attack_power.get(&t) else {
        return BLANK.to_string();
    };
    let ineffective = row.result.ineffective_attack_power_types.contains(&t);
    let mark = if ineffective { "*" } else { "" };
    if show_base {
        let base = row.result.base_attack_power.get(&t).copied().unwrap_or(0.0);
        let bonus = round_down(value - base);
        if ineffective {
            return format!("{} - {}{}", round_down(base), -bonus, mark);
        }
        return format!("{} + {}", round_down(base), bonus);
    }
    format!("{}{}", round_down(value), mark)
}

/// Spell scaling cell. With `show_base` the figure is split into the neutral 100% and the
/// bonus (or penalty) on top of it.
pub fn format_spell_scaling(row: &WeaponRow<'_>, t: AttackPowerType, show_base: bool) -> String {
    let value = row.result.spell_scaling.get(&t).copied().unwrap_or(0.0);
    if value == 0.0 {
        return BLANK.to_string();
    }
    let ineffective = row.result.ineffective_attack_power_types.contains(&t);
    if show_base {
        let bonus = value - NEUTRAL_SPELL_SCALING;
        if bonus == 0.0 {
            return format!("{}", NEUTRAL_SPELL_SCALING);
        }
        if ineffective {
            return format!(
                "{} - {}%*",
                NEUTRAL_SPELL_SCALING,
                -round_down(bonus * 10.0) / 10.0
            );
        }
        return format!("{} + {}%", NEUTRAL_SPELL_SCALING, round_down(bonus * 10.0) / 10.0);
    }
    if ineffective {
        return format!("{}%*", round_down(value));
    }
    format!("{}%", round_down(value * 10.0) / 10.0)
}

/// Letter grade, or the scaling percentage when `numerical`.
pub fn format_scaling(weapon: &Weapon, scaling: f64, numerical: bool) -> String {
    if scaling == 0.0 {
        return BLANK.to_string();
    }
    if numerical {
        return format!("{}", round_to(scaling * 100.0, 2));
    }
    weapon.scaling_grade(scaling).unwrap_or(BLANK).to_string()
}

pub fn format_cut_rate(value: f64) -> String {
    if value == 0.0 {
        return BLANK.to_string();
    }
    format!("{}%", round_to(value, 1).min(100.0))
}

pub fn format_bow_dist(value: f64) -> String {
    if value == -1.0 {
        return BLANK.to_string();
    }
    format!("{}%", value + 100.0)
}

pub fn format_weak_rate(rate: f64) -> String {
    if rate == 1.0 {
        return BLANK.to_string();
    }
    format!("{}%", round_down((rate - 1.0) * 100.0 * 100.0) / 100.0)
}

fn weapon_label(row: &WeaponRow<'_>) -> String {
    let w = row.weapon;
    let mut s = w.name.clone();
    if row.result.upgrade_level > 0 {
        s.push_str(&format!(" +{}", row.result.upgrade_level));
    }
    if let Some(variant) = &w.variant {
        s.push_str(&format!(" ({})", variant));
    }
    s
}

/// Multi-line breakdown of one weapon.
pub fn render_weapon_detail(row: &WeaponRow<'_>, cfg: &AppConfig) -> String {
    let w = row.weapon;
    let r = &row.result;
    let mut out = String::new();
    out.push_str(&format!("Weapon: {}\n", weapon_label(row)));
    out.push_str(&format!(
        "Level: {} (max +{})\n",
        upgrade_level_label(r.upgrade_level, w.max_upgrade_level()),
        w.max_upgrade_level()
    ));
    out.push_str(&format!(
        "Total attack: {}\n",
        round_down(total_damage_attack_power(&r.attack_power))
    ));

    out.push_str("\nAttack power:\n");
    for t in ALL_DAMAGE_TYPES.iter().chain(ALL_STATUS_TYPES.iter()) {
        if r.attack_power.contains_key(t) {
            out.push_str(&format!(
                "  {:<12} {}\n",
                t.label(),
                format_attack(row, *t, cfg.show_base_damage)
            ));
        }
    }
    if !r.spell_scaling.is_empty() {
        out.push_str("\nSpell scaling:\n");
        for t in ALL_DAMAGE_TYPES.iter() {
            if r.spell_scaling.contains_key(t) {
                out.push_str(&format!(
                    "  {:<12} {}\n",
                    t.label(),
                    format_spell_scaling(row, *t, cfg.show_base_damage)
                ));
            }
        }
    }

    out.push_str("\nScaling / requirements:\n");
    for a in ALL_ATTRIBUTES {
        let requirement = w.requirement(a);
        let ineffective = r.ineffective_attributes.contains(&a);
        out.push_str(&format!(
            "  {:<12} {:<6} {}{}\n",
            a.label(),
            format_scaling(w, w.scaling_at(r.upgrade_level, a), cfg.numerical_scaling),
            if requirement == 0 {
                BLANK.to_string()
            } else {
                requirement.to_string()
            },
            if ineffective { " (not met)" } else { "" }
        ));
    }

    if !r.guard_cut_rate.is_empty() || r.stability != 0.0 {
        out.push_str("\nGuard:\n");
        for (t, v) in &r.guard_cut_rate {
            out.push_str(&format!("  {:<12} {}\n", t.label(), format_cut_rate(*v)));
        }
        out.push_str(&format!("  {:<12} {}\n", "Stability", format_cut_rate(r.stability)));
    }

    out.push_str(&format!(
        "\nPoise {}  Stamina dmg {}  Stamina cost {}  Critical {}  Range {}\n",
        w.poise,
        w.stam_dmg,
        w.stam_cost,
        w.crit,
        format_bow_dist(w.bow_dist)
    ));
    let weak: Vec<String> = ALL_WEAK_RATE_TYPES
        .iter()
        .filter(|&&t| w.weak_rate(t) != 1.0)
        .map(|&t| format!("{:?} {}", t, format_weak_rate(w.weak_rate(t))))
        .collect();
    if !weak.is_empty() {
        out.push_str(&format!("Bonus vs: {}\n", weak.join(", ")));
    }
    if !r.ineffective_attributes.is_empty() {
        out.push_str("\nUnable to wield this weapon effectively with present stats.\n");
    }
    out
}

/// Damage and status columns that have a value in at least one row.
fn present_types(groups: &[WeaponRowGroup<'_>]) -> Vec<AttackPowerType> {
    ALL_DAMAGE_TYPES
        .iter()
        .chain(ALL_STATUS_TYPES.iter())
        .copied()
        .filter(|t| {
            groups
                .iter()
                .flat_map(|g| g.rows.iter())
                .any(|r| r.result.attack_power.contains_key(t))
        })
        .collect()
}

/// Spell scaling columns: channels where some row differs from the neutral figure, plus the
/// sorted channel.
fn spell_scaling_types(groups: &[WeaponRowGroup<'_>], sort_by: &SortBy) -> Vec<AttackPowerType> {
    ALL_DAMAGE_TYPES
        .iter()
        .copied()
        .filter(|t| {
            *sort_by == SortBy::SpellScaling(*t)
                || groups.iter().flat_map(|g| g.rows.iter()).any(|r| {
                    r.result
                        .spell_scaling
                        .get(t)
                        .is_some_and(|&v| v != NEUTRAL_SPELL_SCALING)
                })
        })
        .collect()
}

/// Cell for a sort key the table has no regular column for.
fn sort_key_cell(row: &WeaponRow<'_>, sort_by: &SortBy) -> Option<String> {
    let w = row.weapon;
    let r = &row.result;
    let cell = match sort_by {
        SortBy::Poise => w.poise.to_string(),
        SortBy::StamDmg => w.stam_dmg.to_string(),
        SortBy::StamCost => w.stam_cost.to_string(),
        SortBy::Crit => w.crit.to_string(),
        SortBy::BowDist => format_bow_dist(w.bow_dist),
        SortBy::Stability => format_cut_rate(r.stability),
        SortBy::GuardCutRate(t) => {
            format_cut_rate(r.guard_cut_rate.get(t).copied().unwrap_or(0.0))
        }
        SortBy::WeakRate(t) => format_weak_rate(w.weak_rate(*t)),
        SortBy::Requirement(a) => match w.requirement(*a) {
            0 => BLANK.to_string(),
            n => n.to_string(),
        },
        _ => return None,
    };
    Some(cell)
}

fn has_sort_key_column(sort_by: &SortBy) -> bool {
    matches!(
        sort_by,
        SortBy::Poise
            | SortBy::StamDmg
            | SortBy::StamCost
            | SortBy::Crit
            | SortBy::BowDist
            | SortBy::Stability
            | SortBy::GuardCutRate(_)
            | SortBy::WeakRate(_)
            | SortBy::Requirement(_)
    )
}

/// Fixed-width table, one line per row, with a header per group.
pub fn render_table(groups: &[WeaponRowGroup<'_>], cfg: &AppConfig) -> String {
    let sort_by = SortBy::parse(&cfg.sort_by);
    let types = if cfg.split_damage {
        present_types(groups)
    } else {
        Vec::new()
    };
    let spell_types = spell_scaling_types(groups, &sort_by);

    let mut header = vec![format!("{:<36}", "Weapon"), format!("{:>8}", "Total")];
    header.extend(types.iter().map(|t| format!("{:>13}", t.label())));
    header.extend(
        spell_types
            .iter()
            .map(|t| format!("{:>13}", format!("{} (spell)", t.label()))),
    );
    header.extend(ALL_ATTRIBUTES.iter().map(|a| format!("{:>6}", a.code())));
    if has_sort_key_column(&sort_by) {
        header.push(format!("{:>13}", sort_by.to_string()));
    }
    let header = header.join(" ");

    let mut out = String::new();
    for g in groups {
        if let Some(t) = g.weapon_type {
            out.push_str(&format!("== {:?} ({})\n", t, g.rows.len()));
        }
        out.push_str(&header);
        out.push('\n');
        for row in &g.rows {
            let mut cells = vec![
                format!("{:<36}", weapon_label(row)),
                format!(
                    "{:>8}",
                    round_down(total_damage_attack_power(&row.result.attack_power))
                ),
            ];
            cells.extend(
                types
                    .iter()
                    .map(|t| format!("{:>13}", format_attack(row, *t, cfg.show_base_damage))),
            );
            cells.extend(spell_types.iter().map(|t| {
                format!(
                    "{:>13}",
                    format_spell_scaling(row, *t, cfg.show_base_damage)
                )
            }));
            cells.extend(ALL_ATTRIBUTES.iter().map(|&a| {
                let scaling = row.weapon.scaling_at(row.result.upgrade_level, a);
                format!(
                    "{:>6}",
                    format_scaling(row.weapon, scaling, cfg.numerical_scaling)
                )
            }));
            if let Some(cell) = sort_key_cell(row, &sort_by) {
                cells.push(format!("{:>13}", cell));
            }
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
    }
    if groups.iter().all(|g| g.rows.is_empty()) {
        out.push_str("No weapons match the selected filters.\n");
    }
    out
}

pub fn render_json(groups: &[WeaponRowGroup<'_>]) -> Result<String, String> {
    serde_json::to_string_pretty(groups).map_err(|e| e.to_string())
}
