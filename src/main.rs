//! Weapon attack calculator: CLI.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use weapon_calc::calculator::compute_attack;
use weapon_calc::config::AppConfig;
use weapon_calc::gamedata::{find_weapon, load_weapons};
use weapon_calc::model::{Attribute, WeaponType};
use weapon_calc::report::{render_json, render_table, render_weapon_detail};
use weapon_calc::search::{
    attack_options, compute_rows, filter_weapons, group_rows, retain_effective, SortBy,
    WeaponFilter, WeaponRow,
};
use weapon_calc::util::init_logging;

#[derive(Parser)]
#[command(name = "weapon-calc")]
#[command(about = "Weapon attack power calculator (attribute scaling, spell scaling, requirements)")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every subcommand. Values and `--x` / `--no-x` switches override the
/// config file; a switch left out keeps the file's value.
#[derive(Args)]
struct Settings {
    #[arg(long, value_name = "FILE", help = "Decoded weapon data (JSON array)")]
    weapons: PathBuf,
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,
    #[arg(long = "str")]
    strength: Option<u32>,
    #[arg(long = "dex")]
    dexterity: Option<u32>,
    #[arg(long = "int")]
    intelligence: Option<u32>,
    #[arg(long = "fai")]
    faith: Option<u32>,
    #[arg(long = "arc")]
    arcane: Option<u32>,
    #[arg(long, overrides_with = "no_two_handing")]
    two_handing: bool,
    #[arg(long, overrides_with = "two_handing")]
    no_two_handing: bool,
    #[arg(long, value_name = "LEVEL", help = "Upgrade level on the +25 scale")]
    upgrade_level: Option<usize>,
    #[arg(long, overrides_with = "no_arcane_bonus")]
    arcane_bonus: bool,
    #[arg(long, overrides_with = "arcane_bonus")]
    no_arcane_bonus: bool,
    #[arg(long, overrides_with = "no_show_base", help = "Show attack as base + scaling")]
    show_base: bool,
    #[arg(long, overrides_with = "show_base")]
    no_show_base: bool,
    #[arg(
        long,
        overrides_with = "no_numerical_scaling",
        help = "Show scaling as numbers instead of letter grades"
    )]
    numerical_scaling: bool,
    #[arg(long, overrides_with = "numerical_scaling")]
    no_numerical_scaling: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the attack breakdown of one weapon.
    Calc {
        #[command(flatten)]
        settings: Settings,
        /// Weapon display name, e.g. "Heavy Claymore".
        name: String,
    },
    /// Calculate, filter and sort a list of weapons.
    List {
        #[command(flatten)]
        settings: Settings,
        #[arg(long, value_name = "KEY", help = "e.g. totalAttack, name, 0Attack, strScaling")]
        sort_by: Option<String>,
        #[arg(long, overrides_with = "no_reverse")]
        reverse: bool,
        #[arg(long, overrides_with = "reverse")]
        no_reverse: bool,
        #[arg(long = "type", value_name = "TYPE", help = "Weapon class (repeatable), e.g. axe")]
        weapon_types: Vec<String>,
        #[arg(long = "affinity", value_name = "ID", allow_hyphen_values = true)]
        affinity_ids: Vec<i32>,
        #[arg(long, overrides_with = "include_dlc")]
        exclude_dlc: bool,
        #[arg(long, overrides_with = "exclude_dlc")]
        include_dlc: bool,
        #[arg(long, overrides_with = "all_weapons")]
        effective_only: bool,
        #[arg(
            long,
            overrides_with = "effective_only",
            help = "Also list weapons whose requirements are not met"
        )]
        all_weapons: bool,
        #[arg(long, overrides_with = "no_group")]
        group: bool,
        #[arg(long, overrides_with = "group")]
        no_group: bool,
        #[arg(long, help = "Print rows as JSON")]
        json: bool,
    },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Calc { settings, name } => run_calc(settings, name),
        Commands::List {
            settings,
            sort_by,
            reverse,
            no_reverse,
            weapon_types,
            affinity_ids,
            exclude_dlc,
            include_dlc,
            effective_only,
            all_weapons,
            group,
            no_group,
            json,
        } => {
            let mut cfg = resolve_config(&settings)?;
            if let Some(key) = sort_by {
                cfg.sort_by = key;
            }
            apply_switch(&mut cfg.reverse, reverse, no_reverse);
            if !weapon_types.is_empty() {
                cfg.weapon_types = weapon_types
                    .iter()
                    .map(|t| parse_weapon_type(t))
                    .collect::<Result<_, _>>()?;
            }
            if !affinity_ids.is_empty() {
                cfg.affinity_ids = affinity_ids;
            }
            apply_switch(&mut cfg.include_dlc, include_dlc, exclude_dlc);
            apply_switch(&mut cfg.effective_only, effective_only, all_weapons);
            apply_switch(&mut cfg.group_weapon_types, group, no_group);
            run_list(&settings, &cfg, json)
        }
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(settings: &Settings) -> Result<AppConfig, String> {
    let mut cfg = match &settings.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    for (attribute, value) in [
        (Attribute::Str, settings.strength),
        (Attribute::Dex, settings.dexterity),
        (Attribute::Int, settings.intelligence),
        (Attribute::Fai, settings.faith),
        (Attribute::Arc, settings.arcane),
    ] {
        if let Some(v) = value {
            cfg.attributes.set(attribute, v);
        }
    }
    if let Some(level) = settings.upgrade_level {
        cfg.upgrade_level = level;
    }
    apply_switch(&mut cfg.two_handing, settings.two_handing, settings.no_two_handing);
    apply_switch(
        &mut cfg.include_arcane_bonus,
        settings.arcane_bonus,
        settings.no_arcane_bonus,
    );
    apply_switch(&mut cfg.show_base_damage, settings.show_base, settings.no_show_base);
    apply_switch(
        &mut cfg.numerical_scaling,
        settings.numerical_scaling,
        settings.no_numerical_scaling,
    );
    cfg.validate()?;
    Ok(cfg)
}

/// `--x` sets, `--no-x` clears, neither keeps the config value.
fn apply_switch(value: &mut bool, on: bool, off: bool) {
    if on {
        *value = true;
    } else if off {
        *value = false;
    }
}

fn parse_weapon_type(s: &str) -> Result<WeaponType, String> {
    let quoted = serde_json::Value::String(s.trim().to_lowercase().replace([' ', '-'], "_"));
    serde_json::from_value(quoted).map_err(|_| format!("unknown weapon type: {}", s))
}

fn run_calc(settings: Settings, name: String) -> Result<(), String> {
    let cfg = resolve_config(&settings)?;
    let weapons = load_weapons(&settings.weapons)?;
    let weapon =
        find_weapon(&weapons, &name).ok_or_else(|| format!("weapon not found: {}", name))?;
    let options = attack_options(weapon, &cfg);
    let result = compute_attack(weapon, &cfg.attributes, &options).map_err(|e| e.to_string())?;
    let row = WeaponRow { weapon, result };
    print!("{}", render_weapon_detail(&row, &cfg));
    Ok(())
}

fn run_list(settings: &Settings, cfg: &AppConfig, json: bool) -> Result<(), String> {
    let weapons = load_weapons(&settings.weapons)?;
    let filter = WeaponFilter::from_config(cfg);
    let selected = filter_weapons(&weapons, &filter);
    tracing::debug!("{} of {} weapon(s) pass filters", selected.len(), weapons.len());

    let (rows, errors) = compute_rows(&selected, &cfg.attributes, cfg);
    for e in &errors {
        tracing::warn!("skipped: {}", e);
    }
    let rows = retain_effective(rows, &filter);

    let sort_by = SortBy::parse(&cfg.sort_by);
    if sort_by.is_unknown() {
        tracing::debug!("unknown sort key {:?}; keeping input order", cfg.sort_by);
    }
    let groups = group_rows(&rows, cfg.group_weapon_types, &sort_by, cfg.reverse);
    if json {
        println!("{}", render_json(&groups)?);
    } else {
        print!("{}", render_table(&groups, cfg));
    }
    Ok(())
}
