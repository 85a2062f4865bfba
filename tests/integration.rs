//! CLI integration tests against the fixture weapon document.

use std::path::PathBuf;
use std::process::{Command, Output};

fn weapons_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("weapons.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weapon-calc"))
        .args(args)
        .output()
        .expect("run weapon-calc")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn list_json(extra: &[&str]) -> serde_json::Value {
    let fixture = weapons_fixture();
    let mut args = vec!["list", "--weapons", fixture.to_str().unwrap(), "--json"];
    args.extend_from_slice(extra);
    let out = stdout_of(&run(&args));
    serde_json::from_str(&out).expect("valid json")
}

fn row_names(groups: &serde_json::Value) -> Vec<String> {
    groups[0]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["weapon"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn calc_prints_breakdown() {
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "longsword",
    ]));
    assert!(out.contains("Weapon: Longsword +25"), "{}", out);
    assert!(out.contains("Total attack: 444"), "{}", out);
    assert!(out.contains("Stability"), "{}", out);
}

#[test]
fn calc_with_unmet_requirement() {
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "--str",
        "5",
        "Longsword",
    ]));
    assert!(out.contains("210*"), "{}", out);
    assert!(out.contains("(not met)"), "{}", out);
}

#[test]
fn calc_reads_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("settings.toml");
    std::fs::write(&cfg, "two_handing = true\n\n[attributes]\nstr = 40\n").unwrap();
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "--config",
        cfg.to_str().unwrap(),
        "Longsword",
    ]));
    assert!(out.contains("Total attack: 497"), "{}", out);
}

#[test]
fn calc_spell_tool_shows_spell_scaling() {
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "Meteorite Staff",
    ]));
    assert!(out.contains("Weapon: Meteorite Staff +10"), "{}", out);
    assert!(out.contains("Spell scaling:"), "{}", out);
    assert!(out.contains("136%"), "{}", out);
}

#[test]
fn calc_unknown_weapon_fails() {
    let fixture = weapons_fixture();
    let output = run(&["calc", "--weapons", fixture.to_str().unwrap(), "Excalibur"]);
    assert!(!output.status.success());
}

#[test]
fn calc_broken_weapon_fails() {
    let fixture = weapons_fixture();
    let output = run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "Cracked Blade",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("dex = 30"));
}

#[test]
fn list_sorted_by_total_attack() {
    let groups = list_json(&[]);
    assert_eq!(
        row_names(&groups),
        vec![
            "Longsword",
            "Milady",
            "Moonveil",
            "Longbow",
            "Meteorite Staff"
        ]
    );
}

#[test]
fn list_reverse_inverts_order() {
    let mut forward = row_names(&list_json(&["--sort-by", "totalAttack"]));
    let backward = row_names(&list_json(&["--sort-by", "totalAttack", "--reverse"]));
    forward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn list_bow_dist_puts_bows_first() {
    let names = row_names(&list_json(&["--sort-by", "bowDist"]));
    assert_eq!(names[0], "Longbow");
    assert_eq!(names.len(), 5);
}

#[test]
fn list_filters() {
    let names = row_names(&list_json(&[
        "--exclude-dlc",
        "--type",
        "katana",
        "--type",
        "light bow",
    ]));
    assert_eq!(names, vec!["Moonveil", "Longbow"]);

    let names = row_names(&list_json(&["--affinity", "100", "--sort-by", "name"]));
    assert_eq!(names, vec!["Heavy Longsword"]);

    let names = row_names(&list_json(&["--effective-only", "--int", "10"]));
    assert!(!names.contains(&"Moonveil".to_string()));
    assert!(!names.contains(&"Meteorite Staff".to_string()));
    assert!(names.contains(&"Longsword".to_string()));
}

#[test]
fn list_unknown_sort_key_keeps_rows() {
    let mut names = row_names(&list_json(&["--sort-by", "bogusKey"]));
    names.sort();
    assert_eq!(
        names,
        vec![
            "Longbow",
            "Longsword",
            "Meteorite Staff",
            "Milady",
            "Moonveil"
        ]
    );
}

#[test]
fn list_grouped_text_table() {
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "list",
        "--weapons",
        fixture.to_str().unwrap(),
        "--group",
    ]));
    assert!(out.contains("== Katana (1)"), "{}", out);
    assert!(out.contains("Moonveil +10"), "{}", out);
    assert!(!out.contains("Cracked Blade"), "{}", out);
}

#[test]
fn negative_switches_override_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = dir.path().join("settings.toml");
    std::fs::write(
        &cfg,
        "two_handing = true\nreverse = true\ngroup_weapon_types = true\n",
    )
    .unwrap();
    let fixture = weapons_fixture();

    let out = stdout_of(&run(&[
        "calc",
        "--weapons",
        fixture.to_str().unwrap(),
        "--config",
        cfg.to_str().unwrap(),
        "--no-two-handing",
        "Longsword",
    ]));
    assert!(out.contains("Total attack: 444"), "{}", out);

    let groups = list_json(&[
        "--config",
        cfg.to_str().unwrap(),
        "--no-two-handing",
        "--no-reverse",
        "--no-group",
    ]);
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(row_names(&groups)[0], "Longsword");
}

#[test]
fn list_shows_sort_key_and_spell_columns() {
    let fixture = weapons_fixture();
    let out = stdout_of(&run(&[
        "list",
        "--weapons",
        fixture.to_str().unwrap(),
        "--sort-by",
        "bowDist",
    ]));
    let header = out.lines().next().unwrap();
    assert!(header.contains("Magic (spell)"), "{}", out);
    assert!(header.trim_end().ends_with("bowDist"), "{}", out);
    assert!(out.contains("120%"), "{}", out);
}

