//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end against a throwaway
//! workspace and config directory.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Get the binary to test, isolated from the user's config and workspace.
fn studiocycle(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studiocycle").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env("STUDIOCYCLE_WORKSPACE", dir.path().join("workspace.json"))
        .env_remove("GEMINI_API_KEY");
    cmd
}

fn workspace_json(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join("workspace.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("training cycle planner"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir).arg("bogus").assert().failure();
}

// ============================================================================
// Catalog & Status Tests
// ============================================================================

#[test]
fn test_catalog_lists_sessions_and_themes() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("endurance"))
        .stdout(predicate::str::contains("race_prep"))
        .stdout(predicate::str::contains("SkiErg"));
}

#[test]
fn test_status_without_cycle() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active studios: 2"))
        .stdout(predicate::str::contains("cycle create"));
}

#[test]
fn test_status_shows_peak_week() {
    let dir = TempDir::new().unwrap();
    dir.child("workspace.json")
        .write_str(
            r#"{
                "cycle": {
                    "id": "c1", "name": "Spring Block", "focus": "hyrox", "duration_weeks": 2,
                    "start_date": "2026-03-01T00:00:00Z",
                    "weeks": [
                        {"week_number": 1, "focus": "Base", "theme": "zone2", "volume": 55, "intensity": 40},
                        {"week_number": 2, "focus": "Load", "theme": "threshold", "volume": 80, "intensity": 65}
                    ]
                },
                "version": 1
            }"#,
        )
        .unwrap();

    studiocycle(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spring Block (2 weeks, hyrox)"))
        .stdout(predicate::str::contains("Peak volume:    week 2 (80)"));
}

// ============================================================================
// Studio Command Tests
// ============================================================================

#[test]
fn test_studio_list_shows_demo_studios() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downtown Box"))
        .stdout(predicate::str::contains("Garage Gym"))
        .stdout(predicate::str::contains("8x Concept2 Rower"));
}

#[test]
fn test_studio_list_json() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"id\": \"s1\""));
}

#[test]
fn test_studio_add_derives_capacity() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "add", "Harbour Box", "--location", "Hamburg", "--size", "95"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added studio Harbour Box"));

    let workspace = workspace_json(&dir);
    let studios = workspace["studios"].as_array().unwrap();
    assert_eq!(studios.len(), 3);
    assert_eq!(studios[2]["name"], "Harbour Box");
    assert_eq!(studios[2]["max_capacity"], 15);
}

#[test]
fn test_studio_add_rejects_zero_size() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "add", "Tiny", "--size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Size must be"));
}

#[test]
fn test_studio_equip_and_unequip() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "equip", "s2", "SkiErg", "--quantity", "3", "--category", "cardio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3x SkiErg to Garage Gym"));

    studiocycle(&dir)
        .args(["studio", "equip", "s2", "skierg", "--quantity", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    studiocycle(&dir)
        .args(["studio", "unequip", "s2", "SKIERG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed SKIERG"));

    studiocycle(&dir)
        .args(["studio", "unequip", "s2", "SkiErg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no equipment named"));
}

#[test]
fn test_studio_remove() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "remove", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed studio Downtown Box"));

    studiocycle(&dir)
        .args(["studio", "remove", "s1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Studio not found: s1"));
}

#[test]
fn test_studio_analyze_missing_photo() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["studio", "analyze", "missing.jpg", "--api-key", "test-key"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_workspace_file_is_reported() {
    let dir = TempDir::new().unwrap();
    dir.child("workspace.json").write_str("{ not json").unwrap();

    studiocycle(&dir)
        .args(["studio", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

// ============================================================================
// Cycle & Session Command Tests
// ============================================================================

#[test]
fn test_cycle_show_without_cycle() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["cycle", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active cycle"));
}

#[test]
fn test_cycle_clear_without_cycle() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["cycle", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active cycle."));
}

#[test]
fn test_cycle_create_rejects_invalid_duration() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["cycle", "create", "--weeks", "0", "--api-key", "test-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 52"));
}

#[test]
fn test_cycle_create_without_key_points_to_env_var() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["cycle", "create", "--weeks", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn test_cycle_create_rejects_unknown_focus() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir).args(["cycle", "create", "--focus", "yoga"]).assert().failure();
}

#[test]
fn test_session_generate_requires_cycle() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["session", "generate", "--week", "1", "--type", "strength", "--api-key", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active cycle"));
}

#[test]
fn test_session_show_empty_week() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["session", "show", "--week", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts generated for week 1"));
}

#[test]
fn test_session_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["session", "show", "--week", "1", "--type", "yoga"])
        .assert()
        .failure();
}

// ============================================================================
// Key, Profile & Config Tests
// ============================================================================

#[test]
fn test_key_status_from_environment() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .env("GEMINI_API_KEY", "AIzaSyExample1234")
        .args(["key", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AIza...1234"))
        .stdout(predicate::str::contains("environment"))
        .stdout(predicate::str::contains("Example").not());
}

#[test]
fn test_profile_set_and_show() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["profile", "set", "--name", "Alex Doe", "--gym-name", "Harbour HQ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated."));

    studiocycle(&dir)
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Doe"))
        .stdout(predicate::str::contains("Harbour HQ"))
        .stdout(predicate::str::contains("Head Coach"));
}

#[test]
fn test_config_shows_defaults() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-3-flash-preview"))
        .stdout(predicate::str::contains("class_size = 15"));
}

#[test]
fn test_local_config_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    dir.child(".studiocycle.toml").write_str("[planning]\nclass_size = 24\n").unwrap();

    studiocycle(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("class_size = 24"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    studiocycle(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studiocycle"));
}
