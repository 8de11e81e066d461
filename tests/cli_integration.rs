//! Integration tests for the `pulse` CLI.
//!
//! Each test creates a temp directory with a `pulse.toml` that keeps prefs
//! inside it, runs `pulse` as a subprocess with a fixed clock, and checks
//! stdout and/or file contents.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;

const NOW: &str = "2025-05-01T09:00:00Z";

/// Write a config that stores prefs in the temp dir, plus extra TOML.
fn create_workspace(root: &Path, extra: &str) {
    let prefs = root.join("prefs.toml");
    fs::write(
        root.join("pulse.toml"),
        format!(
            "[prefs]\nfile = {:?}\n{}",
            prefs.display().to_string(),
            extra
        ),
    )
    .unwrap();
}

/// Run `pulse` in `dir` with the fixed clock, returning (stdout, stderr, success).
fn run_pulse(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_pulse"))
        .args(args)
        .args(["--now", NOW])
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run pulse");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `pulse` expecting success, return stdout.
fn run_pulse_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_pulse(dir, args);
    if !success {
        panic!(
            "pulse {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn run_pulse_json(dir: &Path, args: &[&str]) -> Value {
    let out = run_pulse_ok(dir, args);
    serde_json::from_str(&out).unwrap_or_else(|e| panic!("bad JSON ({}): {}", e, out))
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_summary_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let out = run_pulse_ok(tmp.path(), &["summary"]);
    assert!(out.contains("Team status (6 members)"));
    assert!(out.contains("  Working    2   33%"));
    assert!(out.contains("  Offline    1   17%"));
    assert!(out.contains("Roster (0 members)"));
    assert!(out.contains("  My active tasks  2"));
}

#[test]
fn test_summary_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let v = run_pulse_json(tmp.path(), &["summary", "--json"]);
    assert_eq!(v["members"], 6);
    let status = v["status"].as_array().unwrap();
    let labels: Vec<&str> = status.iter().map(|s| s["status"].as_str().unwrap()).collect();
    assert_eq!(labels, ["Working", "Meeting", "Break", "Offline"]);
    assert_eq!(status[0]["count"], 2);
    assert_eq!(status[0]["percent"], 33);
    assert!(v["roster"].as_array().unwrap().iter().all(|s| s["percent"] == 0));
    assert_eq!(v["nav"]["team_size"], 6);
    assert_eq!(v["nav"]["working"], 2);
}

#[test]
fn test_session_user_from_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "[session]\nuser = \"member-2\"\n");

    let v = run_pulse_json(tmp.path(), &["summary", "--json"]);
    assert_eq!(v["nav"]["my_active"], 0);
}

#[test]
fn test_members_sorted_by_active_tasks() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let out = run_pulse_ok(tmp.path(), &["members"]);
    let ids: Vec<&str> = out
        .lines()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(
        ids,
        ["member-1", "member-3", "member-5", "member-2", "member-4", "member-6"]
    );

    let out = run_pulse_ok(tmp.path(), &["members", "--sort", "none"]);
    assert!(out.lines().next().unwrap().starts_with("member-1"));
    assert!(out.lines().nth(1).unwrap().starts_with("member-2"));
}

#[test]
fn test_members_status_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let v = run_pulse_json(tmp.path(), &["members", "--status", "break", "--json"]);
    let ids: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["member-2", "member-6"]);
    assert_eq!(v[0]["status"], "Break");
}

#[test]
fn test_tasks_for_member() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let out = run_pulse_ok(tmp.path(), &["tasks", "member-1"]);
    assert!(out.contains("Ava Thompson (Working)  2 active, 0 done"));
    assert!(out.contains("[~] Prepare report  20%  due 2025-05-04  (0-t1)"));
    assert!(out.contains("[ ] Fix dashboard bug   0%  due 2025-05-06  (0-t2)"));

    let out = run_pulse_ok(tmp.path(), &["tasks", "member-2"]);
    assert!(out.contains("No tasks assigned"));
}

#[test]
fn test_tasks_unknown_member() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    let (_, stderr, success) = run_pulse(tmp.path(), &["tasks", "nobody"]);
    assert!(!success);
    assert!(stderr.contains("error: member not found: nobody"));
}

#[test]
fn test_seed_from_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(
        tmp.path().join("team.json"),
        r#"[{"id": "a", "name": "Ada"}, {"id": "b", "name": "Bo", "avatar": "/bo.png"}]"#,
    )
    .unwrap();

    let v = run_pulse_json(tmp.path(), &["seed", "--seed", "team.json"]);
    let members = v.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["status"], "Working");
    assert_eq!(members[0]["avatar"], "/member-avatar.jpg");
    assert_eq!(members[0]["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(members[1]["status"], "Break");
    assert_eq!(members[1]["avatar"], "/bo.png");
    assert_eq!(members[1]["lastActivity"], "2025-05-01T09:00:00Z");
}

#[test]
fn test_seed_file_from_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let seed = tmp.path().join("team.json");
    fs::write(&seed, r#"[{"id": "a", "name": "Ada"}]"#).unwrap();
    create_workspace(
        tmp.path(),
        &format!("[seed]\nfile = {:?}\n", seed.display().to_string()),
    );

    let v = run_pulse_json(tmp.path(), &["summary", "--json"]);
    assert_eq!(v["members"], 1);
}

#[test]
fn test_empty_seed_is_an_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(tmp.path().join("team.json"), "[]").unwrap();

    let (_, stderr, success) = run_pulse(tmp.path(), &["summary", "--seed", "team.json"]);
    assert!(!success);
    assert!(stderr.contains("contains no profiles"));
}

// ---------------------------------------------------------------------------
// Replay tests
// ---------------------------------------------------------------------------

const SCRIPT: &str = r#"[
  {"op": "update_task_progress", "member_id": "member-1", "task_id": "0-t1", "delta": 90},
  {"op": "update_task_progress", "member_id": "ghost", "task_id": "0-t1", "delta": 10},
  {"op": "add_member", "name": "Jane Doe", "email": "jane@example.com"},
  {"op": "send_message", "to": "all", "text": "Standup at 10"},
  {"op": "add_thread", "author_id": "member-1", "content": "How do I deploy?"},
  {"op": "switch_role", "role": "lead"},
  {"op": "set_view", "view": "manage-team"}
]"#;

#[test]
fn test_replay_prints_final_state() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(tmp.path().join("script.json"), SCRIPT).unwrap();

    let v = run_pulse_json(tmp.path(), &["replay", "script.json"]);
    let task = &v["members"]["members"][0]["tasks"][0];
    assert_eq!(task["progress"], 100);
    assert_eq!(task["completed"], true);

    let roster = &v["teamManagement"];
    assert_eq!(roster["members"][0]["name"], "Jane Doe");
    assert_eq!(roster["members"][0]["status"], "offline");
    assert_eq!(roster["messages"][0]["to"], "all");
    assert_eq!(v["community"]["threads"][0]["createdAt"], NOW);
    assert_eq!(v["role"]["currentRole"], "lead");
    assert_eq!(v["role"]["currentView"], "manage-team");
}

#[test]
fn test_replay_summary() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(tmp.path().join("script.json"), SCRIPT).unwrap();

    let v = run_pulse_json(tmp.path(), &["replay", "script.json", "--summary", "--json"]);
    assert_eq!(v["nav"]["my_active"], 1);
    assert_eq!(v["nav"]["roster_size"], 1);
    assert_eq!(v["nav"]["thread_count"], 1);
    assert_eq!(v["roster"][3]["status"], "offline");
    assert_eq!(v["roster"][3]["percent"], 100);
}

#[test]
fn test_replay_rejects_unknown_op() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(tmp.path().join("bad.json"), r#"[{"op": "fire_everyone"}]"#).unwrap();

    let (stdout, stderr, success) = run_pulse(tmp.path(), &["replay", "bad.json"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("could not parse script"));
}

// ---------------------------------------------------------------------------
// Theme and config tests
// ---------------------------------------------------------------------------

#[test]
fn test_theme_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");

    assert_eq!(run_pulse_ok(tmp.path(), &["theme"]).trim(), "light");
    assert_eq!(run_pulse_ok(tmp.path(), &["theme", "dark"]).trim(), "dark");
    assert_eq!(run_pulse_ok(tmp.path(), &["theme"]).trim(), "dark");

    let prefs = fs::read_to_string(tmp.path().join("prefs.toml")).unwrap();
    assert!(prefs.contains("theme = \"dark\""));

    assert_eq!(run_pulse_ok(tmp.path(), &["theme", "toggle"]).trim(), "light");

    // The stored theme seeds the state
    run_pulse_ok(tmp.path(), &["theme", "dark"]);
    fs::write(tmp.path().join("script.json"), "[]").unwrap();
    let v = run_pulse_json(tmp.path(), &["replay", "script.json"]);
    assert_eq!(v["role"]["theme"], "dark");
}

#[test]
fn test_unknown_stored_theme_is_ignored() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_workspace(tmp.path(), "");
    fs::write(tmp.path().join("prefs.toml"), "theme = \"sepia\"\n").unwrap();

    assert_eq!(run_pulse_ok(tmp.path(), &["theme"]).trim(), "light");
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();

    let (_, stderr, success) = run_pulse(tmp.path(), &["summary", "--config", "nope.toml"]);
    assert!(!success);
    assert!(stderr.starts_with("error:"));
}

#[test]
fn test_malformed_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("pulse.toml"), "[sweep]\ninterval_secs = \"soon\"\n").unwrap();

    let (_, stderr, success) = run_pulse(tmp.path(), &["summary"]);
    assert!(!success);
    assert!(stderr.contains("error:"));
}
