use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn daylog(home: &Path, vault: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("daylog");
    cmd.current_dir(home)
        .env("OBSIDIAN_VAULT_PATH", vault)
        .env("DAYLOG_HOME", home)
        .env("DAYLOG_CONFIG_PATH", home.join("config.toml"))
        .env_remove("DAYLOG_LOG");
    cmd
}

#[test]
fn track_appends_completed_items_and_preserves_daily_file() {
    let tmp = tempdir().expect("tempdir");
    let vault = tmp.path().join("vault");
    let daily_dir = vault.join("DailyLogs");
    fs::create_dir_all(&daily_dir).expect("mkdir daily");

    let daily = "- [ ] Clients\n\t- [ ] Acme\n\t\t- [x] Sent quote\n- [x] Gym\n";
    fs::write(daily_dir.join("2024-01-04.md"), "- [x] Older\n").expect("write old");
    fs::write(daily_dir.join("2024-01-05.md"), daily).expect("write daily");

    daylog(tmp.path(), &vault)
        .arg("track")
        .assert()
        .success()
        .stdout(predicate::str::contains("track: ok"))
        .stdout(predicate::str::contains("checked_items=2"));

    let tracker = fs::read_to_string(vault.join("00 Tracker.md")).expect("read tracker");
    assert_eq!(
        tracker,
        "# Task Tracker\n\n- [ ] Clients - Acme - Sent quote - 2024-01-05\n- [ ] Gym - 2024-01-05\n\n"
    );
    assert_eq!(
        fs::read_to_string(daily_dir.join("2024-01-05.md")).expect("read daily"),
        daily
    );
}

#[test]
fn track_json_report_is_machine_readable() {
    let tmp = tempdir().expect("tempdir");
    let vault = tmp.path().join("vault");
    let daily_dir = vault.join("DailyLogs");
    fs::create_dir_all(&daily_dir).expect("mkdir daily");
    fs::write(daily_dir.join("2024-01-05.md"), "- [x] Done\n").expect("write daily");

    let out = daylog(tmp.path(), &vault)
        .args(["track", "--dry-run", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).expect("json report");
    assert_eq!(report["command"], "track");
    assert_eq!(report["ok"], true);
    assert!(!vault.join("00 Tracker.md").exists());
}

#[test]
fn track_fails_when_daily_logs_dir_is_missing() {
    let tmp = tempdir().expect("tempdir");
    let vault = tmp.path().join("vault");
    fs::create_dir_all(&vault).expect("mkdir vault");

    daylog(tmp.path(), &vault)
        .arg("track")
        .assert()
        .failure()
        .stdout(predicate::str::contains("track: failed"))
        .stdout(predicate::str::contains("DailyLogs"));
}
