//! End-to-end tests for the wurmlog binary.
//!
//! Each test writes a small skill log into a temp directory and runs the
//! compiled binary against it: dates → sessions → report → rate, plus the
//! watch loop and the configuration override chain.

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn wurmlog_binary() -> String {
    env!("CARGO_BIN_EXE_wurmlog").to_string()
}

const LOG: &str = "\
Logging started 2024-03-14
[22:00:00] Digging increased by 0.5 to 20.0
Logging started 2024-03-15
[10:00:00] Mining increased by 1.0 to 10.0
[10:10:00] Mining increased by 2.0 to 12.0
[10:50:00] Mining increased by 3.0 to 15.0
";

fn write_log(temp: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = temp.path().join("Player_Skills.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Build a command with an isolated HOME so no real user config leaks in.
fn wurmlog(temp: &TempDir) -> Command {
    let mut command = Command::new(wurmlog_binary());
    command
        .env("HOME", temp.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("WURMLOG_SESSION_GAP_MINUTES");
    command
}

#[test]
fn test_dates_lists_newest_first() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp).arg("dates").arg(&log).output().unwrap();

    assert!(
        output.status.success(),
        "dates should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "2024-03-15\n2024-03-14\n");
}

#[test]
fn test_sessions_numbered_list() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp).arg("sessions").arg(&log).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sessions on 2024-03-15 (gap 30m)"), "{stdout}");
    assert!(stdout.contains("  1. 10:00 - 10:10"), "{stdout}");
    assert!(stdout.contains("  2. 10:50 - 10:50"), "{stdout}");
}

#[test]
fn test_report_table_for_session() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .arg("report")
        .arg(&log)
        .arg("--session")
        .arg("1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Skill gains on 2024-03-15, session 1 (10:00 - 10:10)"),
        "{stdout}"
    );
    assert!(stdout.contains("Mining"), "{stdout}");
    assert!(stdout.contains("3.0000"), "{stdout}");
    assert!(stdout.contains("12.0000"), "{stdout}");
}

#[test]
fn test_report_json_whole_day() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .arg("report")
        .arg(&log)
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("report output should be valid JSON");

    assert_eq!(report["date"], "2024-03-15");
    assert_eq!(report["event_count"], 3);
    let rows = report["rows"].as_array().expect("rows should be an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["skill"], "Mining");
    assert_eq!(rows[0]["total_increase"], 6.0);
    assert_eq!(rows[0]["last_total_after"], 15.0);
}

#[test]
fn test_report_explicit_date() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .arg("report")
        .arg(&log)
        .arg("--date")
        .arg("2024-03-14")
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["date"], "2024-03-14");
    assert_eq!(report["rows"][0]["skill"], "Digging");
}

#[test]
fn test_report_rejects_bad_date() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .arg("report")
        .arg(&log)
        .arg("--date")
        .arg("March 15th")
        .output()
        .unwrap();

    assert!(!output.status.success(), "bad date should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid date"), "{stderr}");
}

#[test]
fn test_rate_json_series() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .arg("rate")
        .arg(&log)
        .arg("--skill")
        .arg("Mining")
        .arg("--window")
        .arg("60")
        .arg("--run-gap")
        .arg("60")
        .arg("--json")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "rate should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rate: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let points = rate["series"]["points"]
        .as_array()
        .expect("points should be an array");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["timestamp"], "2024-03-15T10:10:00");
    assert_eq!(points[0]["rate"], 12.0);
    assert_eq!(points[1]["rate"], 4.5);
    assert_eq!(rate["series"]["summary"]["start"]["total_after"], 10.0);
    assert_eq!(rate["series"]["summary"]["end"]["total_after"], 15.0);
}

#[test]
fn test_rate_without_enough_events() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    // Digging only gained on 2024-03-14; the newest date has none.
    let output = wurmlog(&temp)
        .arg("rate")
        .arg(&log)
        .arg("--skill")
        .arg("Digging")
        .output()
        .unwrap();

    assert!(output.status.success(), "an empty series is not an error");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Not enough recent Digging events"),
        "{stdout}"
    );
}

#[test]
fn test_undecodable_log_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("Player_Skills.txt");
    // 0x98 is unmapped in windows-1251 and 0x90 in windows-1252, so no
    // candidate encoding can decode the pair.
    std::fs::write(&log, b"\x98\x90").unwrap();

    let output = wurmlog(&temp).arg("report").arg(&log).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to decode"), "{stderr}");
}

#[test]
fn test_missing_log_fails_with_context() {
    let temp = TempDir::new().unwrap();

    let output = wurmlog(&temp)
        .arg("dates")
        .arg(temp.path().join("absent.txt"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "{stderr}");
}

#[test]
fn test_log_without_gain_lines() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "Logging started 2024-03-15\nYou feel rested.\n");

    let output = wurmlog(&temp).arg("report").arg(&log).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No skill events found"), "{stdout}");
}

#[test]
fn test_config_file_changes_session_gap() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);
    let config_file = temp.path().join("config.toml");
    std::fs::write(&config_file, "session_gap_minutes = 60\n").unwrap();

    let output = wurmlog(&temp)
        .arg("--config")
        .arg(&config_file)
        .arg("sessions")
        .arg(&log)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(gap 60m)"), "{stdout}");
    assert!(stdout.contains("  1. 10:00 - 10:50"), "{stdout}");
    assert!(!stdout.contains("  2."), "one merged session: {stdout}");
}

#[test]
fn test_env_changes_session_gap() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .env("WURMLOG_SESSION_GAP_MINUTES", "5")
        .arg("sessions")
        .arg(&log)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(gap 5m)"), "{stdout}");
    assert!(stdout.contains("  3. 10:50 - 10:50"), "{stdout}");
}

#[test]
fn test_gap_flag_beats_config_and_env() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = wurmlog(&temp)
        .env("WURMLOG_SESSION_GAP_MINUTES", "5")
        .arg("sessions")
        .arg(&log)
        .arg("--gap")
        .arg("60")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(gap 60m)"), "{stdout}");
    assert!(stdout.contains("  1. 10:00 - 10:50"), "{stdout}");
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    let output = wurmlog(&temp).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "{stdout}");
}

#[test]
fn test_watch_refreshes_on_append() {
    use std::io::Write;

    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let mut child = wurmlog(&temp)
        .arg("watch")
        .arg(&log)
        .arg("--skill")
        .arg("Mining")
        .arg("--window")
        .arg("60")
        .arg("--run-gap")
        .arg("60")
        .arg("--poll")
        .arg("1")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // First refresh happens on the first poll tick.
    std::thread::sleep(std::time::Duration::from_millis(2000));

    // Append a new gain and wait for the next tick to pick it up.
    let mut file = std::fs::OpenOptions::new().append(true).open(&log).unwrap();
    writeln!(file, "[11:00:00] Mining increased by 1.0 to 16.0").unwrap();
    file.sync_all().unwrap();
    drop(file);

    std::thread::sleep(std::time::Duration::from_millis(2500));

    child.kill().unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.matches("Skill gains on 2024-03-15").count() >= 2,
        "expected at least two refreshes: {stdout}"
    );
    assert!(stdout.contains("Rate for Mining"), "{stdout}");
    // The appended event only shows up in the second refresh.
    assert!(stdout.contains("7.0000"), "updated total gain: {stdout}");
}
