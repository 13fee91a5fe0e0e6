//! Integration tests for heterodyne-cli, exercising the built binary.

use std::process::Command;

fn heterodyne_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_heterodyne"))
}

#[test]
fn cli_help_works() {
    let output = heterodyne_bin().arg("--help").output().expect("failed to run heterodyne --help");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Heterodyne SDR receiver CLI"));
    assert!(stdout.contains("tune"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("analyze"));
    assert!(stdout.contains("presets"));
}

#[test]
fn cli_version_works() {
    let output = heterodyne_bin().arg("--version").output().expect("failed to run heterodyne --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heterodyne"));
}

#[test]
fn cli_generate_lists_scenarios_with_no_args() {
    let output = heterodyne_bin().arg("generate").output().expect("failed to run heterodyne generate");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wbfm-mono"));
    assert!(stdout.contains("cw-beat"));
}

#[test]
fn cli_generate_wbfm_mono_reports_expected_tone() {
    let output = heterodyne_bin()
        .args(["generate", "wbfm-mono", "--blocks", "30"])
        .output()
        .expect("failed to run heterodyne generate wbfm-mono");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Peak FFT bin"));
    assert!(stdout.contains("Expected dominant tone: 1000.0 Hz"));
}

#[test]
fn cli_generate_unknown_scenario_fails() {
    let output = heterodyne_bin()
        .args(["generate", "not-a-real-scenario"])
        .output()
        .expect("failed to run heterodyne generate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown scenario"));
}

#[test]
fn cli_analyze_all_scenarios_pass() {
    let output = heterodyne_bin()
        .args(["analyze", "--blocks", "60"])
        .output()
        .expect("failed to run heterodyne analyze");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stdout));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wbfm-mono"));
    assert!(stdout.contains("cw-beat"));
    assert!(!stdout.contains("FAIL"));
}

#[test]
fn cli_analyze_single_scenario() {
    let output = heterodyne_bin()
        .args(["analyze", "cw-beat", "--blocks", "60"])
        .output()
        .expect("failed to run heterodyne analyze cw-beat");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cw-beat"));
    assert!(stdout.contains("PASS"));
}

#[test]
fn cli_presets_list_shows_factory_presets() {
    let output = heterodyne_bin().args(["presets", "list"]).output().expect("failed to run heterodyne presets list");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fm_broadcast"));
    assert!(stdout.contains("noaa_weather"));
}

#[test]
fn cli_presets_show_factory_preset() {
    let output = heterodyne_bin()
        .args(["presets", "show", "noaa_weather"])
        .output()
        .expect("failed to run heterodyne presets show");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("NBFM"));
}

#[test]
fn cli_presets_show_unknown_fails() {
    let output = heterodyne_bin()
        .args(["presets", "show", "not-a-real-preset"])
        .output()
        .expect("failed to run heterodyne presets show");

    assert!(!output.status.success());
}

#[test]
fn cli_presets_paths_shows_directories() {
    let output = heterodyne_bin().args(["presets", "paths"]).output().expect("failed to run heterodyne presets paths");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("User presets"));
    assert!(stdout.contains("System presets"));
}

#[test]
fn cli_presets_delete_factory_preset_fails() {
    let output = heterodyne_bin()
        .args(["presets", "delete", "fm_broadcast", "--force"])
        .output()
        .expect("failed to run heterodyne presets delete");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("factory preset"));
}

#[test]
fn cli_devices_list_runs() {
    let output = heterodyne_bin().args(["devices", "list"]).output().expect("failed to run heterodyne devices list");

    assert!(output.status.success());
}

#[test]
fn cli_play_factory_preset() {
    let output = heterodyne_bin()
        .args(["play", "ham_2m_calling", "--seconds", "0.2"])
        .output()
        .expect("failed to run heterodyne play");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Peak FFT bin"));
}
