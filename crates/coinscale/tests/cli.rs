mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn coinscale() -> Command {
    Command::cargo_bin("coinscale").unwrap()
}

#[test]
fn default_config_prints_json() {
    let out = coinscale().arg("default-config").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["camera"]["coin_diameter_mm"], 24.0);
    assert_eq!(v["camera"]["focal_length_px"], 800.0);
    assert_eq!(v["rectangle"]["policy"]["kind"], "corner_angle");
}

#[test]
fn measure_writes_report_and_insets() {
    let dir = tempdir().unwrap();
    let frame = dir.path().join("frame.png");
    common::coin_and_phone().save(&frame).unwrap();
    let report = dir.path().join("report.json");
    let insets = dir.path().join("insets");

    coinscale()
        .arg("measure")
        .arg(&frame)
        .arg("--output")
        .arg(&report)
        .arg("--inset-dir")
        .arg(&insets)
        .args(["--log-level", "warn"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&report).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    let frames = v.as_array().unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["coin"]["found"], true);
    assert_eq!(frames[0]["rectangle"]["found"], true);
    assert!(frames[0]["source"].as_str().unwrap().ends_with("frame.png"));

    let inset = image::open(insets.join("edges_0000.png")).unwrap();
    assert_eq!((inset.width(), inset.height()), (250, 200));
}

#[test]
fn directory_inputs_are_sorted() {
    let dir = tempdir().unwrap();
    common::phone_only().save(dir.path().join("b.png")).unwrap();
    common::coin_and_phone().save(dir.path().join("a.png")).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let out = coinscale()
        .arg("measure")
        .arg(dir.path())
        .args(["--log-level", "off"])
        .assert()
        .success();
    let v: serde_json::Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    let frames = v.as_array().unwrap();
    assert_eq!(frames.len(), 2);
    assert!(frames[0]["source"].as_str().unwrap().ends_with("a.png"));
    assert_eq!(frames[0]["coin"]["found"], true);
    assert_eq!(frames[1]["coin"]["found"], false);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.json");
    std::fs::write(&cfg, r#"{ "camera": { "focal_length_px": -1.0 } }"#).unwrap();
    let frame = dir.path().join("frame.png");
    common::phone_only().save(&frame).unwrap();

    coinscale()
        .arg("measure")
        .arg(&frame)
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn unreadable_frames_exhaust_retries() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.json");
    let json = r#"{ "acquisition": { "max_retries": 1, "initial_backoff_ms": 0 } }"#;
    std::fs::write(&cfg, json).unwrap();

    coinscale()
        .arg("measure")
        .arg(dir.path().join("missing_1.png"))
        .arg(dir.path().join("missing_2.png"))
        .arg("--config")
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(predicate::str::contains("giving up after 2 failed reads"))
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn measure_requires_inputs() {
    coinscale().arg("measure").assert().failure();
}
