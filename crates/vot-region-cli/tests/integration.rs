//! Integration tests for vot-region CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the vot-region binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vot-region"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Write a scratch file unique to this test process.
fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("vot-region-{}-{}", std::process::id(), name));
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

#[test]
fn overlap_command_prints_ratios() {
    let output = run(&["overlap", "0,0,10,10", "5,5,10,10"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("overlap: 0.142857"), "got: {}", stdout);
    assert!(stdout.contains("only1:   0.428571"));
    assert!(stdout.contains("only2:   0.428571"));
}

#[test]
fn overlap_command_with_bounds() {
    let output = run(&["overlap", "0,0,10,10", "20,20,5,5", "-b", "12,12"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("overlap: 0.000000"));
    assert!(stdout.contains("only1:   1.000000"));
    assert!(stdout.contains("only2:   0.000000"));
}

#[test]
fn overlap_command_json_output() {
    let output = run(&["overlap", "0,0,10,10", "0,0,10,10", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).expect("Output should be valid JSON");
    assert_eq!(json["valid"], true);
    assert_eq!(json["overlap"], 1.0);
    assert_eq!(json["policy"], "corrected");
}

#[test]
fn overlap_with_special_region_is_invalid() {
    let output = run(&["overlap", "-1", "0,0,10,10", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json.get("overlap").is_none());
}

#[test]
fn overlap_rejects_bad_region() {
    let output = run(&["overlap", "1,2,3", "0,0,10,10"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "got: {}", stderr);
}

#[test]
fn batch_command_reports_frames_and_mean() {
    let a = temp_file("batch-a.txt", "0,0,10,10\n0,0,10,10\n0\n");
    let b = temp_file("batch-b.txt", "0,0,10,10\n20,20,5,5\n0,0,10,10\n");

    let output = run(&["batch", a.to_str().unwrap(), b.to_str().unwrap(), "--json"]);
    fs::remove_file(&a).ok();
    fs::remove_file(&b).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total"], 3);
    assert_eq!(json["valid"], 2);
    assert_eq!(json["mean_overlap"], 0.5);
    let frames = json["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0]["overlap"], 1.0);
    assert_eq!(frames[2]["valid"], false);
}

#[test]
fn batch_command_uses_config() {
    let a = temp_file("cfg-a.txt", "0,0,10,10\n-1\n");
    let b = temp_file("cfg-b.txt", "0,0,10,10\n0,0,10,10\n");
    let cfg = temp_file("cfg.yaml", "policy: legacy\noutput: json\nskip_invalid: true\n");

    let output = run(&[
        "batch",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-c",
        cfg.to_str().unwrap(),
    ]);
    fs::remove_file(&a).ok();
    fs::remove_file(&b).ok();
    fs::remove_file(&cfg).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["policy"], "legacy");
    assert_eq!(json["total"], 2);
    assert_eq!(json["frames"].as_array().unwrap().len(), 1);
}

#[test]
fn batch_command_length_mismatch_fails() {
    let a = temp_file("len-a.txt", "0,0,10,10\n0,0,10,10\n");
    let b = temp_file("len-b.txt", "0,0,10,10\n");

    let output = run(&["batch", a.to_str().unwrap(), b.to_str().unwrap()]);
    fs::remove_file(&a).ok();
    fs::remove_file(&b).ok();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("differ in length"));
}

#[test]
fn mask_command_prints_ascii() {
    let output = run(&["mask", "1,0,2,2", "-W", "4", "-H", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, ".##.\n.##.\n....\n");
}

#[test]
fn mask_command_writes_png() {
    let path = std::env::temp_dir().join(format!("vot-region-{}-mask.png", std::process::id()));
    let output = run(&["mask", "2,2,4,4", "-W", "8", "-H", "8", "-o", path.to_str().unwrap()]);
    assert!(output.status.success());

    let bytes = fs::read(&path).expect("PNG should be written");
    fs::remove_file(&path).ok();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn convert_command() {
    let output = run(&["convert", "1,2,3,4", "-t", "polygon"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1,2,4,2,4,6,1,6");

    let output = run(&["convert", "0,0,4,0,4,4,0,4", "-t", "rectangle"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unable to convert region"));
}

#[test]
fn check_command_lists_skipped_lines() {
    let path = temp_file("check.txt", "0,0,10,10\nbroken\n0\n");

    let output = run(&["check", path.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frames:     3"));
    assert!(stdout.contains("skipped:    1 (lines 2)"));

    let output = run(&["check", path.to_str().unwrap(), "--strict"]);
    fs::remove_file(&path).ok();
    assert!(!output.status.success());
}

#[test]
fn config_example_is_valid_yaml() {
    let output = run(&["config", "--example"]);
    assert!(output.status.success());

    let path = temp_file("example.yaml", &String::from_utf8_lossy(&output.stdout));
    let output = run(&["config", path.to_str().unwrap()]);
    fs::remove_file(&path).ok();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("policy: corrected"));
}

#[test]
fn benchmark_command_runs() {
    let output = run(&["benchmark", "-n", "50", "--seed", "1"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OVERLAP BENCHMARK"));
    assert!(stdout.contains("legacy"));
    assert!(stdout.contains("corrected"));
}

#[test]
fn unknown_command_fails() {
    let output = run(&["frobnicate"]);
    assert!(!output.status.success());
}
