//! Integration test: binary version and help output, and manifest lint settings

use std::process::Command;

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_country-picker"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn binary_rejects_unknown_mode() {
    let output = Command::new(env!("CARGO_BIN_EXE_country-picker"))
        .args(["--mode", "region"])
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("region"), "stderr was: {stderr}");
}

#[test]
fn manifest_denies_missing_docs_and_warnings() {
    let manifest = include_str!("../Cargo.toml");
    let lints = manifest
        .split("[lints.rust]")
        .nth(1)
        .expect("manifest has a [lints.rust] table");
    assert!(lints.contains(r#"missing_docs = "deny""#));
    assert!(lints.contains(r#"warnings = "deny""#));
}

#[test]
fn unicode_width_is_a_dev_dependency_only() {
    let manifest = include_str!("../Cargo.toml");
    let (runtime, dev) = manifest
        .split_once("[dev-dependencies]")
        .expect("manifest has dev-dependencies");
    assert!(!runtime.contains("unicode-width"));
    assert!(dev.contains("unicode-width"));
}
