use std::process::Command;

#[test]
fn cli_binary_type_checks() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "farm-dash"])
        .status()
        .expect("failed to invoke cargo check for farm-dash CLI binary");

    assert!(status.success(), "cargo check --bin farm-dash should succeed");
}

#[test]
fn headless_round_reports_final_score() {
    let output = Command::new(env!("CARGO_BIN_EXE_farm-dash"))
        .args(["--headless-frames", "70", "--headless-dt-ms", "1000", "--seed", "7"])
        .output()
        .expect("failed to run farm-dash headless");

    assert!(output.status.success(), "headless run should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Final score: 0"),
        "unexpected output: {stdout}"
    );
}
