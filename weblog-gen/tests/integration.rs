use std::process::Command;

fn generate(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_weblog-gen"))
        .args(args)
        .output()
        .expect("Failed to run weblog-gen");
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn writes_requested_number_of_rows() {
    let log = generate(&["--rows", "25", "--seed", "3"]);
    assert_eq!(log.lines().count(), 25);
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = generate(&["--rows", "10", "--seed", "99", "--malformed-ratio", "0.5"]);
    let second = generate(&["--rows", "10", "--seed", "99", "--malformed-ratio", "0.5"]);
    assert_eq!(first, second);
}

#[test]
fn writes_to_output_file() {
    let path = std::env::temp_dir().join(format!("weblog-gen-{}.csv", std::process::id()));
    let stdout = generate(&["--rows", "5", "--output", path.to_str().unwrap()]);
    assert!(stdout.is_empty());

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(written.lines().count(), 5);
}

#[test]
fn rejects_ratio_outside_unit_interval() {
    let output = Command::new(env!("CARGO_BIN_EXE_weblog-gen"))
        .args(["--malformed-ratio", "2"])
        .output()
        .expect("Failed to run weblog-gen");
    assert!(!output.status.success());
}
