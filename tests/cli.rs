use assert_cmd::Command;
use predicates::prelude::*;

const FORMAT_B: &str = "\
Date,Transaction Description,Amount
,PRIYA NAIR,
12/01/2024,AMAZON SELLER MUMBAI,\"1,234.56Cr\"
13/01/2024,\"CHAI POINT, BANGALORE\",80.00
";

fn stmtfix(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("stmtfix").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_input_argument_fails() {
    let dir = tempfile::tempdir().unwrap();
    stmtfix(dir.path()).assert().failure();
}

#[test]
fn unreadable_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("gone.csv");
    stmtfix(dir.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(!dir.path().join("gone-Output.csv").exists());
}

#[test]
fn writes_output_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cards-Input.csv");
    std::fs::write(&input, FORMAT_B).unwrap();

    stmtfix(dir.path())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 transactions (format2"));

    let written = std::fs::read_to_string(dir.path().join("cards-Output.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        [
            "Date,Transaction Description,Debit,Credit,Currency,CardName,Transaction,Location",
            "12-01-2024,AMAZON SELLER MUMBAI,,1234.56,INR,PRIYA NAIR,domestic,mumbai",
            "13-01-2024,\"CHAI POINT, BANGALORE\",80.00,,INR,PRIYA NAIR,domestic,bangalore",
        ]
    );
}

#[test]
fn unknown_layout_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.csv");
    std::fs::write(&input, "hello,world\n1,2\n").unwrap();

    stmtfix(dir.path()).arg(&input).assert().success();

    let written = std::fs::read_to_string(dir.path().join("notes-Output.csv")).unwrap();
    assert_eq!(
        written,
        "Date,Transaction Description,Debit,Credit,Currency,CardName,Transaction,Location\n"
    );
}

#[test]
fn profile_flag_and_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("intl.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(
        &input,
        "Date,Transaction Description,Debit,Credit\n\
         ,,International Transaction,\n\
         05/03/24,ABC STORE USD,100.00,\n",
    )
    .unwrap();

    stmtfix(dir.path())
        .arg(&input)
        .args(["--profile", "strict", "--output"])
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("05-03-2024,ABC STORE USD,100.00,,USD,,international,store"));
}

#[test]
fn settings_file_selects_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join(".config").join("stmtfix");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::write(
        config.join("settings.json"),
        r#"{"profile": "strict", "domestic_currency": "LKR"}"#,
    )
    .unwrap();
    let input = dir.path().join("stmt.csv");
    std::fs::write(
        &input,
        "Date,Transaction Description,Amount\n15-13-2023,KANDY CAFE,10.00\n",
    )
    .unwrap();

    stmtfix(dir.path()).arg(&input).assert().success();

    let written = std::fs::read_to_string(dir.path().join("stmt-Output.csv")).unwrap();
    // Strict dates are not repaired; strict currency leaves domestic rows blank.
    assert!(written.contains("15-13-2023,KANDY CAFE,10.00,,,,domestic,cafe"));
}

#[test]
fn unknown_format_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("stmt.csv");
    std::fs::write(&input, FORMAT_B).unwrap();

    stmtfix(dir.path())
        .arg(&input)
        .args(["--format", "format9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format: format9"));
    assert!(!dir.path().join("stmt-Output.csv").exists());
}
