use std::{io::Write, process::Command};

use tempfile::NamedTempFile;

const PHONES: &str = "name,brand,price,rating
iphone 15 pro,apple,999,4.9
galaxy s23 ultra,samsung,1199,4.8
redmi note 12,xiaomi,199,4.6
poco x5 pro,xiaomi,299,4.4
";

fn phones_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file must be created");
    file.write_all(PHONES.as_bytes()).expect("fixture must be written");
    file
}

fn run_csvq(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_csvq"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("csvq command must run")
}

fn run_on_phones(extra: &[&str]) -> std::process::Output {
    let file = phones_csv();
    let path = file.path().to_str().expect("temp path must be UTF-8");
    let mut args = vec![path];
    args.extend_from_slice(extra);
    run_csvq(&args)
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout must be valid UTF-8")
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn prints_every_row_without_filter() {
    let output = run_on_phones(&[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("iphone 15 pro"));
    assert!(stdout.contains("galaxy s23 ultra"));
    assert!(stdout.contains("| name "));
}

#[test]
fn filters_by_numeric_comparison() {
    let output = run_on_phones(&["--where", "price>1000"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("galaxy s23 ultra"));
    assert!(!stdout.contains("iphone 15 pro"));
}

#[test]
fn filters_by_string_equality() {
    let output = run_on_phones(&["--where", "brand=xiaomi"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("redmi note 12"));
    assert!(stdout.contains("poco x5 pro"));
    assert!(!stdout.contains("samsung"));
}

#[test]
fn prints_average() {
    let output = run_on_phones(&["--aggregate", "price=avg"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "avg(price) = 674.0");
}

#[test]
fn aggregates_filtered_rows() {
    let output = run_on_phones(&["--where", "brand=xiaomi", "--aggregate", "price=max"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "max(price) = 299.0");
}

#[test]
fn reports_absent_value_for_empty_selection() {
    let output = run_on_phones(&["--where", "price>5000", "--aggregate", "price=min"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "min(price) = None");
}

#[test]
fn unknown_function_exits_with_aggregation_error() {
    let output = run_on_phones(&["--aggregate", "price=median"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let stderr = stderr(&output);
    assert!(stderr.contains("Error in aggregation:"));
    assert!(stderr.contains("Unknown aggregate function"));
}

#[test]
fn malformed_aggregate_exits_with_format_error() {
    let output = run_on_phones(&["--aggregate", "price"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid aggregate format"));
}

#[test]
fn malformed_condition_exits_with_condition_error() {
    let output = run_on_phones(&["--where", "price"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid where condition"));
}

#[test]
fn missing_file_exits_with_read_error() {
    let output = run_csvq(&["/nonexistent/phones.csv"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error reading file:"));
}

#[test]
fn missing_column_in_filter_exits_with_error() {
    let output = run_on_phones(&["--where", "bogus=1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Error in filter:"));
    assert!(stderr.contains("'bogus'"));
}

#[test]
fn help_exits_successfully() {
    let output = run_csvq(&["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--where"));
}
