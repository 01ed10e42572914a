use std::process::Command;
use std::path::Path;
use anyhow::{anyhow, Result};

const CSV_HEADER: &str = "file_index,filename,date,type,amount,description,fitid";

fn run(args: &[&Path]) -> Result<std::process::Output> {
    let binary_path = env!("CARGO_BIN_EXE_ofx-ingest");

    Ok(Command::new(binary_path).args(args).output()?)
}

fn rows(stdout: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::Reader::from_reader(stdout);
    let mut rows = Vec::new();

    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

#[test]
fn test_cli_correctly_processes_samples() -> Result<()> {
    let checking = Path::new("samples").join("checking.ofx");
    let credit_card = Path::new("samples").join("credit_card.ofx");

    let output = run(&[&checking, &credit_card])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout.clone())?;

    assert_eq!(stdout.lines().next(), Some(CSV_HEADER));

    let rows = rows(&output.stdout)?;

    assert_eq!(rows.len(), 6);

    for row in &rows {
        assert_eq!(row.len(), 7);

        let _: usize = row[0].parse()?;
        let _: rust_decimal::Decimal = row[4].parse()?;
        let _: chrono::DateTime<chrono::Utc> = row[2].parse()?;
    }

    Ok(())
}

#[test]
fn test_cli_outputs_classified_transactions_in_order() -> Result<()> {
    let checking = Path::new("samples").join("checking.ofx");
    let credit_card = Path::new("samples").join("credit_card.ofx");

    let output = run(&[&checking, &credit_card])?;

    assert!(output.status.success());

    let rows = rows(&output.stdout)?;
    let summary: Vec<_> = rows.iter()
        .map(|row| (row[0].as_str(), row[1].as_str(), row[3].as_str(), row[4].as_str(), row[6].as_str()))
        .collect();

    assert_eq!(summary, vec![
        ("0", "checking.ofx", "expense", "100.5", "CHK-0001"),
        ("0", "checking.ofx", "income", "2500", "CHK-0002"),
        ("0", "checking.ofx", "zero", "0", "CHK-0003"),
        ("0", "checking.ofx", "expense", "75.25", "CHK-0004"),
        ("1", "credit_card.ofx", "expense", "42.99", "CC-2024-0210-01"),
        ("1", "credit_card.ofx", "income", "150", "CC-2024-0220-01"),
    ]);

    let descriptions: Vec<_> = rows.iter().map(|row| row[5].as_str()).collect();

    assert_eq!(descriptions, vec![
        "Coffee Shop Purchase",
        "ACME CORP PAYROLL",
        "Balance adjustment",
        "Rent & Utilities",
        "Bookstore & Cafe",
        "PAYMENT - THANK YOU",
    ]);

    let first = rows.first().ok_or_else(|| anyhow!("no rows in output"))?;
    let date: chrono::DateTime<chrono::Utc> = first[2].parse()?;

    assert_eq!(date.to_rfc3339(), "2024-01-05T17:00:00+00:00");

    Ok(())
}

#[test]
fn test_cli_skips_malformed_file_and_keeps_going() -> Result<()> {
    let malformed = Path::new("samples").join("malformed.ofx");
    let credit_card = Path::new("samples").join("credit_card.ofx");

    let output = run(&[&malformed, &credit_card])?;

    assert!(output.status.success());

    let rows = rows(&output.stdout)?;

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row[0] == "1" && row[1] == "credit_card.ofx"));

    Ok(())
}

#[test]
fn test_cli_skip_invalid_keeps_complete_records() -> Result<()> {
    let file = tempfile::Builder::new().suffix(".ofx").tempfile()?;
    let content = std::fs::read_to_string(Path::new("samples").join("checking.ofx"))?
        .replace("<TRNAMT>2500.00\n", "");

    std::fs::write(file.path(), content)?;

    let output = run(&[file.path()])?;

    assert!(output.status.success());
    assert!(rows(&output.stdout)?.is_empty());

    let binary_path = env!("CARGO_BIN_EXE_ofx-ingest");
    let output = Command::new(binary_path)
        .arg("--skip-invalid")
        .arg(file.path())
        .output()?;

    assert!(output.status.success());

    let fitids: Vec<_> = rows(&output.stdout)?.into_iter().map(|row| row[6].clone()).collect();

    assert_eq!(fitids, vec!["CHK-0001", "CHK-0003", "CHK-0004"]);

    Ok(())
}

#[test]
fn test_cli_without_files_prints_usage() -> Result<()> {
    let output = run(&[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Usage: ofx-ingest"));

    Ok(())
}

#[test]
fn test_cli_fails_on_unreadable_path() -> Result<()> {
    let missing = Path::new("samples").join("does-not-exist.ofx");

    let output = run(&[&missing])?;

    assert!(!output.status.success());

    Ok(())
}
