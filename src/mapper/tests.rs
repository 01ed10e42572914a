use super::{describe, map_transaction, map_transactions, normalize_text, BatchPolicy, ClassificationPolicy, MissingFieldPolicy, SingleFilePolicy, NO_DESCRIPTION};
use crate::models::{BatchTransactionType, FieldError, RawTransaction, TransactionType};
use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

fn create_raw_transaction(amount: &str, memo: Option<&str>, name: Option<&str>) -> RawTransaction {
    RawTransaction {
        date_posted: Some("20240115093000".to_string()),
        amount: Some(amount.to_string()),
        fitid: Some("FIT-1".to_string()),
        memo: memo.map(str::to_string),
        name: name.map(str::to_string),
        line: 7,
        ..RawTransaction::default()
    }
}

#[test]
fn test_debit_maps_to_non_negative_expense() -> Result<()> {
    let raw = create_raw_transaction("-100.50", Some("Coffee Shop Purchase"), None);
    let transaction = map_transaction(&raw, &SingleFilePolicy)?;

    assert_eq!(transaction.amount, Decimal::from_str("100.5")?);
    assert_eq!(transaction.amount.to_string(), "100.5");
    assert_eq!(transaction.transaction_type, TransactionType::Expense);
    assert_eq!(transaction.description, "Coffee Shop Purchase");
    assert_eq!(transaction.fitid, "FIT-1");
    assert_eq!(transaction.date, Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());

    Ok(())
}

#[test]
fn test_credit_maps_to_income() -> Result<()> {
    let transaction = map_transaction(&create_raw_transaction("2500.00", Some("Salary Deposit"), None), &SingleFilePolicy)?;

    assert_eq!(transaction.amount, Decimal::from(2500));
    assert_eq!(transaction.amount.to_string(), "2500");
    assert_eq!(transaction.transaction_type, TransactionType::Income);

    Ok(())
}

#[test]
fn test_zero_amount_policies_diverge() -> Result<()> {
    let zero = Decimal::from_str("0.00")?;
    let negative_zero = Decimal::from_str("-0.00")?;

    assert_eq!(SingleFilePolicy.classify(&zero), TransactionType::Income);
    assert_eq!(SingleFilePolicy.classify(&negative_zero), TransactionType::Income);
    assert_eq!(BatchPolicy.classify(&zero), BatchTransactionType::Zero);
    assert_eq!(BatchPolicy.classify(&negative_zero), BatchTransactionType::Zero);
    assert_eq!(BatchPolicy.classify(&Decimal::from_str("-0.01")?), BatchTransactionType::Expense);
    assert_eq!(BatchPolicy.classify(&Decimal::from_str("0.01")?), BatchTransactionType::Income);

    let transaction = map_transaction(&create_raw_transaction("0.00", None, None), &SingleFilePolicy)?;

    assert_eq!(transaction.transaction_type, TransactionType::Income);
    assert_eq!(transaction.amount, Decimal::ZERO);

    Ok(())
}

#[test]
fn test_amounts_keep_exact_decimal_value() -> Result<()> {
    let test_cases = vec![
        ("-0.01", "0.01"),
        ("123456.78", "123456.78"),
        ("-98765432.10", "98765432.1"),
        ("+7", "7"),
    ];

    for (input, expected) in test_cases {
        let transaction = map_transaction(&create_raw_transaction(input, None, None), &BatchPolicy)?;

        assert_eq!(transaction.amount.to_string(), expected);
        assert!(!transaction.amount.is_sign_negative());
    }

    Ok(())
}

#[test]
fn test_description_precedence() {
    assert_eq!(describe(&create_raw_transaction("1", Some("Memo text"), Some("Name text"))), "Memo text");
    assert_eq!(describe(&create_raw_transaction("1", None, Some("Name text"))), "Name text");
    assert_eq!(describe(&create_raw_transaction("1", None, None)), NO_DESCRIPTION);
    assert_eq!(describe(&create_raw_transaction("1", Some(""), Some("Name text"))), "Name text");
    assert_eq!(describe(&create_raw_transaction("1", Some("&nbsp;"), None)), NO_DESCRIPTION);
}

#[test]
fn test_description_is_normalized() {
    assert_eq!(describe(&create_raw_transaction("1", Some("  POS   PURCHASE \t AMAZON&amp;CO  "), None)), "POS PURCHASE AMAZON&CO");
}

#[test]
fn test_normalize_text_decodes_entities_and_whitespace() {
    assert_eq!(normalize_text("Fish &amp; Chips"), "Fish & Chips");
    assert_eq!(normalize_text("&lt;REF&gt;&#65;&#x42;"), "<REF>AB");
    assert_eq!(normalize_text("Caf\u{e9}\u{a0}\u{a0}Paris"), "Caf\u{e9} Paris");
    assert_eq!(normalize_text("AT&T&unknown; bill"), "AT&T&unknown; bill");
    assert_eq!(normalize_text("line\r\nbreak\u{7}"), "line break");
    assert_eq!(normalize_text("   "), "");
}

#[test]
fn test_blank_fitid_passes_through_as_empty() -> Result<()> {
    let mut raw = create_raw_transaction("-1", None, None);
    raw.fitid = Some(String::new());

    assert_eq!(map_transaction(&raw, &SingleFilePolicy)?.fitid, "");

    Ok(())
}

#[test]
fn test_missing_and_invalid_fields_are_reported() {
    let mut missing_amount = create_raw_transaction("1", None, None);
    missing_amount.amount = None;

    let mut missing_fitid = create_raw_transaction("1", None, None);
    missing_fitid.fitid = None;

    let mut bad_date = create_raw_transaction("1", None, None);
    bad_date.date_posted = Some("yesterday".to_string());

    assert!(matches!(map_transaction(&missing_amount, &SingleFilePolicy), Err(FieldError::MissingField { field: "TRNAMT", line: 7, .. })));
    assert!(matches!(map_transaction(&missing_fitid, &SingleFilePolicy), Err(FieldError::MissingField { field: "FITID", .. })));
    assert!(matches!(map_transaction(&bad_date, &SingleFilePolicy), Err(FieldError::InvalidDate { .. })));
    assert!(matches!(map_transaction(&create_raw_transaction("1.2.3", None, None), &SingleFilePolicy), Err(FieldError::InvalidAmount { .. })));
}

#[test]
fn test_missing_field_policy_fail_file_and_skip_record() -> Result<()> {
    let mut broken = create_raw_transaction("5", None, None);
    broken.date_posted = None;

    let raws = vec![
        create_raw_transaction("-1", Some("first"), None),
        broken,
        create_raw_transaction("2", Some("third"), None),
    ];

    assert!(map_transactions(&raws, &SingleFilePolicy, MissingFieldPolicy::FailFile).is_err());

    let kept = map_transactions(&raws, &SingleFilePolicy, MissingFieldPolicy::SkipRecord)?;
    let descriptions: Vec<_> = kept.iter().map(|transaction| transaction.description.as_str()).collect();

    assert_eq!(descriptions, vec!["first", "third"]);

    Ok(())
}
