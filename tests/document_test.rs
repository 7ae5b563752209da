mod common;

use std::fs;

use anyhow::Result;
use fintrack::accounting::ledger::{Ledger, MAX_TOTAL};
use fintrack::accounting::transactions::TransactionKind::{Expense, Income};
use fintrack::accounting::transactions::MAX_AMOUNT;
use fintrack::data::JsonStore;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;

use common::{load, temp_ledger_path};

#[test]
fn test_missing_document_starts_empty() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;

    let ledger = load(&path);

    assert!(ledger.is_empty());
    assert!(!path.exists());
    assert!(!ledger.has_unsaved_changes());

    Ok(())
}

#[test]
fn test_round_trip_keeps_order_and_fields() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;

    let mut ledger = Ledger::new(JsonStore::new(&path));
    ledger.append(dec!(100), "Salary", "2024-01-01", "Job", Income)?;
    ledger.append(dec!(30.25), "Groceries", "2024-01-02", "Food", Expense)?;
    ledger.append(dec!(7.5), "Cinema", "someday", "Fun", Expense)?;

    let reloaded = load(&path);

    assert_eq!(reloaded.transactions(), ledger.transactions());
    assert_eq!(reloaded.balance(), dec!(62.25));

    Ok(())
}

#[test]
fn test_document_layout() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;

    let mut ledger = Ledger::new(JsonStore::new(&path));
    ledger.append(dec!(100), "Salary", "2024-01-01", "Job", Income)?;
    ledger.append(dec!(30), "Groceries", "2024-01-02", "Food", Expense)?;

    let content = fs::read_to_string(&path)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    let expected: serde_json::Value = serde_json::from_str(
        r#"[
            {"Amount": 100, "Description": "Salary", "Date": "2024-01-01", "Category": "Job", "Type": "income"},
            {"Amount": 30, "Description": "Groceries", "Date": "2024-01-02", "Category": "Food", "Type": "expense"}
        ]"#,
    )?;

    assert_eq!(document, expected);
    assert!(content.contains("\n    {\n        \"Amount\""));

    Ok(())
}

#[test]
fn test_loads_document_written_elsewhere() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    fs::write(
        &path,
        r#"[
    {
        "Amount": 1500.0,
        "Description": "Salary",
        "Date": "2024-05-01",
        "Category": "Job",
        "Type": "income"
    },
    {
        "Amount": 42,
        "Description": "Books",
        "Date": "2024-05-03",
        "Category": "Education",
        "Type": "expense"
    }
]"#,
    )?;

    let ledger = load(&path);

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.balance(), dec!(1458));
    assert_eq!(ledger.get(1).map(|transaction| transaction.category().as_str()), Some("Education"));

    Ok(())
}

#[test]
fn test_corrupt_document_starts_empty() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    fs::write(&path, "[{\"Amount\": 12.0, \"Description\": ")?;

    let ledger = load(&path);

    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_unreadable_document_starts_empty() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    fs::create_dir(&path)?;

    let ledger = load(&path);

    assert!(ledger.is_empty());

    Ok(())
}

#[test]
fn test_invalid_records_are_skipped() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    let document = json!([
        {"Amount": 10.0, "Description": "Lunch", "Date": "2024-01-01", "Category": "Food", "Type": "expense"},
        {"Amount": 0.0, "Description": "Nothing", "Date": "2024-01-01", "Category": "Misc", "Type": "expense"},
        {"Amount": 25.0, "Description": "Gift", "Date": "2024-01-02", "Category": "Misc", "Type": "income"}
    ]);
    fs::write(&path, serde_json::to_string(&document)?)?;

    let ledger = load(&path);

    let descriptions: Vec<&str> = ledger.transactions().iter().map(|t| t.description().as_str()).collect();
    assert_eq!(descriptions, vec!["Lunch", "Gift"]);

    Ok(())
}

#[test]
fn test_round_trip_keeps_every_digit() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;

    let mut ledger = Ledger::new(JsonStore::new(&path));
    ledger.append(dec!(1234567890.123456789), "Shares", "2024-04-01", "Stocks", Income)?;
    ledger.append(dec!(999999999999.9999999999999999), "Almost", "2024-04-02", "Luck", Income)?;
    ledger.append(MAX_AMOUNT, "Jackpot", "2024-04-03", "Luck", Income)?;
    ledger.append(dec!(0.0000000000000000000000000001), "Dust", "2024-04-04", "Misc", Expense)?;

    let content = fs::read_to_string(&path)?;
    assert!(content.contains("\"Amount\": 1234567890.123456789,"));
    assert!(content.contains("\"Amount\": 999999999999.9999999999999999,"));
    assert!(content.contains("\"Amount\": 1000000000000,"));

    let reloaded = load(&path);

    assert_eq!(reloaded.transactions(), ledger.transactions());
    assert_eq!(reloaded.get(0).map(|transaction| transaction.amount()), Some(dec!(1234567890.123456789)));
    assert_eq!(reloaded.get(3).map(|transaction| transaction.amount()), Some(dec!(0.0000000000000000000000000001)));
    assert_eq!(reloaded.balance(), ledger.balance());

    Ok(())
}

#[test]
fn test_amounts_above_limit_are_skipped() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    fs::write(
        &path,
        r#"[
    {"Amount": 10, "Description": "Lunch", "Date": "2024-01-01", "Category": "Food", "Type": "expense"},
    {"Amount": 79228162514264337593543950000, "Description": "Big", "Date": "2024-01-01", "Category": "Job", "Type": "income"},
    {"Amount": 1000000000000.01, "Description": "Bigger", "Date": "2024-01-01", "Category": "Job", "Type": "income"}
]"#,
    )?;

    let ledger = load(&path);

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.get(0).map(|transaction| transaction.description().as_str()), Some("Lunch"));
    assert_eq!(ledger.balance(), dec!(-10));

    Ok(())
}

#[test]
fn test_totals_above_limit_are_skipped() -> Result<()> {
    let (path, _dir) = temp_ledger_path()?;
    let mut records = Vec::new();
    for day in 0..1002 {
        records.push(json!({
            "Amount": 1000000000000u64,
            "Description": "Jackpot",
            "Date": format!("day {}", day),
            "Category": "Luck",
            "Type": "income",
        }));
    }
    records.push(json!({"Amount": 3, "Description": "Coffee", "Date": "2024-01-01", "Category": "Food", "Type": "expense"}));
    fs::write(&path, serde_json::to_string(&records)?)?;

    let ledger = load(&path);

    assert_eq!(ledger.len(), 1001);
    assert_eq!(ledger.summary().income, MAX_TOTAL);
    assert_eq!(ledger.balance(), MAX_TOTAL - dec!(3));
    assert_eq!(ledger.get(1000).map(|transaction| transaction.description().as_str()), Some("Coffee"));

    Ok(())
}
