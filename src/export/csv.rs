//! CSV Export functionality
//!
//! Exports transactions to CSV, one row per transaction, newest first.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{FinsightError, FinsightResult};
use crate::storage::Storage;

/// One exported transaction
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: String,
    date: String,
    #[serde(rename = "type")]
    transaction_type: &'static str,
    category: &'a str,
    description: &'a str,
    amount: String,
    notes: &'a str,
}

/// Export all transactions to CSV
///
/// Amounts are signed decimals: negative for expenses.
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FinsightResult<usize> {
    let category_names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let transactions = storage.transactions.get_all()?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    for txn in &transactions {
        let category = txn
            .category_id
            .and_then(|id| category_names.get(&id))
            .map(String::as_str)
            .unwrap_or("");

        csv_writer
            .serialize(TransactionRow {
                id: txn.id.as_uuid().to_string(),
                date: txn.date.to_string(),
                transaction_type: txn.transaction_type.as_str(),
                category,
                description: &txn.description,
                amount: txn.signed_amount().to_decimal_string(),
                notes: &txn.notes,
            })
            .map_err(|e| FinsightError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinsightError::Export(e.to_string()))?;

    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinsightPaths;
    use crate::models::{Category, Money, Transaction, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_transactions_csv() {
        let (_temp_dir, storage) = create_test_storage();

        let groceries = Category::new("Groceries", TransactionType::Expense);
        storage.categories.upsert(groceries.clone()).unwrap();

        storage
            .transactions
            .upsert(Transaction::with_details(
                Money::from_cents(5025),
                TransactionType::Expense,
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                Some(groceries.id),
                "Market, organic",
            ))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::new(
                Money::from_cents(300000),
                TransactionType::Income,
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            ))
            .unwrap();

        let mut output = Vec::new();
        let count = export_transactions_csv(&storage, &mut output).unwrap();
        assert_eq!(count, 2);

        let csv_string = String::from_utf8(output).unwrap();
        let lines: Vec<_> = csv_string.lines().collect();
        assert_eq!(lines[0], "id,date,type,category,description,amount,notes");
        assert!(lines[1].contains("2025-01-31,income,,,3000.00,"));
        assert!(lines[2].contains("expense,Groceries,\"Market, organic\",-50.25,"));
    }

    #[test]
    fn test_empty_export_has_no_rows() {
        let (_temp_dir, storage) = create_test_storage();

        let mut output = Vec::new();
        assert_eq!(export_transactions_csv(&storage, &mut output).unwrap(), 0);
    }
}
