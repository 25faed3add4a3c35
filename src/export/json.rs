//! JSON Export functionality
//!
//! Exports the complete data set to JSON format with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinsightError, FinsightResult};
use crate::models::{Budget, Category, Goal, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Export metadata
    pub metadata: ExportMetadata,

    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub goal_count: usize,

    /// Date of the earliest transaction
    pub earliest_transaction: Option<String>,

    /// Date of the latest transaction
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FinsightResult<Self> {
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let goals = storage.goals.get_all()?;

        let metadata = ExportMetadata {
            category_count: categories.len(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            goal_count: goals.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata,
            categories,
            transactions,
            budgets,
            goals,
        })
    }
}

/// Export the full data set to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinsightResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinsightError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinsightPaths;
    use crate::models::{BudgetPeriod, Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn seed(storage: &Storage) {
        let rent = Category::new("Rent", TransactionType::Expense);
        storage.categories.upsert(rent.clone()).unwrap();

        storage
            .transactions
            .upsert(Transaction::with_details(
                Money::from_cents(150000),
                TransactionType::Expense,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                Some(rent.id),
                "January rent",
            ))
            .unwrap();
        storage
            .budgets
            .upsert(Budget::new(
                rent.id,
                Money::from_cents(150000),
                BudgetPeriod::Monthly,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ))
            .unwrap();
        storage
            .goals
            .upsert(Goal::new("Vacation", Money::from_cents(200000)))
            .unwrap();
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.category_count, 1);
        assert_eq!(export.metadata.transaction_count, 1);
        assert_eq!(export.metadata.budget_count, 1);
        assert_eq!(export.metadata.goal_count, 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        seed(&storage);

        let mut json_output = Vec::new();
        export_full_json(&storage, &mut json_output, true).unwrap();

        let imported: FullExport = serde_json::from_slice(&json_output).unwrap();
        assert_eq!(imported.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(imported.transactions[0].description, "January rent");
        assert_eq!(imported.goals[0].name, "Vacation");
    }
}
