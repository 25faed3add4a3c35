//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinsightError;
use crate::models::{CategoryId, DateRange, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: category_id -> transaction_ids
    by_category: RwLock<HashMap<CategoryId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), FinsightError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_category = self.by_category.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            if let Some(cat_id) = txn.category_id {
                by_category.entry(cat_id).or_default().push(txn.id);
            }
            data.insert(txn.id, txn);
        }

        debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), FinsightError> {
        let data = self.data.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinsightError> {
        let data = self.data.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinsightError> {
        let data = self.data.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions for a category
    pub fn get_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, FinsightError> {
        let data = self.data.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_category = self.by_category.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Whether any transaction references the category
    pub fn has_category(&self, category_id: CategoryId) -> Result<bool, FinsightError> {
        let by_category = self.by_category.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_category
            .get(&category_id)
            .is_some_and(|ids| !ids.is_empty()))
    }

    /// Get transactions dated inside a range
    pub fn get_by_date_range(&self, range: DateRange) -> Result<Vec<Transaction>, FinsightError> {
        let all = self.get_all()?;
        Ok(all.into_iter().filter(|t| range.contains(t.date)).collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FinsightError> {
        let mut data = self.data.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_category = self.by_category.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old_cat) = data.get(&txn.id).and_then(|old| old.category_id) {
            if let Some(ids) = by_category.get_mut(&old_cat) {
                ids.retain(|&id| id != txn.id);
            }
        }

        if let Some(cat_id) = txn.category_id {
            by_category.entry(cat_id).or_default().push(txn.id);
        }

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, FinsightError> {
        let mut data = self.data.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_category = self.by_category.write().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(cat_id) = txn.category_id {
                    if let Some(ids) = by_category.get_mut(&cat_id) {
                        ids.retain(|&tid| tid != id);
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FinsightError> {
        let data = self.data.read().map_err(|e| {
            FinsightError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

/// Newest date first, then most recently recorded
fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}
