//! Transaction service
//!
//! Provides business logic for transaction management including CRUD
//! operations, filtering, and the rule that a transaction's category must
//! have the same type as the transaction.

use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::audit::EntityType;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{CategoryId, DateRange, Money, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

use super::match_short_id;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions dated inside this range
    pub range: Option<DateRange>,
    /// Only income or only expenses
    pub transaction_type: Option<TransactionType>,
    /// Filter by category
    pub category_id: Option<CategoryId>,
    /// Case-insensitive text matched against description and notes
    pub search: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by date range
    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Filter by transaction type
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    /// Filter by category
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Filter by text in description or notes
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(range) = self.range {
            if !range.contains(txn.date) {
                return false;
            }
        }

        if let Some(t) = self.transaction_type {
            if txn.transaction_type != t {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !txn.description.to_lowercase().contains(&needle)
                && !txn.notes.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Fields to change on an existing transaction
///
/// `category_id: Some(None)` clears the category.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub amount: Option<Money>,
    pub transaction_type: Option<TransactionType>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<Option<CategoryId>>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> FinsightResult<Transaction> {
        self.check_category(input.category_id, input.transaction_type)?;

        let mut txn = Transaction::new(input.amount, input.transaction_type, input.date);
        txn.category_id = input.category_id;
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(notes) = input.notes {
            txn.notes = notes;
        }

        txn.validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            describe(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinsightResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID or short display ID
    pub fn find(&self, identifier: &str) -> FinsightResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        match_short_id(
            self.storage.transactions.get_all()?,
            identifier,
            |t| t.id.matches_short(identifier),
            "Transaction",
        )
    }

    /// Find a transaction or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinsightResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FinsightError::transaction_not_found(identifier))
    }

    /// List transactions matching a filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FinsightResult<Vec<Transaction>> {
        let source = match filter.category_id {
            Some(category_id) => self.storage.transactions.get_by_category(category_id)?,
            None => self.storage.transactions.get_all()?,
        };

        let mut transactions: Vec<_> = source.into_iter().filter(|t| filter.matches(t)).collect();

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update a transaction
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> FinsightResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinsightError::transaction_not_found(id.to_string()))?;

        let before = txn.clone();

        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(transaction_type) = input.transaction_type {
            txn.transaction_type = transaction_type;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(category_id) = input.category_id {
            txn.category_id = category_id;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(notes) = input.notes {
            txn.notes = notes;
        }

        self.check_category(txn.category_id, txn.transaction_type)?;

        txn.validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id.to_string(),
            describe(&txn),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> FinsightResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinsightError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            describe(&txn),
            &txn,
        )?;

        Ok(txn)
    }

    /// Count all transactions
    pub fn count(&self) -> FinsightResult<usize> {
        self.storage.transactions.count()
    }

    /// The category, when set, must exist and share the transaction's type
    fn check_category(
        &self,
        category_id: Option<CategoryId>,
        transaction_type: TransactionType,
    ) -> FinsightResult<()> {
        let Some(category_id) = category_id else {
            return Ok(());
        };

        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| FinsightError::category_not_found(category_id.to_string()))?;

        if category.category_type != transaction_type {
            warn!(
                category = %category.name,
                expected = %transaction_type,
                "refused transaction with mismatched category type"
            );
            return Err(FinsightError::Validation(format!(
                "Category '{}' is for {} transactions, not {}",
                category.name,
                category.category_type.as_str(),
                transaction_type.as_str()
            )));
        }

        Ok(())
    }
}

/// Audit name for a transaction: its description when it has one
fn describe(txn: &Transaction) -> Option<String> {
    if txn.description.is_empty() {
        None
    } else {
        Some(txn.description.clone())
    }
}
