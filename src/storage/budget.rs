//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::FinsightError;
use crate::models::{Budget, BudgetId, CategoryId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FinsightError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.id, budget);
        }

        debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FinsightError> {
        let budgets = self.get_all()?;
        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, FinsightError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.get(&id).cloned())
    }

    /// Get all budgets ordered by start date
    pub fn get_all(&self) -> Result<Vec<Budget>, FinsightError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(list)
    }

    /// Get all budgets for a category
    pub fn get_for_category(&self, category_id: CategoryId) -> Result<Vec<Budget>, FinsightError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.category_id == category_id)
            .collect())
    }

    /// Get budgets whose range includes `date`
    pub fn get_active_on(&self, date: NaiveDate) -> Result<Vec<Budget>, FinsightError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.is_active_on(date))
            .collect())
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), FinsightError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> Result<bool, FinsightError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budgets.remove(&id).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, FinsightError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money};
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_lookup_by_category_and_date() {
        let (_temp_dir, repo) = create_test_repo();
        let groceries = CategoryId::new();
        let dining = CategoryId::new();

        let march = Budget::new(groceries, Money::from_cents(40000), BudgetPeriod::Monthly, date(3, 1));
        let april = Budget::new(groceries, Money::from_cents(40000), BudgetPeriod::Monthly, date(4, 1));
        let dining_week =
            Budget::new(dining, Money::from_cents(5000), BudgetPeriod::Weekly, date(3, 10));

        repo.upsert(april.clone()).unwrap();
        repo.upsert(march.clone()).unwrap();
        repo.upsert(dining_week).unwrap();

        let for_groceries = repo.get_for_category(groceries).unwrap();
        assert_eq!(for_groceries.len(), 2);
        assert_eq!(for_groceries[0].id, march.id);

        assert_eq!(repo.get_active_on(date(3, 12)).unwrap().len(), 2);
        assert_eq!(repo.get_active_on(date(4, 30)).unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let budget = Budget::new(
            CategoryId::new(),
            Money::from_cents(12000),
            BudgetPeriod::Quarterly,
            date(1, 1),
        );
        let id = budget.id;
        repo.upsert(budget).unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();
        let loaded = repo2.get(id).unwrap().unwrap();
        assert_eq!(loaded.end_date, date(3, 31));

        assert!(repo2.delete(id).unwrap());
        assert_eq!(repo2.count().unwrap(), 0);
    }
}
