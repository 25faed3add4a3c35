//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::FinsightError;
use crate::models::{Category, CategoryId, TransactionType};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

/// Income categories first, then by name
fn sort_categories(list: &mut [Category]) {
    list.sort_by(|a, b| {
        b.is_income()
            .cmp(&a.is_income())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FinsightError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        debug!(count = categories.len(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), FinsightError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        sort_categories(&mut list);

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, FinsightError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.get(&id).cloned())
    }

    /// Get all categories
    pub fn get_all(&self) -> Result<Vec<Category>, FinsightError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        sort_categories(&mut list);
        Ok(list)
    }

    /// Get categories of one type
    pub fn get_by_type(
        &self,
        category_type: TransactionType,
    ) -> Result<Vec<Category>, FinsightError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.category_type == category_type)
            .collect())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinsightError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), FinsightError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, FinsightError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(categories.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, FinsightError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinsightError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.len())
    }
}
