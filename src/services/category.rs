//! Category service
//!
//! Provides business logic for category management: CRUD with unique names,
//! and the rules that keep transactions and budgets consistent with the
//! category they point at.

use tracing::warn;

use crate::audit::EntityType;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Category, CategoryId, TransactionType};
use crate::storage::Storage;

use super::match_short_id;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    pub category_type: TransactionType,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Fields to change on an existing category
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub category_type: Option<TransactionType>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// How many records point at a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryUsage {
    pub transactions: usize,
    pub budgets: usize,
}

impl CategoryUsage {
    pub fn is_empty(&self) -> bool {
        self.transactions == 0 && self.budgets == 0
    }
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, input: CreateCategoryInput) -> FinsightResult<Category> {
        let name = input.name.trim();

        if self.storage.categories.get_by_name(name)?.is_some() {
            warn!(name, "refused duplicate category");
            return Err(FinsightError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = Category::new(name, input.category_type);
        if let Some(color) = input.color {
            category.color = color.trim().to_string();
        }
        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> FinsightResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name, full ID, or short display ID
    pub fn find(&self, identifier: &str) -> FinsightResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        match_short_id(
            self.storage.categories.get_all()?,
            identifier,
            |c| c.id.matches_short(identifier),
            "Category",
        )
    }

    /// Find a category or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinsightResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| FinsightError::category_not_found(identifier))
    }

    /// List categories, optionally only those of one type
    pub fn list(&self, category_type: Option<TransactionType>) -> FinsightResult<Vec<Category>> {
        match category_type {
            Some(t) => self.storage.categories.get_by_type(t),
            None => self.storage.categories.get_all(),
        }
    }

    /// Count transactions and budgets referencing a category
    pub fn usage(&self, id: CategoryId) -> FinsightResult<CategoryUsage> {
        Ok(CategoryUsage {
            transactions: self.storage.transactions.get_by_category(id)?.len(),
            budgets: self.storage.budgets.get_for_category(id)?.len(),
        })
    }

    /// Update a category
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> FinsightResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinsightError::category_not_found(id.to_string()))?;

        let before = category.clone();

        if let Some(name) = input.name {
            let name = name.trim();
            if let Some(existing) = self.storage.categories.get_by_name(name)? {
                if existing.id != id {
                    warn!(name, "refused duplicate category name");
                    return Err(FinsightError::Duplicate {
                        entity_type: "Category",
                        identifier: name.to_string(),
                    });
                }
            }
            category.name = name.to_string();
        }

        if let Some(new_type) = input.category_type {
            if new_type != category.category_type {
                let usage = self.usage(id)?;
                if !usage.is_empty() {
                    warn!(category = %category.name, "refused type change of referenced category");
                    return Err(FinsightError::Validation(format!(
                        "Cannot change the type of '{}': used by {} transaction(s) and {} budget(s)",
                        category.name, usage.transactions, usage.budgets
                    )));
                }
                category.category_type = new_type;
            }
        }

        if let Some(color) = input.color {
            category.color = color.trim().to_string();
        }

        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category.updated_at = chrono::Utc::now();

        category
            .validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category that nothing references
    pub fn delete(&self, id: CategoryId) -> FinsightResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FinsightError::category_not_found(id.to_string()))?;

        let usage = self.usage(id)?;
        if !usage.is_empty() {
            warn!(category = %category.name, "refused delete of referenced category");
            return Err(FinsightError::Validation(format!(
                "Cannot delete '{}': used by {} transaction(s) and {} budget(s)",
                category.name, usage.transactions, usage.budgets
            )));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinsightPaths;
    use crate::models::{Budget, BudgetPeriod, Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(name: &str, category_type: TransactionType) -> CreateCategoryInput {
        CreateCategoryInput {
            name: name.to_string(),
            category_type,
            color: None,
            icon: None,
        }
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service
            .create(CreateCategoryInput {
                name: "  Groceries ".into(),
                category_type: TransactionType::Expense,
                color: Some("#10B981".into()),
                icon: Some("🛒".into()),
            })
            .unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color, "#10B981");

        assert_eq!(service.find("groceries").unwrap().unwrap().id, category.id);
        assert_eq!(
            service.find(&category.id.to_string()).unwrap().unwrap().id,
            category.id
        );
        assert_eq!(
            service
                .find(&category.id.as_uuid().to_string())
                .unwrap()
                .unwrap()
                .id,
            category.id
        );
        assert!(service.find("Rent").unwrap().is_none());
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create(input("Salary", TransactionType::Income)).unwrap();
        let err = service
            .create(input("SALARY", TransactionType::Income))
            .unwrap_err();
        assert!(matches!(err, FinsightError::Duplicate { .. }));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service
            .create(CreateCategoryInput {
                color: Some("green".into()),
                ..input("Fun", TransactionType::Expense)
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_by_type() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create(input("Salary", TransactionType::Income)).unwrap();
        service.create(input("Rent", TransactionType::Expense)).unwrap();
        service.create(input("Dining", TransactionType::Expense)).unwrap();

        assert_eq!(service.list(None).unwrap().len(), 3);
        assert_eq!(service.list(Some(TransactionType::Income)).unwrap().len(), 1);
        assert_eq!(service.list(Some(TransactionType::Expense)).unwrap().len(), 2);
    }

    #[test]
    fn test_update_and_type_change_rules() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create(input("Side Gig", TransactionType::Expense)).unwrap();

        let updated = service
            .update(
                category.id,
                UpdateCategoryInput {
                    name: Some("Freelance".into()),
                    category_type: Some(TransactionType::Income),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Freelance");
        assert!(updated.is_income());

        let txn = Transaction::with_details(
            Money::from_cents(5000),
            TransactionType::Income,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Some(category.id),
            "Invoice",
        );
        storage.transactions.upsert(txn).unwrap();

        let err = service
            .update(
                category.id,
                UpdateCategoryInput {
                    category_type: Some(TransactionType::Expense),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].diff_summary.as_deref().unwrap().contains("Freelance"));
    }

    #[test]
    fn test_delete_referenced_category_refused() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let rent = service.create(input("Rent", TransactionType::Expense)).unwrap();
        let unused = service.create(input("Unused", TransactionType::Expense)).unwrap();

        let budget = Budget::new(
            rent.id,
            Money::from_cents(150000),
            BudgetPeriod::Monthly,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        storage.budgets.upsert(budget).unwrap();

        let err = service.delete(rent.id).unwrap_err();
        assert!(err.to_string().contains("1 budget(s)"));
        assert!(service.get(rent.id).unwrap().is_some());

        service.delete(unused.id).unwrap();
        assert!(service.get(unused.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.require("Nope").unwrap_err();
        assert!(err.is_not_found());
        assert!(service.delete(CategoryId::new()).unwrap_err().is_not_found());
    }
}
