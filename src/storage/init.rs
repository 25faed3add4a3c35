//! Storage initialization
//!
//! First-run setup: creates the directory layout and the starter categories.

use tracing::info;

use crate::config::paths::FinsightPaths;
use crate::error::FinsightError;
use crate::models::{Category, TransactionType};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Starter categories as (name, type, color, icon)
const DEFAULT_CATEGORIES: [(&str, TransactionType, &str, &str); 13] = [
    ("Salary", TransactionType::Income, "#10B981", "💼"),
    ("Freelance", TransactionType::Income, "#3B82F6", "💻"),
    ("Investments", TransactionType::Income, "#8B5CF6", "📈"),
    ("Other Income", TransactionType::Income, "#14B8A6", "💰"),
    ("Housing", TransactionType::Expense, "#EF4444", "🏠"),
    ("Groceries", TransactionType::Expense, "#F59E0B", "🛒"),
    ("Transportation", TransactionType::Expense, "#6366F1", "🚗"),
    ("Utilities", TransactionType::Expense, "#0EA5E9", "💡"),
    ("Dining Out", TransactionType::Expense, "#F97316", "🍽"),
    ("Entertainment", TransactionType::Expense, "#EC4899", "🎬"),
    ("Healthcare", TransactionType::Expense, "#22C55E", "🏥"),
    ("Shopping", TransactionType::Expense, "#A855F7", "🛍"),
    ("Other", TransactionType::Expense, "#6B7280", "📦"),
];

/// Initialize storage for a fresh installation
///
/// Returns `true` when the starter categories were written. An existing
/// categories file is never overwritten.
pub fn initialize_storage(paths: &FinsightPaths) -> Result<bool, FinsightError> {
    paths.ensure_directories()?;

    if paths.categories_file().exists() {
        return Ok(false);
    }

    let categories = DEFAULT_CATEGORIES
        .iter()
        .map(|(name, kind, color, icon)| Category::with_style(*name, *kind, *color, *icon))
        .collect();

    write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
    info!(count = DEFAULT_CATEGORIES.len(), "created default categories");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_default_categories_created() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths).unwrap());
        assert!(paths.data_dir().exists());

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        assert_eq!(data.categories.len(), 13);
        assert_eq!(data.categories.iter().filter(|c| c.is_income()).count(), 4);
        assert!(data.categories.iter().all(|c| c.validate().is_ok()));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());

        let custom = CategoryData {
            categories: vec![Category::new("Rent", TransactionType::Expense)],
        };
        paths.ensure_directories().unwrap();
        write_json_atomic(paths.categories_file(), &custom).unwrap();

        assert!(!initialize_storage(&paths).unwrap());

        let data: CategoryData = read_json(paths.categories_file()).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Rent");
    }
}
