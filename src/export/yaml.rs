//! YAML Export functionality
//!
//! Exports the complete data set to YAML for a human-readable backup.

use std::io::Write;

use crate::error::{FinsightError, FinsightResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full data set to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FinsightResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# finsight export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinsightError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinsightError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinsightPaths;
    use crate::models::{Category, Goal, Money, TransactionType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_export_and_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .categories
            .upsert(Category::new("Groceries", TransactionType::Expense))
            .unwrap();
        storage
            .goals
            .upsert(Goal::new("Emergency Fund", Money::from_cents(100000)))
            .unwrap();

        let mut yaml_output = Vec::new();
        export_full_yaml(&storage, &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# finsight export"));
        assert!(yaml_string.contains("Groceries"));

        let imported: FullExport = serde_yaml::from_str(&yaml_string).unwrap();
        assert_eq!(imported.categories.len(), 1);
        assert_eq!(imported.goals[0].name, "Emergency Fund");
    }
}
