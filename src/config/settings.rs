//! User settings for finsight
//!
//! Manages user preferences such as the currency symbol, the default
//! reporting period and the budget alert threshold.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::FinsightPaths;
use crate::analytics::Granularity;
use crate::error::FinsightError;
use crate::models::{PeriodParseError, PeriodPreset};

/// User settings for finsight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Period used by reports when none is given on the command line
    #[serde(default)]
    pub default_period: PeriodPreset,

    /// Alert threshold (percent used) applied to newly created budgets
    #[serde(default = "default_alert_threshold")]
    pub budget_alert_threshold: u8,

    /// Bucket size used by the trends report
    #[serde(default)]
    pub trend_granularity: Granularity,

    /// Whether `finsight init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_alert_threshold() -> u8 {
    80
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_period: PeriodPreset::default(),
            budget_alert_threshold: default_alert_threshold(),
            trend_granularity: Granularity::default(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinsightPaths) -> Result<Self, FinsightError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinsightError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinsightError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinsightPaths) -> Result<(), FinsightError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinsightError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinsightError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Keys accepted by [`Settings::set`]
    pub const KEYS: [&'static str; 5] = [
        "currency_symbol",
        "date_format",
        "default_period",
        "budget_alert_threshold",
        "trend_granularity",
    ];

    /// Change one setting from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FinsightError> {
        let invalid = |e: String| FinsightError::Config(format!("Invalid {}: {}", key, e));

        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => {
                check_date_format(value)?;
                self.date_format = value.to_string();
            }
            "default_period" => {
                self.default_period = value.parse().map_err(|e: PeriodParseError| {
                    invalid(e.to_string())
                })?;
            }
            "budget_alert_threshold" => {
                let threshold: u8 = value.trim().parse().map_err(|_| {
                    invalid(format!("'{}' is not a number between 1 and 100", value))
                })?;
                let previous = std::mem::replace(&mut self.budget_alert_threshold, threshold);
                if let Err(e) = self.validate() {
                    self.budget_alert_threshold = previous;
                    return Err(e);
                }
            }
            "trend_granularity" => self.trend_granularity = value.parse().map_err(invalid)?,
            other => {
                return Err(FinsightError::Config(format!(
                    "Unknown setting '{}'. Expected one of: {}",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), FinsightError> {
        if !(1..=100).contains(&self.budget_alert_threshold) {
            return Err(FinsightError::Config(format!(
                "budget_alert_threshold must be between 1 and 100, got {}",
                self.budget_alert_threshold
            )));
        }
        check_date_format(&self.date_format)
    }
}

/// Reject strftime strings chrono cannot render
fn check_date_format(format: &str) -> Result<(), FinsightError> {
    if format.trim().is_empty() {
        return Err(FinsightError::Config("date_format must not be empty".into()));
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FinsightError::Config(format!(
            "date_format '{}' is not a valid strftime format",
            format
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_period, PeriodPreset::ThisMonth);
        assert_eq!(settings.budget_alert_threshold, 80);
        assert_eq!(settings.trend_granularity, Granularity::Monthly);
        assert!(!settings.setup_completed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();
        settings.default_period = PeriodPreset::Last30Days;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_period, PeriodPreset::Last30Days);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.budget_alert_threshold, 80);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_set() {
        let mut settings = Settings::default();

        settings.set("currency_symbol", "€").unwrap();
        settings.set("default_period", "last-30-days").unwrap();
        settings.set("budget_alert_threshold", "90").unwrap();
        settings.set("trend_granularity", "weekly").unwrap();

        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.default_period, PeriodPreset::Last30Days);
        assert_eq!(settings.budget_alert_threshold, 90);
        assert_eq!(settings.trend_granularity, Granularity::Weekly);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();

        assert!(settings.set("budget_alert_threshold", "0").is_err());
        assert_eq!(settings.budget_alert_threshold, 80);
        assert!(settings.set("budget_alert_threshold", "lots").is_err());
        assert!(settings.set("default_period", "someday").is_err());
        assert!(settings.set("colour", "blue").is_err());
    }

    #[test]
    fn test_set_rejects_bad_date_format() {
        let mut settings = Settings::default();

        assert!(matches!(
            settings.set("date_format", "%Q"),
            Err(FinsightError::Config(_))
        ));
        assert!(settings.set("date_format", "  ").is_err());
        assert_eq!(settings.date_format, "%Y-%m-%d");

        settings.set("date_format", "%d/%m/%Y").unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_bad_date_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Y-%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinsightError::Config(_)));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinsightPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"budget_alert_threshold": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FinsightError::Config(_)));
    }
}
