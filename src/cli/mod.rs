//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod config;
pub mod export;
pub mod goal;
pub mod history;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, ExportArgs};
pub use goal::{handle_goal_command, GoalCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Duration, Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{resolve_period, DateRange, Money};

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a user-entered amount
pub(crate) fn parse_money(s: &str) -> FinsightResult<Money> {
    Money::parse(s).map_err(|e| FinsightError::Validation(format!("Invalid amount '{}': {}", s, e)))
}

/// Parse a date given as `YYYY-MM-DD`, `today` or `yesterday`
pub(crate) fn parse_date(s: &str) -> FinsightResult<NaiveDate> {
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today()),
        "yesterday" => Ok(today() - Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            FinsightError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

/// Resolve a `--period` argument, falling back to the configured default
pub(crate) fn resolve_range(
    period: Option<&str>,
    settings: &Settings,
    today: NaiveDate,
) -> FinsightResult<DateRange> {
    match period {
        Some(p) => resolve_period(p, today).map_err(|e| FinsightError::Validation(e.to_string())),
        None => Ok(settings.default_period.resolve(today)),
    }
}
