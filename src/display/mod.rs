//! Display formatting for terminal output
//!
//! Turns models and analytics results into tables and text reports. Money
//! and dates are rendered according to the user's settings.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod format;
pub mod goal;
pub mod transaction;

pub use analytics::{
    format_category_insights, format_comparison, format_health, format_kpis, format_trends,
};
pub use budget::{format_budget_details, format_budget_list, format_budget_status, BudgetView};
pub use category::{format_category_details, format_category_list};
pub use format::DisplayOptions;
pub use goal::{format_goal_details, format_goal_list};
pub use transaction::{format_transaction_details, format_transaction_register};
