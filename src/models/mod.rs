//! Core data models for finsight
//!
//! This module contains the data structures of the personal finance domain:
//! transactions, categories, budgets, savings goals and reporting periods.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetPeriod, BudgetState, BudgetStatus};
pub use category::Category;
pub use goal::Goal;
pub use ids::{BudgetId, CategoryId, GoalId, TransactionId};
pub use money::Money;
pub use period::{resolve_period, DateRange, PeriodParseError, PeriodPreset};
pub use transaction::{Transaction, TransactionType};
