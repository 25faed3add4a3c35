//! Service layer for finsight
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, cross-entity rules, and audit logging.

pub mod analytics;
pub mod budget;
pub mod category;
pub mod goal;
pub mod transaction;

pub use analytics::AnalyticsService;
pub use budget::{BudgetService, CreateBudgetInput, UpdateBudgetInput};
pub use category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use goal::{CreateGoalInput, GoalService, UpdateGoalInput};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};

use crate::error::{FinsightError, FinsightResult};

/// Pick the single item whose short display id matches `identifier`
///
/// Returns `Ok(None)` when nothing matches and a validation error when the
/// prefix is ambiguous.
pub(crate) fn match_short_id<T>(
    items: Vec<T>,
    identifier: &str,
    matches: impl Fn(&T) -> bool,
    entity_type: &str,
) -> FinsightResult<Option<T>> {
    let mut found: Vec<T> = items.into_iter().filter(|item| matches(item)).collect();
    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        n => Err(FinsightError::Validation(format!(
            "{} id '{}' is ambiguous ({} matches)",
            entity_type, identifier, n
        ))),
    }
}
