//! Budget service
//!
//! Provides business logic for budgets: spending limits on expense
//! categories over a derived date range, with no two budgets of the same
//! category overlapping, and status computation against actual spending.

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, BudgetStatus, Category, CategoryId, Money};
use crate::storage::Storage;

use super::match_short_id;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub category_id: CategoryId,
    pub amount: Money,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub alert_threshold: u8,
    pub notes: Option<String>,
}

/// Fields to change on an existing budget
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetInput {
    pub amount: Option<Money>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    pub alert_threshold: Option<u8>,
    pub notes: Option<String>,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget
    pub fn create(&self, input: CreateBudgetInput) -> FinsightResult<Budget> {
        let category = self.expense_category(input.category_id)?;

        let mut budget = Budget::new(
            input.category_id,
            input.amount,
            input.period,
            input.start_date,
        );
        budget.alert_threshold = input.alert_threshold;
        if let Some(notes) = input.notes {
            budget.notes = notes;
        }

        budget
            .validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        self.check_overlap(&budget, &category)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(category.name),
            &budget,
        )?;

        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> FinsightResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by full ID, short display ID, or category name
    ///
    /// A category name only resolves when that category has a single budget.
    pub fn find(&self, identifier: &str) -> FinsightResult<Option<Budget>> {
        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        if let Some(budget) = match_short_id(
            self.storage.budgets.get_all()?,
            identifier,
            |b| b.id.matches_short(identifier),
            "Budget",
        )? {
            return Ok(Some(budget));
        }

        let Some(category) = self.storage.categories.get_by_name(identifier)? else {
            return Ok(None);
        };

        let mut budgets = self.storage.budgets.get_for_category(category.id)?;
        match budgets.len() {
            0 => Ok(None),
            1 => Ok(budgets.pop()),
            n => Err(FinsightError::Validation(format!(
                "'{}' has {} budgets; use a budget id instead",
                category.name, n
            ))),
        }
    }

    /// Find a budget or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FinsightResult<Budget> {
        self.find(identifier)?
            .ok_or_else(|| FinsightError::budget_not_found(identifier))
    }

    /// List all budgets ordered by start date
    pub fn list(&self) -> FinsightResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Update a budget, recomputing its end date
    pub fn update(&self, id: BudgetId, input: UpdateBudgetInput) -> FinsightResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FinsightError::budget_not_found(id.to_string()))?;

        let before = budget.clone();

        if let Some(amount) = input.amount {
            budget.amount = amount;
        }
        if let Some(period) = input.period {
            budget.set_period(period);
        }
        if let Some(start_date) = input.start_date {
            budget.set_start_date(start_date);
        }
        if let Some(threshold) = input.alert_threshold {
            budget.alert_threshold = threshold;
        }
        if let Some(notes) = input.notes {
            budget.notes = notes;
        }

        budget
            .validate()
            .map_err(|e| FinsightError::Validation(e.to_string()))?;

        let category = self.expense_category(budget.category_id)?;
        self.check_overlap(&budget, &category)?;

        budget.updated_at = Utc::now();

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(category.name),
            &before,
            &budget,
        )?;

        Ok(budget)
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> FinsightResult<Budget> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| FinsightError::budget_not_found(id.to_string()))?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        let name = self
            .storage
            .categories
            .get(budget.category_id)?
            .map(|c| c.name);
        self.storage
            .log_delete(EntityType::Budget, budget.id.to_string(), name, &budget)?;

        Ok(budget)
    }

    /// Spending against a budget as of `today`
    pub fn status(&self, budget: &Budget, today: NaiveDate) -> FinsightResult<BudgetStatus> {
        let transactions = self.storage.transactions.get_by_category(budget.category_id)?;
        Ok(BudgetStatus::compute(budget, &transactions, today))
    }

    /// Status of every budget whose range includes `date`
    pub fn statuses_active_on(&self, date: NaiveDate) -> FinsightResult<Vec<(Budget, BudgetStatus)>> {
        let budgets = self.storage.budgets.get_active_on(date)?;
        debug!(%date, count = budgets.len(), "computing budget statuses");

        budgets
            .into_iter()
            .map(|budget| {
                let status = self.status(&budget, date)?;
                Ok((budget, status))
            })
            .collect()
    }

    /// The budget's category, which must exist and be an expense category
    fn expense_category(&self, category_id: CategoryId) -> FinsightResult<Category> {
        let category = self
            .storage
            .categories
            .get(category_id)?
            .ok_or_else(|| FinsightError::category_not_found(category_id.to_string()))?;

        if !category.is_expense() {
            warn!(category = %category.name, "refused budget on income category");
            return Err(FinsightError::Budget(format!(
                "'{}' is an income category; budgets apply to expense categories only",
                category.name
            )));
        }

        Ok(category)
    }

    /// Reject a budget whose range overlaps another budget of the same category
    fn check_overlap(&self, budget: &Budget, category: &Category) -> FinsightResult<()> {
        let clash = self
            .storage
            .budgets
            .get_for_category(budget.category_id)?
            .into_iter()
            .find(|other| other.id != budget.id && other.range().overlaps(&budget.range()));

        if let Some(other) = clash {
            warn!(category = %category.name, existing = %other.id, "refused overlapping budget");
            return Err(FinsightError::Budget(format!(
                "'{}' already has a budget from {} to {} ({})",
                category.name, other.start_date, other.end_date, other.id
            )));
        }

        Ok(())
    }
}
