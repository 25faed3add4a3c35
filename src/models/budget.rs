//! Budget model
//!
//! A budget caps spending in one expense category over a period that starts
//! on a given date. The end date is always derived from the start date and
//! the period.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;
use super::period::{add_months, month_start, quarter_start, year_start, DateRange};
use super::transaction::Transaction;

/// Length of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    /// Inclusive end date of a budget of this period starting on `start`
    pub fn end_date_from(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => start + Duration::days(6),
            Self::Monthly => add_months(start, 1) - Duration::days(1),
            Self::Quarterly => add_months(start, 3) - Duration::days(1),
            Self::Yearly => add_months(start, 12) - Duration::days(1),
        }
    }

    /// Start of the calendar period of this length containing `today`
    ///
    /// Weeks start on Monday.
    pub fn current_start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => today - Duration::days(today.weekday().num_days_from_monday() as i64),
            Self::Monthly => month_start(today),
            Self::Quarterly => quarter_start(today),
            Self::Yearly => year_start(today),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!(
                "Invalid budget period '{}'. Expected weekly, monthly, quarterly or yearly",
                other
            )),
        }
    }
}

/// A spending limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The expense category this budget limits
    pub category_id: CategoryId,

    /// Spending limit for the period
    pub amount: Money,

    /// Budget length
    pub period: BudgetPeriod,

    /// First day covered
    pub start_date: NaiveDate,

    /// Last day covered (derived from start_date and period)
    pub end_date: NaiveDate,

    /// Percent used at which the budget is flagged
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_alert_threshold() -> u8 {
    80
}

impl Budget {
    /// Create a new budget
    pub fn new(
        category_id: CategoryId,
        amount: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category_id,
            amount,
            period,
            start_date,
            end_date: period.end_date_from(start_date),
            alert_threshold: default_alert_threshold(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the start date, recomputing the end date
    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        self.start_date = start_date;
        self.end_date = self.period.end_date_from(start_date);
        self.updated_at = Utc::now();
    }

    /// Change the period, recomputing the end date
    pub fn set_period(&mut self, period: BudgetPeriod) {
        self.period = period;
        self.end_date = period.end_date_from(self.start_date);
        self.updated_at = Utc::now();
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.within_limit() {
            return Err(BudgetValidationError::AmountTooLarge(self.amount));
        }

        if !(1..=100).contains(&self.alert_threshold) {
            return Err(BudgetValidationError::InvalidThreshold(self.alert_threshold));
        }

        if self.end_date != self.period.end_date_from(self.start_date) {
            return Err(BudgetValidationError::EndDateMismatch);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({} to {})",
            self.amount, self.period, self.start_date, self.end_date
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    InvalidThreshold(u8),
    EndDateMismatch,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Budget amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(
                    f,
                    "Budget amount {} exceeds the maximum of {}",
                    amount,
                    Money::MAX_AMOUNT
                )
            }
            Self::InvalidThreshold(t) => {
                write!(f, "Alert threshold must be between 1 and 100, got {}", t)
            }
            Self::EndDateMismatch => {
                write!(f, "Budget end date does not match its start date and period")
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

/// Where a budget stands against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    OnTrack,
    Warning,
    Exceeded,
}

impl fmt::Display for BudgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => f.pad("On track"),
            Self::Warning => f.pad("Warning"),
            Self::Exceeded => f.pad("Exceeded"),
        }
    }
}

/// Spending against a budget
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    pub amount: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percent_used: f64,
    pub state: BudgetState,
    /// Days left in the budget counting today (0 once it has ended)
    pub days_remaining: i64,
    /// Spending per remaining day that stays within the limit
    pub daily_allowance: Option<Money>,
}

impl BudgetStatus {
    /// Compute status from expense transactions in the budget's category and range
    pub fn compute(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> Self {
        let range = budget.range();
        let spent: Money = transactions
            .iter()
            .filter(|t| {
                t.is_expense()
                    && t.category_id == Some(budget.category_id)
                    && range.contains(t.date)
            })
            .map(|t| t.amount)
            .sum();

        let percent_used = spent.percent_of(budget.amount);
        let state = if spent > budget.amount {
            BudgetState::Exceeded
        } else if percent_used >= budget.alert_threshold as f64 {
            BudgetState::Warning
        } else {
            BudgetState::OnTrack
        };

        let remaining = budget.amount - spent;
        let days_remaining = if today > budget.end_date {
            0
        } else {
            (budget.end_date - today.max(budget.start_date)).num_days() + 1
        };
        let daily_allowance = (days_remaining > 0 && remaining.is_positive())
            .then(|| Money::from_cents(remaining.cents() / days_remaining));

        Self {
            budget_id: budget.id,
            category_id: budget.category_id,
            amount: budget.amount,
            spent,
            remaining,
            percent_used,
            state,
            days_remaining,
            daily_allowance,
        }
    }

    pub fn is_exceeded(&self) -> bool {
        self.state == BudgetState::Exceeded
    }
}
