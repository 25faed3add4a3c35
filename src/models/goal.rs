//! Savings goal model
//!
//! A goal tracks progress toward a target amount, optionally by a date.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name
    pub name: String,

    /// Amount to reach
    pub target_amount: Money,

    /// Amount saved so far
    #[serde(default)]
    pub current_amount: Money,

    /// Optional deadline
    pub target_date: Option<NaiveDate>,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with nothing saved yet
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Amount still needed, never negative
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Progress toward the target, capped at 100
    pub fn progress_percent(&self) -> f64 {
        self.current_amount.percent_of(self.target_amount).clamp(0.0, 100.0)
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Days until the target date (negative once it has passed)
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.target_date.map(|d| (d - today).num_days())
    }

    /// Monthly saving needed to reach the target by the target date
    ///
    /// Counts whole months left, with a minimum of one.
    pub fn required_monthly_contribution(&self, today: NaiveDate) -> Option<Money> {
        if self.is_completed() {
            return None;
        }
        let target = self.target_date?;
        let months = whole_months_between(today, target).max(1);
        Some(self.remaining().div_ceil(months))
    }

    /// Add money to the goal
    pub fn contribute(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(amount));
        }
        let total = self.current_amount + amount;
        if !total.within_limit() {
            return Err(GoalValidationError::AmountTooLarge(total));
        }
        self.current_amount = total;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Take money out of the goal
    pub fn withdraw(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution(amount));
        }
        if amount > self.current_amount {
            return Err(GoalValidationError::InsufficientFunds {
                requested: amount,
                available: self.current_amount,
            });
        }
        self.current_amount -= amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > 50 {
            return Err(GoalValidationError::NameTooLong(len));
        }

        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }

        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent(self.current_amount));
        }

        for amount in [self.target_amount, self.current_amount] {
            if !amount.within_limit() {
                return Err(GoalValidationError::AmountTooLarge(amount));
            }
        }

        Ok(())
    }
}

fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months =
        (to.year() - from.year()) as i64 * 12 + to.month() as i64 - from.month() as i64;
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} of {})",
            self.name, self.current_amount, self.target_amount
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NameTooLong(usize),
    NonPositiveTarget(Money),
    NegativeCurrent(Money),
    AmountTooLarge(Money),
    NonPositiveContribution(Money),
    InsufficientFunds { requested: Money, available: Money },
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Goal name too long ({} chars, max 50)", len),
            Self::NonPositiveTarget(amount) => {
                write!(f, "Target amount must be positive, got {}", amount)
            }
            Self::NegativeCurrent(amount) => {
                write!(f, "Current amount cannot be negative, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(
                    f,
                    "Amount {} exceeds the maximum of {}",
                    amount,
                    Money::MAX_AMOUNT
                )
            }
            Self::NonPositiveContribution(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            Self::InsufficientFunds {
                requested,
                available,
            } => write!(
                f,
                "Cannot withdraw {}: only {} saved",
                requested, available
            ),
        }
    }
}

impl std::error::Error for GoalValidationError {}
