//! Transaction model
//!
//! A transaction is a single income or expense entry. Amounts are always
//! stored positive; the direction comes from the transaction type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction, also used as the kind of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.pad("Income"),
            Self::Expense => f.pad("Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Invalid transaction type '{}'. Expected income or expense",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount, always positive
    pub amount: Money,

    /// Income or expense
    pub transaction_type: TransactionType,

    /// Transaction date
    pub date: NaiveDate,

    /// Category (None when uncategorized)
    pub category_id: Option<CategoryId>,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new uncategorized transaction
    pub fn new(amount: Money, transaction_type: TransactionType, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount,
            transaction_type,
            date,
            category_id: None,
            description: String::new(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with a category and description
    pub fn with_details(
        amount: Money,
        transaction_type: TransactionType,
        date: NaiveDate,
        category_id: Option<CategoryId>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(amount, transaction_type, date);
        txn.category_id = category_id;
        txn.description = description.into();
        txn
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// The amount with its direction applied (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        let len = self.description.chars().count();
        if len > 200 {
            return Err(TransactionValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.signed_amount(),
            if self.description.is_empty() {
                "(no description)"
            } else {
                &self.description
            }
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(
                    f,
                    "Transaction amount {} exceeds the maximum of {}",
                    amount,
                    Money::MAX_AMOUNT
                )
            }
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            Money::from_cents(4250),
            TransactionType::Expense,
            date(2025, 3, 14),
        );

        assert!(txn.is_expense());
        assert!(txn.category_id.is_none());
        assert_eq!(txn.signed_amount().cents(), -4250);
    }

    #[test]
    fn test_signed_amount_income() {
        let txn = Transaction::new(
            Money::from_cents(300000),
            TransactionType::Income,
            date(2025, 3, 1),
        );
        assert_eq!(txn.signed_amount().cents(), 300000);
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::new(Money::zero(), TransactionType::Expense, date(2025, 1, 1));
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        txn.amount = Money::from_cents(-100);
        assert!(txn.validate().is_err());

        txn.amount = Money::from_cents(100);
        assert!(txn.validate().is_ok());

        txn.description = "x".repeat(201);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::DescriptionTooLong(201))
        );
    }

    #[test]
    fn test_amount_limit() {
        let huge = Money::parse("90000000000000000").unwrap();
        let txn = Transaction::new(huge, TransactionType::Expense, date(2025, 1, 1));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::AmountTooLarge(huge))
        );

        let txn = Transaction::new(Money::MAX_AMOUNT, TransactionType::Income, date(2025, 1, 1));
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("EXPENSE".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert_eq!("in".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!("out".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::with_details(
            Money::from_cents(1999),
            TransactionType::Expense,
            date(2025, 2, 10),
            Some(CategoryId::new()),
            "Books",
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"transaction_type\":\"expense\""));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, txn.id);
        assert_eq!(back.amount, txn.amount);
        assert_eq!(back.category_id, txn.category_id);
    }
}
