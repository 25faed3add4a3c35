//! Category model
//!
//! Categories classify transactions. Each category is either an income or an
//! expense category, and carries a display color and icon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Color assigned to categories created without one
pub const DEFAULT_COLOR: &str = "#6B7280";

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Whether this category classifies income or expenses
    pub category_type: TransactionType,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    /// Display icon (emoji or icon name)
    #[serde(default)]
    pub icon: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl Category {
    /// Create a new category with the default color and no icon
    pub fn new(name: impl Into<String>, category_type: TransactionType) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            category_type,
            color: default_color(),
            icon: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with a color and icon
    pub fn with_style(
        name: impl Into<String>,
        category_type: TransactionType,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        let mut category = Self::new(name, category_type);
        category.color = color.into();
        category.icon = icon.into();
        category
    }

    pub fn is_expense(&self) -> bool {
        self.category_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.category_type == TransactionType::Income
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

/// Check for a `#RRGGBB` color string
pub fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}', expected #RRGGBB", color)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
