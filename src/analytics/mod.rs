//! Financial analytics
//!
//! Pure computations over already-loaded transactions, budgets and goals.
//! Nothing in here touches storage or the clock: callers pass the date range
//! and, where it matters, today's date. `services::AnalyticsService` does the
//! loading.

pub mod comparison;
pub mod health;
pub mod insights;
pub mod kpis;
pub mod trends;

pub use comparison::{Change, PeriodComparison};
pub use health::{
    monthly_expense_totals, HealthComponents, HealthGrade, HealthInputs, HealthScore,
};
pub use insights::{category_insights, CategoryInsight};
pub use kpis::FinancialKpis;
pub use trends::{spending_trends, SpendingTrends, TrendDirection, TrendPoint, TrendSummary};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Money;

/// Bucket size for trend reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => f.pad("daily"),
            Self::Weekly => f.pad("weekly"),
            Self::Monthly => f.pad("monthly"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            other => Err(format!(
                "Invalid granularity '{}'. Expected daily, weekly or monthly",
                other
            )),
        }
    }
}

/// Percent change from `previous` to `current`
///
/// Relative to the magnitude of `previous`. From zero, any increase counts
/// as 100% and no change as 0%.
pub fn growth_rate(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        if current.is_zero() {
            0.0
        } else {
            100.0
        }
    } else {
        (current - previous).cents() as f64 * 100.0 / previous.abs().cents() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_rate() {
        let m = Money::from_cents;
        assert_eq!(growth_rate(m(15000), m(10000)), 50.0);
        assert_eq!(growth_rate(m(5000), m(10000)), -50.0);
        assert_eq!(growth_rate(m(0), m(0)), 0.0);
        assert_eq!(growth_rate(m(2500), m(0)), 100.0);
        // Negative base: improvement from -100 to -50 is +50%
        assert_eq!(growth_rate(m(-5000), m(-10000)), 50.0);
    }

    #[test]
    fn test_granularity_parse_and_default() {
        assert_eq!(Granularity::default(), Granularity::Monthly);
        assert_eq!("Weekly".parse::<Granularity>(), Ok(Granularity::Weekly));
        assert_eq!("day".parse::<Granularity>(), Ok(Granularity::Daily));
        assert!("hourly".parse::<Granularity>().is_err());
        assert_eq!(serde_json::to_string(&Granularity::Daily).unwrap(), "\"daily\"");
    }
}
