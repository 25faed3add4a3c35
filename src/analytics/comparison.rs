//! Period-over-period comparison

use serde::Serialize;

use super::growth_rate;
use super::kpis::FinancialKpis;
use crate::models::{DateRange, Money, Transaction};

/// Difference between two values of the same measure
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Change {
    pub current: Money,
    pub previous: Money,
    pub absolute: Money,
    pub percent: f64,
}

impl Change {
    pub fn between(current: Money, previous: Money) -> Self {
        Self {
            current,
            previous,
            absolute: current - previous,
            percent: growth_rate(current, previous),
        }
    }
}

/// KPIs of a range next to those of the range before it
#[derive(Debug, Clone, Serialize)]
pub struct PeriodComparison {
    pub current: FinancialKpis,
    pub previous: FinancialKpis,
    pub income: Change,
    pub expenses: Change,
    pub net_income: Change,
    /// Savings rate difference in percentage points
    pub savings_rate_delta: f64,
}

impl PeriodComparison {
    /// Compare `current` with `current.previous()`
    pub fn compute(transactions: &[Transaction], current: DateRange) -> Self {
        let now = FinancialKpis::compute(transactions, current);
        let before = FinancialKpis::compute(transactions, current.previous());

        Self {
            income: Change::between(now.total_income, before.total_income),
            expenses: Change::between(now.total_expenses, before.total_expenses),
            net_income: Change::between(now.net_income, before.net_income),
            savings_rate_delta: now.savings_rate - before.savings_rate,
            current: now,
            previous: before,
        }
    }
}
