//! Headline figures for a period

use serde::Serialize;

use crate::models::{DateRange, Money, Transaction};

/// Key performance indicators for one date range
#[derive(Debug, Clone, Serialize)]
pub struct FinancialKpis {
    pub range: DateRange,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses
    pub net_income: Money,
    /// Percent of income kept; 0 without income, negative when overspending
    pub savings_rate: f64,
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub average_daily_expenses: Money,
    pub average_expense: Money,
    pub largest_expense: Option<Money>,
}

impl FinancialKpis {
    /// Compute KPIs from the transactions dated inside `range`
    pub fn compute(transactions: &[Transaction], range: DateRange) -> Self {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        let mut income_count = 0;
        let mut expense_count = 0;
        let mut largest_expense: Option<Money> = None;

        for txn in transactions.iter().filter(|t| range.contains(t.date)) {
            if txn.is_income() {
                total_income += txn.amount;
                income_count += 1;
            } else {
                total_expenses += txn.amount;
                expense_count += 1;
                largest_expense = Some(largest_expense.map_or(txn.amount, |m| m.max(txn.amount)));
            }
        }

        let net_income = total_income - total_expenses;
        let savings_rate = if total_income.is_positive() {
            net_income.percent_of(total_income)
        } else {
            0.0
        };

        Self {
            range,
            total_income,
            total_expenses,
            net_income,
            savings_rate,
            transaction_count: income_count + expense_count,
            income_count,
            expense_count,
            average_daily_expenses: average(total_expenses, range.days() as usize),
            average_expense: average(total_expenses, expense_count),
            largest_expense,
        }
    }
}

/// `total / count` rounded to the nearest cent, zero for an empty set
pub(crate) fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        Money::zero()
    } else {
        Money::from_cents((total.cents() as f64 / count as f64).round() as i64)
    }
}
