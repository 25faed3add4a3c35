//! Per-category spending breakdown

use std::collections::HashMap;

use serde::Serialize;

use super::growth_rate;
use super::kpis::average;
use crate::models::category::DEFAULT_COLOR;
use crate::models::{Budget, Category, CategoryId, DateRange, Money, Transaction};

/// Name of the row collecting expenses without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Spending in one category over a range
#[derive(Debug, Clone, Serialize)]
pub struct CategoryInsight {
    /// `None` for the uncategorized row
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub total: Money,
    /// Share of all expenses in the range
    pub percentage: f64,
    pub transaction_count: usize,
    pub average: Money,
    /// Spending in the same category over the preceding range
    pub previous_total: Money,
    pub change_percent: f64,
    pub budget_amount: Option<Money>,
    pub budget_used_percent: Option<f64>,
}

#[derive(Default)]
struct Tally {
    total: Money,
    count: usize,
}

fn tally_expenses(
    transactions: &[Transaction],
    range: DateRange,
) -> HashMap<Option<CategoryId>, Tally> {
    let mut tallies: HashMap<Option<CategoryId>, Tally> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && range.contains(t.date))
    {
        let tally = tallies.entry(txn.category_id).or_default();
        tally.total += txn.amount;
        tally.count += 1;
    }
    tallies
}

/// The budget for `category_id` sharing the most days with `range`
///
/// Ties go to the budget that starts later.
fn budget_for(budgets: &[Budget], category_id: CategoryId, range: DateRange) -> Option<&Budget> {
    budgets
        .iter()
        .filter(|b| b.category_id == category_id && b.range().overlaps(&range))
        .max_by_key(|b| {
            let start = b.start_date.max(range.start);
            let end = b.end_date.min(range.end);
            ((end - start).num_days(), b.start_date)
        })
}

/// Break down the expenses in `range` by category
///
/// One row per category with spending plus an "Uncategorized" row when
/// needed, sorted by total descending then name. Row totals add up to the
/// range's total expenses.
pub fn category_insights(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
    range: DateRange,
) -> Vec<CategoryInsight> {
    let current = tally_expenses(transactions, range);
    let previous = tally_expenses(transactions, range.previous());
    let total_expenses: Money = current.values().map(|t| t.total).sum();

    let by_id: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut rows: Vec<CategoryInsight> = current
        .iter()
        .map(|(key, tally)| {
            let (name, color) = match key.and_then(|id| by_id.get(&id)) {
                Some(category) => (category.name.clone(), category.color.clone()),
                None if key.is_some() => ("(deleted category)".to_string(), DEFAULT_COLOR.to_string()),
                None => (UNCATEGORIZED.to_string(), DEFAULT_COLOR.to_string()),
            };

            let previous_total = previous.get(key).map_or(Money::zero(), |t| t.total);
            let budget = key.and_then(|id| budget_for(budgets, id, range));

            CategoryInsight {
                category_id: *key,
                name,
                color,
                total: tally.total,
                percentage: tally.total.percent_of(total_expenses),
                transaction_count: tally.count,
                average: average(tally.total, tally.count),
                previous_total,
                change_percent: growth_rate(tally.total, previous_total),
                budget_amount: budget.map(|b| b.amount),
                budget_used_percent: budget.map(|b| tally.total.percent_of(b.amount)),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    rows
}
