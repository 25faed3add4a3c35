//! Heuristic financial health score
//!
//! Blends up to four 0-100 components into one weighted score. Components
//! without enough data are left out and the remaining weights renormalized.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::kpis::FinancialKpis;
use crate::models::period::{add_months, month_end, month_start};
use crate::models::{BudgetStatus, DateRange, Goal, Money, Transaction};

const SAVINGS_WEIGHT: f64 = 35.0;
const BUDGET_WEIGHT: f64 = 25.0;
const STABILITY_WEIGHT: f64 = 20.0;
const GOAL_WEIGHT: f64 = 20.0;

/// Savings rate that earns a full savings score
const TARGET_SAVINGS_RATE: f64 = 20.0;

/// Components scoring below this produce a recommendation
const RECOMMENDATION_THRESHOLD: f64 = 50.0;

/// Number of trailing months used for expense stability
pub const STABILITY_MONTHS: u32 = 6;

/// Everything the score is computed from
pub struct HealthInputs<'a> {
    pub kpis: &'a FinancialKpis,
    pub budget_statuses: &'a [BudgetStatus],
    pub monthly_expenses: &'a [Money],
    pub goals: &'a [Goal],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for HealthGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => f.pad("Excellent"),
            Self::Good => f.pad("Good"),
            Self::Fair => f.pad("Fair"),
            Self::Poor => f.pad("Poor"),
        }
    }
}

/// Individual component scores, each 0-100
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthComponents {
    pub savings: Option<f64>,
    pub budget_adherence: Option<f64>,
    pub expense_stability: Option<f64>,
    pub goal_progress: Option<f64>,
}

impl HealthComponents {
    fn weighted(&self) -> [(Option<f64>, f64); 4] {
        [
            (self.savings, SAVINGS_WEIGHT),
            (self.budget_adherence, BUDGET_WEIGHT),
            (self.expense_stability, STABILITY_WEIGHT),
            (self.goal_progress, GOAL_WEIGHT),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthScore {
    pub score: u8,
    pub grade: HealthGrade,
    pub components: HealthComponents,
    pub recommendations: Vec<String>,
}

impl HealthScore {
    pub fn compute(inputs: &HealthInputs<'_>) -> Self {
        let kpis = inputs.kpis;
        let exceeded = inputs
            .budget_statuses
            .iter()
            .filter(|s| s.is_exceeded())
            .count();

        let components = HealthComponents {
            savings: savings_score(kpis),
            budget_adherence: budget_score(inputs.budget_statuses.len(), exceeded),
            expense_stability: stability_score(inputs.monthly_expenses),
            goal_progress: goal_score(inputs.goals),
        };

        let (sum, weights) = components
            .weighted()
            .iter()
            .filter_map(|(value, weight)| value.map(|v| (v * weight, *weight)))
            .fold((0.0, 0.0), |(s, w), (v, wt)| (s + v, w + wt));
        let score = if weights > 0.0 {
            (sum / weights).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        let mut recommendations = Vec::new();
        if let Some(s) = components.savings.filter(|s| *s < RECOMMENDATION_THRESHOLD) {
            recommendations.push(format!(
                "Your savings rate is {:.1}% (score {:.0}). Aim to keep at least {:.0}% of your income.",
                kpis.savings_rate, s, TARGET_SAVINGS_RATE
            ));
        }
        if components
            .budget_adherence
            .is_some_and(|s| s < RECOMMENDATION_THRESHOLD)
        {
            recommendations.push(format!(
                "{} of {} budgets are over their limit. Review spending in those categories.",
                exceeded,
                inputs.budget_statuses.len()
            ));
        }
        if components
            .expense_stability
            .is_some_and(|s| s < RECOMMENDATION_THRESHOLD)
        {
            recommendations.push(
                "Monthly spending swings widely. Plan for irregular costs with a budget."
                    .to_string(),
            );
        }
        if let Some(g) = components.goal_progress.filter(|g| *g < RECOMMENDATION_THRESHOLD) {
            recommendations.push(format!(
                "Your goals are {:.0}% funded on average. Regular contributions will help.",
                g
            ));
        }
        if kpis.total_expenses > kpis.total_income {
            recommendations.push(format!(
                "You spent {} more than you earned in this period.",
                kpis.total_expenses - kpis.total_income
            ));
        }

        Self {
            score,
            grade: HealthGrade::from_score(score),
            components,
            recommendations,
        }
    }
}

fn savings_score(kpis: &FinancialKpis) -> Option<f64> {
    if !kpis.total_income.is_positive() {
        return None;
    }
    Some((kpis.savings_rate / TARGET_SAVINGS_RATE * 100.0).clamp(0.0, 100.0))
}

fn budget_score(total: usize, exceeded: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((total - exceeded) as f64 * 100.0 / total as f64)
}

fn stability_score(monthly: &[Money]) -> Option<f64> {
    if monthly.len() < 2 {
        return None;
    }
    let n = monthly.len() as f64;
    let values: Vec<f64> = monthly.iter().map(|m| m.cents() as f64).collect();
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;
    Some((100.0 - cv * 100.0).clamp(0.0, 100.0))
}

fn goal_score(goals: &[Goal]) -> Option<f64> {
    if goals.is_empty() {
        return None;
    }
    Some(goals.iter().map(|g| g.progress_percent()).sum::<f64>() / goals.len() as f64)
}

/// Last day of the most recent month that is fully over on `today`
pub fn last_complete_month_end(today: NaiveDate) -> NaiveDate {
    if today == month_end(today) {
        today
    } else {
        month_start(today).pred_opt().unwrap_or(NaiveDate::MIN)
    }
}

/// Expense totals for up to `months` calendar months ending with the month
/// containing `end`, oldest first
///
/// Months before the earliest transaction are skipped so a short history
/// isn't padded with zeros.
pub fn monthly_expense_totals(transactions: &[Transaction], end: NaiveDate, months: u32) -> Vec<Money> {
    let Some(earliest) = transactions.iter().map(|t| t.date).min() else {
        return Vec::new();
    };

    let last_month = month_start(end);
    let mut first_month = last_month;
    for _ in 1..months.max(1) {
        let Some(prev) = first_month.pred_opt().map(month_start) else {
            break;
        };
        first_month = prev;
    }
    let first_month = first_month.max(month_start(earliest));

    let mut totals = Vec::new();
    let mut month = first_month;
    while month <= last_month {
        let range = DateRange::month_of(month);
        totals.push(
            transactions
                .iter()
                .filter(|t| t.is_expense() && range.contains(t.date))
                .map(|t| t.amount)
                .sum(),
        );
        month = add_months(month, 1);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, CategoryId, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(kind: TransactionType, cents: i64, on: NaiveDate) -> Transaction {
        Transaction::new(Money::from_cents(cents), kind, on)
    }

    fn kpis(income: i64, expenses: i64) -> FinancialKpis {
        let on = date(2025, 3, 1);
        FinancialKpis::compute(
            &[
                txn(TransactionType::Income, income, on),
                txn(TransactionType::Expense, expenses, on),
            ],
            DateRange::month_of(on),
        )
    }

    fn status(limit: i64, spent: i64) -> BudgetStatus {
        let category = CategoryId::new();
        let budget = Budget::new(category, Money::from_cents(limit), BudgetPeriod::Monthly, date(2025, 3, 1));
        let mut spend = txn(TransactionType::Expense, spent, date(2025, 3, 2));
        spend.category_id = Some(category);
        BudgetStatus::compute(&budget, &[spend], budget.start_date)
    }

    #[test]
    fn test_grades() {
        assert_eq!(HealthGrade::from_score(100), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(80), HealthGrade::Excellent);
        assert_eq!(HealthGrade::from_score(79), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(60), HealthGrade::Good);
        assert_eq!(HealthGrade::from_score(40), HealthGrade::Fair);
        assert_eq!(HealthGrade::from_score(39), HealthGrade::Poor);
    }

    #[test]
    fn test_no_data_scores_zero() {
        let empty = FinancialKpis::compute(&[], DateRange::month_of(date(2025, 3, 1)));
        let health = HealthScore::compute(&HealthInputs {
            kpis: &empty,
            budget_statuses: &[],
            monthly_expenses: &[],
            goals: &[],
        });

        assert_eq!(health.score, 0);
        assert_eq!(health.grade, HealthGrade::Poor);
        assert!(health.components.savings.is_none());
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_savings_only_renormalized() {
        // 10% savings rate -> 50 points, the only component
        let k = kpis(100000, 90000);
        let health = HealthScore::compute(&HealthInputs {
            kpis: &k,
            budget_statuses: &[],
            monthly_expenses: &[],
            goals: &[],
        });
        assert_eq!(health.components.savings, Some(50.0));
        assert_eq!(health.score, 50);
        assert_eq!(health.grade, HealthGrade::Fair);
    }

    #[test]
    fn test_weighted_blend() {
        // savings 100 (25% rate), budgets 50 (1 of 2 exceeded),
        // stability 100 (flat), goals 25
        let k = kpis(100000, 75000);
        let statuses = vec![status(10000, 5000), status(10000, 15000)];
        let monthly = vec![Money::from_cents(50000); 3];
        let mut goal = Goal::new("Car", Money::from_cents(100000));
        goal.current_amount = Money::from_cents(25000);

        let health = HealthScore::compute(&HealthInputs {
            kpis: &k,
            budget_statuses: &statuses,
            monthly_expenses: &monthly,
            goals: &[goal],
        });

        assert_eq!(health.components.savings, Some(100.0));
        assert_eq!(health.components.budget_adherence, Some(50.0));
        assert_eq!(health.components.expense_stability, Some(100.0));
        assert_eq!(health.components.goal_progress, Some(25.0));
        // (3500 + 1250 + 2000 + 500) / 100
        assert_eq!(health.score, 73);
        assert_eq!(health.grade, HealthGrade::Good);
        assert_eq!(health.recommendations.len(), 1);
        assert!(health.recommendations[0].contains("25% funded"));
    }

    #[test]
    fn test_overspending_recommendations() {
        let k = kpis(100000, 150000);
        let health = HealthScore::compute(&HealthInputs {
            kpis: &k,
            budget_statuses: &[],
            monthly_expenses: &[],
            goals: &[],
        });

        assert_eq!(health.components.savings, Some(0.0));
        assert_eq!(health.score, 0);
        assert_eq!(health.recommendations.len(), 2);
        assert!(health.recommendations[1].contains("$500.00 more than you earned"));
    }

    #[test]
    fn test_stability_score() {
        assert_eq!(stability_score(&[Money::from_cents(100)]), None);
        assert_eq!(stability_score(&[Money::zero(), Money::zero()]), None);
        // mean 100, population std dev 50 -> cv 0.5
        let swings = [Money::from_cents(50), Money::from_cents(150)];
        assert_eq!(stability_score(&swings), Some(50.0));
    }

    #[test]
    fn test_monthly_expense_totals() {
        let transactions = vec![
            txn(TransactionType::Expense, 1000, date(2024, 11, 20)),
            txn(TransactionType::Expense, 2000, date(2025, 1, 5)),
            txn(TransactionType::Income, 9999, date(2025, 1, 6)),
            txn(TransactionType::Expense, 3000, date(2025, 2, 28)),
        ];

        let totals = monthly_expense_totals(&transactions, date(2025, 2, 15), 6);
        let cents: Vec<_> = totals.iter().map(|m| m.cents()).collect();
        assert_eq!(cents, vec![1000, 0, 2000, 3000]);

        let last_two = monthly_expense_totals(&transactions, date(2025, 2, 15), 2);
        assert_eq!(last_two.len(), 2);

        assert!(monthly_expense_totals(&[], date(2025, 2, 15), 6).is_empty());
    }

    #[test]
    fn test_last_complete_month_end() {
        assert_eq!(last_complete_month_end(date(2025, 3, 10)), date(2025, 2, 28));
        assert_eq!(last_complete_month_end(date(2025, 3, 31)), date(2025, 3, 31));
        assert_eq!(last_complete_month_end(date(2025, 1, 1)), date(2024, 12, 31));
    }
}
