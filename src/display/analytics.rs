//! Report formatting for period analytics

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::analytics::{
    Change, CategoryInsight, FinancialKpis, HealthScore, PeriodComparison, SpendingTrends,
};

use super::format::{format_bar, format_change, format_percentage, separator, DisplayOptions};

const REPORT_WIDTH: usize = 60;

fn heading(title: &str, subtitle: &str) -> String {
    format!("{}\n{}\n{}\n", title, subtitle, separator(REPORT_WIDTH))
}

/// Headline figures for a period
pub fn format_kpis(kpis: &FinancialKpis, opts: &DisplayOptions) -> String {
    let mut output = heading("Financial Summary", &kpis.range.to_string());

    output.push_str(&format!(
        "Income:              {:>14}  ({} transactions)\n",
        opts.money(kpis.total_income),
        kpis.income_count
    ));
    output.push_str(&format!(
        "Expenses:            {:>14}  ({} transactions)\n",
        opts.money(kpis.total_expenses),
        kpis.expense_count
    ));
    output.push_str(&format!(
        "Net income:          {:>14}\n",
        opts.money(kpis.net_income)
    ));
    output.push_str(&format!(
        "Savings rate:        {:>14}\n",
        format_percentage(kpis.savings_rate)
    ));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Avg daily spending:  {:>14}  over {} days\n",
        opts.money(kpis.average_daily_expenses),
        kpis.range.days()
    ));
    output.push_str(&format!(
        "Avg expense:         {:>14}\n",
        opts.money(kpis.average_expense)
    ));
    if let Some(largest) = kpis.largest_expense {
        output.push_str(&format!("Largest expense:     {:>14}\n", opts.money(largest)));
    }

    if kpis.transaction_count == 0 {
        output.push_str("\nNo transactions in this period.\n");
    }

    output
}

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Change")]
    absolute: String,
    #[tabled(rename = "%")]
    percent: String,
}

fn change_row(label: &'static str, change: &Change, opts: &DisplayOptions) -> ChangeRow {
    ChangeRow {
        label,
        current: opts.money(change.current),
        previous: opts.money(change.previous),
        absolute: opts.money(change.absolute),
        percent: format_change(change.percent),
    }
}

/// A period next to the one before it
pub fn format_comparison(comparison: &PeriodComparison, opts: &DisplayOptions) -> String {
    let mut output = heading(
        "Period Comparison",
        &format!(
            "{} vs {}",
            comparison.current.range, comparison.previous.range
        ),
    );

    let rows = vec![
        change_row("Income", &comparison.income, opts),
        change_row("Expenses", &comparison.expenses, opts),
        change_row("Net income", &comparison.net_income, opts),
    ];
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');

    output.push_str(&format!(
        "Savings rate: {} -> {} ({:+.1} pts)\n",
        format_percentage(comparison.previous.savings_rate),
        format_percentage(comparison.current.savings_rate),
        comparison.savings_rate_delta
    ));

    output
}

/// Expenses per bucket with a bar chart
pub fn format_trends(trends: &SpendingTrends, opts: &DisplayOptions) -> String {
    let mut output = heading(
        "Spending Trends",
        &format!("{} ({})", trends.range, trends.granularity),
    );

    if trends.points.is_empty() {
        output.push_str("No data.\n");
        return output;
    }

    let max = trends
        .points
        .iter()
        .map(|p| p.expenses.as_f64())
        .fold(0.0, f64::max);
    let label_width = trends
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);

    for point in &trends.points {
        output.push_str(&format!(
            "{:<width$}  {} {:>12}\n",
            point.label,
            format_bar(point.expenses.as_f64(), max, 24),
            opts.money(point.expenses),
            width = label_width
        ));
    }

    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Average: {}  Trend: {}\n",
        opts.money(trends.summary.average_expenses),
        trends.summary.direction
    ));
    if let Some(peak) = trends.peak_point() {
        output.push_str(&format!(
            "Peak:    {} ({})\n",
            peak.label,
            opts.money(peak.expenses)
        ));
    }

    output
}

#[derive(Tabled)]
struct InsightRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Spent")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Txns")]
    count: usize,
    #[tabled(rename = "vs prev")]
    change: String,
    #[tabled(rename = "Budget")]
    budget: String,
}

/// Expenses broken down by category
pub fn format_category_insights(insights: &[CategoryInsight], opts: &DisplayOptions) -> String {
    if insights.is_empty() {
        return "No expenses in this period.".to_string();
    }

    let rows = insights.iter().map(|i| InsightRow {
        name: i.name.clone(),
        total: opts.money(i.total),
        share: format!(
            "{} {}",
            format_bar(i.percentage, 100.0, 10),
            format_percentage(i.percentage)
        ),
        count: i.transaction_count,
        change: format_change(i.change_percent),
        budget: match (i.budget_amount, i.budget_used_percent) {
            (Some(amount), Some(used)) => {
                format!("{} of {}", format_percentage(used), opts.money(amount))
            }
            _ => "-".to_string(),
        },
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

fn component_line(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("  {:<18} {} {:>3.0}\n", label, format_bar(v, 100.0, 20), v),
        None => format!("  {:<18} {}\n", label, "not enough data"),
    }
}

/// Health score with its components and recommendations
pub fn format_health(health: &HealthScore) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Financial Health: {}/100 ({})\n",
        health.score, health.grade
    ));
    output.push_str(&separator(REPORT_WIDTH));
    output.push('\n');

    output.push_str(&component_line("Savings", health.components.savings));
    output.push_str(&component_line(
        "Budget adherence",
        health.components.budget_adherence,
    ));
    output.push_str(&component_line(
        "Expense stability",
        health.components.expense_stability,
    ));
    output.push_str(&component_line(
        "Goal progress",
        health.components.goal_progress,
    ));

    if !health.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for rec in &health.recommendations {
            output.push_str(&format!("  • {}\n", rec));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{spending_trends, Granularity, HealthInputs};
    use crate::models::{DateRange, Money, Transaction, TransactionType};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(Money::from_cents(400000), TransactionType::Income, date(2, 1)),
            Transaction::new(Money::from_cents(100000), TransactionType::Expense, date(2, 3)),
            Transaction::new(Money::from_cents(400000), TransactionType::Income, date(3, 1)),
            Transaction::new(Money::from_cents(300000), TransactionType::Expense, date(3, 3)),
        ]
    }

    #[test]
    fn test_kpis_report() {
        let kpis = FinancialKpis::compute(&sample(), DateRange::month_of(date(3, 1)));
        let output = format_kpis(&kpis, &DisplayOptions::default());

        assert!(output.contains("March 2025"));
        assert!(output.contains("$4000.00"));
        assert!(output.contains("25%"));
    }

    #[test]
    fn test_comparison_report() {
        let comparison = PeriodComparison::compute(&sample(), DateRange::month_of(date(3, 1)));
        let output = format_comparison(&comparison, &DisplayOptions::default());

        assert!(output.contains("March 2025 vs February 2025"));
        assert!(output.contains("▲ +200%"));
        assert!(output.contains("-50.0 pts"));
    }

    #[test]
    fn test_trends_report() {
        let range = DateRange::new(date(2, 1), date(3, 31)).unwrap();
        let trends = spending_trends(&sample(), range, Granularity::Monthly);
        let output = format_trends(&trends, &DisplayOptions::default());

        assert!(output.contains("Feb 2025"));
        assert!(output.contains("Peak:    Mar 2025 ($3000.00)"));
    }

    #[test]
    fn test_health_report() {
        let kpis = FinancialKpis::compute(&sample(), DateRange::month_of(date(3, 1)));
        let health = HealthScore::compute(&HealthInputs {
            kpis: &kpis,
            budget_statuses: &[],
            monthly_expenses: &[],
            goals: &[],
        });
        let output = format_health(&health);

        assert!(output.starts_with("Financial Health:"));
        assert!(output.contains("Budget adherence"));
        assert!(output.contains("not enough data"));
    }
}
