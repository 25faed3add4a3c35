//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetState, BudgetStatus, Category};

use super::format::{format_bar, format_percentage, DisplayOptions};

/// A budget with its category name and current status
pub struct BudgetView<'a> {
    pub budget: &'a Budget,
    pub category_name: &'a str,
    pub status: &'a BudgetStatus,
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Limit")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    state: String,
}

fn state_marker(state: BudgetState) -> &'static str {
    match state {
        BudgetState::OnTrack => "✓",
        BudgetState::Warning => "!",
        BudgetState::Exceeded => "✗",
    }
}

/// Format budgets as a table
pub fn format_budget_list(views: &[BudgetView<'_>], opts: &DisplayOptions) -> String {
    if views.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = views.iter().map(|v| BudgetRow {
        id: v.budget.id.to_string(),
        category: v.category_name.to_string(),
        period: v.budget.period.to_string(),
        range: format!(
            "{} to {}",
            opts.date(v.budget.start_date),
            opts.date(v.budget.end_date)
        ),
        amount: opts.money(v.budget.amount),
        spent: opts.money(v.status.spent),
        used: format_percentage(v.status.percent_used),
        state: format!("{} {}", state_marker(v.status.state), v.status.state),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Progress bars for the budgets active on a date
pub fn format_budget_status(views: &[BudgetView<'_>], opts: &DisplayOptions) -> String {
    if views.is_empty() {
        return "No active budgets.".to_string();
    }

    let name_width = views
        .iter()
        .map(|v| v.category_name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    for v in views {
        output.push_str(&format!(
            "{} {:<width$}  {}  {:>6}  {} of {}\n",
            state_marker(v.status.state),
            v.category_name,
            format_bar(v.status.percent_used.min(100.0), 100.0, 20),
            format_percentage(v.status.percent_used),
            opts.money(v.status.spent),
            opts.money(v.budget.amount),
            width = name_width
        ));
    }

    let exceeded = views.iter().filter(|v| v.status.is_exceeded()).count();
    if exceeded > 0 {
        output.push_str(&format!("\n{} budget(s) over their limit\n", exceeded));
    }

    output
}

/// Format budget details for display
pub fn format_budget_details(
    budget: &Budget,
    category: &Category,
    status: &BudgetStatus,
    opts: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.id));
    output.push_str(&format!("  Category:   {}\n", category));
    output.push_str(&format!("  Period:     {}\n", budget.period));
    output.push_str(&format!(
        "  Range:      {} to {}\n",
        opts.date(budget.start_date),
        opts.date(budget.end_date)
    ));
    output.push_str(&format!("  Limit:      {}\n", opts.money(budget.amount)));
    output.push_str(&format!("  Spent:      {}\n", opts.money(status.spent)));
    output.push_str(&format!("  Remaining:  {}\n", opts.money(status.remaining)));
    output.push_str(&format!(
        "  Used:       {} (alert at {}%)\n",
        format_percentage(status.percent_used),
        budget.alert_threshold
    ));
    output.push_str(&format!("  Status:     {}\n", status.state));

    if status.days_remaining > 0 {
        output.push_str(&format!("  Days left:  {}\n", status.days_remaining));
    }
    if let Some(allowance) = status.daily_allowance {
        output.push_str(&format!("  Per day:    {}\n", opts.money(allowance)));
    }

    if !budget.notes.is_empty() {
        output.push_str(&format!("  Notes:      {}\n", budget.notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money, Transaction, TransactionType};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn fixture(spent_cents: i64) -> (Category, Budget, BudgetStatus) {
        let category = Category::new("Dining", TransactionType::Expense);
        let budget = Budget::new(category.id, Money::from_cents(20000), BudgetPeriod::Monthly, date(1));
        let spend = Transaction::with_details(
            Money::from_cents(spent_cents),
            TransactionType::Expense,
            date(5),
            Some(category.id),
            "",
        );
        let status = BudgetStatus::compute(&budget, &[spend], date(11));
        (category, budget, status)
    }

    #[test]
    fn test_budget_list_and_status() {
        let (category, budget, status) = fixture(25000);
        let views = vec![BudgetView {
            budget: &budget,
            category_name: &category.name,
            status: &status,
        }];
        let opts = DisplayOptions::default();

        let list = format_budget_list(&views, &opts);
        assert!(list.contains("Dining"));
        assert!(list.contains("Exceeded"));

        let bars = format_budget_status(&views, &opts);
        assert!(bars.contains("$250.00 of $200.00"));
        assert!(bars.contains("1 budget(s) over their limit"));
    }

    #[test]
    fn test_budget_details() {
        let (category, budget, status) = fixture(5000);
        let output = format_budget_details(&budget, &category, &status, &DisplayOptions::default());

        assert!(output.contains("Remaining:  $150.00"));
        assert!(output.contains("Days left:  21"));
        assert!(output.contains("Per day:    $7.14"));
        assert!(output.contains("On track"));
    }

    #[test]
    fn test_empty() {
        let opts = DisplayOptions::default();
        assert_eq!(format_budget_list(&[], &opts), "No budgets found.");
        assert_eq!(format_budget_status(&[], &opts), "No active budgets.");
    }
}
