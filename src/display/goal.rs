//! Savings goal display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Goal;

use super::format::{format_bar, format_percentage, DisplayOptions};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Due")]
    due: String,
}

fn due_label(goal: &Goal, today: NaiveDate, opts: &DisplayOptions) -> String {
    if goal.is_completed() {
        return "done".to_string();
    }
    match (goal.target_date, goal.days_remaining(today)) {
        (Some(date), Some(days)) if days < 0 => format!("{} (overdue)", opts.date(date)),
        (Some(date), Some(days)) => format!("{} ({}d)", opts.date(date), days),
        _ => "-".to_string(),
    }
}

/// Format goals as a table
pub fn format_goal_list(goals: &[Goal], today: NaiveDate, opts: &DisplayOptions) -> String {
    if goals.is_empty() {
        return "No goals found.".to_string();
    }

    let rows = goals.iter().map(|g| GoalRow {
        id: g.id.to_string(),
        name: g.name.clone(),
        saved: opts.money(g.current_amount),
        target: opts.money(g.target_amount),
        progress: format!(
            "{} {}",
            format_bar(g.progress_percent(), 100.0, 10),
            format_percentage(g.progress_percent())
        ),
        due: due_label(g, today, opts),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format goal details for display
pub fn format_goal_details(goal: &Goal, today: NaiveDate, opts: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal: {}\n", goal.name));
    output.push_str(&format!("  ID:        {}\n", goal.id));
    output.push_str(&format!("  Saved:     {}\n", opts.money(goal.current_amount)));
    output.push_str(&format!("  Target:    {}\n", opts.money(goal.target_amount)));
    output.push_str(&format!("  Remaining: {}\n", opts.money(goal.remaining())));
    output.push_str(&format!(
        "  Progress:  {} {}\n",
        format_bar(goal.progress_percent(), 100.0, 20),
        format_percentage(goal.progress_percent())
    ));

    if let Some(target_date) = goal.target_date {
        output.push_str(&format!("  Due:       {}\n", due_label(goal, today, opts)));
        if let Some(monthly) = goal.required_monthly_contribution(today) {
            output.push_str(&format!(
                "  Needed:    {} per month until {}\n",
                opts.money(monthly),
                opts.date(target_date)
            ));
        }
    }

    if goal.is_completed() {
        output.push_str("  Status:    Completed\n");
    }

    if !goal.notes.is_empty() {
        output.push_str(&format!("  Notes:     {}\n", goal.notes));
    }

    output
}
