//! Budget CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_budget_details, format_budget_list, format_budget_status, BudgetView, DisplayOptions,
};
use crate::error::{FinsightError, FinsightResult};
use crate::models::{Budget, BudgetPeriod, BudgetStatus, CategoryId};
use crate::services::{BudgetService, CategoryService, CreateBudgetInput, UpdateBudgetInput};
use crate::storage::Storage;

use super::{parse_date, parse_money, today};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List all budgets with their spending
    List,

    /// Create a budget for an expense category
    Create {
        /// Category name or ID
        category: String,
        /// Spending limit (e.g. "400")
        amount: String,
        /// weekly, monthly, quarterly or yearly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,
        /// First day (defaults to the start of the current period)
        #[arg(short, long)]
        start: Option<String>,
        /// Percent used at which to warn (defaults to the configured value)
        #[arg(long)]
        threshold: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show budget details and status
    Show {
        /// Budget ID or category name
        budget: String,
    },

    /// Edit a budget
    Edit {
        /// Budget ID or category name
        budget: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        period: Option<BudgetPeriod>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(long)]
        threshold: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a budget
    Delete {
        /// Budget ID or category name
        budget: String,
    },

    /// Show progress of the budgets active on a date
    Status {
        /// Date to check (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinsightResult<()> {
    let service = BudgetService::new(storage);
    let categories = CategoryService::new(storage);
    let opts = DisplayOptions::from(settings);
    let today = today();

    let category_names: HashMap<CategoryId, String> = categories
        .list(None)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    match cmd {
        BudgetCommands::List => {
            let budgets = service.list()?;
            let statuses = budgets
                .iter()
                .map(|b| service.status(b, today))
                .collect::<FinsightResult<Vec<_>>>()?;
            let views = views(&budgets, &statuses, &category_names);
            println!("{}", format_budget_list(&views, &opts));
        }

        BudgetCommands::Create {
            category,
            amount,
            period,
            start,
            threshold,
            notes,
        } => {
            let category = categories.require(&category)?;
            let start_date = match start {
                Some(s) => parse_date(&s)?,
                None => period.current_start(today),
            };

            let budget = service.create(CreateBudgetInput {
                category_id: category.id,
                amount: parse_money(&amount)?,
                period,
                start_date,
                alert_threshold: threshold.unwrap_or(settings.budget_alert_threshold),
                notes,
            })?;

            println!(
                "Created {} budget of {} for {}",
                budget.period,
                opts.money(budget.amount),
                category.name
            );
            println!(
                "  Range: {} to {}",
                opts.date(budget.start_date),
                opts.date(budget.end_date)
            );
            println!("  ID:    {}", budget.id);
        }

        BudgetCommands::Show { budget } => {
            let budget = service.require(&budget)?;
            let category = categories
                .get(budget.category_id)?
                .ok_or_else(|| FinsightError::category_not_found(budget.category_id.to_string()))?;
            let status = service.status(&budget, today)?;
            print!("{}", format_budget_details(&budget, &category, &status, &opts));
        }

        BudgetCommands::Edit {
            budget,
            amount,
            period,
            start,
            threshold,
            notes,
        } => {
            let budget = service.require(&budget)?;

            let input = UpdateBudgetInput {
                amount: amount.as_deref().map(parse_money).transpose()?,
                period,
                start_date: start.as_deref().map(parse_date).transpose()?,
                alert_threshold: threshold,
                notes,
            };

            if input.amount.is_none()
                && input.period.is_none()
                && input.start_date.is_none()
                && input.alert_threshold.is_none()
                && input.notes.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(budget.id, input)?;
            println!(
                "Updated budget for {}: {}",
                category_name(&category_names, updated.category_id),
                updated
            );
        }

        BudgetCommands::Delete { budget } => {
            let budget = service.require(&budget)?;
            service.delete(budget.id)?;
            println!(
                "Deleted budget for {}: {}",
                category_name(&category_names, budget.category_id),
                budget
            );
        }

        BudgetCommands::Status { date } => {
            let date = date.as_deref().map(parse_date).transpose()?.unwrap_or(today);
            let active = service.statuses_active_on(date)?;
            let (budgets, statuses): (Vec<Budget>, Vec<BudgetStatus>) = active.into_iter().unzip();
            let views = views(&budgets, &statuses, &category_names);

            println!("Budgets on {}", opts.date(date));
            println!();
            print!("{}", format_budget_status(&views, &opts));
            if views.is_empty() {
                println!();
            }
        }
    }

    Ok(())
}

fn category_name(names: &HashMap<CategoryId, String>, id: CategoryId) -> &str {
    names.get(&id).map(String::as_str).unwrap_or("(deleted category)")
}

fn views<'a>(
    budgets: &'a [Budget],
    statuses: &'a [BudgetStatus],
    names: &'a HashMap<CategoryId, String>,
) -> Vec<BudgetView<'a>> {
    budgets
        .iter()
        .zip(statuses)
        .map(|(budget, status)| BudgetView {
            budget,
            category_name: category_name(names, budget.category_id),
            status,
        })
        .collect()
}
