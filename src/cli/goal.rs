//! Savings goal CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_goal_details, format_goal_list, DisplayOptions};
use crate::error::FinsightResult;
use crate::services::{CreateGoalInput, GoalService, UpdateGoalInput};
use crate::storage::Storage;

use super::{parse_date, parse_money, today};

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List savings goals
    List,

    /// Create a savings goal
    Create {
        /// Goal name
        name: String,
        /// Target amount (e.g. "5000")
        target: String,
        /// Amount already saved
        #[arg(long)]
        current: Option<String>,
        /// Date to reach the target by (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Show goal details
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Edit a goal
    Edit {
        /// Goal name or ID
        goal: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        target: Option<String>,
        /// Overwrite the saved amount
        #[arg(long)]
        current: Option<String>,
        #[arg(long, conflicts_with = "clear_target_date")]
        target_date: Option<String>,
        /// Remove the target date
        #[arg(long)]
        clear_target_date: bool,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Add money to a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        amount: String,
    },

    /// Take money out of a goal
    Withdraw {
        /// Goal name or ID
        goal: String,
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinsightResult<()> {
    let service = GoalService::new(storage);
    let opts = DisplayOptions::from(settings);
    let today = today();

    match cmd {
        GoalCommands::List => {
            let goals = service.list()?;
            println!("{}", format_goal_list(&goals, today, &opts));
        }

        GoalCommands::Create {
            name,
            target,
            current,
            target_date,
            notes,
        } => {
            let goal = service.create(CreateGoalInput {
                name,
                target_amount: parse_money(&target)?,
                current_amount: current.as_deref().map(parse_money).transpose()?,
                target_date: target_date.as_deref().map(parse_date).transpose()?,
                notes,
            })?;

            println!("Created goal: {}", goal.name);
            println!(
                "  Saved: {} of {}",
                opts.money(goal.current_amount),
                opts.money(goal.target_amount)
            );
            if let Some(monthly) = goal.required_monthly_contribution(today) {
                println!("  Needed per month: {}", opts.money(monthly));
            }
            println!("  ID: {}", goal.id);
        }

        GoalCommands::Show { goal } => {
            let goal = service.require(&goal)?;
            print!("{}", format_goal_details(&goal, today, &opts));
        }

        GoalCommands::Edit {
            goal,
            name,
            target,
            current,
            target_date,
            clear_target_date,
            notes,
        } => {
            let goal = service.require(&goal)?;

            let target_date = if clear_target_date {
                Some(None)
            } else {
                target_date
                    .as_deref()
                    .map(|d| parse_date(d).map(Some))
                    .transpose()?
            };

            let input = UpdateGoalInput {
                name,
                target_amount: target.as_deref().map(parse_money).transpose()?,
                current_amount: current.as_deref().map(parse_money).transpose()?,
                target_date,
                notes,
            };

            if input.name.is_none()
                && input.target_amount.is_none()
                && input.current_amount.is_none()
                && input.target_date.is_none()
                && input.notes.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(goal.id, input)?;
            println!("Updated goal: {}", updated);
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.require(&goal)?;
            let amount = parse_money(&amount)?;
            let updated = service.contribute(goal.id, amount)?;

            println!(
                "Added {} to {} ({:.1}% of {})",
                opts.money(amount),
                updated.name,
                updated.progress_percent(),
                opts.money(updated.target_amount)
            );
            if updated.is_completed() {
                println!("Goal reached!");
            }
        }

        GoalCommands::Withdraw { goal, amount } => {
            let goal = service.require(&goal)?;
            let amount = parse_money(&amount)?;
            let updated = service.withdraw(goal.id, amount)?;

            println!(
                "Withdrew {} from {}; {} saved",
                opts.money(amount),
                updated.name,
                opts.money(updated.current_amount)
            );
        }

        GoalCommands::Delete { goal } => {
            let goal = service.require(&goal)?;
            service.delete(goal.id)?;
            println!("Deleted goal: {}", goal.name);
        }
    }

    Ok(())
}
