//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_register, DisplayOptions};
use crate::error::{FinsightError, FinsightResult};
use crate::models::TransactionType;
use crate::services::{
    CategoryService, CreateTransactionInput, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
use crate::storage::Storage;

use super::{parse_date, parse_money, resolve_range, today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction
    Add {
        /// Amount (e.g. "42.50"); always positive
        amount: String,
        /// income or expense (defaults to the category's type)
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Period: preset, YYYY-MM, YYYY or START..END (all dates if omitted)
        #[arg(short, long)]
        period: Option<String>,
        /// Only income or expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Text to find in description or notes
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show transaction details
    Show {
        /// Transaction ID (full or short)
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID (full or short)
        id: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
        /// Category name or ID
        #[arg(short, long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        clear_category: bool,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinsightResult<()> {
    let service = TransactionService::new(storage);
    let categories = CategoryService::new(storage);
    let opts = DisplayOptions::from(settings);

    match cmd {
        TransactionCommands::Add {
            amount,
            transaction_type,
            category,
            date,
            description,
            notes,
        } => {
            let category = category.map(|c| categories.require(&c)).transpose()?;
            let transaction_type = transaction_type
                .or(category.as_ref().map(|c| c.category_type))
                .ok_or_else(|| {
                    FinsightError::Validation(
                        "Specify --type income|expense or a --category".into(),
                    )
                })?;

            let txn = service.create(CreateTransactionInput {
                amount: parse_money(&amount)?,
                transaction_type,
                date: date.as_deref().map(parse_date).transpose()?.unwrap_or_else(today),
                category_id: category.as_ref().map(|c| c.id),
                description,
                notes,
            })?;

            println!(
                "Added {} of {} on {}",
                txn.transaction_type.as_str(),
                opts.money(txn.amount),
                opts.date(txn.date)
            );
            if let Some(category) = category {
                println!("  Category: {}", category);
            }
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            period,
            transaction_type,
            category,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(period) = period {
                filter = filter.range(resolve_range(Some(&period), settings, today())?);
            }
            if let Some(t) = transaction_type {
                filter = filter.transaction_type(t);
            }
            if let Some(category) = category {
                filter = filter.category(categories.require(&category)?.id);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let transactions = service.list(&filter)?;
            println!(
                "{}",
                format_transaction_register(&transactions, &categories.list(None)?, &opts)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            let category = match txn.category_id {
                Some(category_id) => categories.get(category_id)?,
                None => None,
            };
            print!("{}", format_transaction_details(&txn, category.as_ref(), &opts));
        }

        TransactionCommands::Edit {
            id,
            amount,
            transaction_type,
            category,
            clear_category,
            date,
            description,
            notes,
        } => {
            let txn = service.require(&id)?;

            let category_id = if clear_category {
                Some(None)
            } else {
                category
                    .map(|c| categories.require(&c).map(|c| Some(c.id)))
                    .transpose()?
            };

            let input = UpdateTransactionInput {
                amount: amount.as_deref().map(parse_money).transpose()?,
                transaction_type,
                date: date.as_deref().map(parse_date).transpose()?,
                category_id,
                description,
                notes,
            };

            if input.amount.is_none()
                && input.transaction_type.is_none()
                && input.date.is_none()
                && input.category_id.is_none()
                && input.description.is_none()
                && input.notes.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction {}: {}", updated.id, updated);
        }

        TransactionCommands::Delete { id } => {
            let txn = service.require(&id)?;
            service.delete(txn.id)?;
            println!("Deleted transaction {}: {}", txn.id, txn);
        }
    }

    Ok(())
}
