//! Category CLI commands

use clap::Subcommand;

use crate::display::{format_category_details, format_category_list, DisplayOptions};
use crate::error::FinsightResult;
use crate::models::TransactionType;
use crate::services::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List {
        /// Only income or expense categories
        #[arg(short = 't', long = "type")]
        category_type: Option<TransactionType>,
    },

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        category_type: TransactionType,
        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
        /// Icon (usually an emoji)
        #[arg(long)]
        icon: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type (only for unused categories)
        #[arg(short = 't', long = "type")]
        category_type: Option<TransactionType>,
        /// New color
        #[arg(long)]
        color: Option<String>,
        /// New icon
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete an unused category
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    opts: &DisplayOptions,
    cmd: CategoryCommands,
) -> FinsightResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { category_type } => {
            let categories = service.list(category_type)?;
            println!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create {
            name,
            category_type,
            color,
            icon,
        } => {
            let category = service.create(CreateCategoryInput {
                name,
                category_type,
                color,
                icon,
            })?;

            println!("Created category: {}", category);
            println!("  Type: {}", category.category_type);
            println!("  ID:   {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let category = service.require(&category)?;
            let usage = service.usage(category.id)?;
            print!("{}", format_category_details(&category, usage, opts));
        }

        CategoryCommands::Edit {
            category,
            name,
            category_type,
            color,
            icon,
        } => {
            let category = service.require(&category)?;

            if name.is_none() && category_type.is_none() && color.is_none() && icon.is_none() {
                println!("No changes specified. Use --name, --type, --color, or --icon.");
                return Ok(());
            }

            let updated = service.update(
                category.id,
                UpdateCategoryInput {
                    name,
                    category_type,
                    color,
                    icon,
                },
            )?;
            println!("Updated category: {}", updated);
        }

        CategoryCommands::Delete { category } => {
            let category = service.require(&category)?;
            service.delete(category.id)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
