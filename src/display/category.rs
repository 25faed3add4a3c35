//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;
use crate::services::category::CategoryUsage;

use super::format::DisplayOptions;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Type")]
    category_type: String,
    #[tabled(rename = "Color")]
    color: String,
}

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'finsight init' to create default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        name: c.to_string(),
        category_type: c.category_type.to_string(),
        color: c.color.clone(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format category details
pub fn format_category_details(
    category: &Category,
    usage: CategoryUsage,
    opts: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:           {}\n", category.id));
    output.push_str(&format!("  Type:         {}\n", category.category_type));
    output.push_str(&format!("  Color:        {}\n", category.color));
    if !category.icon.is_empty() {
        output.push_str(&format!("  Icon:         {}\n", category.icon));
    }
    output.push_str(&format!("  Transactions: {}\n", usage.transactions));
    output.push_str(&format!("  Budgets:      {}\n", usage.budgets));
    output.push_str(&format!(
        "  Created:      {}\n",
        opts.date(category.created_at.date_naive())
    ));

    output
}
