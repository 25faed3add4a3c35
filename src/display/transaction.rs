//! Transaction display formatting
//!
//! Register-style table of transactions plus a detail view.

use std::collections::HashMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Category, CategoryId, Money, Transaction, TransactionType};

use super::format::{truncate, DisplayOptions};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Look up the display name of a transaction's category
fn category_label(
    category_id: Option<CategoryId>,
    names: &HashMap<CategoryId, &Category>,
) -> String {
    match category_id {
        None => "(uncategorized)".to_string(),
        Some(id) => names
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "(deleted category)".to_string()),
    }
}

/// Format transactions as a register with income/expense totals
pub fn format_transaction_register(
    transactions: &[Transaction],
    categories: &[Category],
    opts: &DisplayOptions,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let names: HashMap<CategoryId, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: opts.date(txn.date),
        description: truncate(&txn.description, 32),
        category: category_label(txn.category_id, &names),
        amount: opts.money(txn.signed_amount()),
    });

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string();

    let income: Money = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Income)
        .map(|t| t.amount)
        .sum();
    let expenses: Money = transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .map(|t| t.amount)
        .sum();

    format!(
        "{}\n{} transaction(s)  income {}  expenses {}  net {}\n",
        table,
        transactions.len(),
        opts.money(income),
        opts.money(expenses),
        opts.money(income - expenses)
    )
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    category: Option<&Category>,
    opts: &DisplayOptions,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", opts.date(txn.date)));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type));
    output.push_str(&format!("Amount:      {}\n", opts.money(txn.amount)));

    match (txn.category_id, category) {
        (Some(_), Some(c)) => output.push_str(&format!("Category:    {}\n", c)),
        (Some(id), None) => output.push_str(&format!("Category:    (deleted: {})\n", id)),
        (None, _) => output.push_str("Category:    (uncategorized)\n"),
    }

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    if !txn.notes.is_empty() {
        output.push_str(&format!("Notes:       {}\n", txn.notes));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_register_totals() {
        let groceries = Category::new("Groceries", TransactionType::Expense);
        let transactions = vec![
            Transaction::with_details(
                Money::from_cents(300000),
                TransactionType::Income,
                date(1),
                None,
                "Paycheck",
            ),
            Transaction::with_details(
                Money::from_cents(8450),
                TransactionType::Expense,
                date(4),
                Some(groceries.id),
                "Weekly shop",
            ),
        ];

        let output = format_transaction_register(
            &transactions,
            &[groceries],
            &DisplayOptions::default(),
        );
        assert!(output.contains("Groceries"));
        assert!(output.contains("(uncategorized)"));
        assert!(output.contains("-$84.50"));
        assert!(output.contains("2 transaction(s)  income $3000.00  expenses $84.50  net $2915.50"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], &[], &DisplayOptions::default()),
            "No transactions found."
        );
    }

    #[test]
    fn test_details() {
        let mut txn = Transaction::new(Money::from_cents(1299), TransactionType::Expense, date(9));
        txn.notes = "split with Sam".into();

        let output = format_transaction_details(&txn, None, &DisplayOptions::default());
        assert!(output.contains("Amount:      $12.99"));
        assert!(output.contains("(uncategorized)"));
        assert!(output.contains("Notes:       split with Sam"));
    }
}
