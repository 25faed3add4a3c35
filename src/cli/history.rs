//! Audit history command

use clap::Args;

use crate::audit::EntityType;
use crate::error::FinsightResult;
use crate::storage::Storage;

/// History arguments
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only changes to transaction, category, budget or goal
    #[arg(short, long)]
    pub entity: Option<EntityType>,
}

/// Show the most recent audit log entries, oldest first
pub fn handle_history_command(storage: &Storage, args: HistoryArgs) -> FinsightResult<()> {
    let entries = storage.audit().read_recent(args.count, args.entity)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    let total = storage.audit().entry_count()?;
    if total > entries.len() {
        println!();
        println!("Showing {} of {} entries. Use -n to see more.", entries.len(), total);
    }

    Ok(())
}
