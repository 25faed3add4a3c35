//! Report CLI commands
//!
//! Every report works on a date range given with `--period`; the configured
//! default period is used when it is omitted.

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::analytics::Granularity;
use crate::config::settings::Settings;
use crate::display::{
    format_category_insights, format_comparison, format_health, format_kpis, format_trends,
    DisplayOptions,
};
use crate::error::{FinsightError, FinsightResult};
use crate::services::AnalyticsService;
use crate::storage::Storage;

use super::{resolve_range, today};

/// Options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Period: a preset such as this-month or last-30-days, YYYY-MM, YYYY
    /// or START..END
    #[arg(short, long)]
    pub period: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses, savings rate and averages
    Summary(ReportArgs),

    /// Compare a period against the one before it
    Compare(ReportArgs),

    /// Spending over time
    Trends {
        #[command(flatten)]
        args: ReportArgs,
        /// daily, weekly or monthly (defaults to the configured value)
        #[arg(short, long)]
        granularity: Option<Granularity>,
    },

    /// Expenses by category with budget usage
    Categories(ReportArgs),

    /// Financial health score
    Health(ReportArgs),
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinsightResult<()> {
    let service = AnalyticsService::new(storage);
    let opts = DisplayOptions::from(settings);
    let today = today();

    match cmd {
        ReportCommands::Summary(args) => {
            let range = resolve_range(args.period.as_deref(), settings, today)?;
            let kpis = service.kpis(range)?;
            emit(&kpis, args.json, || format_kpis(&kpis, &opts))?;
        }

        ReportCommands::Compare(args) => {
            let range = resolve_range(args.period.as_deref(), settings, today)?;
            let comparison = service.compare(range)?;
            emit(&comparison, args.json, || format_comparison(&comparison, &opts))?;
        }

        ReportCommands::Trends { args, granularity } => {
            let range = resolve_range(args.period.as_deref(), settings, today)?;
            let granularity = granularity.unwrap_or(settings.trend_granularity);
            let trends = service.trends(range, granularity)?;
            emit(&trends, args.json, || format_trends(&trends, &opts))?;
        }

        ReportCommands::Categories(args) => {
            let range = resolve_range(args.period.as_deref(), settings, today)?;
            let insights = service.category_insights(range)?;
            if !args.json {
                println!("Spending by category, {}", range);
            }
            emit(&insights, args.json, || format_category_insights(&insights, &opts))?;
        }

        ReportCommands::Health(args) => {
            let range = resolve_range(args.period.as_deref(), settings, today)?;
            let health = service.health(range, today)?;
            emit(&health, args.json, || format_health(&health))?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(
    report: &T,
    json: bool,
    render: impl FnOnce() -> String,
) -> FinsightResult<()> {
    if json {
        let out = serde_json::to_string_pretty(report)
            .map_err(|e| FinsightError::Export(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("{}", render().trim_end());
    }
    Ok(())
}
