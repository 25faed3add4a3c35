//! Configuration CLI commands

use clap::Subcommand;

use crate::config::paths::FinsightPaths;
use crate::config::settings::Settings;
use crate::error::FinsightResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,

    /// Change a setting
    Set {
        /// currency_symbol, date_format, default_period,
        /// budget_alert_threshold or trend_granularity
        key: String,
        value: String,
    },
}

/// Handle a config command; no subcommand shows the configuration
pub fn handle_config_command(
    paths: &FinsightPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> FinsightResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("finsight configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  currency_symbol:        {}", settings.currency_symbol);
            println!("  date_format:            {}", settings.date_format);
            println!("  default_period:         {}", settings.default_period);
            println!("  budget_alert_threshold: {}", settings.budget_alert_threshold);
            println!("  trend_granularity:      {}", settings.trend_granularity);
            if !settings.setup_completed {
                println!();
                println!("Not initialized yet. Run 'finsight init' to get started.");
            }
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
