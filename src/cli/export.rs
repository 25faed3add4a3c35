//! CLI command for data export
//!
//! Writes to stdout unless an output file is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::{FinsightError, FinsightResult};
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv, ExportFormat};
use crate::storage::Storage;

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// csv (transactions only), json or yaml (everything)
    pub format: ExportFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> FinsightResult<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(storage, args.format, &mut writer)?;
            writer.flush()?;

            match args.format {
                ExportFormat::Csv => println!("Transactions exported to: {}", path.display()),
                _ => println!("Full data set exported to: {}", path.display()),
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, args.format, &mut writer)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    storage: &Storage,
    format: ExportFormat,
    writer: &mut W,
) -> FinsightResult<()> {
    match format {
        ExportFormat::Csv => {
            export_transactions_csv(storage, &mut *writer)?;
        }
        ExportFormat::Json => export_full_json(storage, writer, true)?,
        ExportFormat::Yaml => export_full_yaml(storage, writer)?,
    }
    Ok(())
}
