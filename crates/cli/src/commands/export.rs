use crate::context::AppContext;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use infrastructure::{export_csv_to_file, DEFAULT_EXPORT_FILE};
use std::path::PathBuf;
use std::process::ExitCode;

/// Download the full table as CSV
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Destination file
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,
}

impl ExportCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        let snapshot = ctx
            .dashboard()
            .load()
            .await
            .context("Failed to load review table")?;

        let rows = export_csv_to_file(&snapshot.reviews, &self.output)
            .await
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!(
            "{} {} rows to {}",
            style("✓ Exported").green().bold(),
            rows,
            self.output.display()
        );
        Ok(ExitCode::SUCCESS)
    }
}
