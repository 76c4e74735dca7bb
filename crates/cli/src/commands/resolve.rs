use crate::context::AppContext;
use anyhow::{Context, Result};
use application::ResolveOutcome;
use clap::Args;
use console::style;
use domain::ReviewId;
use std::process::ExitCode;

/// Mark an issue resolved by its ID (as shown by `issues`)
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Review ID, `<timestamp>_<row>`
    id: String,
}

impl ResolveCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        let id: ReviewId = self
            .id
            .parse()
            .with_context(|| format!("Invalid review ID '{}'", self.id))?;

        let outcome = ctx
            .dashboard()
            .mark_resolved(&id)
            .await
            .with_context(|| format!("Failed to resolve {id}"))?;

        match outcome {
            ResolveOutcome::Resolved { action } => {
                println!("{} {}", style("✓ Marked resolved:").green().bold(), action);
            }
            ResolveOutcome::AlreadyResolved => {
                println!("{}", style("Already resolved, nothing changed.").dim());
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
