use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use std::process::ExitCode;

/// Raw data feed, newest first
#[derive(Debug, Args)]
pub struct FeedCommand {
    /// Show at most this many rows
    #[arg(short, long)]
    limit: Option<usize>,
}

impl FeedCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        let snapshot = ctx
            .dashboard()
            .load()
            .await
            .context("Failed to load review table")?;

        let mut feed = snapshot.query().recent_feed();
        if let Some(limit) = self.limit {
            feed.truncate(limit);
        }

        render::heading(&format!("Raw Data Feed ({} of {})", feed.len(), snapshot.reviews.len()));
        render::print_feed(&feed);
        Ok(ExitCode::SUCCESS)
    }
}
