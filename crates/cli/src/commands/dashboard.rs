use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};
use clap::Args;
use domain::{DashboardMetrics, RatingDistribution, TrendPoint};
use serde::Serialize;
use std::process::ExitCode;

/// Show metrics, rating distribution, daily trend and open issues
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct IssueView {
    id: String,
    timestamp: String,
    rating: String,
    review: String,
    summary: String,
    action: String,
}

#[derive(Debug, Serialize)]
struct DashboardReport {
    metrics: DashboardMetrics,
    distribution: RatingDistribution,
    trend: Vec<TrendPoint>,
    open_issues: Vec<IssueView>,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        let snapshot = ctx
            .dashboard()
            .load()
            .await
            .context("Failed to load review table")?;
        let query = snapshot.query();

        let metrics = query.metrics();
        let distribution = query.rating_distribution();
        let trend = query.daily_trend();
        let issues = query.open_issues();

        if self.json {
            let report = DashboardReport {
                metrics,
                distribution,
                trend,
                open_issues: issues
                    .into_iter()
                    .map(|entry| IssueView {
                        id: entry.id.to_string(),
                        timestamp: entry.review.timestamp.to_string(),
                        rating: entry.review.rating.to_string(),
                        review: entry.review.review,
                        summary: entry.review.summary,
                        action: entry.review.action,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(ExitCode::SUCCESS);
        }

        render::heading("Feedback Dashboard");
        render::print_metrics(&metrics);

        render::heading("Score Distribution");
        render::print_distribution(&distribution);

        render::heading("Rating Trend");
        render::print_trend(&trend);

        render::heading(&format!("Open Issues ({})", issues.len()));
        render::print_issue_table(&issues);

        Ok(ExitCode::SUCCESS)
    }
}
