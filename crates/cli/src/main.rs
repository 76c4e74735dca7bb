use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::{init_structured_logging, LoggingConfig};
use infrastructure::ConfigLoader;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod render;

use commands::{
    DashboardCommand, ExportCommand, FeedCommand, IssuesCommand, ResolveCommand, SubmitCommand,
};
use context::AppContext;

#[derive(Parser)]
#[command(name = "feedback")]
#[command(about = "Customer feedback intake with AI replies, plus an operator dashboard")]
#[command(version)]
struct Cli {
    /// Config file (default: ./feedback.toml, then ~/.config/feedback/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a rating and review, print the generated reply
    Submit(SubmitCommand),
    /// Metrics, score distribution, daily trend and open issues
    Dashboard(DashboardCommand),
    /// Open issues; `--interactive` to work through them
    Issues(IssuesCommand),
    /// Mark one issue resolved
    Resolve(ResolveCommand),
    /// Every review, newest first
    Feed(FeedCommand),
    /// Write the full table to a CSV file
    Export(ExportCommand),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config.clone() {
        loader = loader.with_path(path);
    }
    let config = loader.load().await.context("Failed to load configuration")?;

    let logging = LoggingConfig::default()
        .with_level_str(&config.logging.level)
        .with_json_output(cli.json_logs || config.logging.json);
    let logging = LoggingConfig {
        color_output: console::colors_enabled_stderr(),
        ..logging
    };
    init_structured_logging(logging)?;

    tracing::debug!(
        provider = config.llm.provider.name(),
        model = config.llm.model_name(),
        api_key_present = config.llm.has_api_key(),
        "Configuration loaded"
    );

    let ctx = AppContext::new(config).await?;

    match cli.command {
        Commands::Submit(cmd) => cmd.execute(&ctx).await,
        Commands::Dashboard(cmd) => cmd.execute(&ctx).await,
        Commands::Issues(cmd) => cmd.execute(&ctx).await,
        Commands::Resolve(cmd) => cmd.execute(&ctx).await,
        Commands::Feed(cmd) => cmd.execute(&ctx).await,
        Commands::Export(cmd) => cmd.execute(&ctx).await,
    }
}
