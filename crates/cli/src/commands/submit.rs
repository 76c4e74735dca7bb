use crate::context::AppContext;
use anyhow::Result;
use application::ApplicationError;
use clap::Args;
use console::style;
use domain::ValidationError;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;

/// Submit a rating and review
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Star rating from 1 to 5
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(i64).range(1..=5))]
    rating: i64,

    /// What did you think?
    text: String,
}

impl SubmitCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        let pipeline = ctx.intake_pipeline();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .template("{spinner:.cyan} {msg}")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner.set_message("Processing your feedback...");

        let outcome = pipeline.submit(self.rating, &self.text).await;
        spinner.finish_and_clear();

        let receipt = match outcome {
            Ok(receipt) => receipt,
            Err(ApplicationError::Validation(ValidationError::EmptyReview)) => {
                eprintln!("{} {}", style("⚠").yellow(), style("Please enter some text.").yellow());
                return Ok(ExitCode::from(2));
            }
            Err(ApplicationError::Validation(e)) => {
                eprintln!("{} {}", style("⚠").yellow(), style(e).yellow());
                return Ok(ExitCode::from(2));
            }
            Err(e) => return Err(e.into()),
        };

        match &receipt.storage_error {
            None => println!("{}", style("Sent! Thank you.").green().bold()),
            Some(e) => eprintln!("{} {}", style("Database Error:").red().bold(), e),
        }
        println!("{} {}", style("Our Reply:").cyan().bold(), receipt.reply);

        Ok(if receipt.accepted() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
