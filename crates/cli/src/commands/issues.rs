use crate::context::AppContext;
use crate::render;
use anyhow::{Context, Result};
use application::ResolveOutcome;
use clap::Args;
use console::style;
use domain::SessionDismissals;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// List open issues (rating 3 or lower, not resolved)
#[derive(Debug, Args)]
pub struct IssuesCommand {
    /// Walk through issues one by one: mark done, dismiss for this session, or quit
    #[arg(short, long)]
    interactive: bool,
}

enum Choice {
    Done,
    Dismiss,
    Quit,
}

impl IssuesCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<ExitCode> {
        if self.interactive {
            return run_session(ctx).await;
        }

        let snapshot = ctx
            .dashboard()
            .load()
            .await
            .context("Failed to load review table")?;
        let issues = snapshot.query().open_issues();

        render::heading(&format!("Open Issues ({})", issues.len()));
        render::print_issue_table(&issues);
        Ok(ExitCode::SUCCESS)
    }
}

/// Dismissals live only as long as this loop
async fn run_session(ctx: &AppContext) -> Result<ExitCode> {
    let dashboard = ctx.dashboard();
    let mut dismissals = SessionDismissals::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        // Reload each round so the view always reflects the store.
        let snapshot = dashboard
            .load()
            .await
            .context("Failed to load review table")?;
        let issues = snapshot.query().open_issues_for_session(&dismissals);

        let Some(entry) = issues.first() else {
            println!("{}", style("No open issues.").green());
            break;
        };

        render::print_issue_card(entry, 1, issues.len());
        print!("{} ", style("[d]one / [s]kip for this session / [q]uit >").bold());
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match parse_choice(&line) {
            Some(Choice::Done) => match dashboard.mark_resolved(&entry.id).await? {
                ResolveOutcome::Resolved { action } => {
                    println!("{} {}", style("✓ Resolved:").green(), action);
                }
                ResolveOutcome::AlreadyResolved => {
                    println!("{}", style("Already resolved.").dim());
                }
            },
            Some(Choice::Dismiss) => {
                dismissals.dismiss(entry.id.clone());
                println!("{}", style("Hidden for this session.").dim());
            }
            Some(Choice::Quit) => break,
            None => println!("{}", style("Please answer d, s or q.").yellow()),
        }
    }

    if !dismissals.is_empty() {
        println!(
            "{}",
            style(format!("{} issue(s) hidden for this session only.", dismissals.len())).dim()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_lowercase().as_str() {
        "d" | "done" => Some(Choice::Done),
        "s" | "skip" | "dismiss" => Some(Choice::Dismiss),
        "q" | "quit" | "exit" => Some(Choice::Quit),
        _ => None,
    }
}
