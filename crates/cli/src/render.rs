use console::style;
use domain::{DashboardMetrics, RatingDistribution, ReviewEntry, TrendPoint};
use prettytable::{format, row, Table};

const BAR_WIDTH: usize = 30;
const CELL_WIDTH: usize = 60;

pub fn heading(title: &str) {
    println!("\n{}", style(title).bold().underlined());
}

pub fn format_average(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Shorten long cells for table output
pub fn truncate(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table
}

pub fn print_metrics(metrics: &DashboardMetrics) {
    println!(
        "{}: {}",
        style("Total Reviews").cyan(),
        style(metrics.count).bold()
    );
    println!(
        "{}: {}",
        style("Average Rating").cyan(),
        style(format_average(metrics.average_rating)).bold()
    );
    println!(
        "{}: {}",
        style("Latest Summary").cyan(),
        metrics.latest_summary
    );
}

pub fn print_distribution(distribution: &RatingDistribution) {
    let max = distribution.stars.iter().copied().max().unwrap_or(0).max(1);
    for stars in (1..=5u8).rev() {
        let count = distribution.count_for(stars);
        let width = count * BAR_WIDTH / max;
        println!(
            "{} {} {}",
            style(format!("{stars}★")).yellow(),
            style("█".repeat(width)).green(),
            count
        );
    }
    if distribution.other > 0 {
        println!("{} {}", style("other").dim(), distribution.other);
    }
}

pub fn print_trend(trend: &[TrendPoint]) {
    if trend.is_empty() {
        println!("{}", style("No dated reviews yet.").dim());
        return;
    }

    let mut table = new_table();
    table.set_titles(row![b->"Date", b->"Average Rating"]);
    for point in trend {
        table.add_row(row![point.date, format_average(point.average_rating)]);
    }
    table.printstd();
}

pub fn print_issue_table(issues: &[ReviewEntry]) {
    if issues.is_empty() {
        println!("{}", style("No open issues.").green());
        return;
    }

    let mut table = new_table();
    table.set_titles(row![b->"ID", b->"Rating", b->"Summary", b->"Action"]);
    for entry in issues {
        table.add_row(row![
            entry.id,
            entry.review.rating,
            truncate(&entry.review.summary, CELL_WIDTH),
            truncate(&entry.review.action, CELL_WIDTH)
        ]);
    }
    table.printstd();
}

pub fn print_feed(entries: &[ReviewEntry]) {
    if entries.is_empty() {
        println!("{}", style("No reviews yet.").dim());
        return;
    }

    let mut table = new_table();
    table.set_titles(row![b->"Timestamp", b->"Rating", b->"Review", b->"Summary", b->"Action", b->"Status"]);
    for entry in entries {
        let status = if entry.review.is_resolved() {
            "resolved"
        } else {
            "open"
        };
        table.add_row(row![
            entry.review.timestamp,
            entry.review.rating,
            truncate(&entry.review.review, CELL_WIDTH),
            truncate(&entry.review.summary, CELL_WIDTH),
            truncate(&entry.review.action, CELL_WIDTH),
            status
        ]);
    }
    table.printstd();
}

/// Full view of one issue for interactive review
pub fn print_issue_card(entry: &ReviewEntry, index: usize, total: usize) {
    println!(
        "\n{} {}  {}",
        style(format!("[{index}/{total}]")).dim(),
        style(format!("{}★", entry.review.rating)).red().bold(),
        style(entry.review.timestamp.as_str()).dim()
    );
    println!("{}: {}", style("Review").cyan(), entry.review.review);
    println!("{}: {}", style("Summary").cyan(), entry.review.summary);
    println!("{}: {}", style("Action").yellow(), entry.review.action);
    println!("{}: {}", style("ID").dim(), entry.id);
}
