use anyhow::Result;

use crate::models::summary::{ProjectStats, YearSummary};

const BAR_WIDTH: u64 = 40;

/// Output switches travel with the call instead of living in process state.
pub struct RenderOptions {
    pub json: bool,
    pub issue_limit: usize,
}

pub fn render(summary: &YearSummary, options: &RenderOptions) -> Result<()> {
    if options.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    print_headline(summary);
    print_timeline(summary);
    print_top_project(summary);
    print_issues(summary, options.issue_limit);
    Ok(())
}

fn print_headline(summary: &YearSummary) {
    println!();
    println!("{} on drupal.org, {}", summary.user_name, summary.year);
    println!("{} issues touched this year", summary.total_issues);
}

fn print_timeline(summary: &YearSummary) {
    let max = summary
        .monthly_stats
        .iter()
        .map(|stat| stat.count)
        .max()
        .unwrap_or(0);

    println!();
    for stat in &summary.monthly_stats {
        let width = if max == 0 {
            0
        } else {
            (stat.count * BAR_WIDTH / max) as usize
        };
        println!("  {} {:>4}  {}", stat.month.abbr(), stat.count, "#".repeat(width));
    }

    if let Some(top) = summary.busiest_month() {
        if top.count > 0 {
            println!();
            println!(
                "  {} was your busiest month with {} issues.",
                top.month.full_name(),
                top.count,
            );
        }
    }
}

fn print_top_project(summary: &YearSummary) {
    println!();
    match &summary.top_project {
        ProjectStats::MostActive {
            name,
            total_issues,
            percentage,
            description,
        } => {
            println!("Top project: {} ({} issues, {}%)", name, total_issues, percentage);
            println!("  {}", description);
        }
        ProjectStats::QuietYear { description } => {
            println!("{}", description);
        }
    }
}

fn print_issues(summary: &YearSummary, limit: usize) {
    if summary.issues.is_empty() {
        return;
    }

    println!();
    for issue in summary.issues.iter().take(limit) {
        println!(
            "  {} [{:>6}] {} ({}, {} comments)",
            issue.created_at,
            issue.status.as_str(),
            issue.title,
            issue.project,
            issue.comments,
        );
        println!("      {}", issue.url);
    }

    let hidden = summary.issues.len().saturating_sub(limit);
    if hidden > 0 {
        println!("  ... and {} more", hidden);
    }
}
