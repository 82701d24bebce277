use chrono::{DateTime, Datelike, NaiveDate};
use serde_json::Value;

use crate::models::issues::{ApiResponse, RawIssue, TopProject};
use crate::models::summary::{Issue, IssueStatus, Month, MonthlyStat, ProjectStats, YearSummary};

/// Shown when an issue carries no usable project reference.
const DEFAULT_PROJECT: &str = "Drupal Project";
const NODE_BASE_URL: &str = "https://www.drupal.org/node";

/// Builds the year summary from one raw API response. Pure: same response and
/// year in, same summary out.
pub fn transform(response: &ApiResponse, year: i32) -> YearSummary {
    let issues: Vec<Issue> = response.issues.iter().map(map_issue).collect();
    let monthly_stats = monthly_stats(&response.issues);
    let top_project = project_stats(response.top_project.as_ref(), response.total_count, year);

    debug_assert_eq!(
        monthly_stats.iter().map(|stat| stat.count).sum::<u64>(),
        issues.len() as u64,
    );

    YearSummary {
        user_id: response.user.uid,
        user_name: response.user.name.clone(),
        year,
        total_issues: response.total_count,
        top_project,
        issues,
        monthly_stats,
    }
}

fn map_issue(raw: &RawIssue) -> Issue {
    let project = raw
        .field_project
        .as_ref()
        .and_then(|project| project.machine_name.as_deref())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| DEFAULT_PROJECT.to_string());

    Issue {
        id: raw.nid,
        title: raw.title.clone(),
        project,
        created_at: utc_date(raw.created),
        status: IssueStatus::from_code(raw.field_issue_status),
        labels: vec![raw.issue_type.clone()],
        comments: coerce_comment_count(raw.comment_count.as_ref()),
        url: format!("{}/{}", NODE_BASE_URL, raw.nid),
    }
}

/// One pass over the records, exactly 12 buckets in calendar order. Year
/// windowing happens in the fetch layer, not here.
fn monthly_stats(issues: &[RawIssue]) -> Vec<MonthlyStat> {
    let mut counts = [0u64; 12];
    for issue in issues {
        counts[utc_date(issue.created).month0() as usize] += 1;
    }

    Month::ALL
        .iter()
        .zip(counts)
        .map(|(&month, count)| MonthlyStat { month, count })
        .collect()
}

fn project_stats(top_project: Option<&TopProject>, total_count: u64, year: i32) -> ProjectStats {
    match top_project {
        Some(top) if total_count > 0 => {
            let percentage = ((top.count as f64 / total_count as f64) * 100.0).round() as u32;
            ProjectStats::MostActive {
                name: top.name.clone(),
                total_issues: top.count,
                percentage,
                description: format!("You focused {}% of your efforts here.", percentage),
            }
        }
        _ => ProjectStats::QuietYear {
            description: format!("No specific project activity found for {}.", year),
        },
    }
}

/// UTC truncation keeps dates and month buckets identical across hosts.
/// Out-of-range timestamps clamp to the epoch.
fn utc_date(epoch_secs: i64) -> NaiveDate {
    DateTime::from_timestamp(epoch_secs, 0)
        .unwrap_or_default()
        .date_naive()
}

fn coerce_comment_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(count)) => count.as_u64().unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
