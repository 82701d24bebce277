use std::sync::Arc;

use anyhow::{Result, anyhow};
use chrono::{TimeZone, Utc};
use dashmap::DashMap;
use reqwest::Client;

use crate::models::issues::{ApiResponse, NodeList, RawIssue, TopProject};
use crate::models::user::{RawUser, UserList};

/// drupal.org caps node listings at 50 records per page.
const PAGE_SIZE: u32 = 50;

pub async fn fetch_user_by_username(
    client: &Client,
    host: &str,
    username: &str,
) -> Result<RawUser> {
    let url = format!("{}/api-d7/user.json", host.trim_end_matches('/'));
    let users = client
        .get(&url)
        .query(&[("name", username)])
        .send()
        .await?
        .error_for_status()?
        .json::<UserList>()
        .await?;

    users
        .list
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No drupal.org user named {}", username))
}

/// Fetches every project_issue authored by the user, windowed to the given
/// year, and assembles the response bundle the transformer consumes. The
/// first page's pager links bound the page count; the remaining pages are
/// fetched as concurrent tasks and flattened back in page order.
pub async fn fetch_issues_by_username_and_year(
    client: &Client,
    host: &str,
    username: &str,
    year: i32,
) -> Result<ApiResponse> {
    let user = fetch_user_by_username(client, host, username).await?;
    let window = year_window(year)?;
    let project_counts: Arc<DashMap<String, u64>> = Arc::new(DashMap::new());

    let first = fetch_issue_page(client, host, user.uid, 0)
        .await
        .map_err(|e| anyhow!("Failed to fetch issues for uid {}: {}", user.uid, e))?;
    let last_page = first.last.as_deref().and_then(parse_page_param).unwrap_or(0);
    let mut issues = keep_in_window(first.list, window, &project_counts);

    let mut pages = Vec::new();
    for page in 1..=last_page {
        let client = client.clone();
        let host = host.to_string();
        let uid = user.uid;
        let counts = Arc::clone(&project_counts);
        pages.push(tokio::spawn(async move {
            let nodes = fetch_issue_page(&client, &host, uid, page).await?;
            Ok::<_, anyhow::Error>(keep_in_window(nodes.list, window, &counts))
        }));
    }
    for handle in pages {
        let kept = handle
            .await
            .map_err(|e| anyhow!("Issue page task failed: {}", e))??;
        issues.extend(kept);
    }

    let top_project = top_project(&project_counts);
    let total_count = issues.len() as u64;
    println!(
        "[INFO] {}: {} issues in {} across {} projects",
        username,
        total_count,
        year,
        project_counts.len(),
    );

    Ok(ApiResponse {
        user,
        issues,
        top_project,
        total_count,
    })
}

async fn fetch_issue_page(client: &Client, host: &str, uid: u64, page: u32) -> Result<NodeList> {
    let url = format!("{}/api-d7/node.json", host.trim_end_matches('/'));
    let author = uid.to_string();
    let limit = PAGE_SIZE.to_string();
    let page = page.to_string();
    let nodes = client
        .get(&url)
        .query(&[
            ("type", "project_issue"),
            ("author", author.as_str()),
            ("sort", "created"),
            ("direction", "DESC"),
            ("limit", limit.as_str()),
            ("page", page.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json::<NodeList>()
        .await?;
    Ok(nodes)
}

/// Keeps records created inside the window and tallies their projects.
fn keep_in_window(
    records: Vec<RawIssue>,
    (start, end): (i64, i64),
    project_counts: &DashMap<String, u64>,
) -> Vec<RawIssue> {
    let mut kept = Vec::new();
    for issue in records {
        if issue.created < start || issue.created >= end {
            continue;
        }
        if let Some(name) = issue
            .field_project
            .as_ref()
            .and_then(|project| project.machine_name.as_deref())
            .filter(|name| !name.is_empty())
        {
            *project_counts.entry(name.to_string()).or_insert(0) += 1;
        }
        kept.push(issue);
    }
    kept
}

/// Ties break by name so the summary is deterministic regardless of map
/// iteration order.
fn top_project(counts: &DashMap<String, u64>) -> Option<TopProject> {
    counts
        .iter()
        .map(|entry| TopProject {
            name: entry.key().clone(),
            count: *entry.value(),
        })
        .max_by(|a, b| a.count.cmp(&b.count).then_with(|| b.name.cmp(&a.name)))
}

/// [Jan 1 of year, Jan 1 of year + 1) in UTC epoch seconds.
fn year_window(year: i32) -> Result<(i64, i64)> {
    let start = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow!("Not a valid year: {}", year))?;
    let end = Utc
        .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow!("Not a valid year: {}", year))?;
    Ok((start.timestamp(), end.timestamp()))
}

fn parse_page_param(url: &str) -> Option<u32> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(nid: u64, created: i64, project: Option<&str>) -> RawIssue {
        use crate::models::issues::ProjectRef;

        RawIssue {
            nid,
            title: format!("Issue {}", nid),
            field_issue_status: 1,
            field_project: project.map(|name| ProjectRef {
                machine_name: Some(name.to_string()),
            }),
            created,
            comment_count: None,
            issue_type: "Bug".to_string(),
        }
    }

    #[test]
    fn test_parse_page_param() {
        assert_eq!(
            parse_page_param("https://www.drupal.org/api-d7/node.json?type=project_issue&page=7"),
            Some(7)
        );
        assert_eq!(
            parse_page_param("https://www.drupal.org/api-d7/node.json?page=0"),
            Some(0)
        );
        assert_eq!(
            parse_page_param("https://www.drupal.org/api-d7/node.json"),
            None
        );
    }

    #[test]
    fn test_year_window_bounds() {
        let (start, end) = year_window(2025).unwrap();
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().timestamp()
        );
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_keep_in_window_drops_other_years_and_counts_projects() {
        let window = year_window(2025).unwrap();
        let counts = DashMap::new();
        let in_2025 = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap().timestamp();
        let in_2024 = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap().timestamp();

        let kept = keep_in_window(
            vec![
                issue(1, in_2025, Some("drupal")),
                issue(2, in_2024, Some("drupal")),
                issue(3, in_2025, Some("views")),
                issue(4, in_2025, None),
            ],
            window,
            &counts,
        );

        assert_eq!(
            kept.iter().map(|i| i.nid).collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
        assert_eq!(*counts.get("drupal").unwrap(), 1);
        assert_eq!(*counts.get("views").unwrap(), 1);
    }

    #[test]
    fn test_top_project_ties_break_by_name() {
        let counts = DashMap::new();
        counts.insert("views".to_string(), 3u64);
        counts.insert("drupal".to_string(), 3u64);
        counts.insert("ctools".to_string(), 1u64);

        let top = top_project(&counts).unwrap();
        assert_eq!(top.name, "drupal");
        assert_eq!(top.count, 3);
    }
}
