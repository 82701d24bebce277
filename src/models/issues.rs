use serde::Deserialize;
use serde_json::Value;

use crate::models::de::{string_or_i64, string_or_u32_lossy, string_or_u64};
use crate::models::user::RawUser;

/// Envelope of `GET /api-d7/node.json?...`. The pager links bound the page
/// count for a query; only `last` is needed here.
#[derive(Debug, Deserialize)]
pub struct NodeList {
    pub list: Vec<RawIssue>,

    pub last: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    #[serde(deserialize_with = "string_or_u64")]
    pub nid: u64,

    pub title: String,

    #[serde(default, deserialize_with = "string_or_u32_lossy")]
    pub field_issue_status: u32,

    pub field_project: Option<ProjectRef>,

    /// Epoch seconds.
    #[serde(deserialize_with = "string_or_i64")]
    pub created: i64,

    /// Kept raw: the API emits this as a string, a number, or not at all.
    #[serde(default)]
    pub comment_count: Option<Value>,

    /// Issue category, e.g. "Bug" or "Feature request".
    #[serde(rename = "type")]
    pub issue_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    pub machine_name: Option<String>,
}

/// One search's worth of raw data, assembled by the fetch layer and handed to
/// the transformer in a single piece.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub user: RawUser,
    pub issues: Vec<RawIssue>,
    pub top_project: Option<TopProject>,
    pub total_count: u64,
}

#[derive(Debug, Clone)]
pub struct TopProject {
    pub name: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_issue_with_quoted_scalars() {
        let issue: RawIssue = serde_json::from_value(json!({
            "nid": "3371432",
            "title": "Fix pager markup",
            "field_issue_status": "14",
            "field_project": { "machine_name": "drupal" },
            "created": "1736899200",
            "comment_count": "12",
            "type": "Bug"
        }))
        .unwrap();

        assert_eq!(issue.nid, 3371432);
        assert_eq!(issue.field_issue_status, 14);
        assert_eq!(issue.created, 1736899200);
        assert_eq!(issue.issue_type, "Bug");
    }

    #[test]
    fn test_deserialize_issue_with_bare_numbers_and_gaps() {
        let issue: RawIssue = serde_json::from_value(json!({
            "nid": 11,
            "title": "Untracked",
            "created": 1736899200i64,
            "type": "Task"
        }))
        .unwrap();

        assert_eq!(issue.field_issue_status, 0);
        assert!(issue.field_project.is_none());
        assert!(issue.comment_count.is_none());
    }

    #[test]
    fn test_unreadable_status_id_degrades_to_zero() {
        let issue: RawIssue = serde_json::from_value(json!({
            "nid": 12,
            "title": "Odd payload",
            "field_issue_status": "not-a-number",
            "created": 1736899200i64,
            "type": "Bug"
        }))
        .unwrap();

        assert_eq!(issue.field_issue_status, 0);
    }

    #[test]
    fn test_deserialize_node_list_envelope() {
        let nodes: NodeList = serde_json::from_value(json!({
            "self": "https://www.drupal.org/api-d7/node.json?page=0",
            "first": "https://www.drupal.org/api-d7/node.json?page=0",
            "last": "https://www.drupal.org/api-d7/node.json?page=4",
            "list": []
        }))
        .unwrap();

        assert!(nodes.list.is_empty());
        assert_eq!(
            nodes.last.as_deref(),
            Some("https://www.drupal.org/api-d7/node.json?page=4")
        );
    }
}
