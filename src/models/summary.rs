use chrono::NaiveDate;
use serde::Serialize;

/// Lifecycle of an issue, collapsed from drupal.org's workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Closed,
    Merged,
}

impl IssueStatus {
    /// drupal.org issue status ids: 2 (Fixed) and 7 (Closed (fixed)) count as
    /// merged work; 1 (Active), 13 (Needs work), 8 (Needs review), 14 (RTBC),
    /// 4 (Postponed) and 16 (Postponed (maintainer needs more info)) are
    /// still in flight; everything else is some flavor of closed, unknown
    /// ids included.
    pub fn from_code(code: u32) -> Self {
        match code {
            2 | 7 => IssueStatus::Merged,
            1 | 13 | 8 | 14 | 4 | 16 => IssueStatus::Open,
            _ => IssueStatus::Closed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Closed => "closed",
            IssueStatus::Merged => "merged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Calendar order, index 0 = January.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn abbr(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Month::Jan => "January",
            Month::Feb => "February",
            Month::Mar => "March",
            Month::Apr => "April",
            Month::May => "May",
            Month::Jun => "June",
            Month::Jul => "July",
            Month::Aug => "August",
            Month::Sep => "September",
            Month::Oct => "October",
            Month::Nov => "November",
            Month::Dec => "December",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyStat {
    pub month: Month,
    pub count: u64,
}

/// Where the year's effort went, or that there is nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectStats {
    MostActive {
        name: String,
        total_issues: u64,
        percentage: u32,
        description: String,
    },
    QuietYear {
        description: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub id: u64,
    pub title: String,
    pub project: String,
    pub created_at: NaiveDate,
    pub status: IssueStatus,
    pub labels: Vec<String>,
    pub comments: u64,
    pub url: String,
}

/// Normalized aggregate of one user's yearly issue activity. The 12 monthly
/// bucket counts sum to `issues.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearSummary {
    pub user_id: u64,
    pub user_name: String,
    pub year: i32,
    pub total_issues: u64,
    pub top_project: ProjectStats,
    pub issues: Vec<Issue>,
    pub monthly_stats: Vec<MonthlyStat>,
}

impl YearSummary {
    /// First maximum wins, so ties resolve to the earlier month.
    pub fn busiest_month(&self) -> Option<MonthlyStat> {
        self.monthly_stats
            .iter()
            .copied()
            .reduce(|max, cur| if cur.count > max.count { cur } else { max })
    }
}
