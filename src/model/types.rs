use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Timestamp;

/// Severity of a single security finding, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Contribution of one finding of this severity to a risk score.
    pub fn weight(self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::High => 5,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical"),
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

/// Risk tier derived from a pull request's score. `None` only when it has no findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::None => write!(f, "None"),
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
}

/// Workflow label for how a pull request's findings are being handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Fix in Progress")]
    FixInProgress,
    Resolved,
    #[serde(rename = "Risk Accepted")]
    RiskAccepted,
}

impl ResolutionStatus {
    /// Statuses an open pull request can be in.
    pub const NON_TERMINAL: [ResolutionStatus; 2] =
        [ResolutionStatus::NeedsReview, ResolutionStatus::FixInProgress];
}

/// A platform account, shaped like the GitHub REST user object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u32,
    pub avatar_url: String,
    pub html_url: String,
}

/// One comment left by the security bot on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub id: Uuid,
    pub severity: Severity,
    pub vulnerability_type: String,
    pub file_path: String,
    pub line_number: u32,
    pub comment_created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: u32,
    /// Sequence number within the repository, starting at 101
    pub number: u32,
    pub title: String,
    pub state: PrState,
    pub resolution_status: ResolutionStatus,
    pub html_url: String,
    /// Author
    pub user: User,
    pub created_at: Timestamp,
    pub additions: u32,
    pub deletions: u32,
    /// Zero or one assignee
    pub assignees: Vec<User>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub security_analysis: Vec<SecurityFinding>,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PrState::Open
    }
}

/// Finding counts keyed by severity. Serialized with the severity names as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VulnerabilityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl VulnerabilityCounts {
    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn increment(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryAnalytics {
    pub total_prs: usize,
    pub open_prs_with_vulnerabilities: usize,
    /// Sum of the risk scores of every pull request in the repository
    pub risk_score: u32,
    /// Findings on open pull requests with nonzero risk
    pub vulnerability_counts: VulnerabilityCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u32,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub private: bool,
    pub pull_requests: Vec<PullRequest>,
    /// Zeroed until the analytics pass runs
    pub analytics: RepositoryAnalytics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskiestRepository {
    pub name: String,
    pub risk_score: u32,
}

/// Organization-wide rollup across all repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryAnalytics {
    pub total_repositories: usize,
    pub total_pull_requests: usize,
    pub open_prs_with_vulnerabilities: usize,
    pub vulnerability_counts: VulnerabilityCounts,
    /// At most three, highest summed risk first
    pub riskiest_repositories: Vec<RiskiestRepository>,
}

/// The complete document served to the dashboard as mock-data.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockData {
    pub summary_analytics: SummaryAnalytics,
    pub repositories: Vec<Repository>,
}
