pub mod timestamp;
pub mod types;

pub use timestamp::Timestamp;
pub use types::{
    MockData, PrState, PullRequest, Repository, RepositoryAnalytics, ResolutionStatus,
    RiskLevel, RiskiestRepository, SecurityFinding, Severity, SummaryAnalytics, User,
};
