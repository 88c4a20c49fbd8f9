use tracing::{debug, instrument};

use crate::model::{
    MockData, Repository, RepositoryAnalytics, RiskiestRepository, SummaryAnalytics,
};

/// How many repositories the summary ranks.
const RISKIEST_LIMIT: usize = 3;

/// Fill in per-repository analytics and wrap everything in the final document.
///
/// Only open pull requests with a nonzero risk score count towards
/// `open_prs_with_vulnerabilities` and the severity counts; the summed risk
/// score covers every pull request.
#[instrument(skip_all, fields(repositories = repositories.len()))]
pub fn build(mut repositories: Vec<Repository>) -> MockData {
    let mut summary = SummaryAnalytics {
        total_repositories: repositories.len(),
        ..SummaryAnalytics::default()
    };

    for repo in &mut repositories {
        let mut analytics = RepositoryAnalytics {
            total_prs: repo.pull_requests.len(),
            ..RepositoryAnalytics::default()
        };

        for pr in &repo.pull_requests {
            analytics.risk_score += pr.risk_score;
            if pr.is_open() && pr.risk_score > 0 {
                analytics.open_prs_with_vulnerabilities += 1;
                for finding in &pr.security_analysis {
                    analytics.vulnerability_counts.increment(finding.severity);
                    summary.vulnerability_counts.increment(finding.severity);
                }
            }
        }

        summary.total_pull_requests += analytics.total_prs;
        summary.open_prs_with_vulnerabilities += analytics.open_prs_with_vulnerabilities;
        debug!(
            repo = %repo.name,
            risk_score = analytics.risk_score,
            open_vulnerable = analytics.open_prs_with_vulnerabilities,
            "repository analytics"
        );
        repo.analytics = analytics;
    }

    summary.riskiest_repositories = riskiest(&repositories);

    MockData {
        summary_analytics: summary,
        repositories,
    }
}

/// Top repositories by summed risk, highest first. Ties keep creation order.
fn riskiest(repositories: &[Repository]) -> Vec<RiskiestRepository> {
    let mut ranked: Vec<&Repository> = repositories.iter().collect();
    ranked.sort_by(|a, b| b.analytics.risk_score.cmp(&a.analytics.risk_score));
    ranked
        .into_iter()
        .take(RISKIEST_LIMIT)
        .map(|repo| RiskiestRepository {
            name: repo.name.clone(),
            risk_score: repo.analytics.risk_score,
        })
        .collect()
}
