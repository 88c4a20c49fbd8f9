use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::model::{MockData, Repository, RiskLevel, Severity};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write mock data file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to serialize mock data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the document as pretty-printed JSON (two-space indent).
///
/// Missing parent directories are created. Nothing is written if
/// serialization fails.
#[instrument(skip_all, fields(path = %path.display(), repositories = data.repositories.len()))]
pub fn write(data: &MockData, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(data)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    debug!("wrote mock data file");
    Ok(())
}

/// Print an overview of the generated dataset to the terminal.
pub fn print_summary(data: &MockData, organization: &str) {
    println!();
    for line in summary_lines(data, organization) {
        println!("{}", line);
    }
    println!();
}

/// Lines of the terminal overview:
///
/// ═══ secure-corp: 8 repositories, 75 pull requests ═══
/// Open PRs with vulnerabilities: 31
/// Critical: 12 | High: 9 | Medium: 14 | Low: 11 (46 findings on open PRs)
///
/// Riskiest repositories:
///   1. auth-core (risk score 58)
///   ...
fn summary_lines(data: &MockData, organization: &str) -> Vec<String> {
    let summary = &data.summary_analytics;
    let mut lines = vec![
        format!(
            "═══ {}: {} repositories, {} pull requests ═══",
            organization, summary.total_repositories, summary.total_pull_requests
        ),
        format!(
            "Open PRs with vulnerabilities: {}",
            summary.open_prs_with_vulnerabilities
        ),
    ];

    let counts: Vec<String> = Severity::ALL
        .iter()
        .map(|&s| format!("{}: {}", colorize_severity(s), summary.vulnerability_counts.get(s)))
        .collect();
    lines.push(format!(
        "{} ({} findings on open PRs)",
        counts.join(" | "),
        summary.vulnerability_counts.total()
    ));
    lines.push(String::new());

    if summary.riskiest_repositories.is_empty() {
        lines.push("  No repositories.".to_string());
    } else {
        lines.push("Riskiest repositories:".to_string());
        for (rank, risky) in summary.riskiest_repositories.iter().enumerate() {
            lines.push(format!(
                "  {}. {} (risk score {})",
                rank + 1,
                risky.name,
                risky.risk_score
            ));
        }
    }
    lines.push(String::new());

    for repo in &data.repositories {
        lines.push(format!(
            "  • {} [{}] {} PRs, risk score {}, highest PR risk {}",
            repo.full_name,
            if repo.private { "private" } else { "public" },
            repo.analytics.total_prs,
            repo.analytics.risk_score,
            colorize_risk(highest_risk(repo))
        ));
    }
    lines
}

/// Highest risk level among a repository's pull requests.
fn highest_risk(repo: &Repository) -> RiskLevel {
    repo.pull_requests
        .iter()
        .map(|pr| pr.risk_level)
        .max()
        .unwrap_or(RiskLevel::None)
}

fn colorize_severity(severity: Severity) -> colored::ColoredString {
    let label = severity.to_string();
    match severity {
        Severity::Critical => label.red().bold(),
        Severity::High => label.yellow().bold(),
        Severity::Medium => label.blue().bold(),
        Severity::Low => label.cyan(),
    }
}

fn colorize_risk(level: RiskLevel) -> colored::ColoredString {
    let label = level.to_string().to_uppercase();
    match level {
        RiskLevel::Critical => label.red().bold(),
        RiskLevel::High => label.yellow().bold(),
        RiskLevel::Medium => label.blue().bold(),
        RiskLevel::Low => label.cyan(),
        RiskLevel::None => label.green(),
    }
}
