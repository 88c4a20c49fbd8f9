use crate::model::{RiskLevel, SecurityFinding};

/// Score a pull request from its findings.
///
/// The score is the sum of severity weights. Only an empty list yields
/// `RiskLevel::None`; any finding puts the pull request at `Low` or above.
pub fn score(findings: &[SecurityFinding]) -> (u32, RiskLevel) {
    if findings.is_empty() {
        return (0, RiskLevel::None);
    }

    let score: u32 = findings.iter().map(|f| f.severity.weight()).sum();
    let level = match score {
        s if s >= 15 => RiskLevel::Critical,
        s if s >= 8 => RiskLevel::High,
        s if s >= 2 => RiskLevel::Medium,
        _ => RiskLevel::Low,
    };
    (score, level)
}
