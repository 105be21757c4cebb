use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a finding. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Safe => write!(f, "Safe"),
            RiskLevel::Warning => write!(f, "Warning"),
            RiskLevel::Danger => write!(f, "Danger"),
        }
    }
}

/// One discrete risk statement produced by a rule match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub level: RiskLevel,
    /// Human-readable headline.
    pub title: String,
    /// What was detected.
    pub message: String,
    /// What to do about it.
    pub recommendation: String,
}

impl RiskFinding {
    /// The finding emitted when nothing in the profile conflicts with the food.
    pub fn safe_default() -> Self {
        RiskFinding {
            level: RiskLevel::Safe,
            title: "SAFE TO CONSUME".into(),
            message: "No allergens or health condition conflicts detected.".into(),
            recommendation: "This product appears safe based on your health profile. Enjoy in moderation as part of a balanced diet.".into(),
        }
    }
}

/// Full assessment of one scanned food against one health profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Findings in evaluation order; never empty.
    pub findings: Vec<RiskFinding>,
    /// The most severe level among the findings.
    pub overall_level: RiskLevel,
    /// 0-100, higher is safer.
    pub safety_score: u8,
}

impl RiskReport {
    /// Build a report from findings in evaluation order.
    ///
    /// An empty list is replaced by the single safe default finding.
    pub fn from_findings(mut findings: Vec<RiskFinding>) -> Self {
        if findings.is_empty() {
            findings.push(RiskFinding::safe_default());
        }
        let overall_level = findings
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(RiskLevel::Safe);
        let dangers = count_level(&findings, RiskLevel::Danger);
        let warnings = count_level(&findings, RiskLevel::Warning);
        RiskReport {
            findings,
            overall_level,
            safety_score: safety_score(dangers, warnings),
        }
    }

    pub fn danger_count(&self) -> usize {
        count_level(&self.findings, RiskLevel::Danger)
    }

    pub fn warning_count(&self) -> usize {
        count_level(&self.findings, RiskLevel::Warning)
    }
}

/// Aggregate safety score from finding counts.
///
/// Dangers dominate: `max(10, 40 - 20 * dangers)`. Otherwise warnings give
/// `max(50, 80 - 10 * warnings)`. No findings of either kind scores 95.
pub fn safety_score(danger_count: usize, warning_count: usize) -> u8 {
    let score = if danger_count > 0 {
        40usize.saturating_sub(20usize.saturating_mul(danger_count)).max(10)
    } else if warning_count > 0 {
        80usize.saturating_sub(10usize.saturating_mul(warning_count)).max(50)
    } else {
        95
    };
    score as u8
}

fn count_level(findings: &[RiskFinding], level: RiskLevel) -> usize {
    findings.iter().filter(|f| f.level == level).count()
}
