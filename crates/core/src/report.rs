//! Validation report, issue and summary types, plus status/score folding.

use serde::{Deserialize, Serialize};

use crate::traverse::TraverseResult;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Confidence penalties
// ---------------------------------------------------------------------------

/// Starting confidence score for a report with no issues.
pub const MAX_CONFIDENCE: f64 = 100.0;
pub const ERROR_PENALTY: f64 = 15.0;
pub const WARNING_PENALTY: f64 = 5.0;
pub const INFO_PENALTY: f64 = 1.0;

// ---------------------------------------------------------------------------
// Severity & status
// ---------------------------------------------------------------------------

/// How serious a single issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Confidence points deducted for one issue of this severity.
    pub fn penalty(self) -> f64 {
        match self {
            Self::Error => ERROR_PENALTY,
            Self::Warning => WARNING_PENALTY,
            Self::Info => INFO_PENALTY,
        }
    }
}

/// Overall report outcome. Ordered so that `max` is a downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pass,
    Warning,
    Fail,
}

impl ReportStatus {
    /// Status after folding in one more issue. Never upgrades.
    pub fn absorb(self, severity: Severity) -> Self {
        let floor = match severity {
            Severity::Error => Self::Fail,
            Severity::Warning => Self::Warning,
            Severity::Info => Self::Pass,
        };
        self.max(floor)
    }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// Misclosure breakdown attached to a traverse-closure issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraverseClosureDetails {
    pub misclosure_easting: f64,
    pub misclosure_northing: f64,
    pub linear_misclosure: f64,
    pub traverse_length: f64,
    pub relative_precision: String,
    pub quality: String,
}

/// Check-specific payload. Each check attaches a different shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueDetails {
    /// Outlier distance from the centroid and the threshold it exceeded.
    Outlier { distance: f64, threshold: f64 },
    Closure(TraverseClosureDetails),
    /// A single measured distance (duplicates, short legs).
    Distance { distance: f64 },
}

/// A single finding produced by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub check_name: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub point_ids: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<IssueDetails>,
}

impl ValidationIssue {
    pub fn new(check_name: &str, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            check_name: check_name.to_string(),
            severity,
            point_ids: Vec::new(),
            description: description.into(),
            details: None,
        }
    }

    pub fn with_points<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.point_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_details(mut self, details: IssueDetails) -> Self {
        self.details = Some(details);
        self
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Axis-aligned extent of a point set. All zero for an empty set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_easting: f64,
    pub max_easting: f64,
    pub min_northing: f64,
    pub max_northing: f64,
}

/// Derived statistics, recomputed on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_points: usize,
    pub traverse_points: usize,
    pub control_points: usize,
    pub detail_points: usize,
    pub points_with_height: usize,
    pub bounding_box: BoundingBox,
    pub centroid_easting: f64,
    pub centroid_northing: f64,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// The assembled result of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub project_id: String,
    pub timestamp: Timestamp,
    pub status: ReportStatus,
    pub confidence_score: f64,
    pub summary: SummaryStatistics,
    pub issues: Vec<ValidationIssue>,
    pub checks_performed: Vec<String>,
    pub processing_time: String,
    #[serde(
        rename = "traverse_adjustment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub traverse_result: Option<TraverseResult>,
}

impl ValidationReport {
    /// Start a report at PASS with full confidence.
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            timestamp: chrono::Utc::now(),
            status: ReportStatus::Pass,
            confidence_score: MAX_CONFIDENCE,
            summary: SummaryStatistics::default(),
            issues: Vec::new(),
            checks_performed: Vec::new(),
            processing_time: String::new(),
            traverse_result: None,
        }
    }

    /// Append an issue, downgrading the status if needed.
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.status = self.status.absorb(issue.severity);
        self.issues.push(issue);
    }

    /// Recompute the score from the current issues: linear penalties, floored at 0.
    pub fn calculate_confidence_score(&mut self) {
        let penalty: f64 = self.issues.iter().map(|i| i.severity.penalty()).sum();
        self.confidence_score = (MAX_CONFIDENCE - penalty).max(0.0);
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity) -> ValidationIssue {
        ValidationIssue::new("test", severity, "test issue")
    }

    #[test]
    fn new_report_starts_at_pass() {
        let report = ValidationReport::new("TEST");
        assert_eq!(report.status, ReportStatus::Pass);
        assert_eq!(report.confidence_score, 100.0);
    }

    #[test]
    fn add_issue_downgrades_status() {
        let mut report = ValidationReport::new("TEST");
        report.add_issue(issue(Severity::Info));
        assert_eq!(report.status, ReportStatus::Pass);
        report.add_issue(issue(Severity::Warning));
        assert_eq!(report.status, ReportStatus::Warning);
        report.add_issue(issue(Severity::Error));
        assert_eq!(report.status, ReportStatus::Fail);
        assert_eq!(report.issues.len(), 3);
    }

    #[test]
    fn fail_is_sticky() {
        let mut report = ValidationReport::new("TEST");
        report.add_issue(issue(Severity::Error));
        report.add_issue(issue(Severity::Warning));
        report.add_issue(issue(Severity::Info));
        assert_eq!(report.status, ReportStatus::Fail);
    }

    #[test]
    fn status_is_independent_of_arrival_order() {
        let orders = [
            [Severity::Error, Severity::Warning, Severity::Info],
            [Severity::Info, Severity::Error, Severity::Warning],
            [Severity::Warning, Severity::Info, Severity::Error],
        ];
        for order in orders {
            let mut report = ValidationReport::new("TEST");
            for s in order {
                report.add_issue(issue(s));
            }
            assert_eq!(report.status, ReportStatus::Fail);
        }
    }

    #[test]
    fn confidence_is_linear_sum_of_penalties() {
        let mut report = ValidationReport::new("TEST");
        report.calculate_confidence_score();
        assert_eq!(report.confidence_score, 100.0);

        report.add_issue(issue(Severity::Error));
        report.add_issue(issue(Severity::Warning));
        report.add_issue(issue(Severity::Info));
        report.calculate_confidence_score();
        assert_eq!(report.confidence_score, 100.0 - 15.0 - 5.0 - 1.0);
    }

    #[test]
    fn confidence_is_monotonic_and_floored_at_zero() {
        let mut report = ValidationReport::new("TEST");
        let mut previous = 100.0;
        for _ in 0..10 {
            report.add_issue(issue(Severity::Error));
            report.calculate_confidence_score();
            assert!(report.confidence_score <= previous);
            previous = report.confidence_score;
        }
        assert_eq!(report.confidence_score, 0.0);
    }

    #[test]
    fn issue_serialization_omits_empty_fields() {
        let json = serde_json::to_value(issue(Severity::Warning)).unwrap();
        assert_eq!(json["severity"], "warning");
        assert!(json.get("point_ids").is_none());
        assert!(json.get("details").is_none());

        let with_details = issue(Severity::Error)
            .with_points(["A", "B"])
            .with_details(IssueDetails::Distance { distance: 0.0004 });
        let json = serde_json::to_value(with_details).unwrap();
        assert_eq!(json["point_ids"][1], "B");
        assert_eq!(json["details"]["distance"], 0.0004);
    }

    #[test]
    fn report_serializes_status_uppercase_and_omits_missing_traverse() {
        let report = ValidationReport::new("TEST");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "PASS");
        assert!(json.get("traverse_adjustment").is_none());
    }
}
