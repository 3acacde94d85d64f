//! Duplicate and near-duplicate point detection.

use crate::point::SurveyData;
use crate::report::{IssueDetails, Severity, ValidationIssue};
use crate::spatial::distance;

use super::{CHECK_DUPLICATES, DUPLICATE_THRESHOLD, NEAR_DUPLICATE_THRESHOLD};

/// Compare every unordered pair of points exactly once.
///
/// Closer than 1 mm is an error, closer than 1 cm a warning. O(n^2).
pub fn detect_duplicates(data: &SurveyData) -> Vec<ValidationIssue> {
    let points = &data.points;
    let mut issues = Vec::new();

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let dist = distance(a, b);
            let (severity, label) = if dist < DUPLICATE_THRESHOLD {
                (Severity::Error, "Duplicate")
            } else if dist < NEAR_DUPLICATE_THRESHOLD {
                (Severity::Warning, "Near-duplicate")
            } else {
                continue;
            };

            issues.push(
                ValidationIssue::new(
                    CHECK_DUPLICATES,
                    severity,
                    format!(
                        "{label} points: {} and {} ({dist:.4}m apart)",
                        a.point_id, b.point_id
                    ),
                )
                .with_points([a.point_id.as_str(), b.point_id.as_str()])
                .with_details(IssueDetails::Distance { distance: dist }),
            );
        }
    }
    issues
}
