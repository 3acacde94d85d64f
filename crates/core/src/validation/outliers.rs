//! Centroid-distance outlier detection.

use crate::point::SurveyData;
use crate::report::{IssueDetails, Severity, ValidationIssue};
use crate::spatial::{centroid, magnitude, standard_deviation};

use super::{CHECK_OUTLIERS, OUTLIER_SIGMA};

/// Warn about points more than 3 sigma from the centroid.
///
/// Sigma is computed over all points, outliers included, so a single far
/// point inflates its own threshold. Needs at least 3 points; coincident
/// point sets (sigma = 0) report nothing.
pub fn detect_outliers(data: &SurveyData) -> Vec<ValidationIssue> {
    if data.points.len() < 3 {
        return Vec::new();
    }

    let (ce, cn) = centroid(&data.points);
    let sigma = standard_deviation(&data.points, ce, cn);
    if sigma == 0.0 {
        return Vec::new();
    }
    let threshold = OUTLIER_SIGMA * sigma;

    data.points
        .iter()
        .filter_map(|p| {
            let dist = magnitude(p.easting - ce, p.northing - cn);
            (dist > threshold).then(|| {
                ValidationIssue::new(
                    CHECK_OUTLIERS,
                    Severity::Warning,
                    format!(
                        "Point {} may be an outlier ({dist:.1}m from centroid)",
                        p.point_id
                    ),
                )
                .with_points([p.point_id.as_str()])
                .with_details(IssueDetails::Outlier {
                    distance: dist,
                    threshold,
                })
            })
        })
        .collect()
}
