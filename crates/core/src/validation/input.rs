//! Basic sanity checks on the raw dataset.

use crate::point::SurveyData;
use crate::report::{Severity, ValidationIssue};

use super::CHECK_INPUT;

/// Flag empty datasets, missing identifiers, zero coordinates and unknown type tags.
///
/// An empty dataset yields a single error and nothing else.
pub fn validate_input(data: &SurveyData) -> Vec<ValidationIssue> {
    if data.points.is_empty() {
        return vec![ValidationIssue::new(
            CHECK_INPUT,
            Severity::Error,
            "No survey points provided",
        )];
    }

    let mut issues = Vec::new();
    for p in &data.points {
        if p.point_id.is_empty() {
            issues.push(ValidationIssue::new(
                CHECK_INPUT,
                Severity::Error,
                "Point found with empty Point ID",
            ));
        }

        if p.easting == 0.0 && p.northing == 0.0 {
            issues.push(
                ValidationIssue::new(
                    CHECK_INPUT,
                    Severity::Warning,
                    format!("Point {} has zero coordinates", p.point_id),
                )
                .with_points([p.point_id.as_str()]),
            );
        }

        match &p.survey_type {
            Some(tag) if !tag.is_known() && !tag.as_str().is_empty() => {
                issues.push(
                    ValidationIssue::new(
                        CHECK_INPUT,
                        Severity::Warning,
                        format!("Point {} has unknown type: {tag}", p.point_id),
                    )
                    .with_points([p.point_id.as_str()]),
                );
            }
            _ => {}
        }
    }
    issues
}
