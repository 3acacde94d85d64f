//! Validation engine: runs the check registry concurrently and folds the
//! results into one deterministic report.

use std::time::Instant;

use rayon::prelude::*;

use crate::point::SurveyData;
use crate::report::{Severity, ValidationIssue, ValidationReport};
use crate::traverse::{adjust_traverse, TraverseOptions, CHECK_BOWDITCH, MIN_TRAVERSE_POINTS};
use crate::validation::duplicates::detect_duplicates;
use crate::validation::geometry::{check_distance_and_bearing, check_traverse_closure};
use crate::validation::input::validate_input;
use crate::validation::outliers::detect_outliers;
use crate::validation::summary::summarize;
use crate::validation::{
    CHECK_DISTANCE_BEARING, CHECK_DUPLICATES, CHECK_INPUT, CHECK_OUTLIERS, CHECK_TRAVERSE_CLOSURE,
};

/// Signature shared by every check.
pub type CheckFn = fn(&SurveyData) -> Vec<ValidationIssue>;

/// A named entry in the check registry.
#[derive(Debug, Clone, Copy)]
pub struct RegisteredCheck {
    pub name: &'static str,
    pub run: CheckFn,
}

/// Output of one check, tagged with its name for ordering.
struct CheckOutcome {
    name: &'static str,
    issues: Vec<ValidationIssue>,
}

pub struct ValidationEngine {
    checks: Vec<RegisteredCheck>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Engine with the five standard checks registered.
    pub fn new() -> Self {
        let mut engine = Self { checks: Vec::new() };
        engine.register(CHECK_INPUT, validate_input);
        engine.register(CHECK_DUPLICATES, detect_duplicates);
        engine.register(CHECK_DISTANCE_BEARING, check_distance_and_bearing);
        engine.register(CHECK_OUTLIERS, detect_outliers);
        engine.register(CHECK_TRAVERSE_CLOSURE, check_traverse_closure);
        engine
    }

    pub fn register(&mut self, name: &'static str, run: CheckFn) {
        self.checks.push(RegisteredCheck { name, run });
    }

    pub fn checks(&self) -> &[RegisteredCheck] {
        &self.checks
    }

    /// Validate with the default traverse precision.
    pub fn validate(&self, data: &SurveyData) -> ValidationReport {
        self.validate_with_options(data, None)
    }

    /// Run every check, summarize, and adjust the traverse when enough
    /// traverse points exist.
    ///
    /// The report content is identical regardless of which check finishes
    /// first: outcomes are ordered by check name before being folded in.
    pub fn validate_with_options(
        &self,
        data: &SurveyData,
        options: Option<&TraverseOptions>,
    ) -> ValidationReport {
        let started = Instant::now();
        let mut report = ValidationReport::new(&data.project_id);

        let mut outcomes: Vec<CheckOutcome> = self
            .checks
            .par_iter()
            .map(|check| {
                let issues = (check.run)(data);
                tracing::debug!(check = check.name, issues = issues.len(), "Check completed");
                CheckOutcome {
                    name: check.name,
                    issues,
                }
            })
            .collect();
        outcomes.sort_by(|a, b| a.name.cmp(b.name));

        for outcome in outcomes {
            report.checks_performed.push(outcome.name.to_string());
            for issue in outcome.issues {
                report.add_issue(issue);
            }
        }

        report.summary = summarize(data);

        if report.summary.traverse_points >= MIN_TRAVERSE_POINTS {
            report.traverse_result = Some(adjust_traverse(data, options));
            report.checks_performed.push(CHECK_BOWDITCH.to_string());
        }

        report.calculate_confidence_score();
        let elapsed = started.elapsed();
        report.processing_time = format!("{elapsed:?}");

        tracing::info!(
            project_id = %report.project_id,
            status = ?report.status,
            confidence = report.confidence_score,
            errors = report.count_by_severity(Severity::Error),
            warnings = report.count_by_severity(Severity::Warning),
            issues = report.issues.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Validation completed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{SurveyPoint, SurveyType};
    use crate::report::ReportStatus;
    use crate::traverse::AdjustmentStatus;
    use assert_matches::assert_matches;

    fn closed_square() -> SurveyData {
        SurveyData::new(
            "SQUARE",
            vec![
                SurveyPoint::traverse("A", 1000.0, 1000.0),
                SurveyPoint::traverse("B", 1100.0, 1000.0),
                SurveyPoint::traverse("C", 1100.0, 1100.0),
                SurveyPoint::traverse("D", 1000.0, 1100.0),
                SurveyPoint::traverse("A", 1000.0, 1000.0),
            ],
        )
    }

    fn messy() -> SurveyData {
        let mut points = vec![
            SurveyPoint::traverse("P1", 500.0, 500.0),
            SurveyPoint::traverse("P2", 500.0005, 500.0),
            SurveyPoint::traverse("P3", 500.005, 500.0),
            SurveyPoint::traverse("", 0.0, 0.0),
        ];
        points.push(SurveyPoint {
            point_id: "X".into(),
            easting: 520.0,
            northing: 530.0,
            height: None,
            survey_type: Some(SurveyType::Unknown("mystery".into())),
        });
        SurveyData::new("MESSY", points)
    }

    #[test]
    fn registers_five_checks() {
        let engine = ValidationEngine::new();
        assert_eq!(engine.checks().len(), 5);
    }

    #[test]
    fn empty_dataset_fails() {
        let report = ValidationEngine::new().validate(&SurveyData::new("EMPTY", vec![]));
        assert_eq!(report.status, ReportStatus::Fail);
        assert_eq!(report.count_by_severity(Severity::Error), 1);
        assert!(report.traverse_result.is_none());
        assert_eq!(report.checks_performed.len(), 5);
    }

    #[test]
    fn checks_performed_are_sorted_with_adjustment_last() {
        let report = ValidationEngine::new().validate(&closed_square());
        assert_eq!(
            report.checks_performed,
            vec![
                CHECK_DISTANCE_BEARING,
                CHECK_DUPLICATES,
                CHECK_INPUT,
                CHECK_OUTLIERS,
                CHECK_TRAVERSE_CLOSURE,
                CHECK_BOWDITCH,
            ]
        );
        let traverse = report.traverse_result.expect("traverse adjusted");
        assert_matches!(traverse.status, AdjustmentStatus::Pass);
    }

    #[test]
    fn report_content_is_deterministic() {
        let engine = ValidationEngine::new();
        let data = messy();
        let first = engine.validate(&data);
        for _ in 0..20 {
            let again = engine.validate(&data);
            assert_eq!(again.issues, first.issues);
            assert_eq!(again.checks_performed, first.checks_performed);
            assert_eq!(again.status, first.status);
            assert_eq!(again.confidence_score, first.confidence_score);
        }
    }

    #[test]
    fn confidence_matches_issue_penalties() {
        let report = ValidationEngine::new().validate(&messy());
        let expected = 100.0
            - 15.0 * report.count_by_severity(Severity::Error) as f64
            - 5.0 * report.count_by_severity(Severity::Warning) as f64
            - report.count_by_severity(Severity::Info) as f64;
        assert_eq!(report.confidence_score, expected.max(0.0));
        assert_eq!(report.status, ReportStatus::Fail);
    }

    #[test]
    fn issues_are_grouped_by_check_name() {
        let report = ValidationEngine::new().validate(&messy());
        let names: Vec<&str> = report.issues.iter().map(|i| i.check_name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn too_few_traverse_points_skips_adjustment() {
        let data = SurveyData::new(
            "PAIR",
            vec![
                SurveyPoint::traverse("A", 100.0, 100.0),
                SurveyPoint::traverse("B", 200.0, 100.0),
            ],
        );
        let report = ValidationEngine::new().validate(&data);
        assert!(report.traverse_result.is_none());
        assert!(!report.checks_performed.iter().any(|c| c == CHECK_BOWDITCH));
    }

    #[test]
    fn options_reach_the_adjustment() {
        let options = TraverseOptions {
            required_precision: Some(20000.0),
            tolerance_class: None,
        };
        let report = ValidationEngine::new().validate_with_options(&closed_square(), Some(&options));
        let traverse = report.traverse_result.expect("traverse adjusted");
        assert_eq!(traverse.required_precision, 20000.0);
    }

    #[test]
    fn processing_time_is_recorded() {
        let report = ValidationEngine::new().validate(&closed_square());
        assert!(!report.processing_time.is_empty());
    }
}
