//! Traverse leg plausibility and loop-closure quality.
//!
//! Both checks only look at traverse-tagged points, in dataset order.

use crate::point::{SurveyData, SurveyPoint};
use crate::report::{IssueDetails, Severity, TraverseClosureDetails, ValidationIssue};
use crate::spatial::{bearing, bearing_difference, distance, magnitude};
use crate::types::{format_ratio, INFINITE_PRECISION};

use super::{
    ACCEPTABLE_PRECISION, CHECK_DISTANCE_BEARING, CHECK_TRAVERSE_CLOSURE, GOOD_PRECISION,
    LOOP_CLOSURE_FRACTION, MAX_BEARING_CHANGE, MAX_LEG_RATIO, MIN_LEG_DISTANCE, POOR_PRECISION,
};

// ---------------------------------------------------------------------------
// Distance & bearing
// ---------------------------------------------------------------------------

/// Flag very short legs, near U-turns and abrupt leg-length changes.
pub fn check_distance_and_bearing(data: &SurveyData) -> Vec<ValidationIssue> {
    let pts = data.traverse_points();
    let mut issues = Vec::new();
    if pts.len() < 2 {
        return issues;
    }

    let mut previous: Option<(f64, f64)> = None;
    for pair in pts.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dist = distance(p1, p2);
        let leg_bearing = bearing(p1, p2);
        let ids = [p1.point_id.as_str(), p2.point_id.as_str()];

        if dist < MIN_LEG_DISTANCE {
            issues.push(
                ValidationIssue::new(
                    CHECK_DISTANCE_BEARING,
                    Severity::Warning,
                    format!(
                        "Very short distance between {} and {}: {dist:.4}m",
                        p1.point_id, p2.point_id
                    ),
                )
                .with_points(ids)
                .with_details(IssueDetails::Distance { distance: dist }),
            );
        }

        if let Some((prev_bearing, prev_dist)) = previous {
            let change = bearing_difference(leg_bearing, prev_bearing);
            if change > MAX_BEARING_CHANGE {
                issues.push(
                    ValidationIssue::new(
                        CHECK_DISTANCE_BEARING,
                        Severity::Warning,
                        format!("Large bearing change at {}: {change:.1}\u{b0}", p1.point_id),
                    )
                    .with_points(ids),
                );
            }

            if prev_dist > 0.0 {
                let ratio = dist / prev_dist;
                if ratio > MAX_LEG_RATIO || ratio < 1.0 / MAX_LEG_RATIO {
                    issues.push(
                        ValidationIssue::new(
                            CHECK_DISTANCE_BEARING,
                            Severity::Info,
                            format!("Unusual distance ratio at {}: {ratio:.1}", p1.point_id),
                        )
                        .with_points(ids),
                    );
                }
            }
        }

        previous = Some((leg_bearing, dist));
    }
    issues
}

// ---------------------------------------------------------------------------
// Closure
// ---------------------------------------------------------------------------

/// Quality band of a relative precision.
pub fn closure_quality(precision: f64) -> (Severity, &'static str) {
    if precision >= GOOD_PRECISION {
        (Severity::Info, "Good (better than 1:10000)")
    } else if precision >= ACCEPTABLE_PRECISION {
        (Severity::Info, "Acceptable (1:5000 to 1:10000)")
    } else if precision >= POOR_PRECISION {
        (Severity::Warning, "Poor (1:1000 to 1:5000)")
    } else {
        (Severity::Error, "Unacceptable (worse than 1:1000)")
    }
}

/// Sum of consecutive leg lengths.
pub fn path_length(points: &[&SurveyPoint]) -> f64 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Grade the closure of a looped traverse.
///
/// Needs 3+ traverse points. If the ends are 10% of the path length or more
/// apart, the points are not a loop and nothing is reported.
pub fn check_traverse_closure(data: &SurveyData) -> Vec<ValidationIssue> {
    let pts = data.traverse_points();
    if pts.len() < 3 {
        return Vec::new();
    }

    let first = pts[0];
    let last = pts[pts.len() - 1];
    let total_length = path_length(&pts);
    if distance(first, last) >= total_length * LOOP_CLOSURE_FRACTION {
        return Vec::new();
    }

    let misc_e = last.easting - first.easting;
    let misc_n = last.northing - first.northing;
    let linear = magnitude(misc_e, misc_n);
    let precision = if linear > 0.0 {
        total_length / linear
    } else {
        INFINITE_PRECISION
    };
    let ratio = format_ratio(precision);
    let (severity, quality) = closure_quality(precision);

    vec![ValidationIssue::new(
        CHECK_TRAVERSE_CLOSURE,
        severity,
        format!("Traverse closure: {linear:.4}m misclosure, {ratio} precision ({quality})"),
    )
    .with_points([first.point_id.as_str(), last.point_id.as_str()])
    .with_details(IssueDetails::Closure(TraverseClosureDetails {
        misclosure_easting: misc_e,
        misclosure_northing: misc_n,
        linear_misclosure: linear,
        traverse_length: total_length,
        relative_precision: ratio,
        quality: quality.to_string(),
    }))]
}
