//! Bowditch (compass rule) traverse adjustment.
//!
//! Legs are derived from consecutive traverse-tagged points. The linear
//! misclosure is spread over the legs in proportion to their length, on the
//! assumption that distance error dominates angular error. The first station
//! is held fixed.

use serde::{Deserialize, Serialize};

use crate::point::{SurveyData, SurveyPoint};
use crate::spatial::{bearing_from_delta, distance, magnitude};
use crate::tolerance::{ToleranceClass, DEFAULT_REQUIRED_PRECISION};
use crate::types::{format_ratio, round3, round4, INFINITE_PRECISION};
use crate::validation::LOOP_CLOSURE_FRACTION;

/// Name recorded in `checks_performed` when the adjustment runs.
pub const CHECK_BOWDITCH: &str = "bowditch_adjustment";

/// Minimum traverse points needed to adjust.
pub const MIN_TRAVERSE_POINTS: usize = 3;
/// End points closer than this (1 mm) are the same station.
pub const SAME_STATION_TOLERANCE: f64 = 0.001;
/// Leg corrections above this (1 cm) are worth naming in a hint.
pub const SIGNIFICANT_CORRECTION: f64 = 0.01;
/// One misclosure component "dominates" when it exceeds the other by this factor.
pub const DOMINANCE_FACTOR: f64 = 2.0;
/// Legs shorter than this fraction of the mean leg are angle-sensitive.
pub const SHORT_LEG_FRACTION: f64 = 0.3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraverseType {
    /// Returns to its start, or ends close enough to be a loop.
    Closed,
    /// Ends away from its start; misclosure is only a description of the gap.
    Open,
}

/// Outcome of an adjustment or level reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdjustmentStatus {
    Pass,
    Fail,
    /// Not enough data to compute anything.
    Error,
}

/// One directed leg between consecutive stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraverseLeg {
    pub from_point: String,
    pub to_point: String,
    pub distance: f64,
    pub bearing: f64,
    pub delta_e: f64,
    pub delta_n: f64,
    pub correction_e: f64,
    pub correction_n: f64,
    pub adjusted_delta_e: f64,
    pub adjusted_delta_n: f64,
}

impl TraverseLeg {
    fn between(from: &SurveyPoint, to: &SurveyPoint) -> Self {
        let delta_e = to.easting - from.easting;
        let delta_n = to.northing - from.northing;
        Self {
            from_point: from.point_id.clone(),
            to_point: to.point_id.clone(),
            distance: magnitude(delta_e, delta_n),
            bearing: bearing_from_delta(delta_e, delta_n),
            delta_e,
            delta_n,
            correction_e: 0.0,
            correction_n: 0.0,
            adjusted_delta_e: delta_e,
            adjusted_delta_n: delta_n,
        }
    }

    pub fn correction_magnitude(&self) -> f64 {
        magnitude(self.correction_e, self.correction_n)
    }
}

/// Adjusted coordinates of one station and how far they moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedPoint {
    pub point_id: String,
    pub raw_easting: f64,
    pub raw_northing: f64,
    pub adjusted_easting: f64,
    pub adjusted_northing: f64,
    pub residual_e: f64,
    pub residual_n: f64,
    pub residual_distance: f64,
}

impl AdjustedPoint {
    fn held_fixed(p: &SurveyPoint) -> Self {
        Self {
            point_id: p.point_id.clone(),
            raw_easting: p.easting,
            raw_northing: p.northing,
            adjusted_easting: p.easting,
            adjusted_northing: p.northing,
            residual_e: 0.0,
            residual_n: 0.0,
            residual_distance: 0.0,
        }
    }
}

/// Full adjustment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraverseResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traverse_type: Option<TraverseType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub traverse_type_desc: String,

    pub sum_delta_e: f64,
    pub sum_delta_n: f64,
    pub linear_misclosure: f64,
    pub total_distance: f64,
    pub closure_ratio: String,
    pub precision: f64,

    /// Index into `legs` of the longest leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_leg: Option<usize>,
    pub legs: Vec<TraverseLeg>,
    pub adjusted_points: Vec<AdjustedPoint>,

    pub status: AdjustmentStatus,
    pub required_precision: f64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_fixes: Vec<String>,
}

impl TraverseResult {
    fn error(required_precision: f64, message: impl Into<String>) -> Self {
        Self {
            traverse_type: None,
            traverse_type_desc: String::new(),
            sum_delta_e: 0.0,
            sum_delta_n: 0.0,
            linear_misclosure: 0.0,
            total_distance: 0.0,
            closure_ratio: String::new(),
            precision: 0.0,
            longest_leg: None,
            legs: Vec::new(),
            adjusted_points: Vec::new(),
            status: AdjustmentStatus::Error,
            required_precision,
            message: message.into(),
            suggested_fixes: Vec::new(),
        }
    }
}

/// Caller overrides for the adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraverseOptions {
    /// Required relative precision, the N in 1:N.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_precision: Option<f64>,
    /// Used for the requirement when no explicit precision is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_class: Option<ToleranceClass>,
}

impl TraverseOptions {
    /// Explicit precision, else the class requirement, else 1:5000.
    ///
    /// Non-positive or non-finite overrides are ignored.
    pub fn required_precision(&self) -> f64 {
        self.required_precision
            .filter(|p| p.is_finite() && *p > 0.0)
            .or_else(|| self.tolerance_class.map(ToleranceClass::traverse_precision))
            .unwrap_or(DEFAULT_REQUIRED_PRECISION)
    }
}

// ---------------------------------------------------------------------------
// Adjustment
// ---------------------------------------------------------------------------

/// Adjust the traverse-tagged points of `data` by the compass rule.
///
/// Fewer than 3 traverse points yields an `Error` result with no legs.
pub fn adjust_traverse(data: &SurveyData, options: Option<&TraverseOptions>) -> TraverseResult {
    let required = options.copied().unwrap_or_default().required_precision();
    let pts = data.traverse_points();
    if pts.len() < MIN_TRAVERSE_POINTS {
        return TraverseResult::error(
            required,
            format!("Need at least {MIN_TRAVERSE_POINTS} traverse points for adjustment"),
        );
    }

    // Legs
    let mut legs: Vec<TraverseLeg> = pts
        .windows(2)
        .map(|w| TraverseLeg::between(w[0], w[1]))
        .collect();
    let total_distance: f64 = legs.iter().map(|l| l.distance).sum();
    let mut longest = 0;
    for (i, leg) in legs.iter().enumerate() {
        if leg.distance > legs[longest].distance {
            longest = i;
        }
    }

    // Classification
    let first = pts[0];
    let last = pts[pts.len() - 1];
    let closure_distance = distance(first, last);
    let mut suggested_fixes = Vec::new();
    let (traverse_type, desc) =
        if first.point_id == last.point_id || closure_distance < SAME_STATION_TOLERANCE {
            (TraverseType::Closed, "Closed traverse - returns to start point")
        } else if closure_distance < total_distance * LOOP_CLOSURE_FRACTION {
            (TraverseType::Closed, "Closed traverse - loop with misclosure")
        } else {
            suggested_fixes.push(
                "Consider closing the traverse back to start point for stronger geometry"
                    .to_string(),
            );
            (
                TraverseType::Open,
                "Open traverse - end point not at start (weak geometry)",
            )
        };

    // Misclosure
    let (sum_e, sum_n) = match traverse_type {
        TraverseType::Closed => legs
            .iter()
            .fold((0.0, 0.0), |(e, n), l| (e + l.delta_e, n + l.delta_n)),
        TraverseType::Open => (last.easting - first.easting, last.northing - first.northing),
    };
    let linear_misclosure = magnitude(sum_e, sum_n);
    let precision = if linear_misclosure > 0.0 {
        total_distance / linear_misclosure
    } else {
        INFINITE_PRECISION
    };

    // Bowditch corrections
    for leg in &mut legs {
        let share = if total_distance > 0.0 {
            leg.distance / total_distance
        } else {
            0.0
        };
        leg.correction_e = -sum_e * share;
        leg.correction_n = -sum_n * share;
        leg.adjusted_delta_e = leg.delta_e + leg.correction_e;
        leg.adjusted_delta_n = leg.delta_n + leg.correction_n;
    }

    // Adjusted coordinates, first station fixed
    let mut adjusted_points = vec![AdjustedPoint::held_fixed(first)];
    let (mut cum_e, mut cum_n) = (first.easting, first.northing);
    for (leg, raw) in legs.iter().zip(&pts[1..]) {
        cum_e += leg.adjusted_delta_e;
        cum_n += leg.adjusted_delta_n;
        if raw.point_id == first.point_id {
            continue;
        }
        let residual_e = cum_e - raw.easting;
        let residual_n = cum_n - raw.northing;
        adjusted_points.push(AdjustedPoint {
            point_id: raw.point_id.clone(),
            raw_easting: raw.easting,
            raw_northing: raw.northing,
            adjusted_easting: round3(cum_e),
            adjusted_northing: round3(cum_n),
            residual_e: round4(residual_e),
            residual_n: round4(residual_n),
            residual_distance: round4(magnitude(residual_e, residual_n)),
        });
    }

    let closure_ratio = format_ratio(precision);
    let mut result = TraverseResult {
        traverse_type: Some(traverse_type),
        traverse_type_desc: desc.to_string(),
        sum_delta_e: sum_e,
        sum_delta_n: sum_n,
        linear_misclosure,
        total_distance,
        closure_ratio,
        precision,
        longest_leg: Some(longest),
        legs,
        adjusted_points,
        status: AdjustmentStatus::Pass,
        required_precision: required,
        message: String::new(),
        suggested_fixes,
    };

    if precision >= required {
        result.message = format!(
            "Traverse meets 1:{required:.0} requirement (achieved {})",
            result.closure_ratio
        );
    } else {
        result.status = AdjustmentStatus::Fail;
        result.message = format!(
            "Traverse does NOT meet 1:{required:.0} requirement (achieved {})",
            result.closure_ratio
        );
        let hints = suggest_fixes(&result);
        result.suggested_fixes.extend(hints);
    }

    tracing::debug!(
        project_id = %data.project_id,
        legs = result.legs.len(),
        misclosure = result.linear_misclosure,
        ratio = %result.closure_ratio,
        status = ?result.status,
        "Traverse adjusted"
    );
    result
}

/// Remediation hints for a traverse that missed its precision requirement.
fn suggest_fixes(result: &TraverseResult) -> Vec<String> {
    let mut fixes = Vec::new();
    if result.legs.is_empty() {
        return fixes;
    }

    let worst = result.legs.iter().fold(None::<&TraverseLeg>, |worst, leg| match worst {
        Some(w) if w.correction_magnitude() >= leg.correction_magnitude() => Some(w),
        _ => Some(leg),
    });
    if let Some(leg) = worst {
        let corr = leg.correction_magnitude();
        if corr > SIGNIFICANT_CORRECTION {
            fixes.push(format!(
                "Re-check distance {} to {} (largest correction: {corr:.4}m)",
                leg.from_point, leg.to_point
            ));
        }
    }

    let (abs_e, abs_n) = (result.sum_delta_e.abs(), result.sum_delta_n.abs());
    if abs_e > abs_n * DOMINANCE_FACTOR {
        fixes.push(
            "Easting error dominant - check angles/bearings for E-W pointing legs".to_string(),
        );
    } else if abs_n > abs_e * DOMINANCE_FACTOR {
        fixes.push(
            "Northing error dominant - check angles/bearings for N-S pointing legs".to_string(),
        );
    }

    let mean_leg = result.total_distance / result.legs.len() as f64;
    if let Some(leg) = result
        .legs
        .iter()
        .find(|l| l.distance < mean_leg * SHORT_LEG_FRACTION)
    {
        fixes.push(format!(
            "Short leg {}-{} ({:.2}m) - angle errors have larger effect on short legs",
            leg.from_point, leg.to_point, leg.distance
        ));
    }

    fixes
}
