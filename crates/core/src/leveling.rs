//! Differential leveling reduction (rise and fall method).
//!
//! Readings are reduced against the most recent backsight. A foresight closes
//! a setup and moves the running level; an intermediate sight is reduced
//! against the same backsight but leaves the running level where it is. The
//! height misclosure is distributed equally per point index, with the
//! starting benchmark held fixed.

use serde::{Deserialize, Serialize};

use crate::tolerance::ToleranceClass;
use crate::traverse::AdjustmentStatus;
use crate::types::round4;

/// Minimum observations (or rise/fall steps) needed to reduce a run.
pub const MIN_LEVELING_OBSERVATIONS: usize = 2;

/// Staff readings taken at one point. Any reading may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelingObservation {
    pub point_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backsight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foresight: Option<f64>,
    /// Setup distance in metres, used for the allowable misclosure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// A pre-reduced rise or fall to the next point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiseFallStep {
    pub point_id: String,
    #[serde(default)]
    pub rise: f64,
    #[serde(default)]
    pub fall: f64,
}

/// Reduced level of one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingPoint {
    pub point_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rise: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fall: Option<f64>,
    pub raw_rl: f64,
    pub adjusted_rl: f64,
    pub correction: f64,
}

impl LevelingPoint {
    fn at(point_id: &str, raw_rl: f64) -> Self {
        Self {
            point_id: point_id.to_string(),
            rise: None,
            fall: None,
            raw_rl,
            adjusted_rl: raw_rl,
            correction: 0.0,
        }
    }

    fn record_change(&mut self, diff: f64) {
        if diff > 0.0 {
            self.rise = Some(diff);
        } else if diff < 0.0 {
            self.fall = Some(-diff);
        }
    }
}

/// Reduced level run with misclosure and corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingResult {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_bm: String,
    pub start_height: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end_bm: String,
    /// Computed (unadjusted) level at the end of the run.
    pub end_height: f64,
    pub total_distance_km: f64,
    pub height_misclosure: f64,
    pub allowable_misclosure: f64,
    pub status: AdjustmentStatus,
    pub points: Vec<LevelingPoint>,
    pub message: String,
}

impl LevelingResult {
    fn error(start_height: f64) -> Self {
        Self {
            start_bm: String::new(),
            start_height,
            end_bm: String::new(),
            end_height: 0.0,
            total_distance_km: 0.0,
            height_misclosure: 0.0,
            allowable_misclosure: 0.0,
            status: AdjustmentStatus::Error,
            points: Vec::new(),
            message: format!(
                "Need at least {MIN_LEVELING_OBSERVATIONS} observations for leveling"
            ),
        }
    }
}

/// Reduce staff readings to levels and check the run against `class`.
///
/// Without `end_height` the run is treated as a closed loop back to
/// `start_height`.
pub fn reduce_levels(
    observations: &[LevelingObservation],
    start_height: f64,
    end_height: Option<f64>,
    class: ToleranceClass,
) -> LevelingResult {
    if observations.len() < MIN_LEVELING_OBSERVATIONS {
        return LevelingResult::error(start_height);
    }

    let mut running = start_height;
    // Last backsight reading and the level of the point it was taken on.
    let mut sight = observations[0].backsight.map(|bs| (bs, start_height));
    let mut total_distance_m = 0.0;
    let mut points = Vec::with_capacity(observations.len());

    for (i, obs) in observations.iter().enumerate() {
        total_distance_m += obs.distance.unwrap_or(0.0);
        let mut pt = LevelingPoint::at(&obs.point_id, running);

        if i > 0 {
            match (sight, obs.foresight, obs.intermediate) {
                (Some((bs, base)), Some(fs), _) => {
                    let diff = bs - fs;
                    pt.record_change(diff);
                    running = base + diff;
                    pt.raw_rl = running;
                    sight = obs.backsight.map(|next| (next, running));
                }
                (Some((bs, base)), None, Some(is)) => {
                    let diff = bs - is;
                    pt.record_change(diff);
                    pt.raw_rl = base + diff;
                }
                _ => {
                    if let Some(next) = obs.backsight {
                        sight = Some((next, running));
                    }
                }
            }
        }
        points.push(pt);
    }

    let result = LevelingResult {
        start_bm: observations[0].point_id.clone(),
        start_height,
        end_bm: observations[observations.len() - 1].point_id.clone(),
        end_height: running,
        total_distance_km: total_distance_m / 1000.0,
        height_misclosure: 0.0,
        allowable_misclosure: 0.0,
        status: AdjustmentStatus::Pass,
        points,
        message: String::new(),
    };
    close_run(result, end_height, class)
}

/// Build a level run from pre-computed rise/fall steps.
///
/// No distances are known, so the allowable misclosure assumes 1 km.
pub fn reduce_rise_fall(
    steps: &[RiseFallStep],
    start_height: f64,
    end_height: Option<f64>,
    class: ToleranceClass,
) -> LevelingResult {
    if steps.len() < MIN_LEVELING_OBSERVATIONS {
        return LevelingResult::error(start_height);
    }

    let mut running = start_height;
    let points = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i == 0 {
                return LevelingPoint::at(&step.point_id, start_height);
            }
            running += step.rise - step.fall;
            let mut pt = LevelingPoint::at(&step.point_id, running);
            pt.rise = (step.rise > 0.0).then_some(step.rise);
            pt.fall = (step.fall > 0.0).then_some(step.fall);
            pt
        })
        .collect();

    let result = LevelingResult {
        start_bm: steps[0].point_id.clone(),
        start_height,
        end_bm: steps[steps.len() - 1].point_id.clone(),
        end_height: running,
        total_distance_km: 0.0,
        height_misclosure: 0.0,
        allowable_misclosure: 0.0,
        status: AdjustmentStatus::Pass,
        points,
        message: String::new(),
    };
    close_run(result, end_height, class)
}

/// Compute misclosure, grade it, and distribute the correction.
fn close_run(
    mut result: LevelingResult,
    end_height: Option<f64>,
    class: ToleranceClass,
) -> LevelingResult {
    let reference = end_height.unwrap_or(result.start_height);
    result.height_misclosure = result.end_height - reference;
    result.allowable_misclosure = class.allowable_leveling_misclosure(result.total_distance_km);

    if result.height_misclosure.abs() <= result.allowable_misclosure {
        result.status = AdjustmentStatus::Pass;
        result.message = format!(
            "Level run acceptable: {:.4}m misclosure within {:.4}m allowable",
            result.height_misclosure, result.allowable_misclosure
        );
    } else {
        result.status = AdjustmentStatus::Fail;
        result.message = format!(
            "Level run FAILED: {:.4}m misclosure exceeds {:.4}m allowable",
            result.height_misclosure, result.allowable_misclosure
        );
    }

    let per_point = -result.height_misclosure / (result.points.len() - 1) as f64;
    for (i, pt) in result.points.iter_mut().enumerate().skip(1) {
        pt.correction = per_point * i as f64;
        pt.adjusted_rl = round4(pt.raw_rl + pt.correction);
    }

    tracing::debug!(
        points = result.points.len(),
        misclosure = result.height_misclosure,
        allowable = result.allowable_misclosure,
        status = ?result.status,
        "Level run reduced"
    );
    result
}
