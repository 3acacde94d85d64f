//! Survey integrity checks.
//!
//! Every check has the same shape, `fn(&SurveyData) -> Vec<ValidationIssue>`,
//! and is a pure function over a read-only dataset, so the engine can run
//! them concurrently.

pub mod duplicates;
pub mod geometry;
pub mod input;
pub mod outliers;
pub mod summary;

// ---------------------------------------------------------------------------
// Check names
// ---------------------------------------------------------------------------

pub const CHECK_INPUT: &str = "input_validation";
pub const CHECK_DUPLICATES: &str = "duplicate_detection";
pub const CHECK_DISTANCE_BEARING: &str = "distance_bearing_check";
pub const CHECK_OUTLIERS: &str = "outlier_detection";
pub const CHECK_TRAVERSE_CLOSURE: &str = "traverse_closure";

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Points closer than this (1 mm) are duplicates.
pub const DUPLICATE_THRESHOLD: f64 = 0.001;
/// Points closer than this (1 cm) are near-duplicates.
pub const NEAR_DUPLICATE_THRESHOLD: f64 = 0.01;
/// Outliers lie beyond this many standard deviations from the centroid.
pub const OUTLIER_SIGMA: f64 = 3.0;
/// Bearing change (degrees) beyond which a leg is a near U-turn.
pub const MAX_BEARING_CHANGE: f64 = 170.0;
/// Legs shorter than this (10 cm) are suspicious.
pub const MIN_LEG_DISTANCE: f64 = 0.1;
/// Consecutive leg-length ratios outside `[1/MAX, MAX]` are unusual.
pub const MAX_LEG_RATIO: f64 = 10.0;
/// A traverse whose ends are closer than this fraction of its length is a loop.
/// Shared by the closure check and traverse classification.
pub const LOOP_CLOSURE_FRACTION: f64 = 0.1;
/// Closure quality bands (the N in 1:N).
pub const GOOD_PRECISION: f64 = 10000.0;
pub const ACCEPTABLE_PRECISION: f64 = 5000.0;
pub const POOR_PRECISION: f64 = 1000.0;
