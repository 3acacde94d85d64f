/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Relative precision reported when the linear misclosure is exactly zero.
///
/// JSON has no infinity, so the largest finite `f64` stands in for it.
pub const INFINITE_PRECISION: f64 = f64::MAX;

/// Round to 3 decimals (millimetres for metric coordinates).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round to 4 decimals.
pub fn round4(value: f64) -> f64 {
    (value * 10000.0).round() / 10000.0
}

/// Format a relative precision as the conventional `1:N` ratio.
pub fn format_ratio(precision: f64) -> String {
    if precision >= INFINITE_PRECISION {
        "1:\u{221e} (perfect)".to_string()
    } else {
        format!("1:{precision:.0}")
    }
}
