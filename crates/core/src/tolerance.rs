//! Survey accuracy classes and the limits they impose.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Relative precision required when the caller gives none (1:5000).
pub const DEFAULT_REQUIRED_PRECISION: f64 = 5000.0;

// Allowable leveling misclosure, millimetres per sqrt(km).
pub const FIRST_ORDER_LEVELING_MM: f64 = 3.0;
pub const SECOND_ORDER_LEVELING_MM: f64 = 6.0;
pub const THIRD_ORDER_LEVELING_MM: f64 = 12.0;
pub const ENGINEERING_LEVELING_MM: f64 = 24.0;

/// Accuracy grade of a survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceClass {
    FirstOrder,
    SecondOrder,
    #[default]
    ThirdOrder,
    Engineering,
    Construction,
}

impl ToleranceClass {
    /// Minimum traverse relative precision (the N in 1:N).
    pub fn traverse_precision(self) -> f64 {
        match self {
            Self::FirstOrder => 25000.0,
            Self::SecondOrder => 10000.0,
            Self::ThirdOrder => 5000.0,
            Self::Engineering => 3000.0,
            Self::Construction => 1000.0,
        }
    }

    /// Leveling constant in mm per sqrt(km). Construction has no leveling
    /// grade of its own and falls back to third order.
    pub fn leveling_constant_mm(self) -> f64 {
        match self {
            Self::FirstOrder => FIRST_ORDER_LEVELING_MM,
            Self::SecondOrder => SECOND_ORDER_LEVELING_MM,
            Self::ThirdOrder | Self::Construction => THIRD_ORDER_LEVELING_MM,
            Self::Engineering => ENGINEERING_LEVELING_MM,
        }
    }

    /// Allowable leveling misclosure in metres for a run of `distance_km`.
    ///
    /// A zero-length run is treated as 1 km.
    pub fn allowable_leveling_misclosure(self, distance_km: f64) -> f64 {
        let km = if distance_km > 0.0 { distance_km } else { 1.0 };
        self.leveling_constant_mm() * km.sqrt() / 1000.0
    }
}

/// Validate a caller-supplied required precision (the N in 1:N).
pub fn validate_required_precision(precision: f64) -> Result<(), CoreError> {
    if !precision.is_finite() || precision <= 0.0 {
        return Err(CoreError::Validation(format!(
            "required_precision must be a positive number, got {precision}"
        )));
    }
    Ok(())
}

/// Validate that a height is a usable number.
///
/// For library callers building requests in code. JSON decoding already
/// rejects non-finite numbers, so HTTP input never reaches this.
pub fn validate_height(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}
