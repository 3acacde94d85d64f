//! Survey point and dataset types.
//!
//! The engine only ever reads these; the caller owns the dataset.

use serde::{Deserialize, Serialize};

pub const SURVEY_TYPE_TRAVERSE: &str = "traverse";
pub const SURVEY_TYPE_CONTROL: &str = "control";
pub const SURVEY_TYPE_DETAIL: &str = "detail";

/// What kind of station a point is.
///
/// Unrecognised tags are kept verbatim so they can be reported back and
/// round-trip through serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurveyType {
    Traverse,
    Control,
    Detail,
    Unknown(String),
}

impl SurveyType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Traverse => SURVEY_TYPE_TRAVERSE,
            Self::Control => SURVEY_TYPE_CONTROL,
            Self::Detail => SURVEY_TYPE_DETAIL,
            Self::Unknown(tag) => tag,
        }
    }

    /// Returns `true` for the three tags the checks understand.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for SurveyType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            SURVEY_TYPE_TRAVERSE => Self::Traverse,
            SURVEY_TYPE_CONTROL => Self::Control,
            SURVEY_TYPE_DETAIL => Self::Detail,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<SurveyType> for String {
    fn from(ty: SurveyType) -> Self {
        match ty {
            SurveyType::Unknown(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for SurveyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single measured point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyPoint {
    /// Station identifier. Not required to be unique; a closed traverse
    /// repeats its first identifier at the end.
    #[serde(default)]
    pub point_id: String,
    pub easting: f64,
    pub northing: f64,
    /// Absent means "height unknown", never zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_type: Option<SurveyType>,
}

impl SurveyPoint {
    /// Build a traverse-tagged point with no height.
    pub fn traverse(point_id: &str, easting: f64, northing: f64) -> Self {
        Self {
            point_id: point_id.to_string(),
            easting,
            northing,
            height: None,
            survey_type: Some(SurveyType::Traverse),
        }
    }

    /// Non-empty identifier and both coordinates non-zero.
    pub fn is_valid(&self) -> bool {
        !self.point_id.is_empty() && self.easting != 0.0 && self.northing != 0.0
    }

    pub fn has_height(&self) -> bool {
        self.height.is_some()
    }

    pub fn is_traverse(&self) -> bool {
        self.survey_type == Some(SurveyType::Traverse)
    }
}

/// A survey dataset as handed to the engine.
///
/// Point order is significant: consecutive traverse points form the legs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyData {
    #[serde(default)]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(default)]
    pub points: Vec<SurveyPoint>,
}

impl SurveyData {
    pub fn new(project_id: &str, points: Vec<SurveyPoint>) -> Self {
        Self {
            project_id: project_id.to_string(),
            coordinate_system: None,
            points,
        }
    }

    /// Traverse-tagged points in dataset order.
    pub fn traverse_points(&self) -> Vec<&SurveyPoint> {
        self.points.iter().filter(|p| p.is_traverse()).collect()
    }
}
