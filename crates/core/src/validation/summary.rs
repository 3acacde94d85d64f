//! Summary statistics for a dataset.

use crate::point::{SurveyData, SurveyType};
use crate::report::SummaryStatistics;
use crate::spatial::{bounding_box, centroid};

/// Count points by type and height presence, plus extent and centroid.
pub fn summarize(data: &SurveyData) -> SummaryStatistics {
    let mut stats = SummaryStatistics {
        total_points: data.points.len(),
        ..SummaryStatistics::default()
    };
    if data.points.is_empty() {
        return stats;
    }

    for p in &data.points {
        match p.survey_type {
            Some(SurveyType::Traverse) => stats.traverse_points += 1,
            Some(SurveyType::Control) => stats.control_points += 1,
            Some(SurveyType::Detail) => stats.detail_points += 1,
            _ => {}
        }
        if p.has_height() {
            stats.points_with_height += 1;
        }
    }

    stats.bounding_box = bounding_box(&data.points);
    (stats.centroid_easting, stats.centroid_northing) = centroid(&data.points);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::SurveyPoint;

    #[test]
    fn counts_by_type_and_height() {
        let mut control = SurveyPoint::traverse("C1", 0.0, 10.0);
        control.survey_type = Some(SurveyType::Control);
        control.height = Some(12.0);
        let mut detail = SurveyPoint::traverse("D1", 10.0, 0.0);
        detail.survey_type = Some(SurveyType::Detail);
        let mut untagged = SurveyPoint::traverse("X", 10.0, 10.0);
        untagged.survey_type = None;

        let data = SurveyData::new(
            "T",
            vec![SurveyPoint::traverse("T1", 0.0, 0.0), control, detail, untagged],
        );
        let stats = summarize(&data);
        assert_eq!(stats.total_points, 4);
        assert_eq!(stats.traverse_points, 1);
        assert_eq!(stats.control_points, 1);
        assert_eq!(stats.detail_points, 1);
        assert_eq!(stats.points_with_height, 1);
        assert_eq!(stats.centroid_easting, 5.0);
        assert_eq!(stats.centroid_northing, 5.0);
        assert_eq!(stats.bounding_box.max_northing, 10.0);
    }

    #[test]
    fn empty_dataset_is_all_zero() {
        assert_eq!(
            summarize(&SurveyData::default()),
            SummaryStatistics::default()
        );
    }
}
