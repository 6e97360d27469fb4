use super::traits::{check_positive, ConfigSection};
use crate::error::LapOptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    pub show_progress: bool,
    pub show_statistics: bool,
    pub show_hall_of_fame: bool,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            show_statistics: true,
            show_hall_of_fame: true,
        }
    }
}

impl ConfigSection for ReportingConfig {
    fn section_name() -> &'static str {
        "reporting"
    }

    fn validate(&self) -> Result<(), LapOptError> {
        Ok(())
    }
}

/// How raw waypoints become the dense centerline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub spline_points: usize,
    /// Segments longer than this multiple of the median spacing are reported.
    pub max_gap_factor: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            spline_points: 500,
            max_gap_factor: 5.0,
        }
    }
}

impl ConfigSection for TrackConfig {
    fn section_name() -> &'static str {
        "track"
    }

    fn validate(&self) -> Result<(), LapOptError> {
        if self.spline_points < 3 {
            return Err(LapOptError::Configuration(format!(
                "Spline points must be at least 3, got {}",
                self.spline_points
            )));
        }
        check_positive("Max gap factor", self.max_gap_factor)
    }
}
