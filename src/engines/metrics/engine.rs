use super::analysis::LapAnalysis;
use crate::engines::dynamics::EPSILON;
use serde::{Deserialize, Serialize};

const MS_TO_KMH: f64 = 3.6;

/// Headline numbers of one simulated lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapMetrics {
    pub track_length: f64,
    pub lap_time: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub mean_speed: f64,
    pub average_lap_speed: f64,
    pub max_curvature: f64,
    pub sharpest_radius: f64,
}

impl LapMetrics {
    pub fn calculate(analysis: &LapAnalysis) -> Self {
        let v = &analysis.speed_profile;
        let track_length: f64 = analysis.segment_lengths.iter().sum();
        let max_speed = v.iter().copied().fold(0.0, f64::max);
        let min_speed = v.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_speed = if v.is_empty() {
            0.0
        } else {
            v.iter().sum::<f64>() / v.len() as f64
        };
        let max_curvature = analysis.curvature.iter().copied().fold(0.0, f64::max);

        Self {
            track_length,
            lap_time: analysis.lap_time,
            max_speed,
            min_speed: if min_speed.is_finite() { min_speed } else { 0.0 },
            mean_speed,
            average_lap_speed: track_length / analysis.lap_time.max(EPSILON),
            max_curvature,
            sharpest_radius: 1.0 / (max_curvature + EPSILON),
        }
    }

    pub fn render_text(&self) -> String {
        let mut lines = Vec::new();
        lines.push("=== LAP SUMMARY ===".to_string());
        lines.push(format!("Track length: {:.1} meters", self.track_length));
        lines.push(format!("Estimated lap time: {:.2} seconds", self.lap_time));
        lines.push(format!("Max speed: {:.1} km/h", self.max_speed * MS_TO_KMH));
        lines.push(format!("Min speed: {:.1} km/h", self.min_speed * MS_TO_KMH));
        lines.push(format!("Average speed: {:.1} km/h", self.mean_speed * MS_TO_KMH));
        lines.push(format!(
            "Average lap speed: {:.1} km/h",
            self.average_lap_speed * MS_TO_KMH
        ));
        lines.push(format!("Max curvature: {:.4} rad/m", self.max_curvature));
        lines.push(format!("Sharpest turn radius: {:.1} m", self.sharpest_radius));
        lines.push("=".repeat(30));
        lines.join("\n")
    }
}
