use crate::engines::dynamics::{
    curvature, integrate_lap_time, segment_lengths, segment_times, speed_limits, speed_profile,
    VehicleParams,
};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Every intermediate of one lap simulation, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapAnalysis {
    pub curvature: Vec<f64>,
    pub speed_limits: Vec<f64>,
    pub segment_lengths: Vec<f64>,
    pub speed_profile: Vec<f64>,
    pub segment_times: Vec<f64>,
    /// Elapsed time on arrival at point `i + 1`; the last entry is the lap time.
    pub cumulative_time: Vec<f64>,
    pub lap_time: f64,
}

impl LapAnalysis {
    pub fn analyze(trajectory: &[Point], vehicle: &VehicleParams) -> Self {
        let curvature = curvature(trajectory);
        let speed_limits = speed_limits(
            &curvature,
            vehicle.friction_coefficient,
            vehicle.gravity,
        );
        let segment_lengths = segment_lengths(trajectory);
        let speed_profile = speed_profile(
            &speed_limits,
            &segment_lengths,
            vehicle.max_acceleration,
            vehicle.max_deceleration,
        );
        let segment_times = segment_times(&segment_lengths, &speed_profile);
        let cumulative_time = segment_times
            .iter()
            .scan(0.0, |acc, t| {
                *acc += t;
                Some(*acc)
            })
            .collect();
        let lap_time = integrate_lap_time(&segment_lengths, &speed_profile);

        Self {
            curvature,
            speed_limits,
            segment_lengths,
            speed_profile,
            segment_times,
            cumulative_time,
            lap_time,
        }
    }
}
