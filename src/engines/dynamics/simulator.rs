use super::{curvature, segment_lengths, speed_limits, speed_profile, EPSILON};
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Physical constants of the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    pub friction_coefficient: f64,
    pub gravity: f64,
    /// Longitudinal acceleration limit, m/s².
    pub max_acceleration: f64,
    /// Braking limit, m/s². Only the magnitude is used.
    pub max_deceleration: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            friction_coefficient: 1.1,
            gravity: 9.81,
            max_acceleration: 2.5,
            max_deceleration: -5.0,
        }
    }
}

/// Time spent on each periodic segment, using the mean of its end speeds.
pub fn segment_times(ds: &[f64], v: &[f64]) -> Vec<f64> {
    let n = v.len();
    (0..n)
        .map(|i| ds[i] / ((v[i] + v[(i + 1) % n]) / 2.0 + EPSILON))
        .collect()
}

pub fn integrate_lap_time(ds: &[f64], v: &[f64]) -> f64 {
    segment_times(ds, v).iter().sum()
}

/// Estimated lap time of a closed trajectory, in seconds.
pub fn lap_time(trajectory: &[Point], vehicle: &VehicleParams) -> f64 {
    let kappa = curvature(trajectory);
    let v_limit = speed_limits(&kappa, vehicle.friction_coefficient, vehicle.gravity);
    let ds = segment_lengths(trajectory);
    let v = speed_profile(
        &v_limit,
        &ds,
        vehicle.max_acceleration,
        vehicle.max_deceleration,
    );
    integrate_lap_time(&ds, &v)
}
