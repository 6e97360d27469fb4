//! Curvature-limited lap-time simulation on closed trajectories.
//!
//! Every function here is pure: a trajectory is a closed sequence of points and
//! all derivatives, segments and speed passes wrap around the seam.

pub mod geometry;
pub mod profile;
pub mod simulator;

/// Floor applied to curvature denominators, curvatures and average speeds.
/// Keeps near-straight or near-degenerate segments finite.
pub const EPSILON: f64 = 1e-8;

pub use geometry::{curvature, periodic_gradient, segment_lengths, unit_normals};
pub use profile::{speed_limits, speed_profile};
pub use simulator::{integrate_lap_time, lap_time, segment_times, VehicleParams};
