use crate::engines::dynamics::{lap_time, unit_normals, VehicleParams};
use crate::types::{Point, TrackGeometry};

/// Lap time assigned to any candidate whose simulated lap time is NaN or
/// infinite. Large enough to lose every tournament against a real lap, finite
/// so that sorting and archiving stay well-defined.
pub const PENALTY_LAP_TIME: f64 = 1e12;

/// Maps a genome to a lap time. Lower is better.
///
/// Implementations must be pure: the engine evaluates distinct individuals
/// concurrently and relies on identical genomes giving identical results.
pub trait FitnessFunction: Send + Sync {
    fn evaluate(&self, genome: &[f64]) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genome: &[f64]) -> f64 {
        self(genome)
    }
}

/// Replaces non-finite lap times with [`PENALTY_LAP_TIME`].
pub fn sanitize_lap_time(lap_time: f64) -> f64 {
    if lap_time.is_finite() {
        lap_time
    } else {
        log::debug!(
            "Non-finite lap time {} replaced by penalty {}",
            lap_time,
            PENALTY_LAP_TIME
        );
        PENALTY_LAP_TIME
    }
}

/// Linear interpolation of `genome` onto `samples` evenly spaced positions of
/// the shared parameter `u ∈ [0, 1]`.
pub fn interpolate_offsets(genome: &[f64], samples: usize) -> Vec<f64> {
    match genome.len() {
        0 => vec![0.0; samples],
        1 => vec![genome[0]; samples],
        genes => (0..samples)
            .map(|i| {
                let u = if samples > 1 {
                    i as f64 / (samples - 1) as f64
                } else {
                    0.0
                };
                let pos = u * (genes - 1) as f64;
                let k = (pos.floor() as usize).min(genes - 2);
                let t = pos - k as f64;
                genome[k] + (genome[k + 1] - genome[k]) * t
            })
            .collect(),
    }
}

/// Turns a compact genome into a full-resolution trajectory around a fixed
/// centerline and simulates its lap time.
///
/// Centerline normals are computed once at construction.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    centerline: TrackGeometry,
    normals: Vec<Point>,
    vehicle: VehicleParams,
}

impl FitnessEvaluator {
    pub fn new(centerline: TrackGeometry, vehicle: VehicleParams) -> Self {
        let normals = unit_normals(centerline.points());
        Self {
            centerline,
            normals,
            vehicle,
        }
    }

    pub fn centerline(&self) -> &TrackGeometry {
        &self.centerline
    }

    pub fn vehicle(&self) -> &VehicleParams {
        &self.vehicle
    }

    /// Centerline points displaced along their normals by the interpolated
    /// offsets.
    pub fn trajectory(&self, genome: &[f64]) -> Vec<Point> {
        let offsets = interpolate_offsets(genome, self.centerline.len());
        self.centerline
            .points()
            .iter()
            .zip(&self.normals)
            .zip(offsets)
            .map(|((p, n), offset)| Point::new(p.x + offset * n.x, p.y + offset * n.y))
            .collect()
    }

    /// Raw simulated lap time. Degenerate (e.g. self-intersecting) lines are
    /// not rejected here; see [`sanitize_lap_time`].
    pub fn lap_time(&self, genome: &[f64]) -> f64 {
        lap_time(&self.trajectory(genome), &self.vehicle)
    }

    /// Lap time of the undisplaced centerline.
    pub fn baseline_lap_time(&self) -> f64 {
        lap_time(self.centerline.points(), &self.vehicle)
    }
}

impl FitnessFunction for FitnessEvaluator {
    fn evaluate(&self, genome: &[f64]) -> f64 {
        self.lap_time(genome)
    }
}

/// One-shot evaluation without keeping an evaluator around.
pub fn evaluate(genome: &[f64], centerline: &TrackGeometry, vehicle: &VehicleParams) -> f64 {
    FitnessEvaluator::new(centerline.clone(), *vehicle).lap_time(genome)
}
