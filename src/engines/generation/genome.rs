use rand::Rng;
use serde::{Deserialize, Serialize};

/// Genome representation for racing-line search
///
/// A genome is a short, fixed-length sequence of lateral offsets (metres) from
/// the track centerline. Gene `k` of a `G`-gene genome sits at the normalized
/// track position `k / (G - 1)`; the FitnessEvaluator linearly interpolates
/// between genes to get one offset per centerline point.
///
/// Positive offsets move the line to the left of the direction of travel.
///
/// # Example
///
/// ```
/// let genome: racingline::engines::generation::Genome = vec![0.0, 1.5, -1.0, 0.5];
/// // Starts on the centerline, swings 1.5 m left, then 1 m right...
/// assert_eq!(genome.len(), 4);
/// ```
pub type Genome = Vec<f64>;

/// Closed interval every gene is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneBounds {
    pub min: f64,
    pub max: f64,
}

impl GeneBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Generate a random genome, each gene uniform in `bounds`.
pub fn random_genome<R: Rng + ?Sized>(length: usize, bounds: GeneBounds, rng: &mut R) -> Genome {
    (0..length)
        .map(|_| rng.gen_range(bounds.min..=bounds.max))
        .collect()
}
