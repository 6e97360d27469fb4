use crate::error::{LapOptError, Result};
use serde::{Deserialize, Serialize};

/// A 2D point on the track plane, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Dense closed centerline. Point `n-1` connects back to point `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    points: Vec<Point>,
}

impl TrackGeometry {
    pub const MIN_POINTS: usize = 3;

    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(LapOptError::Geometry(format!(
                "A closed track needs at least {} points, got {}",
                Self::MIN_POINTS,
                points.len()
            )));
        }
        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(LapOptError::Geometry(format!(
                "Non-finite coordinate at point {}",
                idx
            )));
        }
        Ok(Self { points })
    }

    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(LapOptError::Geometry(format!(
                "Coordinate length mismatch: {} x values, {} y values",
                xs.len(),
                ys.len()
            )));
        }
        Self::new(xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Perimeter of the closed loop, including the closing segment.
    pub fn length(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].distance(&self.points[(i + 1) % n]))
            .sum()
    }
}

/// One ranked entry of the final hall of fame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapResult {
    pub rank: usize,
    pub genome: Vec<f64>,
    pub lap_time: f64,
    pub generation: usize,
}
