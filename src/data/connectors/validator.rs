use crate::error::{LapOptError, Result};
use crate::types::{Point, TrackGeometry};

pub struct TrackValidator;

impl TrackValidator {
    /// Clean raw waypoints into an open list describing a closed loop.
    ///
    /// Rejects non-finite coordinates, drops consecutive duplicates and a final
    /// point repeating the first (files often close the loop explicitly), then
    /// requires at least [`TrackGeometry::MIN_POINTS`] distinct points.
    pub fn validate_waypoints(points: &[Point]) -> Result<Vec<Point>> {
        if let Some(row) = points.iter().position(|p| !p.is_finite()) {
            return Err(LapOptError::TrackLoading(format!(
                "Non-finite coordinate in waypoint {}",
                row
            )));
        }

        let mut cleaned: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if cleaned.last() != Some(p) {
                cleaned.push(*p);
            }
        }
        while cleaned.len() > 1 && cleaned.first() == cleaned.last() {
            cleaned.pop();
        }

        let dropped = points.len() - cleaned.len();
        if dropped > 0 {
            log::debug!("Dropped {} duplicate waypoints", dropped);
        }

        if cleaned.len() < TrackGeometry::MIN_POINTS {
            return Err(LapOptError::TrackLoading(format!(
                "Need at least {} distinct waypoints, got {}",
                TrackGeometry::MIN_POINTS,
                cleaned.len()
            )));
        }

        Ok(cleaned)
    }

    /// Indices `i` whose segment `i -> i+1` (closing segment included) is
    /// longer than `max_gap_factor` times the median segment.
    pub fn find_gaps(points: &[Point], max_gap_factor: f64) -> Vec<usize> {
        let n = points.len();
        if n < 2 {
            return Vec::new();
        }
        let lengths: Vec<f64> = (0..n)
            .map(|i| points[i].distance(&points[(i + 1) % n]))
            .collect();

        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = sorted[n / 2];

        lengths
            .iter()
            .enumerate()
            .filter(|(_, len)| **len > max_gap_factor * median)
            .map(|(i, _)| i)
            .collect()
    }

    /// [`validate_waypoints`](Self::validate_waypoints) plus a warning for
    /// every suspicious gap.
    pub fn validate(points: &[Point], max_gap_factor: f64) -> Result<Vec<Point>> {
        let cleaned = Self::validate_waypoints(points)?;
        let gaps = Self::find_gaps(&cleaned, max_gap_factor);
        if !gaps.is_empty() {
            log::warn!(
                "Large gaps between waypoints at segments {:?} (> {}x median spacing)",
                gaps,
                max_gap_factor
            );
        }
        Ok(cleaned)
    }
}
