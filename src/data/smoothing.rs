use super::connectors::{TrackValidator, WaypointLoader};
use crate::error::{LapOptError, Result};
use crate::types::{Point, TrackGeometry};
use std::path::Path;

/// Resample a closed polygon of waypoints into a dense, smooth centerline.
///
/// Uses a periodic uniform Catmull-Rom spline, which passes through every
/// waypoint with a continuous tangent. `num_points` samples are spread evenly
/// over the spline parameter; the closing sample (equal to the first) is not
/// emitted, so the result has no zero-length closing segment.
pub fn resample_closed(waypoints: &[Point], num_points: usize) -> Result<TrackGeometry> {
    let n = waypoints.len();
    if n < TrackGeometry::MIN_POINTS {
        return Err(LapOptError::Geometry(format!(
            "Need at least {} waypoints to build a closed spline, got {}",
            TrackGeometry::MIN_POINTS,
            n
        )));
    }
    if num_points < TrackGeometry::MIN_POINTS {
        return Err(LapOptError::Configuration(format!(
            "Spline resolution must be at least {}, got {}",
            TrackGeometry::MIN_POINTS,
            num_points
        )));
    }

    let samples = (0..num_points)
        .map(|j| {
            let u = j as f64 * n as f64 / num_points as f64;
            let k = (u.floor() as usize).min(n - 1);
            let t = u - k as f64;
            catmull_rom(
                &waypoints[(k + n - 1) % n],
                &waypoints[k],
                &waypoints[(k + 1) % n],
                &waypoints[(k + 2) % n],
                t,
            )
        })
        .collect();

    TrackGeometry::new(samples)
}

fn catmull_rom(p0: &Point, p1: &Point, p2: &Point, p3: &Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let blend = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * (2.0 * b
            + (c - a) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (3.0 * b - a - 3.0 * c + d) * t3)
    };
    Point::new(
        blend(p0.x, p1.x, p2.x, p3.x),
        blend(p0.y, p1.y, p2.y, p3.y),
    )
}

/// Load, clean and smooth a waypoint CSV into a dense centerline.
pub fn load_track<P: AsRef<Path>>(
    path: P,
    num_points: usize,
    max_gap_factor: f64,
) -> Result<TrackGeometry> {
    let raw = WaypointLoader::load(&path)?;
    let waypoints = TrackValidator::validate(&raw, max_gap_factor)?;
    let track = resample_closed(&waypoints, num_points)?;
    log::info!(
        "Generated {} spline points from {} waypoints ({:.1} m loop)",
        track.len(),
        waypoints.len(),
        track.length()
    );
    Ok(track)
}
