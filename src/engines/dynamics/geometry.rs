use super::EPSILON;
use crate::types::Point;

/// Centered finite difference with wrap-around boundaries.
///
/// `g[i] = (v[i+1] - v[i-1]) / 2`, indices taken modulo `n`.
pub fn periodic_gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    (0..n)
        .map(|i| (values[(i + 1) % n] - values[(i + n - 1) % n]) / 2.0)
        .collect()
}

/// Unsigned curvature at every point of a closed trajectory.
///
/// `κ = |x'y'' - y'x''| / (x'² + y'²)^1.5`, the denominator floored at
/// [`EPSILON`].
pub fn curvature(trajectory: &[Point]) -> Vec<f64> {
    let xs: Vec<f64> = trajectory.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = trajectory.iter().map(|p| p.y).collect();

    let dx = periodic_gradient(&xs);
    let dy = periodic_gradient(&ys);
    let ddx = periodic_gradient(&dx);
    let ddy = periodic_gradient(&dy);

    (0..trajectory.len())
        .map(|i| {
            let num = (dx[i] * ddy[i] - dy[i] * ddx[i]).abs();
            let den = (dx[i] * dx[i] + dy[i] * dy[i]).powf(1.5);
            num / den.max(EPSILON)
        })
        .collect()
}

/// Length of segment `i -> i+1`; the last entry is the closing segment back to
/// the first point.
pub fn segment_lengths(trajectory: &[Point]) -> Vec<f64> {
    let n = trajectory.len();
    (0..n)
        .map(|i| trajectory[i].distance(&trajectory[(i + 1) % n]))
        .collect()
}

/// Left-hand unit normal `(-t_y, t_x) / |t|` from the periodic tangent.
pub fn unit_normals(trajectory: &[Point]) -> Vec<Point> {
    let xs: Vec<f64> = trajectory.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = trajectory.iter().map(|p| p.y).collect();
    let dx = periodic_gradient(&xs);
    let dy = periodic_gradient(&ys);

    dx.iter()
        .zip(&dy)
        .map(|(&tx, &ty)| {
            let norm = tx.hypot(ty).max(EPSILON);
            Point::new(-ty / norm, tx / norm)
        })
        .collect()
}
