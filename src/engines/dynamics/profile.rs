use super::EPSILON;

/// Friction-circle cornering cap `sqrt(mu * g / κ)` per point.
///
/// Near-zero curvature is floored at [`EPSILON`], which yields a very high but
/// finite cap on straights.
pub fn speed_limits(curvature: &[f64], mu: f64, g: f64) -> Vec<f64> {
    curvature
        .iter()
        .map(|&k| (mu * g / k.max(EPSILON)).sqrt())
        .collect()
}

/// Two-pass speed profile on a closed loop.
///
/// `ds[i]` is the length of segment `i -> i+1` (the last entry closes the
/// loop). The forward pass bounds `v[i]` by what `a_max` allows coming out of
/// `i-1`; the backward pass bounds it by what braking at `|a_min|` allows going
/// into `i+1`. The seam is then closed with `v[0] = v[n-1] = min(v[0], v[n-1])`.
///
/// Both wrapping passes start at the point with the lowest cap. No pass can
/// lower that point, so a single sweep in each direction leaves every periodic
/// pair consistent. Closing the seam can only lower one of its two ends, and a
/// second sweep anchored at index 0 re-propagates that change.
///
/// Afterwards, for every `i` (indices modulo `n`):
/// - `v[i] <= v_limit[i]`
/// - `v[i] <= sqrt(v[i-1]² + 2·a_max·ds[i-1])`
/// - `v[i] <= sqrt(v[i+1]² + 2·|a_min|·ds[i])`
pub fn speed_profile(v_limit: &[f64], ds: &[f64], a_max: f64, a_min: f64) -> Vec<f64> {
    assert_eq!(
        v_limit.len(),
        ds.len(),
        "speed caps and segment lengths must describe the same loop"
    );

    let n = v_limit.len();
    if n == 0 {
        return Vec::new();
    }

    let brake = a_min.abs();
    let mut v = v_limit.to_vec();

    let anchor = index_of_min(v_limit);
    forward_pass(&mut v, ds, a_max, anchor);
    backward_pass(&mut v, ds, brake, anchor);

    let seam = v[0].min(v[n - 1]);
    if seam < v[0] || seam < v[n - 1] {
        v[0] = seam;
        v[n - 1] = seam;
        forward_pass(&mut v, ds, a_max, 0);
        backward_pass(&mut v, ds, brake, 0);
    }

    v
}

fn forward_pass(v: &mut [f64], ds: &[f64], accel: f64, anchor: usize) {
    let n = v.len();
    for step in 1..n {
        let i = (anchor + step) % n;
        let prev = (i + n - 1) % n;
        let reachable = (v[prev] * v[prev] + 2.0 * accel * ds[prev]).sqrt();
        if reachable < v[i] {
            v[i] = reachable;
        }
    }
}

fn backward_pass(v: &mut [f64], ds: &[f64], brake: f64, anchor: usize) {
    let n = v.len();
    for step in 1..n {
        let i = (anchor + n - step) % n;
        let next = (i + 1) % n;
        let reachable = (v[next] * v[next] + 2.0 * brake * ds[i]).sqrt();
        if reachable < v[i] {
            v[i] = reachable;
        }
    }
}

fn index_of_min(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best_i, best), (i, &value)| {
            if value < best {
                (i, value)
            } else {
                (best_i, best)
            }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_MAX: f64 = 2.5;
    const A_MIN: f64 = -5.0;

    fn assert_feasible(v: &[f64], v_limit: &[f64], ds: &[f64]) {
        let n = v.len();
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let tol = 1e-9 * v_limit[i].max(1.0);
            assert!(v[i] <= v_limit[i] + tol, "cap violated at {}", i);
            let accel = (v[prev].powi(2) + 2.0 * A_MAX * ds[prev]).sqrt();
            assert!(v[i] <= accel + tol, "acceleration violated at {}", i);
            let brake = (v[next].powi(2) + 2.0 * A_MIN.abs() * ds[i]).sqrt();
            assert!(v[i] <= brake + tol, "braking violated at {}", i);
        }
    }

    #[test]
    fn test_uniform_caps_are_untouched() {
        let v_limit = vec![20.0; 50];
        let ds = vec![1.0; 50];
        assert_eq!(speed_profile(&v_limit, &ds, A_MAX, A_MIN), v_limit);
    }

    #[test]
    fn test_hairpin_limits_neighbours() {
        let mut v_limit = vec![60.0; 100];
        v_limit[40] = 5.0;
        let ds = vec![2.0; 100];

        let v = speed_profile(&v_limit, &ds, A_MAX, A_MIN);
        assert_feasible(&v, &v_limit, &ds);

        assert_eq!(v[40], 5.0);
        // Braking approach and acceleration exit.
        assert!((v[39] - (25.0 + 2.0 * 5.0 * 2.0_f64).sqrt()).abs() < 1e-12);
        assert!((v[41] - (25.0 + 2.0 * 2.5 * 2.0_f64).sqrt()).abs() < 1e-12);
        assert!(v[39] > v[41]);
    }

    #[test]
    fn test_constraints_hold_across_the_seam() {
        // Slow corners right next to the seam on both sides.
        let mut v_limit = vec![80.0; 60];
        v_limit[1] = 8.0;
        v_limit[58] = 12.0;
        let ds: Vec<f64> = (0..60).map(|i| 1.0 + (i % 7) as f64 * 0.25).collect();

        let v = speed_profile(&v_limit, &ds, A_MAX, A_MIN);
        assert_feasible(&v, &v_limit, &ds);
        assert_eq!(v[0], v[59]);
    }

    #[test]
    fn test_closure_clamps_seam_to_lower_end() {
        let v_limit = vec![10.0, 30.0, 30.0, 30.0, 3.0];
        let ds = vec![0.5; 5];

        let v = speed_profile(&v_limit, &ds, A_MAX, A_MIN);
        assert_eq!(v[0], v[4]);
        assert_eq!(v[4], 3.0);
        assert_feasible(&v, &v_limit, &ds);
    }

    #[test]
    fn test_straight_caps_are_finite() {
        let caps = speed_limits(&[0.0, 1e-12, 0.1], 1.1, 9.81);
        assert!(caps.iter().all(|c| c.is_finite()));
        assert!(caps[0] > 1e4);
        assert!((caps[2] - (1.1 * 9.81 / 0.1_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_profile() {
        assert!(speed_profile(&[], &[], A_MAX, A_MIN).is_empty());
    }
}
