//! The minmod(theta) TVD slope limiter.

use crate::numeric::Vector;

fn min3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

/// Minmod-limited slope through three scalar samples, scaled by `theta`
/// in `[1, 2]` (1 = most diffusive / minmod, 2 = least diffusive / MC).
///
/// `sign(x)` here is `x.signum()` (`copysign(1.0, x)`): the `min3` factor
/// zeroes the result in every case where the sign-of-zero convention would
/// otherwise matter, so the choice of convention is immaterial.
pub fn minmod_scalar(yl: f64, yc: f64, yr: f64, theta: f64) -> f64 {
    let a = (yc - yl) * theta;
    let b = (yr - yl) * 0.5;
    let c = (yr - yc) * theta;
    let sgn_a = a.signum();
    let sgn_b = b.signum();
    let sgn_c = c.signum();
    0.25 * (sgn_a + sgn_b).abs() * (sgn_a + sgn_c) * min3(a.abs(), b.abs(), c.abs())
}

/// Componentwise minmod slope for an `N`-wide cell state.
pub fn plm_gradient<const N: usize>(
    yl: &Vector<N>,
    yc: &Vector<N>,
    yr: &Vector<N>,
    theta: f64,
) -> Vector<N> {
    Vector::from_fn(|i| minmod_scalar(yl[i], yc[i], yr[i], theta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_on_a_local_extremum() {
        // yc is a local max: any theta should clamp the slope to zero.
        assert_eq!(minmod_scalar(1.0, 2.0, 1.0, 1.5), 0.0);
    }

    #[test]
    fn exact_for_linear_data() {
        // y = x with unit spacing: true slope is 1.0 everywhere.
        let g = minmod_scalar(0.0, 1.0, 2.0, 1.0);
        assert!((g - 1.0).abs() < 1e-12);
    }

    #[test]
    fn larger_theta_is_at_least_as_steep() {
        let g1 = minmod_scalar(0.0, 1.0, 1.6, 1.0).abs();
        let g2 = minmod_scalar(0.0, 1.0, 1.6, 2.0).abs();
        assert!(g2 >= g1);
    }

    #[test]
    fn componentwise_matches_scalar() {
        let yl = Vector([0.0, 1.0]);
        let yc = Vector([1.0, 1.0]);
        let yr = Vector([2.0, 1.6]);
        let g = plm_gradient(&yl, &yc, &yr, 1.5);
        assert!((g[0] - minmod_scalar(0.0, 1.0, 2.0, 1.5)).abs() < 1e-14);
        assert!((g[1] - minmod_scalar(1.0, 1.0, 1.6, 1.5)).abs() < 1e-14);
    }
}
