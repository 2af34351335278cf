//! Associated Legendre functions for the geomagnetic potential.
//!
//! Tables are square, indexed `[m][n]` (order, degree), and hold degrees `0..size`. The angle
//! handed in is the geocentric latitude, so `cos_theta` is the sine of the colatitude and the
//! derivative table holds the derivative with respect to colatitude.
use crate::utils::constants::COS_THETA_NUDGE;
use nalgebra::DMatrix;

/// Associated Legendre polynomials and their derivatives for a single angle
#[derive(Debug, Clone, PartialEq)]
pub struct LegendreTable {
    pub p: DMatrix<f64>,
    pub dp: DMatrix<f64>,
}

/// Moves a cosine of exactly zero off zero, so that B_phi can later be divided by it.
///
/// Only an exact zero is moved and the angle itself is not recomputed, which keeps results in
/// line with the published test values for the model.
pub fn regularise_cos_theta(cos_theta: f64) -> f64 {
    if cos_theta == 0.0 {
        cos_theta + COS_THETA_NUDGE
    } else {
        cos_theta
    }
}

/// Calculates the recursion constants K[m][n] = ((n-1)^2 - m^2) / ((2n-1)(2n-3)).
///
/// They only depend on the size of the model, so are calculated once per model.
pub fn recursion_constants(size: usize) -> DMatrix<f64> {
    let mut k = DMatrix::zeros(size, size);
    for n in 1..size {
        for m in 0..=n {
            let (nf, mf) = (n as f64, m as f64);
            k[(m, n)] = ((nf - 1.0) * (nf - 1.0) - mf * mf) / ((2.0 * nf - 1.0) * (2.0 * nf - 3.0));
        }
    }
    k
}

/// Associated Legendre polynomials for a table of `size` degrees, calculating the recursion
/// constants on the way. Use [`associated_polynomials_with`] when they are already available.
pub fn associated_polynomials(cos_theta: f64, sin_theta: f64, size: usize) -> LegendreTable {
    associated_polynomials_with(cos_theta, sin_theta, &recursion_constants(size))
}

/// Associated Legendre polynomials using pre-calculated recursion constants. The size of the
/// returned table matches `k`.
pub fn associated_polynomials_with(
    cos_theta: f64,
    sin_theta: f64,
    k: &DMatrix<f64>,
) -> LegendreTable {
    let size = k.nrows();
    let cos_theta = regularise_cos_theta(cos_theta);
    let mut p = DMatrix::zeros(size, size);
    let mut dp = DMatrix::zeros(size, size);
    if size == 0 {
        return LegendreTable { p, dp };
    }
    p[(0, 0)] = 1.0;

    for n in 1..size {
        for m in 0..=n {
            if m == n {
                let previous = p[(m - 1, n - 1)];
                p[(m, n)] = cos_theta * previous;
                dp[(m, n)] = cos_theta * dp[(m - 1, n - 1)] + sin_theta * previous;
            } else {
                let previous = p[(m, n - 1)];
                // P[m][n-2] does not exist for n < 2, and is zero for m = n - 1
                let (two_back, two_back_dp) = if n >= 2 {
                    (p[(m, n - 2)], dp[(m, n - 2)])
                } else {
                    (0.0, 0.0)
                };
                p[(m, n)] = sin_theta * previous - k[(m, n)] * two_back;
                dp[(m, n)] = sin_theta * dp[(m, n - 1)] - cos_theta * previous - k[(m, n)] * two_back_dp;
            }
        }
    }
    LegendreTable { p, dp }
}

/// Returns the values of the sin(m*phi) and cos(m*phi) series for m in `0..size`.
pub fn multiple_angle(phi: f64, size: usize) -> (Vec<f64>, Vec<f64>) {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let mut sin_n = vec![0.0; size];
    let mut cos_n = vec![1.0; size];
    if size > 1 {
        sin_n[1] = sin_phi;
        cos_n[1] = cos_phi;
    }
    for i in 2..size {
        let last_sin = sin_n[i - 1];
        let last_cos = cos_n[i - 1];
        sin_n[i] = sin_phi * last_cos + cos_phi * last_sin;
        cos_n[i] = cos_phi * last_cos - sin_phi * last_sin;
    }
    (sin_n, cos_n)
}

/// Ordinary Legendre polynomials P_0(v) to P_max_n(v), by Bonnet's recursion.
pub fn legendre_polynomials(max_n: usize, v: f64) -> Vec<f64> {
    let mut poly = vec![0.0; max_n + 1];
    poly[0] = 1.0;
    if max_n >= 1 {
        poly[1] = v;
    }
    for n in 2..=max_n {
        let nf = n as f64;
        poly[n] = (2.0 * nf - 1.0) / nf * v * poly[n - 1] - (nf - 1.0) / nf * poly[n - 2];
    }
    poly
}
