use crate::harmonics::legendre::{associated_polynomials_with, multiple_angle, regularise_cos_theta};
use crate::model::coefficients::CoefficientTable;
use nalgebra::DMatrix;

/// Field components in geocentric spherical coordinates, as summed from the potential
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalField {
    pub b_r: f64,
    pub b_theta: f64,
    pub b_phi: f64,
}

/// (reference_radius / radius)^(n+2) for n in `0..size`
pub fn altitude_ratios(reference_radius: f64, radius: f64, size: usize) -> Vec<f64> {
    let a_over_r = reference_radius / radius;
    (0..size).map(|i| a_over_r.powi(i as i32 + 2)).collect()
}

/// Sums the scalar potential series of `coeff` at longitude `phi` and geocentric latitude
/// `theta` (both radians), `radius` metres from the centre of the Earth.
///
/// `k` holds the recursion constants for the size of `coeff`.
pub fn scalar_potential(
    coeff: &CoefficientTable,
    phi: f64,
    theta: f64,
    radius: f64,
    reference_radius: f64,
    k: &DMatrix<f64>,
) -> SphericalField {
    let size = coeff.size();
    let cos_theta = regularise_cos_theta(theta.cos());
    let sin_theta = theta.sin();

    let (sin_n, cos_n) = multiple_angle(phi, size);
    let legendre = associated_polynomials_with(cos_theta, sin_theta, k);
    let a_over_r_pow = altitude_ratios(reference_radius, radius, size);

    let mut field = SphericalField::default();
    for n in 1..size {
        let current_a_over_r_power = a_over_r_pow[n];
        for m in 0..=n {
            let g = coeff.g(n, m);
            let h = coeff.h(n, m);
            let g_cos = g * cos_n[m];
            let g_sin = g * sin_n[m];
            let h_sin = h * sin_n[m];
            let h_cos = h * cos_n[m];

            field.b_r += current_a_over_r_power
                * (n + 1) as f64
                * (g_cos + h_sin)
                * legendre.p[(m, n)];
            field.b_theta -= current_a_over_r_power * (g_cos + h_sin) * legendre.dp[(m, n)];
            field.b_phi -=
                current_a_over_r_power * m as f64 * (h_cos - g_sin) * legendre.p[(m, n)];
        }
    }
    if cos_theta != 0.0 {
        field.b_phi /= cos_theta;
    }
    field
}
