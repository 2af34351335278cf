use crate::error::GeomagError;
use nalgebra::DMatrix;

type Result<T> = std::result::Result<T, GeomagError>;

/// Kronecker delta is defined as I(j, i) = 1 if i = j and I(j, i) = 0 otherwise
pub fn kronecker_delta(j: usize, i: usize) -> f64 {
    if j == i {
        1.0
    } else {
        0.0
    }
}

/// n!! for an integer n >= 0, with 0!! = 1. Stops early once the product overflows.
fn unchecked_double_factorial(n: u64) -> f64 {
    let mut product: f64 = 1.0;
    let mut k = n;
    while k > 1 && product.is_finite() {
        product *= k as f64;
        k -= 2;
    }
    product
}

/// Returns the double factorial (n!!).
///
/// # Errors
/// Will return `Err` if `n` is negative or not an integer.
pub fn double_factorial(n: f64) -> Result<f64> {
    if n.fract() != 0.0 {
        return Err(GeomagError::InvalidArgument(format!(
            "n must be an integer, got {n}"
        )));
    }
    if n < 0.0 {
        return Err(GeomagError::InvalidArgument(format!(
            "n must be greater than 0, got {n}"
        )));
    }
    Ok(unchecked_double_factorial(n as u64))
}

/// Schmidt quasi-normalisation factors, indexed `[m][n]` (order, degree).
///
/// S(n, m) = sqrt((2 - d(0, m)) (n-m)! / (n+m)!) (2n-1)!! / (n-m)!, which also carries
/// (2n-1)!!/(n-m)! to take Gauss coefficients straight to the scale of the associated Legendre
/// recursion in [`crate::harmonics::legendre`]. Built from ratios of neighbouring factors so that
/// no factorial is formed. The table is mirrored about the diagonal.
pub fn schmidt_quasi_normalisation(size: usize) -> DMatrix<f64> {
    let mut schmidt = DMatrix::zeros(size, size);
    if size == 0 {
        return schmidt;
    }
    schmidt[(0, 0)] = 1.0;
    for n in 1..size {
        schmidt[(0, n)] = schmidt[(0, n - 1)] * (2 * n - 1) as f64 / n as f64;
        schmidt[(n, 0)] = schmidt[(0, n)];
        for m in 1..=n {
            // the (2 - d(0, m)) term only changes between m = 0 and m = 1
            let j = if m == 1 { 2.0 } else { 1.0 };
            let value = schmidt[(m - 1, n)] * (((n - m + 1) as f64 * j) / (n + m) as f64).sqrt();
            schmidt[(m, n)] = value;
            schmidt[(n, m)] = value;
        }
    }
    schmidt
}
