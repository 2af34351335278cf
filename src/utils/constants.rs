pub const EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;
pub const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Reference radius of the geomagnetic potential expansion
pub const REFERENCE_RADIUS_M: f64 = 6_371_200.0;

pub const MIN_ALTITUDE_KM: f64 = -1.0;
pub const MAX_ALTITUDE_KM: f64 = 850.0;

/// Highest degree accepted from a coefficient source
pub const MAX_DEGREE: usize = 720;

/// Latitude beyond which grid variation is referenced to the polar grid
pub const GRID_LATITUDE_LIMIT_DEG: f64 = 55.0;

pub(crate) const FT_PER_KM: f64 = 3280.8399;
pub(crate) const M_PER_KM: f64 = 1000.0;

/// Added to a cosine of exactly zero before the Legendre recursion
pub(crate) const COS_THETA_NUDGE: f64 = 1e-8;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;
