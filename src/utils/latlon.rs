//! Geodetic positions and their conversion to geocentric spherical coordinates.
use crate::error::GeomagError;
use crate::utils::constants::{EQUATORIAL_RADIUS_M, FLATTENING};
use std::fmt;
use std::str::FromStr;

/// Range that [`normalise_plus_minus_range`] limits a value to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// +/- 90 degrees, wrapping every 180 degrees first
    Latitude,
    /// +/- 180 degrees, wrapping every 360 degrees first
    Longitude,
    /// +/- the given value, no wrapping
    Symmetric(f64),
}

/// Remainder taking the sign of the divisor.
fn floor_mod(value: f64, divisor: f64) -> f64 {
    value - divisor * (value / divisor).floor()
}

/// Normalise a value to within a positive and negative range.
///
/// Latitudes and longitudes are first wrapped by a full period, then any value still beyond the
/// limit is folded back into it, e.g. 91 degrees of latitude becomes -89 and 181 degrees of
/// longitude becomes -179. Exact boundaries are kept, so 540 degrees of longitude becomes 180.
pub fn normalise_plus_minus_range(value: f64, bound: Bound) -> f64 {
    let (value, limit) = match bound {
        Bound::Latitude => (wrap_period(value, 90.0), 90.0),
        Bound::Longitude => (wrap_period(value, 180.0), 180.0),
        Bound::Symmetric(limit) => (value, limit),
    };
    if value.abs() > limit {
        let divisor = if value > 0.0 { -limit } else { limit };
        floor_mod(value, divisor)
    } else {
        value
    }
}

fn wrap_period(value: f64, limit: f64) -> f64 {
    let period = if value > 0.0 { 2.0 * limit } else { -2.0 * limit };
    floor_mod(value, period)
}

/// Unit of the angles handed to [`GeodeticPosition::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl FromStr for AngleUnit {
    type Err = GeomagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deg" | "degrees" => Ok(AngleUnit::Degrees),
            "rad" | "radians" => Ok(AngleUnit::Radians),
            _ => Err(GeomagError::InvalidArgument(format!(
                "Incorrect unit specified, please use \"deg\", \"degrees\", \"rad\" or \"radians\", got \"{s}\""
            ))),
        }
    }
}

/// A latitude/longitude pair limited to +/-90 and +/-180 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    latitude: f64,      // degrees
    longitude: f64,     // degrees
    latitude_rad: f64,  // radians
    longitude_rad: f64, // radians
}

impl GeodeticPosition {
    pub fn new(latitude: f64, longitude: f64, unit: AngleUnit) -> GeodeticPosition {
        let (latitude, longitude) = match unit {
            AngleUnit::Degrees => (latitude, longitude),
            AngleUnit::Radians => (latitude.to_degrees(), longitude.to_degrees()),
        };
        let latitude = normalise_plus_minus_range(latitude, Bound::Latitude);
        let longitude = normalise_plus_minus_range(longitude, Bound::Longitude);
        GeodeticPosition {
            latitude,
            longitude,
            latitude_rad: latitude.to_radians(),
            longitude_rad: longitude.to_radians(),
        }
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> GeodeticPosition {
        GeodeticPosition::new(latitude, longitude, AngleUnit::Degrees)
    }

    pub fn lat(&self) -> f64 {
        self.latitude
    }

    pub fn lon(&self) -> f64 {
        self.longitude
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_rad
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_rad
    }

    /// Converts to geocentric spherical coordinates, altitude in metres above the WGS84 ellipsoid.
    pub fn to_spherical(&self, altitude: f64) -> SphericalPosition {
        geodetic_to_spherical(self, altitude)
    }
}

impl fmt::Display for GeodeticPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} N,{} E)", self.latitude, self.longitude)
    }
}

/// Geocentric spherical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition {
    pub latitude: f64,  // radians
    pub longitude: f64, // radians
    pub radius: f64,    // metres from the centre of the Earth
}

impl SphericalPosition {
    /// Latitude and longitude in degrees
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }
}

/// Converts a geodetic position and altitude (metres) into geocentric spherical coordinates
/// on an ellipsoidal Earth.
pub fn geodetic_to_spherical(position: &GeodeticPosition, altitude: f64) -> SphericalPosition {
    let lat = position.lat_rad();
    let eccentricity_squared = FLATTENING * (2.0 - FLATTENING);
    let prime_vertical =
        EQUATORIAL_RADIUS_M / (1.0 - eccentricity_squared * lat.sin().powi(2)).sqrt();

    let p = (prime_vertical + altitude) * lat.cos();
    let z = (prime_vertical * (1.0 - eccentricity_squared) + altitude) * lat.sin();
    let radius = (p * p + z * z).sqrt();

    SphericalPosition {
        latitude: (z / radius).asin(),
        longitude: position.lon_rad(),
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_initialisation() {
        let cases = [
            ((0.0, 0.0), (0.0, 0.0)),
            ((-91.0, 181.0), (89.0, -179.0)),
            ((0.0, 540.0), (0.0, 180.0)),
        ];
        for ((lat, lon), (expected_lat, expected_lon)) in cases {
            let location = GeodeticPosition::from_degrees(lat, lon);
            assert_eq!(location.lat(), expected_lat);
            assert_eq!(location.lon(), expected_lon);
        }
    }

    #[test]
    fn test_radians_input() {
        let location = GeodeticPosition::new(
            std::f64::consts::FRAC_PI_4,
            -std::f64::consts::FRAC_PI_2,
            AngleUnit::Radians,
        );
        assert!(is_close!(location.lat(), 45.0));
        assert!(is_close!(location.lon(), -90.0));
        assert!(is_close!(location.lat_rad(), std::f64::consts::FRAC_PI_4));
    }

    #[test]
    fn test_error_on_wrong_unit() {
        assert!(matches!(
            "wrong_unit".parse::<AngleUnit>(),
            Err(GeomagError::InvalidArgument(_))
        ));
        assert_eq!("rad".parse::<AngleUnit>().unwrap(), AngleUnit::Radians);
        assert_eq!("degrees".parse::<AngleUnit>().unwrap(), AngleUnit::Degrees);
    }

    #[test]
    fn test_norm_range() {
        let cases = [
            (0.0, Bound::Latitude, 0.0),
            (0.0, Bound::Longitude, 0.0),
            (0.0, Bound::Symmetric(10.0), 0.0),
            (20.0, Bound::Symmetric(10.0), 0.0),
            (15.0, Bound::Symmetric(10.0), -5.0),
            (91.0, Bound::Latitude, -89.0),
            (180.0, Bound::Longitude, 180.0),
            (-180.0, Bound::Longitude, -180.0),
            (181.0, Bound::Longitude, -179.0),
            (-181.0, Bound::Longitude, 179.0),
            (360.0, Bound::Longitude, 0.0),
            (-360.0, Bound::Longitude, 0.0),
            (-185.0, Bound::Longitude, 175.0),
            (540.0, Bound::Longitude, 180.0),
            (0.0, Bound::Symmetric(0.0), 0.0),
        ];
        for (value, bound, expected) in cases {
            assert_eq!(
                normalise_plus_minus_range(value, bound),
                expected,
                "normalising {value} with {bound:?}"
            );
        }
    }

    #[test]
    fn test_normalised_ranges_hold_for_large_inputs() {
        for lat in [-1000.5, -270.0, -90.0, 45.0, 90.0, 179.9, 725.25] {
            for lon in [-1234.0, -540.0, -180.0, 0.0, 359.0, 900.75] {
                let location = GeodeticPosition::from_degrees(lat, lon);
                assert!((-90.0..=90.0).contains(&location.lat()), "{location}");
                assert!((-180.0..=180.0).contains(&location.lon()), "{location}");
            }
        }
    }

    #[test]
    fn test_spherical_at_equator_and_pole() {
        let equator = GeodeticPosition::from_degrees(0.0, 120.0).to_spherical(0.0);
        assert!(is_close!(equator.radius, EQUATORIAL_RADIUS_M));
        assert!(is_close!(equator.latitude, 0.0, abs_tol = 1e-12));
        assert!(is_close!(equator.longitude, 120f64.to_radians()));

        let pole = GeodeticPosition::from_degrees(90.0, 0.0).to_spherical(0.0);
        let polar_radius = EQUATORIAL_RADIUS_M * (1.0 - FLATTENING);
        assert!(is_close!(pole.radius, polar_radius, abs_tol = 1e-6));
        assert!(is_close!(pole.to_degrees().0, 90.0));
    }

    #[test]
    fn test_spherical_latitude_is_closer_to_equator() {
        let position = GeodeticPosition::from_degrees(45.0, 0.0);
        let spherical = position.to_spherical(0.0);
        // geocentric latitude at 45 degrees geodetic is about 44.81 degrees
        assert!(is_close!(spherical.to_degrees().0, 44.8076, abs_tol = 1e-3));

        let high = position.to_spherical(100_000.0);
        assert!(high.radius > spherical.radius + 99_000.0);
        assert!(high.latitude > spherical.latitude);
    }
}
