//! Geomagnetic field calculations from spherical-harmonic models such as the World Magnetic
//! Model.
use chrono::NaiveDate;

pub mod error;
pub mod harmonics;
pub mod model;
pub mod utils;

pub use error::GeomagError;
pub use model::field::{FieldComponent, FieldResult};
pub use model::wmm::{default_model, FieldQuery, WorldMagneticModel};
pub use utils::units::AltitudeUnit;

/// Declination in degrees at a latitude and longitude, using the embedded model.
pub fn declination(
    latitude: f64,
    longitude: f64,
    altitude: f64,
    unit: AltitudeUnit,
    date: NaiveDate,
) -> Result<f64, GeomagError> {
    Ok(default_model()?
        .calc_mag_field(latitude, longitude, altitude, unit, date)?
        .declination())
}

/// Magnetic heading for a true heading `hdg` in degrees, using the embedded model.
pub fn heading(
    hdg: f64,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    unit: AltitudeUnit,
    date: NaiveDate,
) -> Result<f64, GeomagError> {
    Ok(default_model()?
        .calc_mag_field(latitude, longitude, altitude, unit, date)?
        .mag_heading(hdg))
}

#[cfg(feature = "python")]
mod python {
    use crate::utils::time::today;
    use crate::{default_model, AltitudeUnit, FieldResult, GeomagError};
    use chrono::NaiveDate;
    use indexmap::IndexMap;
    use pyo3::prelude::*;

    fn parse_date(date: Option<&str>) -> Result<NaiveDate, GeomagError> {
        match date {
            None => Ok(today()),
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|e| {
                GeomagError::InvalidArgument(format!("Invalid date \"{d}\", expected YYYY-MM-DD: {e}"))
            }),
        }
    }

    fn field(
        dlat: f64,
        dlon: f64,
        altitude: f64,
        date: Option<&str>,
        unit: &str,
    ) -> Result<FieldResult, GeomagError> {
        let unit: AltitudeUnit = unit.parse()?;
        default_model()?.calc_mag_field(dlat, dlon, altitude, unit, parse_date(date)?)
    }

    /// Calculates the magnetic field for a latitude and longitude in decimal degrees, returning
    /// X, Y, Z, H, F, I, D and GV.
    #[pyfunction]
    #[pyo3(name = "calc_mag_field")]
    #[pyo3(signature = (dlat, dlon, altitude = 0.0, date = None, unit = "ft".to_string()))]
    fn calc_mag_field_py(
        dlat: f64,
        dlon: f64,
        altitude: f64,
        date: Option<String>,
        unit: String,
    ) -> PyResult<IndexMap<String, f64>> {
        Ok(field(dlat, dlon, altitude, date.as_deref(), &unit)?.to_map())
    }

    /// Declination in degrees for a latitude and longitude in decimal degrees.
    #[pyfunction]
    #[pyo3(name = "declination")]
    #[pyo3(signature = (dlat, dlon, altitude = 0.0, date = None, unit = "ft".to_string()))]
    fn declination_py(
        dlat: f64,
        dlon: f64,
        altitude: f64,
        date: Option<String>,
        unit: String,
    ) -> PyResult<f64> {
        Ok(field(dlat, dlon, altitude, date.as_deref(), &unit)?.declination())
    }

    /// Magnetic heading for a true heading in degrees.
    #[pyfunction]
    #[pyo3(name = "heading")]
    #[pyo3(signature = (hdg, dlat, dlon, altitude = 0.0, date = None, unit = "ft".to_string()))]
    fn heading_py(
        hdg: f64,
        dlat: f64,
        dlon: f64,
        altitude: f64,
        date: Option<String>,
        unit: String,
    ) -> PyResult<f64> {
        Ok(field(dlat, dlon, altitude, date.as_deref(), &unit)?.mag_heading(hdg))
    }

    /// Geomagnetic field from the World Magnetic Model.
    #[pymodule]
    fn geomag(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(calc_mag_field_py, m)?)?;
        m.add_function(wrap_pyfunction!(declination_py, m)?)?;
        m.add_function(wrap_pyfunction!(heading_py, m)?)?;
        Ok(())
    }
}
