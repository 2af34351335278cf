use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeomagError {
    /// Represents a missing or structurally invalid coefficient source
    #[error("Unable to load magnetic model: {0}")]
    Load(String),

    /// Altitude unit outside of ft, m and km
    #[error("Unknown unit: {0}")]
    InvalidUnit(String),

    /// Altitude (in km) outside of the range the model is defined for
    #[error("World Magnetic Model is not valid outside the range -1 to 850km, got {0}km")]
    OutOfRange(f64),

    /// Represents a bad argument to one of the numeric helpers
    #[error("{0}")]
    InvalidArgument(String),
}

#[cfg(feature = "python")]
impl From<GeomagError> for pyo3::PyErr {
    fn from(value: GeomagError) -> Self {
        let msg = value.to_string();
        pyo3::exceptions::PyValueError::new_err(msg)
    }
}
