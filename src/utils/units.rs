use crate::error::GeomagError;
use crate::utils::constants::{FT_PER_KM, M_PER_KM};
use std::fmt;
use std::str::FromStr;

/// Unit of the altitude handed to the field model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltitudeUnit {
    #[default]
    Feet,
    Metres,
    Kilometres,
}

impl AltitudeUnit {
    /// Number of this unit in one kilometre
    fn per_km(self) -> f64 {
        match self {
            AltitudeUnit::Feet => FT_PER_KM,
            AltitudeUnit::Metres => M_PER_KM,
            AltitudeUnit::Kilometres => 1.0,
        }
    }

    pub fn to_km(self, value: f64) -> f64 {
        value / self.per_km()
    }
}

impl FromStr for AltitudeUnit {
    type Err = GeomagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ft" => Ok(AltitudeUnit::Feet),
            "m" => Ok(AltitudeUnit::Metres),
            "km" => Ok(AltitudeUnit::Kilometres),
            _ => Err(GeomagError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let unit = match self {
            AltitudeUnit::Feet => "ft",
            AltitudeUnit::Metres => "m",
            AltitudeUnit::Kilometres => "km",
        };
        write!(f, "{unit}")
    }
}
