use crate::error::GeomagError;
use crate::harmonics::legendre::recursion_constants;
use crate::harmonics::potential::scalar_potential;
use crate::model::coefficients::{CoefficientStore, ModelHeader};
use crate::model::field::FieldResult;
use crate::utils::constants::{MAX_ALTITUDE_KM, MIN_ALTITUDE_KM, REFERENCE_RADIUS_M};
use crate::utils::latlon::GeodeticPosition;
use crate::utils::time::today;
use crate::utils::units::AltitudeUnit;
use chrono::NaiveDate;
use nalgebra::DMatrix;
use std::path::Path;
use std::sync::OnceLock;
use tracing::trace;

type Result<T> = std::result::Result<T, GeomagError>;

static DEFAULT_MODEL: OnceLock<WorldMagneticModel> = OnceLock::new();

/// The embedded model, loaded on first use and shared afterwards.
pub fn default_model() -> Result<&'static WorldMagneticModel> {
    if let Some(model) = DEFAULT_MODEL.get() {
        return Ok(model);
    }
    let model = WorldMagneticModel::new()?;
    Ok(DEFAULT_MODEL.get_or_init(|| model))
}

/// Calculates geomagnetic variation according to the World Magnetic Model, or any model in the
/// same coefficient format.
///
/// ```
/// use geomag::WorldMagneticModel;
/// use geomag::utils::units::AltitudeUnit;
/// use chrono::NaiveDate;
///
/// let wmm = WorldMagneticModel::new().unwrap();
/// let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
/// let field = wmm.calc_mag_field(80.0, 0.0, 0.0, AltitudeUnit::Feet, date).unwrap();
/// assert!((field.declination() + 3.85).abs() < 0.01);
/// ```
#[derive(Debug)]
pub struct WorldMagneticModel {
    data: CoefficientStore,
    k: DMatrix<f64>,
}

impl WorldMagneticModel {
    /// Loads the model shipped with the crate (WMM-2015).
    pub fn new() -> Result<WorldMagneticModel> {
        Ok(WorldMagneticModel::from_store(CoefficientStore::embedded()?))
    }

    /// Loads a model from a coefficient file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<WorldMagneticModel> {
        Ok(WorldMagneticModel::from_store(CoefficientStore::from_file(
            path,
        )?))
    }

    pub fn from_store(data: CoefficientStore) -> WorldMagneticModel {
        let k = recursion_constants(data.size());
        WorldMagneticModel { data, k }
    }

    pub fn header(&self) -> &ModelHeader {
        self.data.header()
    }

    pub fn epoch(&self) -> f64 {
        self.data.epoch()
    }

    pub fn max_degree(&self) -> usize {
        self.data.max_degree()
    }

    pub fn coefficients(&self) -> &CoefficientStore {
        &self.data
    }

    /// Calculates the magnetic field at a latitude and longitude in decimal degrees.
    ///
    /// # Errors
    /// Will return `Err` if the altitude lies outside of -1 to 850 km, where the model is not
    /// defined.
    pub fn calc_mag_field(
        &self,
        latitude: f64,
        longitude: f64,
        altitude: f64,
        unit: AltitudeUnit,
        date: NaiveDate,
    ) -> Result<FieldResult> {
        let altitude_in_km = unit.to_km(altitude);
        if !(MIN_ALTITUDE_KM..=MAX_ALTITUDE_KM).contains(&altitude_in_km) {
            return Err(GeomagError::OutOfRange(altitude_in_km));
        }

        let position = GeodeticPosition::from_degrees(latitude, longitude);
        let spherical = position.to_spherical(altitude_in_km * 1000.0);
        trace!(%position, %date, altitude_in_km, "calculating magnetic field");

        let field = scalar_potential(
            &self.data.time_adjusted(date),
            position.lon_rad(),
            spherical.latitude,
            spherical.radius,
            REFERENCE_RADIUS_M,
            &self.k,
        );
        Ok(FieldResult::from_spherical(&position, &spherical, field))
    }

    /// Calculates the magnetic field at sea level today.
    pub fn calc_mag_field_today(&self, latitude: f64, longitude: f64) -> Result<FieldResult> {
        self.query(latitude, longitude).calculate()
    }

    /// Starts a query at a latitude and longitude in decimal degrees, defaulting to an altitude
    /// of 0 ft and today's date.
    pub fn query(&self, latitude: f64, longitude: f64) -> FieldQuery<'_> {
        FieldQuery {
            model: self,
            latitude,
            longitude,
            altitude: 0.0,
            unit: AltitudeUnit::default(),
            date: None,
        }
    }
}

/// A field calculation with optional altitude, unit and date.
#[derive(Debug, Clone, Copy)]
pub struct FieldQuery<'a> {
    model: &'a WorldMagneticModel,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    unit: AltitudeUnit,
    date: Option<NaiveDate>,
}

impl FieldQuery<'_> {
    pub fn altitude(mut self, altitude: f64, unit: AltitudeUnit) -> Self {
        self.altitude = altitude;
        self.unit = unit;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn calculate(&self) -> Result<FieldResult> {
        self.model.calc_mag_field(
            self.latitude,
            self.longitude,
            self.altitude,
            self.unit,
            self.date.unwrap_or_else(today),
        )
    }
}
