use crate::error::GeomagError;
use crate::harmonics::potential::SphericalField;
use crate::utils::constants::GRID_LATITUDE_LIMIT_DEG;
use crate::utils::latlon::{GeodeticPosition, SphericalPosition};
use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// Brings an angle in degrees into [0, 360)
pub(crate) fn normalise_degrees(angle: f64) -> f64 {
    let angle = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to 360
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

/// Names of the values held in a [`FieldResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldComponent {
    X,  // northerly intensity
    Y,  // easterly intensity
    Z,  // vertical (down) intensity
    H,  // horizontal intensity
    F,  // total intensity
    I,  // inclination (dip)
    D,  // declination
    GV, // grid variation
}

impl FieldComponent {
    pub const ALL: [FieldComponent; 8] = [
        FieldComponent::X,
        FieldComponent::Y,
        FieldComponent::Z,
        FieldComponent::H,
        FieldComponent::F,
        FieldComponent::I,
        FieldComponent::D,
        FieldComponent::GV,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FieldComponent::X => "X",
            FieldComponent::Y => "Y",
            FieldComponent::Z => "Z",
            FieldComponent::H => "H",
            FieldComponent::F => "F",
            FieldComponent::I => "I",
            FieldComponent::D => "D",
            FieldComponent::GV => "GV",
        }
    }
}

impl FromStr for FieldComponent {
    type Err = GeomagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldComponent::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| GeomagError::InvalidArgument(format!("Unknown field component: {s}")))
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The magnetic field at one position and date. Intensities are in nT, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldResult {
    northerly_intensity: f64,
    easterly_intensity: f64,
    vertical_intensity: f64,
    horizontal_intensity: f64,
    total_intensity: f64,
    declination: f64,
    inclination: f64,
    grid_variation: f64,
}

impl FieldResult {
    /// Rotates field components from geocentric spherical to geodetic coordinates and derives
    /// the angles from them.
    ///
    /// `field` is as summed from the potential, before the signs of B_r and B_theta are flipped.
    pub fn from_spherical(
        position: &GeodeticPosition,
        spherical: &SphericalPosition,
        field: SphericalField,
    ) -> FieldResult {
        let b_radius = -field.b_r;
        let b_theta = -field.b_theta;

        let delta_latitude = spherical.latitude - position.lat_rad();
        let (sin_delta_latitude, cos_delta_latitude) = delta_latitude.sin_cos();

        let north = b_theta * cos_delta_latitude - b_radius * sin_delta_latitude;
        let east = field.b_phi;
        let down = b_theta * sin_delta_latitude + b_radius * cos_delta_latitude;
        let horizontal = (north * north + east * east).sqrt();
        let total = (horizontal * horizontal + down * down).sqrt();
        let declination = east.atan2(north).to_degrees();
        let inclination = down.atan2(horizontal).to_degrees();

        FieldResult {
            northerly_intensity: north,
            easterly_intensity: east,
            vertical_intensity: down,
            horizontal_intensity: horizontal,
            total_intensity: total,
            declination,
            inclination,
            grid_variation: grid_variation(declination, position),
        }
    }

    pub fn bx(&self) -> f64 {
        self.northerly_intensity
    }

    pub fn by(&self) -> f64 {
        self.easterly_intensity
    }

    pub fn bz(&self) -> f64 {
        self.vertical_intensity
    }

    pub fn bh(&self) -> f64 {
        self.horizontal_intensity
    }

    pub fn total_intensity(&self) -> f64 {
        self.total_intensity
    }

    pub fn declination(&self) -> f64 {
        self.declination
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Same as [`FieldResult::inclination`]
    pub fn dip(&self) -> f64 {
        self.inclination
    }

    pub fn grid_variation(&self) -> f64 {
        self.grid_variation
    }

    /// Calculates the magnetic heading from a true heading, both in degrees.
    pub fn mag_heading(&self, true_heading: f64) -> f64 {
        normalise_degrees(true_heading - self.declination + 360.0)
    }

    pub fn get(&self, component: FieldComponent) -> f64 {
        match component {
            FieldComponent::X => self.northerly_intensity,
            FieldComponent::Y => self.easterly_intensity,
            FieldComponent::Z => self.vertical_intensity,
            FieldComponent::H => self.horizontal_intensity,
            FieldComponent::F => self.total_intensity,
            FieldComponent::I => self.inclination,
            FieldComponent::D => self.declination,
            FieldComponent::GV => self.grid_variation,
        }
    }

    /// The main magnetic components: X, Y and Z
    pub fn field_vectors(&self) -> [f64; 3] {
        [
            self.northerly_intensity,
            self.easterly_intensity,
            self.vertical_intensity,
        ]
    }

    /// The requested components, in the order asked for
    pub fn return_array(&self, components: &[FieldComponent]) -> Vec<f64> {
        components.iter().map(|&c| self.get(c)).collect()
    }

    /// The requested components by name, in the order asked for.
    ///
    /// # Errors
    /// Will return `Err` if a name is not one of X, Y, Z, H, F, I, D or GV.
    pub fn named<S: AsRef<str>>(&self, names: &[S]) -> Result<IndexMap<String, f64>, GeomagError> {
        names
            .iter()
            .map(|name| {
                let component: FieldComponent = name.as_ref().parse()?;
                Ok((component.name().to_string(), self.get(component)))
            })
            .collect()
    }

    /// Every component, in X, Y, Z, H, F, I, D, GV order
    pub fn to_map(&self) -> IndexMap<String, f64> {
        FieldComponent::ALL
            .iter()
            .map(|&c| (c.name().to_string(), self.get(c)))
            .collect()
    }
}

/// Magnetic grid variation, which differs from the declination only in the arctic and antarctic
/// (geodetic latitude beyond +/-55 degrees). The result is in [0, 360).
pub fn grid_variation(declination: f64, position: &GeodeticPosition) -> f64 {
    let lat = position.lat();
    let variation = if lat > GRID_LATITUDE_LIMIT_DEG {
        declination - position.lon()
    } else if lat < -GRID_LATITUDE_LIMIT_DEG {
        declination + position.lon()
    } else {
        declination
    };
    normalise_degrees(variation)
}
