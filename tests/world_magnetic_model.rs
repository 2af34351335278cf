use chrono::NaiveDate;
use geomag::{AltitudeUnit, FieldComponent, FieldResult, GeomagError, WorldMagneticModel};
use is_close::is_close;
use itertools::iproduct;

/// Expected X, Y, Z, H, F, I, D and GV, with GV in [0, 360)
type Expected = [f64; 8];

/// Published test values for WMM-2015, at 0 km and 100 km (328083.99 ft)
const CASES: [(f64, f64, f64, (i32, u32, u32), Expected); 12] = [
    (80.0, 0.0, 0.0, (2015, 1, 1), [6627.1, -445.9, 54432.3, 6642.1, 54836.0, 83.04, -3.85, 356.15]),
    (0.0, 120.0, 0.0, (2015, 1, 1), [39518.2, 392.9, -11252.4, 39520.2, 41090.9, -15.89, 0.57, 0.57]),
    (-80.0, 240.0, 0.0, (2015, 1, 1), [5797.3, 15761.1, -52919.1, 16793.5, 55519.8, -72.39, 69.81, 309.81]),
    (80.0, 0.0, 328083.99, (2015, 1, 1), [6314.3, -471.6, 52269.8, 6331.9, 52652.0, 83.09, -4.27, 355.73]),
    (0.0, 120.0, 328083.99, (2015, 1, 1), [37535.6, 364.4, -10773.4, 37537.3, 39052.7, -16.01, 0.56, 0.56]),
    (-80.0, 240.0, 328083.99, (2015, 1, 1), [5613.1, 14791.5, -50378.6, 15820.7, 52804.4, -72.57, 69.22, 309.22]),
    (80.0, 0.0, 0.0, (2017, 7, 2), [6599.4, -317.1, 54459.2, 6607.0, 54858.5, 83.08, -2.75, 357.25]),
    (0.0, 120.0, 0.0, (2017, 7, 2), [39571.4, 222.5, -11030.1, 39572.0, 41080.5, -15.57, 0.32, 0.32]),
    (-80.0, 240.0, 0.0, (2017, 7, 2), [5873.8, 15781.4, -52687.9, 16839.1, 55313.4, -72.28, 69.58, 309.58]),
    (80.0, 0.0, 328083.99, (2017, 7, 2), [6290.5, -348.5, 52292.7, 6300.1, 52670.9, 83.13, -3.17, 356.83]),
    (0.0, 120.0, 328083.99, (2017, 7, 2), [37585.5, 209.5, -10564.2, 37586.1, 39042.5, -15.7, 0.32, 0.32]),
    (-80.0, 240.0, 328083.99, (2017, 7, 2), [5683.5, 14808.8, -50163.0, 15862.0, 52611.1, -72.45, 69.0, 309.0]),
];

fn date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn assert_matches(result: &FieldResult, expected: &Expected, case: usize) {
    for (component, expected) in FieldComponent::ALL.iter().zip(expected) {
        // intensities are published to 0.1 nT, angles to 0.01 degrees
        let tolerance = match component {
            FieldComponent::I | FieldComponent::D | FieldComponent::GV => 0.02,
            _ => 1.0,
        };
        let value = result.get(*component);
        assert!(
            is_close!(value, *expected, abs_tol = tolerance),
            "case {case}: {component} was {value}, expected {expected}"
        );
    }
}

#[test]
fn reference_values() {
    let wmm = WorldMagneticModel::new().unwrap();
    for (i, (lat, lon, altitude, ymd, expected)) in CASES.iter().enumerate() {
        let result = wmm
            .calc_mag_field(*lat, *lon, *altitude, AltitudeUnit::Feet, date(*ymd))
            .unwrap();
        assert_matches(&result, expected, i);
    }
}

#[test]
fn reference_values_in_other_units() {
    let wmm = WorldMagneticModel::new().unwrap();
    let (lat, lon, _, ymd, expected) = CASES[5];
    for (altitude, unit) in [(100.0, AltitudeUnit::Kilometres), (100_000.0, AltitudeUnit::Metres)] {
        let result = wmm.calc_mag_field(lat, lon, altitude, unit, date(ymd)).unwrap();
        assert_matches(&result, &expected, 5);
    }
}

#[test]
fn repeated_calls_are_identical() {
    let wmm = WorldMagneticModel::new().unwrap();
    let dates = [date((2015, 1, 1)), date((2017, 7, 2)), date((2019, 3, 14))];
    for (lat, lon, day) in iproduct!([-89.5, -45.0, 0.0, 60.0], [-170.0, 0.0, 95.5], dates) {
        let first = wmm.calc_mag_field(lat, lon, 1000.0, AltitudeUnit::Metres, day).unwrap();
        // move the cached time adjustment on and back again
        wmm.calc_mag_field(lat, lon, 0.0, AltitudeUnit::Feet, date((2016, 2, 29)))
            .unwrap();
        let second = wmm.calc_mag_field(lat, lon, 1000.0, AltitudeUnit::Metres, day).unwrap();
        assert_eq!(first, second);

        let fresh = WorldMagneticModel::new()
            .unwrap()
            .calc_mag_field(lat, lon, 1000.0, AltitudeUnit::Metres, day)
            .unwrap();
        assert_eq!(first, fresh);
    }
}

#[test]
fn derived_values_are_consistent() {
    let wmm = WorldMagneticModel::new().unwrap();
    for (lat, lon) in iproduct!([-70.0, -45.0, 30.0, 56.0, 85.0], [-150.0, -30.0, 45.0, 179.0]) {
        let result = wmm
            .calc_mag_field(lat, lon, 0.0, AltitudeUnit::Feet, date((2016, 6, 1)))
            .unwrap();
        let [x, y, z] = result.field_vectors();
        assert!(is_close!(result.bh(), x.hypot(y)));
        assert!(is_close!(result.total_intensity(), result.bh().hypot(z)));
        assert!(is_close!(result.declination(), y.atan2(x).to_degrees()));
        assert_eq!(result.dip(), result.inclination());
        assert!((0.0..360.0).contains(&result.grid_variation()));
        assert!((0.0..360.0).contains(&result.mag_heading(lon)));
        // the field points down in the north and up in the south
        assert_eq!(result.bz() > 0.0, lat > 0.0, "({lat}, {lon})");
    }
}

#[test]
fn out_of_range_altitudes_are_refused() {
    let wmm = WorldMagneticModel::new().unwrap();
    let day = date((2015, 1, 1));
    assert!(wmm.calc_mag_field(0.0, 0.0, -1.0, AltitudeUnit::Kilometres, day).is_ok());
    assert!(wmm.calc_mag_field(0.0, 0.0, 850.0, AltitudeUnit::Kilometres, day).is_ok());
    assert!(matches!(
        wmm.calc_mag_field(0.0, 0.0, -2.0, AltitudeUnit::Kilometres, day),
        Err(GeomagError::OutOfRange(_))
    ));
    assert!(matches!(
        wmm.calc_mag_field(0.0, 0.0, 3_000_000.0, AltitudeUnit::Feet, day),
        Err(GeomagError::OutOfRange(_))
    ));
    assert_eq!(
        "yards".parse::<AltitudeUnit>(),
        Err(GeomagError::InvalidUnit("yards".to_string()))
    );
}

#[test]
fn convenience_functions() {
    let day = date((2015, 1, 1));
    let declination = geomag::declination(80.0, 0.0, 0.0, AltitudeUnit::Feet, day).unwrap();
    assert!(is_close!(declination, -3.85, abs_tol = 0.02));

    let heading = geomag::heading(20.0, 80.0, 0.0, 0.0, AltitudeUnit::Feet, day).unwrap();
    assert!(is_close!(heading, (20.0 - declination + 360.0) % 360.0));
}

#[test]
fn coefficient_file_on_disk() {
    let wmm = WorldMagneticModel::from_file("model_data/WMM.COF").unwrap();
    let embedded = WorldMagneticModel::new().unwrap();
    let day = date((2017, 7, 2));
    assert_eq!(
        wmm.calc_mag_field(-80.0, 240.0, 0.0, AltitudeUnit::Feet, day).unwrap(),
        embedded.calc_mag_field(-80.0, 240.0, 0.0, AltitudeUnit::Feet, day).unwrap()
    );
    assert!(matches!(
        WorldMagneticModel::from_file("model_data/missing.COF"),
        Err(GeomagError::Load(_))
    ));
}
