use chrono::NaiveDate;
use clap::Parser;
use geomag::utils::time::today;
use geomag::{AltitudeUnit, FieldComponent, WorldMagneticModel};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Geodetic latitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    latitude: f64,

    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    longitude: f64,

    /// Altitude above the WGS84 ellipsoid
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    altitude: f64,

    /// Unit of the altitude, one of ft, m or km
    #[arg(short, long, default_value = "ft")]
    unit: AltitudeUnit,

    /// Date in YYYY-MM-DD format, today if not given
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Coefficient file to use in place of the embedded WMM-2015 model
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// True heading in degrees to convert to a magnetic heading
    #[arg(long, visible_alias = "hdg")]
    heading: Option<f64>,

    /// Components to print, as a comma-separated list of X, Y, Z, H, F, I, D and GV
    #[arg(short, long, value_delimiter = ',')]
    components: Option<Vec<FieldComponent>>,
}

fn bin_main() -> BinResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let wmm = match &args.model {
        Some(path) => WorldMagneticModel::from_file(path)?,
        None => WorldMagneticModel::new()?,
    };
    let date = args.date.unwrap_or_else(today);
    let result = wmm.calc_mag_field(
        args.latitude,
        args.longitude,
        args.altitude,
        args.unit,
        date,
    )?;

    println!(
        "{} at ({}, {}), {} {}, {}",
        wmm.header().model,
        args.latitude,
        args.longitude,
        args.altitude,
        args.unit,
        date
    );
    let components = args
        .components
        .unwrap_or_else(|| FieldComponent::ALL.to_vec());
    for component in components {
        println!("{:>3} {:>12.2}", component, result.get(component));
    }
    if let Some(heading) = args.heading {
        println!("magnetic heading {:.2}", result.mag_heading(heading));
    }
    Ok(())
}
