//! Gauss coefficients of a spherical-harmonic field model and their secular variation.
//!
//! A coefficient file has a header line of three fields, `epoch model_name release_date`, followed
//! by rows of six fields, `n m g h g_dot h_dot`. Lines with any other number of fields are skipped.
use crate::error::GeomagError;
use crate::harmonics::normalisation::schmidt_quasi_normalisation;
use crate::utils::constants::MAX_DEGREE;
use crate::utils::time::decimal_year;
use chrono::NaiveDate;
use itertools::Itertools;
use nalgebra::DMatrix;
use rust_embed::RustEmbed;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, GeomagError>;

#[derive(RustEmbed)]
#[folder = "model_data/"]
struct ModelData;

/// File name of the model shipped with the crate
pub const DEFAULT_MODEL_FILE: &str = "WMM.COF";

/// Square table of Gauss coefficients up to a maximum degree.
///
/// `g(n, m)` is packed at `[m][n]` and `h(n, m)`, for m > 0, at `[n][m-1]`, so both fit in one
/// `(N+1) x (N+1)` matrix. Use the accessors rather than indexing the matrix directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    values: DMatrix<f64>,
}

impl CoefficientTable {
    pub fn zeros(max_degree: usize) -> CoefficientTable {
        CoefficientTable {
            values: DMatrix::zeros(max_degree + 1, max_degree + 1),
        }
    }

    /// Number of degrees held, N + 1
    pub fn size(&self) -> usize {
        self.values.nrows()
    }

    pub fn max_degree(&self) -> usize {
        self.size() - 1
    }

    pub fn g(&self, n: usize, m: usize) -> f64 {
        self.values[(m, n)]
    }

    /// The h coefficient, which is always zero for order 0
    pub fn h(&self, n: usize, m: usize) -> f64 {
        if m == 0 {
            0.0
        } else {
            self.values[(n, m - 1)]
        }
    }

    pub fn set_g(&mut self, n: usize, m: usize, value: f64) {
        self.values[(m, n)] = value;
    }

    /// Sets the h coefficient. Order 0 has no h coefficient, so is ignored.
    pub fn set_h(&mut self, n: usize, m: usize, value: f64) {
        if m != 0 {
            self.values[(n, m - 1)] = value;
        }
    }

    /// The packed matrix
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.values
    }
}

/// One coefficient row of a model file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientRecord {
    pub degree: usize, // n
    pub order: usize,  // m
    pub g: f64,
    pub h: f64,
    pub g_dot: f64, // nT/year
    pub h_dot: f64, // nT/year
}

/// Header line of a model file
#[derive(Debug, Clone, PartialEq)]
pub struct ModelHeader {
    pub epoch: f64,           // decimal year the base coefficients are valid at
    pub model: String,        // e.g. WMM-2015
    pub release_date: String, // as written in the file, e.g. 12/15/2014
}

#[derive(Debug)]
struct TimeAdjusted {
    delta_time: f64,
    coefficients: Arc<CoefficientTable>,
}

/// Loaded model coefficients, with the Schmidt normalisation already applied.
#[derive(Debug)]
pub struct CoefficientStore {
    header: ModelHeader,
    coefficient: CoefficientTable,
    coefficient_dot: CoefficientTable,
    time_adjusted_cache: Mutex<Option<TimeAdjusted>>,
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str, line_num: usize) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        GeomagError::Load(format!(
            "Unable to read {name} from line {line_num} of coefficient file: \"{value}\""
        ))
    })
}

/// Degree and order are written as integers, but are read as floats first to accept "1.0".
/// Neither may exceed [`MAX_DEGREE`].
fn parse_index(value: &str, name: &str, line_num: usize) -> Result<usize> {
    let index: f64 = parse_field(value, name, line_num)?;
    if index > MAX_DEGREE as f64 {
        return Err(GeomagError::Load(format!(
            "The {name} on line {line_num} of coefficient file is above {MAX_DEGREE}: \"{value}\""
        )));
    }
    if index < 0.0 || index.fract() != 0.0 {
        return Err(GeomagError::Load(format!(
            "Invalid {name} on line {line_num} of coefficient file: \"{value}\""
        )));
    }
    Ok(index as usize)
}

/// Splits a coefficient source into its header and coefficient rows.
///
/// # Errors
/// Will return `Err` if the source cannot be read, if a header or coefficient line holds values
/// that do not parse, if a degree or order is above [`MAX_DEGREE`], or if there is no header or
/// no coefficient row.
pub fn parse_coefficients<R: BufRead>(reader: R) -> Result<(ModelHeader, Vec<CoefficientRecord>)> {
    let mut header = None;
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line_num = i + 1;
        let line = line.map_err(|e| {
            GeomagError::Load(format!("Unable to read line {line_num} of coefficient file: {e}"))
        })?;
        let fields = line.split_whitespace().collect_vec();
        match fields.len() {
            3 => {
                header = Some(ModelHeader {
                    epoch: parse_field(fields[0], "epoch", line_num)?,
                    model: fields[1].to_string(),
                    release_date: fields[2].to_string(),
                })
            }
            6 => records.push(CoefficientRecord {
                degree: parse_index(fields[0], "degree", line_num)?,
                order: parse_index(fields[1], "order", line_num)?,
                g: parse_field(fields[2], "g", line_num)?,
                h: parse_field(fields[3], "h", line_num)?,
                g_dot: parse_field(fields[4], "g_dot", line_num)?,
                h_dot: parse_field(fields[5], "h_dot", line_num)?,
            }),
            _ => continue,
        }
    }
    let header =
        header.ok_or_else(|| GeomagError::Load("No header line found in coefficient file".into()))?;
    if records.is_empty() {
        Err(GeomagError::Load(
            "No coefficient lines found in coefficient file".into(),
        ))?
    }
    Ok((header, records))
}

impl CoefficientStore {
    /// Builds the store from a header and coefficient rows. The table size follows the highest
    /// degree among the rows.
    ///
    /// # Errors
    /// Will return `Err` if any row has an order greater than its degree.
    pub fn new(header: ModelHeader, records: &[CoefficientRecord]) -> Result<CoefficientStore> {
        let max_degree = records.iter().map(|r| r.degree).max().unwrap_or(0);
        let mut coefficient = CoefficientTable::zeros(max_degree);
        let mut coefficient_dot = CoefficientTable::zeros(max_degree);
        for record in records {
            if record.order > record.degree {
                Err(GeomagError::Load(format!(
                    "Order {} is greater than degree {}",
                    record.order, record.degree
                )))?
            }
            coefficient.set_g(record.degree, record.order, record.g);
            coefficient.set_h(record.degree, record.order, record.h);
            coefficient_dot.set_g(record.degree, record.order, record.g_dot);
            coefficient_dot.set_h(record.degree, record.order, record.h_dot);
        }

        let mut store = CoefficientStore {
            header,
            coefficient,
            coefficient_dot,
            time_adjusted_cache: Mutex::new(None),
        };
        store.unnormalise_gauss_coefficients();
        debug!(
            model = %store.header.model,
            epoch = store.header.epoch,
            max_degree,
            "loaded magnetic model coefficients"
        );
        Ok(store)
    }

    /// Reads a model from any line-oriented source.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<CoefficientStore> {
        let (header, records) = parse_coefficients(reader)?;
        CoefficientStore::new(header, &records)
    }

    /// Reads a model from a coefficient file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<CoefficientStore> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            GeomagError::Load(format!("Unable to open {}: {e}", path.display()))
        })?;
        CoefficientStore::from_reader(BufReader::new(file))
    }

    /// Reads the model shipped with the crate, WMM-2015.
    pub fn embedded() -> Result<CoefficientStore> {
        let model_file = ModelData::get(DEFAULT_MODEL_FILE).ok_or_else(|| {
            GeomagError::Load(format!("Embedded model {DEFAULT_MODEL_FILE} not found"))
        })?;
        CoefficientStore::from_reader(BufReader::new(&model_file.data[..]))
    }

    /// Convert Schmidt normalised Gauss coefficients to unnormalised ones, ready for the
    /// Legendre recursion.
    fn unnormalise_gauss_coefficients(&mut self) {
        let schmidt = schmidt_quasi_normalisation(self.size());
        for n in 0..self.size() {
            for m in 0..=n {
                let factor = schmidt[(m, n)];
                for table in [&mut self.coefficient, &mut self.coefficient_dot] {
                    table.set_g(n, m, factor * table.g(n, m));
                    table.set_h(n, m, factor * table.h(n, m));
                }
            }
        }
    }

    pub fn header(&self) -> &ModelHeader {
        &self.header
    }

    pub fn epoch(&self) -> f64 {
        self.header.epoch
    }

    pub fn size(&self) -> usize {
        self.coefficient.size()
    }

    pub fn max_degree(&self) -> usize {
        self.coefficient.max_degree()
    }

    /// Unnormalised coefficients at the epoch
    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficient
    }

    /// Unnormalised secular variation, per year
    pub fn secular_variation(&self) -> &CoefficientTable {
        &self.coefficient_dot
    }

    /// Coefficients extrapolated linearly from the epoch to `delta_time` years later.
    pub fn coefficients_at(&self, delta_time: f64) -> CoefficientTable {
        let mut adjusted = CoefficientTable::zeros(self.max_degree());
        for n in 1..self.size() {
            for m in 0..=n {
                adjusted.set_g(
                    n,
                    m,
                    self.coefficient.g(n, m) + delta_time * self.coefficient_dot.g(n, m),
                );
                adjusted.set_h(
                    n,
                    m,
                    self.coefficient.h(n, m) + delta_time * self.coefficient_dot.h(n, m),
                );
            }
        }
        adjusted
    }

    /// Time adjust the Gauss coefficients to `date`.
    ///
    /// The table for the most recent time offset is kept, and handed back again while the offset
    /// from the epoch is unchanged.
    pub fn time_adjusted(&self, date: NaiveDate) -> Arc<CoefficientTable> {
        let delta_time = decimal_year(date) - self.header.epoch;
        let mut cache = self
            .time_adjusted_cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match cache.as_ref() {
            Some(cached) if cached.delta_time == delta_time => cached.coefficients.clone(),
            _ => {
                trace!(delta_time, "recalculating time adjusted coefficients");
                let coefficients = Arc::new(self.coefficients_at(delta_time));
                *cache = Some(TimeAdjusted {
                    delta_time,
                    coefficients: coefficients.clone(),
                });
                coefficients
            }
        }
    }
}
