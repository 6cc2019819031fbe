//! CSV-based assumption loader
//!
//! Loads plan assumptions from CSV files in data/assumptions/

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::member::{PayoutOption, RetirementGroup};

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Failure while loading an assumption file
#[derive(Debug, Error)]
pub enum AssumptionError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: {value:?} is not a valid number")]
    BadNumber { file: &'static str, value: String },

    #[error("{file}: unknown key {key:?}")]
    UnknownKey { file: &'static str, key: String },

    #[error("{file}: row is missing column {column}")]
    MissingColumn { file: &'static str, column: usize },

    #[error("{file}: {key} = {value} must be a whole number from 0 to {max}")]
    OutOfRange {
        file: &'static str,
        key: String,
        value: f64,
        max: u32,
    },
}

fn open_records(path: &Path, file: &'static str) -> Result<Vec<csv::StringRecord>, AssumptionError> {
    let full_path = path.join(file);
    let handle = File::open(&full_path).map_err(|source| AssumptionError::Io {
        path: full_path.clone(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(handle);

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| AssumptionError::Csv { path: full_path, source })
}

fn column<'r>(record: &'r csv::StringRecord, file: &'static str, index: usize) -> Result<&'r str, AssumptionError> {
    record
        .get(index)
        .ok_or(AssumptionError::MissingColumn { file, column: index + 1 })
}

/// Convert a numeric parameter to a whole count in `0..=max`
pub fn parse_count(file: &'static str, key: &str, value: f64, max: u32) -> Result<u32, AssumptionError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > max as f64 {
        return Err(AssumptionError::OutOfRange {
            file,
            key: key.to_string(),
            value,
            max,
        });
    }
    Ok(value as u32)
}

fn parse_field<T: std::str::FromStr>(file: &'static str, value: &str) -> Result<T, AssumptionError> {
    value.trim().parse().map_err(|_| AssumptionError::BadNumber {
        file,
        value: value.to_string(),
    })
}

/// Load starting ages from group_rules.csv
/// Returns HashMap<group, starting_age>
pub fn load_group_rules(path: &Path) -> Result<HashMap<RetirementGroup, u32>, AssumptionError> {
    const FILE: &str = "group_rules.csv";
    let mut ages = HashMap::new();

    for record in open_records(path, FILE)? {
        let key = column(&record, FILE, 0)?;
        let group: RetirementGroup = key.parse().map_err(|_| AssumptionError::UnknownKey {
            file: FILE,
            key: key.to_string(),
        })?;
        let age: u32 = parse_field(FILE, column(&record, FILE, 1)?)?;
        ages.insert(group, age);
    }

    Ok(ages)
}

/// Load payout multipliers from payout_options.csv
/// Returns HashMap<option, multiplier>
pub fn load_payout_options(path: &Path) -> Result<HashMap<PayoutOption, f64>, AssumptionError> {
    const FILE: &str = "payout_options.csv";
    let mut multipliers = HashMap::new();

    for record in open_records(path, FILE)? {
        let key = column(&record, FILE, 0)?;
        let option: PayoutOption = key.parse().map_err(|_| AssumptionError::UnknownKey {
            file: FILE,
            key: key.to_string(),
        })?;
        let multiplier: f64 = parse_field(FILE, column(&record, FILE, 1)?)?;
        multipliers.insert(option, multiplier);
    }

    Ok(multipliers)
}

/// Load named plan parameters from plan_parameters.csv
/// Returns HashMap<name, value>
pub fn load_plan_parameters(path: &Path) -> Result<HashMap<String, f64>, AssumptionError> {
    const FILE: &str = "plan_parameters.csv";
    let mut parameters = HashMap::new();

    for record in open_records(path, FILE)? {
        let name = column(&record, FILE, 0)?.trim().to_string();
        let value: f64 = parse_field(FILE, column(&record, FILE, 1)?)?;
        parameters.insert(name, value);
    }

    Ok(parameters)
}

/// Raw assumption tables loaded from a directory
pub struct LoadedAssumptions {
    pub group_rules: HashMap<RetirementGroup, u32>,
    pub payout_options: HashMap<PayoutOption, f64>,
    pub plan_parameters: HashMap<String, f64>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self, AssumptionError> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self, AssumptionError> {
        Ok(Self {
            group_rules: load_group_rules(path)?,
            payout_options: load_payout_options(path)?,
            plan_parameters: load_plan_parameters(path)?,
        })
    }
}
