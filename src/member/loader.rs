//! Load member profiles from a member CSV file

use super::{InputError, MemberProfile, ProfileForm};
use csv::Reader;
use std::path::Path;
use thiserror::Error;

/// Default member file used by the batch runner
pub const DEFAULT_MEMBERS_PATH: &str = "data/members.csv";

/// Failure while reading a member file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read member file: {0}")]
    Csv(#[from] csv::Error),

    #[error("member file row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: InputError,
    },
}

/// Raw CSV row matching the member file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "MemberID")]
    member_id: u32,
    #[serde(rename = "BirthDate")]
    birth_date: String,
    #[serde(rename = "HireDate")]
    hire_date: String,
    #[serde(rename = "RetirementDate")]
    retirement_date: String,
    #[serde(rename = "AverageSalary")]
    average_salary: String,
    #[serde(rename = "Group")]
    group: String,
    #[serde(rename = "MembershipEra")]
    membership_era: String,
    #[serde(rename = "PayoutOption")]
    payout_option: String,
}

impl CsvRow {
    fn into_profile(self) -> Result<MemberProfile, InputError> {
        let form = ProfileForm {
            birth_date: self.birth_date,
            hire_date: self.hire_date,
            retirement_date: self.retirement_date,
            average_salary: self.average_salary,
            retirement_group: self.group,
            membership_era: self.membership_era,
            payout_option: self.payout_option,
        };
        Ok(form.validate()?.with_member_id(self.member_id))
    }
}

/// Load all members from a CSV file
pub fn load_members<P: AsRef<Path>>(path: P) -> Result<Vec<MemberProfile>, LoadError> {
    let reader = Reader::from_path(path)?;
    collect_members(reader)
}

/// Load members from any reader (e.g., string buffer, stdin)
pub fn load_members_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<MemberProfile>, LoadError> {
    collect_members(Reader::from_reader(reader))
}

/// Load members from the default data/members.csv location
pub fn load_default_members() -> Result<Vec<MemberProfile>, LoadError> {
    load_members(DEFAULT_MEMBERS_PATH)
}

fn collect_members<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<MemberProfile>, LoadError> {
    let mut members = Vec::new();

    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1, so data rows start at 2
        let profile = row
            .into_profile()
            .map_err(|source| LoadError::InvalidRow { row: idx + 2, source })?;
        members.push(profile);
    }

    log::debug!("loaded {} member profiles", members.len());
    Ok(members)
}
