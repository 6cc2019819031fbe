//! Validation of raw form input into a member profile
//!
//! Form fields arrive as text. Every field is checked here and a failure is
//! reported as an [`InputError`] naming the offending field, so callers can
//! decide whether to reject the request or fall back to the default profile.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{MemberProfile, MembershipEra, PayoutOption, RetirementGroup};

/// Earliest calendar year accepted on a date field
pub const MIN_YEAR: i32 = 1900;

/// Latest calendar year accepted on a date field
pub const MAX_YEAR: i32 = 2200;

/// Input validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("invalid {field}: {value:?} is not a valid date (expected YYYY-MM-DD or M/D/YYYY)")]
    InvalidDate { field: &'static str, value: String },

    #[error("invalid average salary: {0:?} is not a number")]
    InvalidSalary(String),

    #[error("average salary must be greater than zero, got {0}")]
    NonPositiveSalary(f64),

    #[error("unknown retirement group: {0:?}")]
    UnknownGroup(String),

    #[error("unknown membership date: {0:?}")]
    UnknownEra(String),

    #[error("unknown retirement option: {0:?}")]
    UnknownOption(String),

    #[error("invalid {field}: {value:?} must be a non-negative number")]
    InvalidAmount { field: &'static str, value: String },
}

/// Raw member form fields as entered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    pub birth_date: String,
    pub hire_date: String,
    pub retirement_date: String,
    pub average_salary: String,
    pub retirement_group: String,
    pub membership_era: String,
    pub payout_option: String,
}

impl ProfileForm {
    /// Validate every field and build a profile
    pub fn validate(&self) -> Result<MemberProfile, InputError> {
        Ok(MemberProfile::new(
            parse_date("birth date", &self.birth_date)?,
            parse_date("hire date", &self.hire_date)?,
            parse_date("retirement date", &self.retirement_date)?,
            parse_salary(&self.average_salary)?,
            self.retirement_group.parse()?,
            self.membership_era.parse()?,
            self.payout_option.parse()?,
        ))
    }

    /// Validate, substituting the default profile on failure.
    ///
    /// The error is returned alongside so the caller can surface a warning.
    pub fn validate_or_default(&self) -> (MemberProfile, Option<InputError>) {
        match self.validate() {
            Ok(profile) => (profile, None),
            Err(err) => (MemberProfile::default(), Some(err)),
        }
    }
}

impl From<&MemberProfile> for ProfileForm {
    fn from(profile: &MemberProfile) -> Self {
        Self {
            birth_date: profile.birth_date.to_string(),
            hire_date: profile.hire_date.to_string(),
            retirement_date: profile.retirement_date.to_string(),
            average_salary: profile.average_salary.to_string(),
            retirement_group: format!("group{}", profile.retirement_group.number()),
            membership_era: profile.membership_era.as_str().to_string(),
            payout_option: format!("option{}", profile.payout_option.letter()),
        }
    }
}

/// Parse a form date in ISO (`2040-01-01`) or US (`1/1/2040`) format
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, InputError> {
    let trimmed = value.trim();
    let invalid = || InputError::InvalidDate {
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map_err(|_| invalid())?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(invalid());
    }
    Ok(date)
}

/// Parse a currency amount, tolerating `$` and thousands separators
pub fn parse_salary(value: &str) -> Result<f64, InputError> {
    let salary = parse_number(value).ok_or_else(|| InputError::InvalidSalary(value.to_string()))?;
    check_salary(salary)
}

/// Check an already-numeric salary is finite and greater than zero
pub fn check_salary(salary: f64) -> Result<f64, InputError> {
    if salary.is_finite() && salary > 0.0 {
        Ok(salary)
    } else {
        Err(InputError::NonPositiveSalary(salary))
    }
}

/// Parse a non-negative amount such as an hourly rate or hours worked
pub fn parse_amount(field: &'static str, value: &str) -> Result<f64, InputError> {
    match parse_number(value) {
        Some(amount) if amount >= 0.0 => Ok(amount),
        _ => Err(InputError::InvalidAmount {
            field,
            value: value.to_string(),
        }),
    }
}

/// Check an already-numeric amount is finite and non-negative
pub fn check_amount(field: &'static str, amount: f64) -> Result<f64, InputError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(InputError::InvalidAmount {
            field,
            value: amount.to_string(),
        })
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a_form() -> ProfileForm {
        ProfileForm {
            birth_date: "1985-01-01".to_string(),
            hire_date: "2010-01-01".to_string(),
            retirement_date: "2040-01-01".to_string(),
            average_salary: "70000".to_string(),
            retirement_group: "group2".to_string(),
            membership_era: "before-april-2012".to_string(),
            payout_option: "optionA".to_string(),
        }
    }

    #[test]
    fn test_validate_complete_form() {
        let profile = scenario_a_form().validate().unwrap();
        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1985, 1, 1).unwrap());
        assert_eq!(profile.average_salary, 70_000.0);
        assert_eq!(profile.retirement_group, RetirementGroup::Group2);
        assert_eq!(profile.member_id, None);
    }

    #[test]
    fn test_us_date_format() {
        let date = parse_date("hire date", "3/21/1998").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1998, 3, 21).unwrap());
    }

    #[test]
    fn test_invalid_date_names_field() {
        let mut form = scenario_a_form();
        form.hire_date = "2010-02-30".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidDate {
                field: "hire date",
                value: "2010-02-30".to_string()
            }
        );
        assert!(err.to_string().contains("hire date"));
    }

    #[test]
    fn test_out_of_range_year() {
        assert!(parse_date("birth date", "1850-06-01").is_err());
        assert!(parse_date("retirement date", "2301-01-01").is_err());
    }

    #[test]
    fn test_salary_parsing() {
        assert_eq!(parse_salary("$83,612.50").unwrap(), 83_612.5);
        assert!(matches!(parse_salary("seventy"), Err(InputError::InvalidSalary(_))));
        assert!(matches!(parse_salary(""), Err(InputError::InvalidSalary(_))));
        assert!(matches!(parse_salary("NaN"), Err(InputError::InvalidSalary(_))));
        assert_eq!(parse_salary("-5"), Err(InputError::NonPositiveSalary(-5.0)));
        assert_eq!(parse_salary("0"), Err(InputError::NonPositiveSalary(0.0)));
    }

    #[test]
    fn test_unknown_selectors() {
        let mut form = scenario_a_form();
        form.membership_era = "sometime".to_string();
        assert!(matches!(form.validate(), Err(InputError::UnknownEra(_))));

        let mut form = scenario_a_form();
        form.payout_option = "optionZ".to_string();
        assert!(matches!(form.validate(), Err(InputError::UnknownOption(_))));
    }

    #[test]
    fn test_validate_or_default() {
        let mut form = scenario_a_form();
        form.average_salary = "abc".to_string();
        let (profile, err) = form.validate_or_default();
        assert_eq!(profile, MemberProfile::default());
        assert_eq!(err, Some(InputError::InvalidSalary("abc".to_string())));

        let (profile, err) = scenario_a_form().validate_or_default();
        assert!(err.is_none());
        assert_eq!(profile.birth_date.year(), 1985);
    }

    #[test]
    fn test_form_from_profile_validates_back() {
        let profile = MemberProfile::default();
        let form = ProfileForm::from(&profile);
        assert_eq!(form.validate().unwrap(), profile);
    }

    #[test]
    fn test_amounts() {
        assert_eq!(parse_amount("hours", "12.5").unwrap(), 12.5);
        assert!(parse_amount("hours", "-1").is_err());
        assert!(check_amount("rate", f64::INFINITY).is_err());
        assert_eq!(check_amount("rate", 0.0).unwrap(), 0.0);
    }
}
