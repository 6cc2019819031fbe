//! Retirement point tracking for a single member

use chrono::NaiveDate;

use crate::member::MemberProfile;
use super::dates::{add_years, complete_years};

/// A member's position at one candidate retirement date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementPoint {
    /// Years retirement is deferred past the requested date
    pub deferral_years: u32,

    pub retirement_date: NaiveDate,

    /// Complete years from hire to retirement
    pub years_of_service: u32,

    /// Complete years from birth to retirement
    pub age: u32,
}

impl RetirementPoint {
    /// Point at the member's requested retirement date
    pub fn from_profile(profile: &MemberProfile) -> Self {
        Self {
            deferral_years: 0,
            retirement_date: profile.retirement_date,
            years_of_service: complete_years(profile.hire_date, profile.retirement_date),
            age: complete_years(profile.birth_date, profile.retirement_date),
        }
    }

    /// Same member retiring `years` later.
    ///
    /// Service and age advance by exactly `years`; they are not recounted from
    /// the shifted date.
    pub fn deferred(&self, years: u32) -> Self {
        Self {
            deferral_years: self.deferral_years + years,
            retirement_date: add_years(self.retirement_date, years),
            years_of_service: self.years_of_service + years,
            age: self.age + years,
        }
    }
}
