//! Member profile data structures matching the retirement estimator form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::InputError;

/// Retirement group classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetirementGroup {
    /// General employees
    Group1,
    /// Public safety
    Group2,
    /// State police
    Group3,
    /// Fire, police, corrections
    Group4,
}

impl RetirementGroup {
    pub const ALL: [RetirementGroup; 4] = [
        RetirementGroup::Group1,
        RetirementGroup::Group2,
        RetirementGroup::Group3,
        RetirementGroup::Group4,
    ];

    /// Group number as shown on the form (1-4)
    pub fn number(&self) -> u8 {
        match self {
            RetirementGroup::Group1 => 1,
            RetirementGroup::Group2 => 2,
            RetirementGroup::Group3 => 3,
            RetirementGroup::Group4 => 4,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RetirementGroup::Group1 => "General Employees",
            RetirementGroup::Group2 => "Public Safety",
            RetirementGroup::Group3 => "State Police",
            RetirementGroup::Group4 => "Fire, Police, Corrections",
        }
    }

    /// State police use the flat-rate service rule instead of the age factor table
    pub fn is_flat_rate(&self) -> bool {
        matches!(self, RetirementGroup::Group3)
    }
}

impl fmt::Display for RetirementGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {} - {}", self.number(), self.description())
    }
}

impl FromStr for RetirementGroup {
    type Err = InputError;

    /// Accepts `group2`, `Group 2` or `2`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let digits = normalized.strip_prefix("group").unwrap_or(normalized.as_str());

        match digits {
            "1" => Ok(RetirementGroup::Group1),
            "2" => Ok(RetirementGroup::Group2),
            "3" => Ok(RetirementGroup::Group3),
            "4" => Ok(RetirementGroup::Group4),
            _ => Err(InputError::UnknownGroup(s.to_string())),
        }
    }
}

/// Plan enrollment relative to the April 2, 2012 pension reform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipEra {
    BeforeApril2012,
    AfterApril2012,
}

impl MembershipEra {
    pub fn is_post_reform(&self) -> bool {
        matches!(self, MembershipEra::AfterApril2012)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipEra::BeforeApril2012 => "before-april-2012",
            MembershipEra::AfterApril2012 => "after-april-2012",
        }
    }
}

impl fmt::Display for MembershipEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipEra::BeforeApril2012 => write!(f, "Before April 2, 2012"),
            MembershipEra::AfterApril2012 => write!(f, "After April 2, 2012"),
        }
    }
}

impl FromStr for MembershipEra {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before-april-2012" | "before" | "beforeapril2012" => Ok(MembershipEra::BeforeApril2012),
            "after-april-2012" | "after" | "afterapril2012" => Ok(MembershipEra::AfterApril2012),
            _ => Err(InputError::UnknownEra(s.to_string())),
        }
    }
}

/// Survivor benefit election
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayoutOption {
    /// Full allowance, no survivor benefit
    OptionA,
    /// Reduced allowance, balance refunded to beneficiary
    OptionB,
    /// Reduced allowance, survivor pension
    OptionC,
}

impl PayoutOption {
    pub const ALL: [PayoutOption; 3] = [PayoutOption::OptionA, PayoutOption::OptionB, PayoutOption::OptionC];

    pub fn letter(&self) -> char {
        match self {
            PayoutOption::OptionA => 'A',
            PayoutOption::OptionB => 'B',
            PayoutOption::OptionC => 'C',
        }
    }
}

impl fmt::Display for PayoutOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Option {}", self.letter())
    }
}

impl FromStr for PayoutOption {
    type Err = InputError;

    /// Accepts `optionA`, `Option A` or `A`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let letter = normalized.strip_prefix("option").unwrap_or(normalized.as_str());

        match letter {
            "a" => Ok(PayoutOption::OptionA),
            "b" => Ok(PayoutOption::OptionB),
            "c" => Ok(PayoutOption::OptionC),
            _ => Err(InputError::UnknownOption(s.to_string())),
        }
    }
}

/// A validated member profile, the sole input to a benefit projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Identifier from a member file (None for interactive requests)
    #[serde(default)]
    pub member_id: Option<u32>,

    pub birth_date: NaiveDate,

    pub hire_date: NaiveDate,

    /// Date the member plans to retire
    pub retirement_date: NaiveDate,

    /// Average annual salary of the highest paid years
    pub average_salary: f64,

    pub retirement_group: RetirementGroup,

    pub membership_era: MembershipEra,

    pub payout_option: PayoutOption,
}

impl MemberProfile {
    pub fn new(
        birth_date: NaiveDate,
        hire_date: NaiveDate,
        retirement_date: NaiveDate,
        average_salary: f64,
        retirement_group: RetirementGroup,
        membership_era: MembershipEra,
        payout_option: PayoutOption,
    ) -> Self {
        Self {
            member_id: None,
            birth_date,
            hire_date,
            retirement_date,
            average_salary,
            retirement_group,
            membership_era,
            payout_option,
        }
    }

    pub fn with_member_id(mut self, member_id: u32) -> Self {
        self.member_id = Some(member_id);
        self
    }
}

impl Default for MemberProfile {
    /// Fallback profile used when form input cannot be read
    fn default() -> Self {
        Self::new(
            ymd(1980, 1, 1),
            ymd(2010, 1, 1),
            ymd(2040, 1, 1),
            70_000.0,
            RetirementGroup::Group2,
            MembershipEra::BeforeApril2012,
            PayoutOption::OptionA,
        )
    }
}

// Literal dates only; all are valid calendar dates
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parsing() {
        assert_eq!("group1".parse::<RetirementGroup>().unwrap(), RetirementGroup::Group1);
        assert_eq!("Group 3".parse::<RetirementGroup>().unwrap(), RetirementGroup::Group3);
        assert_eq!("4".parse::<RetirementGroup>().unwrap(), RetirementGroup::Group4);
        assert!(matches!(
            "group5".parse::<RetirementGroup>(),
            Err(InputError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_era_and_option_parsing() {
        assert_eq!("after-april-2012".parse::<MembershipEra>().unwrap(), MembershipEra::AfterApril2012);
        assert_eq!("Before".parse::<MembershipEra>().unwrap(), MembershipEra::BeforeApril2012);
        assert!("2013".parse::<MembershipEra>().is_err());

        assert_eq!("optionB".parse::<PayoutOption>().unwrap(), PayoutOption::OptionB);
        assert_eq!("Option C".parse::<PayoutOption>().unwrap(), PayoutOption::OptionC);
        assert_eq!("a".parse::<PayoutOption>().unwrap(), PayoutOption::OptionA);
        assert!(matches!("D".parse::<PayoutOption>(), Err(InputError::UnknownOption(_))));
    }

    #[test]
    fn test_default_profile() {
        let profile = MemberProfile::default();
        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(1980, 1, 1).unwrap());
        assert_eq!(profile.hire_date, NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
        assert_eq!(profile.retirement_date, NaiveDate::from_ymd_opt(2040, 1, 1).unwrap());
        assert_eq!(profile.average_salary, 70_000.0);
        assert_eq!(profile.retirement_group, RetirementGroup::Group2);
        assert_eq!(profile.membership_era, MembershipEra::BeforeApril2012);
        assert_eq!(profile.payout_option, PayoutOption::OptionA);
    }

    #[test]
    fn test_group_display() {
        assert_eq!(RetirementGroup::Group3.to_string(), "Group 3 - State Police");
        assert!(RetirementGroup::Group3.is_flat_rate());
        assert!(!RetirementGroup::Group4.is_flat_rate());
    }
}
