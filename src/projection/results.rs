//! Benefit projection output structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::format_us;

/// Benefit at one candidate retirement date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Years past the requested retirement date (0 = as requested)
    pub deferral_years: u32,

    /// Benefit factor in percent per year of service
    pub factor: f64,

    pub years_of_service: u32,

    pub age: u32,

    pub projected_date: NaiveDate,

    /// Benefit percentage of average salary, after the cap
    pub percent: f64,

    /// Annual benefit after the payout option reduction
    pub annual_benefit: f64,

    pub monthly_benefit: f64,
}

impl ProjectionRow {
    pub fn projected_date_us(&self) -> String {
        format_us(self.projected_date)
    }
}

/// Complete benefit projection for a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitProjection {
    /// Member identifier, when the profile came from a member file
    pub member_id: Option<u32>,

    pub years_of_service: u32,

    pub age_at_retirement: u32,

    /// Benefit factor at the requested retirement date
    pub factor_percent: f64,

    /// Benefit percentage at the requested retirement date
    pub benefit_percent: f64,

    pub annual_benefit: f64,

    pub monthly_benefit: f64,

    /// Payout option reduction from the full allowance, in percent
    pub option_reduction_pct: f64,

    /// Annual benefit as a percentage of average salary
    pub replacement_ratio: f64,

    /// Requested date followed by each deferral, in increasing order
    pub rows: Vec<ProjectionRow>,
}

impl BenefitProjection {
    /// Build from the table rows; the first row is the requested retirement date
    pub fn from_rows(
        member_id: Option<u32>,
        average_salary: f64,
        option_reduction_pct: f64,
        rows: Vec<ProjectionRow>,
    ) -> Self {
        let base = rows.first();
        let annual_benefit = base.map(|r| r.annual_benefit).unwrap_or(0.0);
        let replacement_ratio = if average_salary > 0.0 {
            annual_benefit / average_salary * 100.0
        } else {
            0.0
        };

        Self {
            member_id,
            years_of_service: base.map(|r| r.years_of_service).unwrap_or(0),
            age_at_retirement: base.map(|r| r.age).unwrap_or(0),
            factor_percent: base.map(|r| r.factor).unwrap_or(0.0),
            benefit_percent: base.map(|r| r.percent).unwrap_or(0.0),
            annual_benefit,
            monthly_benefit: base.map(|r| r.monthly_benefit).unwrap_or(0.0),
            option_reduction_pct,
            replacement_ratio,
            rows,
        }
    }

    /// Row for a given deferral, if within the table
    pub fn row_for_deferral(&self, deferral_years: u32) -> Option<&ProjectionRow> {
        self.rows.iter().find(|r| r.deferral_years == deferral_years)
    }

    /// Earliest deferral reaching the highest annual benefit in the table
    pub fn earliest_maximum(&self) -> Option<&ProjectionRow> {
        let max = self
            .rows
            .iter()
            .map(|r| r.annual_benefit)
            .fold(f64::NEG_INFINITY, f64::max);
        self.rows.iter().find(|r| r.annual_benefit >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(deferral: u32, annual: f64) -> ProjectionRow {
        ProjectionRow {
            deferral_years: deferral,
            factor: 2.0,
            years_of_service: 30 + deferral,
            age: 55 + deferral,
            projected_date: NaiveDate::from_ymd_opt(2040 + deferral as i32, 1, 1).unwrap(),
            percent: annual / 700.0,
            annual_benefit: annual,
            monthly_benefit: annual / 12.0,
        }
    }

    #[test]
    fn test_from_rows_uses_first_row() {
        let projection = BenefitProjection::from_rows(
            Some(7),
            70_000.0,
            0.0,
            vec![row(0, 42_000.0), row(1, 45_570.0)],
        );
        assert_eq!(projection.member_id, Some(7));
        assert_eq!(projection.years_of_service, 30);
        assert_eq!(projection.age_at_retirement, 55);
        assert_eq!(projection.annual_benefit, 42_000.0);
        assert_eq!(projection.monthly_benefit, 3_500.0);
        assert_relative_eq!(projection.replacement_ratio, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_earliest_maximum() {
        let projection = BenefitProjection::from_rows(
            None,
            70_000.0,
            0.0,
            vec![row(0, 42_000.0), row(1, 56_000.0), row(2, 56_000.0)],
        );
        assert_eq!(projection.earliest_maximum().unwrap().deferral_years, 1);
        assert_eq!(projection.row_for_deferral(2).unwrap().age, 57);
        assert!(projection.row_for_deferral(9).is_none());
    }

    #[test]
    fn test_empty_rows() {
        let projection = BenefitProjection::from_rows(None, 70_000.0, 0.0, Vec::new());
        assert_eq!(projection.annual_benefit, 0.0);
        assert!(projection.earliest_maximum().is_none());
    }

    #[test]
    fn test_projected_date_us() {
        assert_eq!(row(3, 1.0).projected_date_us(), "1/1/2043");
    }
}
