//! Quick benefit estimate from ages and years of service
//!
//! A lighter calculation than the date-based projection: service is projected
//! forward to a planned retirement age and a single group factor applies.

use serde::{Deserialize, Serialize};

use crate::assumptions::{PayoutOptions, QuickRule};
use crate::member::{check_salary, InputError, PayoutOption, RetirementGroup};

/// Inputs for a quick estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuickInputs {
    pub current_age: u32,

    /// Complete years of service to date
    pub years_of_service: u32,

    /// Planned retirement age
    pub retirement_age: u32,

    pub average_salary: f64,

    pub retirement_group: RetirementGroup,

    pub payout_option: PayoutOption,
}

impl Default for QuickInputs {
    fn default() -> Self {
        Self {
            current_age: 45,
            years_of_service: 15,
            retirement_age: 55,
            average_salary: 70_000.0,
            retirement_group: RetirementGroup::Group2,
            payout_option: PayoutOption::OptionA,
        }
    }
}

/// Quick estimate output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickEstimate {
    /// Service at the retirement age, after the service cap
    pub projected_years_of_service: u32,

    /// Factor in percent per year of service
    pub factor_percent: f64,

    /// Benefit percentage of average salary, after the cap
    pub benefit_percent: f64,

    pub annual_benefit: f64,

    pub monthly_benefit: f64,

    pub option_reduction_pct: f64,

    /// Annual benefit as a percent of average salary
    pub replacement_ratio: f64,
}

impl QuickEstimate {
    pub fn calculate(
        rule: &QuickRule,
        payout: &PayoutOptions,
        inputs: &QuickInputs,
    ) -> Result<Self, InputError> {
        let salary = check_salary(inputs.average_salary)?;

        let years = rule.projected_service(inputs.current_age, inputs.years_of_service, inputs.retirement_age);
        let percent = rule.percent(inputs.retirement_group, years);
        let annual_benefit = salary * percent / 100.0 * payout.multiplier(inputs.payout_option);

        Ok(Self {
            projected_years_of_service: years,
            factor_percent: rule.factor(inputs.retirement_group),
            benefit_percent: percent,
            annual_benefit,
            monthly_benefit: annual_benefit / 12.0,
            option_reduction_pct: payout.reduction_pct(inputs.payout_option),
            replacement_ratio: annual_benefit / salary * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn estimate(inputs: &QuickInputs) -> QuickEstimate {
        QuickEstimate::calculate(&QuickRule::default(), &PayoutOptions::default(), inputs).unwrap()
    }

    #[test]
    fn test_default_inputs() {
        let result = estimate(&QuickInputs::default());

        assert_eq!(result.projected_years_of_service, 25);
        assert_relative_eq!(result.factor_percent, 2.0);
        assert_relative_eq!(result.benefit_percent, 50.0);
        assert_relative_eq!(result.annual_benefit, 35_000.0);
        assert_relative_eq!(result.monthly_benefit, 35_000.0 / 12.0);
        assert_relative_eq!(result.replacement_ratio, 50.0);
        assert_relative_eq!(result.option_reduction_pct, 0.0);
    }

    #[test]
    fn test_service_capped_at_32_years() {
        let inputs = QuickInputs {
            current_age: 30,
            years_of_service: 10,
            retirement_age: 65,
            ..QuickInputs::default()
        };
        let result = estimate(&inputs);

        assert_eq!(result.projected_years_of_service, 32);
        assert_relative_eq!(result.benefit_percent, 64.0);
    }

    #[test]
    fn test_percent_capped_at_80() {
        let inputs = QuickInputs {
            current_age: 40,
            years_of_service: 10,
            retirement_age: 62,
            retirement_group: RetirementGroup::Group4,
            ..QuickInputs::default()
        };
        let result = estimate(&inputs);

        // 32 years at 2.5 would be 80; 32 is also the service cap
        assert_eq!(result.projected_years_of_service, 32);
        assert_relative_eq!(result.factor_percent, 2.5);
        assert_relative_eq!(result.benefit_percent, 80.0);
        assert_relative_eq!(result.annual_benefit, 56_000.0);
    }

    #[test]
    fn test_option_c_reduction() {
        let inputs = QuickInputs {
            payout_option: PayoutOption::OptionC,
            ..QuickInputs::default()
        };
        let result = estimate(&inputs);

        assert_relative_eq!(result.annual_benefit, 30_800.0, epsilon = 1e-9);
        assert_relative_eq!(result.option_reduction_pct, 12.0, epsilon = 1e-9);
        assert_relative_eq!(result.replacement_ratio, 44.0, epsilon = 1e-9);
    }

    #[test]
    fn test_retirement_age_below_current_age() {
        let inputs = QuickInputs {
            current_age: 60,
            years_of_service: 3,
            retirement_age: 50,
            ..QuickInputs::default()
        };
        let result = estimate(&inputs);

        assert_eq!(result.projected_years_of_service, 0);
        assert_relative_eq!(result.annual_benefit, 0.0);
    }

    #[test]
    fn test_salary_must_be_positive() {
        let inputs = QuickInputs {
            average_salary: 0.0,
            ..QuickInputs::default()
        };
        let err = QuickEstimate::calculate(&QuickRule::default(), &PayoutOptions::default(), &inputs).unwrap_err();
        assert!(matches!(err, InputError::NonPositiveSalary(_)));
    }
}
