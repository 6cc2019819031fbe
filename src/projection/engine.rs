//! Benefit estimator for single-member retirement projections

use crate::assumptions::{BenefitRule, PlanAssumptions};
use crate::member::{InputError, MemberProfile};
use super::quick::{QuickEstimate, QuickInputs};
use super::results::{BenefitProjection, ProjectionRow};
use super::state::RetirementPoint;

/// Main benefit estimator
#[derive(Debug, Clone, Default)]
pub struct BenefitEstimator {
    assumptions: PlanAssumptions,
}

impl BenefitEstimator {
    /// Create a new estimator with the given plan assumptions
    pub fn new(assumptions: PlanAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &PlanAssumptions {
        &self.assumptions
    }

    /// Project benefits at the requested retirement date and each deferral year
    pub fn project(&self, profile: &MemberProfile) -> BenefitProjection {
        let rule = self.assumptions.rule_for_member(profile);
        let multiplier = self.assumptions.payout.multiplier(profile.payout_option);

        log::debug!(
            "projecting member {:?}: {} / {} / {} -> {:?}",
            profile.member_id,
            profile.retirement_group,
            profile.membership_era,
            profile.payout_option,
            rule,
        );

        let base = RetirementPoint::from_profile(profile);
        let rows: Vec<ProjectionRow> = (0..=self.assumptions.deferral_years)
            .map(|years| base.deferred(years))
            .map(|point| Self::calculate_row(&rule, multiplier, profile.average_salary, &point))
            .collect();

        BenefitProjection::from_rows(
            profile.member_id,
            profile.average_salary,
            self.assumptions.payout.reduction_pct(profile.payout_option),
            rows,
        )
    }

    /// Quick estimate from ages and service under this plan's quick rule
    pub fn quick_estimate(&self, inputs: &QuickInputs) -> Result<QuickEstimate, InputError> {
        QuickEstimate::calculate(&self.assumptions.quick, &self.assumptions.payout, inputs)
    }

    /// Benefit for one retirement point
    fn calculate_row(
        rule: &BenefitRule,
        option_multiplier: f64,
        average_salary: f64,
        point: &RetirementPoint,
    ) -> ProjectionRow {
        let outcome = rule.evaluate(point.years_of_service, point.age);
        let annual_benefit = average_salary * outcome.percent / 100.0 * option_multiplier;

        ProjectionRow {
            deferral_years: point.deferral_years,
            factor: outcome.factor,
            years_of_service: point.years_of_service,
            age: point.age,
            projected_date: point.retirement_date,
            percent: outcome.percent,
            annual_benefit,
            monthly_benefit: annual_benefit / 12.0,
        }
    }
}

/// Project with the default plan assumptions
pub fn compute_projection(profile: &MemberProfile) -> BenefitProjection {
    BenefitEstimator::default().project(profile)
}
