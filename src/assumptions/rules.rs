//! Benefit percentage rules by retirement group

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::member::RetirementGroup;

/// Starting age used when a group has no configured entry
pub const FALLBACK_STARTING_AGE: u32 = 55;

/// Age-based factor table for Groups 1, 2 and 4
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeFactorRule {
    /// Age at which the full base factor begins, by group
    pub starting_ages: HashMap<RetirementGroup, u32>,

    /// Factor applied when retiring before the starting age
    pub early_factor: f64,

    /// Factor at exactly the starting age
    pub base_factor: f64,

    /// Factor increase per year past the starting age
    pub factor_step: f64,

    /// Years past the starting age after which the factor stops increasing
    pub max_steps: u32,

    /// Factor reduction for members enrolled after April 2, 2012
    pub post_reform_reduction: f64,

    /// Maximum benefit percentage
    pub max_percent: f64,
}

impl Default for AgeFactorRule {
    fn default() -> Self {
        let mut starting_ages = HashMap::new();
        starting_ages.insert(RetirementGroup::Group1, 60);
        starting_ages.insert(RetirementGroup::Group2, 55);
        starting_ages.insert(RetirementGroup::Group4, 50);

        Self {
            starting_ages,
            early_factor: 1.5,
            base_factor: 2.0,
            factor_step: 0.1,
            max_steps: 5,
            post_reform_reduction: 0.25,
            max_percent: 80.0,
        }
    }
}

impl AgeFactorRule {
    pub fn starting_age(&self, group: RetirementGroup) -> u32 {
        self.starting_ages
            .get(&group)
            .copied()
            .unwrap_or(FALLBACK_STARTING_AGE)
    }
}

/// Flat-rate service rule for Group 3 (state police)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatRateRule {
    /// Years of service earning the full percentage
    pub full_service_years: u32,

    /// Percentage earned at full service
    pub max_percent: f64,

    /// Factor shown in projection tables (not used in the percentage)
    pub display_factor: f64,
}

impl Default for FlatRateRule {
    fn default() -> Self {
        Self {
            full_service_years: 25,
            max_percent: 75.0,
            display_factor: 3.0,
        }
    }
}

/// Service-projection rule behind the quick estimate.
///
/// Projects service to the planned retirement age and applies a single
/// factor per group, with no age table and no membership era reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickRule {
    /// Factor for Group 2 members, in percent per year of service
    pub group2_factor: f64,

    /// Factor for all other groups
    pub default_factor: f64,

    /// Projected service is capped at this many years
    pub max_service_years: u32,

    pub max_percent: f64,
}

impl Default for QuickRule {
    fn default() -> Self {
        Self {
            group2_factor: 2.0,
            default_factor: 2.5,
            max_service_years: 32,
            max_percent: 80.0,
        }
    }
}

impl QuickRule {
    pub fn factor(&self, group: RetirementGroup) -> f64 {
        match group {
            RetirementGroup::Group2 => self.group2_factor,
            _ => self.default_factor,
        }
    }

    /// Service at retirement: current service plus the years until the
    /// retirement age, floored at zero and capped at `max_service_years`
    pub fn projected_service(&self, current_age: u32, years_of_service: u32, retirement_age: u32) -> u32 {
        years_of_service
            .saturating_add(retirement_age)
            .saturating_sub(current_age)
            .min(self.max_service_years)
    }

    /// Benefit percentage within [0, max_percent]
    pub fn percent(&self, group: RetirementGroup, projected_service: u32) -> f64 {
        (self.factor(group) * projected_service as f64)
            .max(0.0)
            .min(self.max_percent)
    }
}

/// Factor and percentage for one retirement date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleOutcome {
    pub factor: f64,
    pub percent: f64,
}

/// Group formula resolved for a single member.
///
/// Selected once per profile and applied to the base retirement date and to
/// every deferred date in the projection table.
#[derive(Debug, Clone, PartialEq)]
pub enum BenefitRule {
    /// Percentage proportional to service, capped once full service is reached
    FlatRate {
        full_service_years: u32,
        max_percent: f64,
        display_factor: f64,
    },
    /// Factor by age at retirement, multiplied by years of service
    AgeFactor {
        starting_age: u32,
        early_factor: f64,
        base_factor: f64,
        factor_step: f64,
        max_steps: u32,
        /// Already zero for pre-reform members
        era_reduction: f64,
        max_percent: f64,
    },
}

impl BenefitRule {
    pub fn flat_rate(rule: &FlatRateRule) -> Self {
        BenefitRule::FlatRate {
            full_service_years: rule.full_service_years,
            max_percent: rule.max_percent,
            display_factor: rule.display_factor,
        }
    }

    pub fn age_factor(rule: &AgeFactorRule, group: RetirementGroup, post_reform: bool) -> Self {
        BenefitRule::AgeFactor {
            starting_age: rule.starting_age(group),
            early_factor: rule.early_factor,
            base_factor: rule.base_factor,
            factor_step: rule.factor_step,
            max_steps: rule.max_steps,
            era_reduction: if post_reform { rule.post_reform_reduction } else { 0.0 },
            max_percent: rule.max_percent,
        }
    }

    /// Benefit factor at a given age at retirement
    pub fn factor(&self, age: u32) -> f64 {
        match *self {
            BenefitRule::FlatRate { display_factor, .. } => display_factor,
            BenefitRule::AgeFactor {
                starting_age,
                early_factor,
                base_factor,
                factor_step,
                max_steps,
                era_reduction,
                ..
            } => {
                let factor = if age < starting_age {
                    early_factor
                } else {
                    let steps = (age - starting_age).min(max_steps);
                    base_factor + factor_step * steps as f64
                };
                factor - era_reduction
            }
        }
    }

    /// Benefit percentage for the given service and age, within [0, max_percent]
    pub fn percent(&self, years_of_service: u32, age: u32) -> f64 {
        let raw = match *self {
            BenefitRule::FlatRate {
                full_service_years,
                max_percent,
                ..
            } => {
                if years_of_service >= full_service_years || full_service_years == 0 {
                    max_percent
                } else {
                    years_of_service as f64 / full_service_years as f64 * max_percent
                }
            }
            BenefitRule::AgeFactor { .. } => self.factor(age) * years_of_service as f64,
        };
        raw.max(0.0).min(self.max_percent())
    }

    pub fn evaluate(&self, years_of_service: u32, age: u32) -> RuleOutcome {
        RuleOutcome {
            factor: self.factor(age),
            percent: self.percent(years_of_service, age),
        }
    }

    pub fn max_percent(&self) -> f64 {
        match *self {
            BenefitRule::FlatRate { max_percent, .. } => max_percent,
            BenefitRule::AgeFactor { max_percent, .. } => max_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn group2(post_reform: bool) -> BenefitRule {
        BenefitRule::age_factor(&AgeFactorRule::default(), RetirementGroup::Group2, post_reform)
    }

    #[test]
    fn test_starting_ages() {
        let rule = AgeFactorRule::default();
        assert_eq!(rule.starting_age(RetirementGroup::Group1), 60);
        assert_eq!(rule.starting_age(RetirementGroup::Group2), 55);
        assert_eq!(rule.starting_age(RetirementGroup::Group4), 50);
        assert_eq!(rule.starting_age(RetirementGroup::Group3), FALLBACK_STARTING_AGE);
    }

    #[test]
    fn test_age_factor_steps() {
        let rule = group2(false);
        assert_relative_eq!(rule.factor(50), 1.5);
        assert_relative_eq!(rule.factor(54), 1.5);
        assert_relative_eq!(rule.factor(55), 2.0);
        assert_relative_eq!(rule.factor(57), 2.2, epsilon = 1e-12);
        assert_relative_eq!(rule.factor(59), 2.4, epsilon = 1e-12);
        assert_relative_eq!(rule.factor(60), 2.5, epsilon = 1e-12);
        assert_relative_eq!(rule.factor(72), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_post_reform_reduction() {
        let rule = group2(true);
        assert_relative_eq!(rule.factor(55), 1.75);
        assert_relative_eq!(rule.factor(50), 1.25);
        assert_relative_eq!(rule.percent(30, 55), 52.5);
    }

    #[test]
    fn test_age_factor_cap() {
        let rule = group2(false);
        assert_relative_eq!(rule.percent(30, 55), 60.0);
        assert_relative_eq!(rule.percent(36, 61), 80.0);
        assert_relative_eq!(rule.percent(0, 61), 0.0);
    }

    #[test]
    fn test_flat_rate() {
        let rule = BenefitRule::flat_rate(&FlatRateRule::default());
        assert_relative_eq!(rule.percent(25, 40), 75.0);
        assert_relative_eq!(rule.percent(31, 70), 75.0);
        assert_relative_eq!(rule.percent(20, 70), 60.0);
        assert_relative_eq!(rule.percent(0, 70), 0.0);
        assert_relative_eq!(rule.factor(20), 3.0);
        assert_relative_eq!(rule.max_percent(), 75.0);
    }

    #[test]
    fn test_quick_rule() {
        let rule = QuickRule::default();
        assert_relative_eq!(rule.factor(RetirementGroup::Group2), 2.0);
        assert_relative_eq!(rule.factor(RetirementGroup::Group3), 2.5);

        assert_eq!(rule.projected_service(45, 15, 55), 25);
        assert_eq!(rule.projected_service(30, 10, 65), 32);
        assert_eq!(rule.projected_service(60, 2, 50), 0);

        assert_relative_eq!(rule.percent(RetirementGroup::Group2, 25), 50.0);
        assert_relative_eq!(rule.percent(RetirementGroup::Group1, 32), 80.0);
        assert_relative_eq!(rule.percent(RetirementGroup::Group2, 32), 64.0);
    }
}
