//! Plan assumptions: group benefit rules, payout options, and projection horizon

mod rules;
mod payout;
pub mod loader;

pub use rules::{AgeFactorRule, FlatRateRule, QuickRule, BenefitRule, RuleOutcome, FALLBACK_STARTING_AGE};
pub use payout::PayoutOptions;
pub use loader::{LoadedAssumptions, AssumptionError};

use loader::parse_count;

use crate::member::{MemberProfile, MembershipEra, RetirementGroup};
use std::path::Path;

/// Default number of deferral years shown in the projection table (rows 0..=6)
pub const DEFAULT_DEFERRAL_YEARS: u32 = 6;

/// Upper bound for whole-number plan parameters (years and factor steps)
pub const MAX_PLAN_YEARS: u32 = 100;

const PARAMETERS_FILE: &str = "plan_parameters.csv";

/// Container for all benefit assumptions
#[derive(Debug, Clone)]
pub struct PlanAssumptions {
    pub age_factor: AgeFactorRule,
    pub flat_rate: FlatRateRule,
    pub payout: PayoutOptions,
    pub quick: QuickRule,
    /// Largest deferral in the projection table
    pub deferral_years: u32,
}

impl Default for PlanAssumptions {
    fn default() -> Self {
        Self::default_plan()
    }
}

impl PlanAssumptions {
    /// Create assumptions with the published estimator constants
    pub fn default_plan() -> Self {
        Self {
            age_factor: AgeFactorRule::default(),
            flat_rate: FlatRateRule::default(),
            payout: PayoutOptions::default(),
            quick: QuickRule::default(),
            deferral_years: DEFAULT_DEFERRAL_YEARS,
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, AssumptionError> {
        let loaded = LoadedAssumptions::load_from(path)?;
        Self::from_loaded(&loaded)
    }

    /// Overlay loaded tables on the defaults; absent entries keep their default
    pub fn from_loaded(loaded: &LoadedAssumptions) -> Result<Self, AssumptionError> {
        let mut plan = Self::default_plan();

        for (&group, &age) in &loaded.group_rules {
            plan.age_factor.starting_ages.insert(group, age);
        }

        for (&option, &multiplier) in &loaded.payout_options {
            plan.payout.set_multiplier(option, multiplier);
        }

        for (name, &value) in &loaded.plan_parameters {
            match name.as_str() {
                "early_factor" => plan.age_factor.early_factor = value,
                "base_factor" => plan.age_factor.base_factor = value,
                "factor_step" => plan.age_factor.factor_step = value,
                "max_factor_steps" => {
                    plan.age_factor.max_steps = parse_count(PARAMETERS_FILE, name, value, MAX_PLAN_YEARS)?
                }
                "post_reform_reduction" => plan.age_factor.post_reform_reduction = value,
                "age_factor_max_percent" => plan.age_factor.max_percent = value,
                "flat_rate_full_service_years" => {
                    plan.flat_rate.full_service_years = parse_count(PARAMETERS_FILE, name, value, MAX_PLAN_YEARS)?
                }
                "flat_rate_max_percent" => plan.flat_rate.max_percent = value,
                "flat_rate_display_factor" => plan.flat_rate.display_factor = value,
                "quick_group2_factor" => plan.quick.group2_factor = value,
                "quick_default_factor" => plan.quick.default_factor = value,
                "quick_max_service_years" => {
                    plan.quick.max_service_years = parse_count(PARAMETERS_FILE, name, value, MAX_PLAN_YEARS)?
                }
                "quick_max_percent" => plan.quick.max_percent = value,
                "deferral_years" => {
                    plan.deferral_years = parse_count(PARAMETERS_FILE, name, value, MAX_PLAN_YEARS)?
                }
                other => {
                    return Err(AssumptionError::UnknownKey {
                        file: PARAMETERS_FILE,
                        key: other.to_string(),
                    })
                }
            }
        }

        Ok(plan)
    }

    /// Resolve the benefit rule for a group and membership era
    pub fn rule_for(&self, group: RetirementGroup, era: MembershipEra) -> BenefitRule {
        if group.is_flat_rate() {
            BenefitRule::flat_rate(&self.flat_rate)
        } else {
            BenefitRule::age_factor(&self.age_factor, group, era.is_post_reform())
        }
    }

    /// Resolve the benefit rule for a member
    pub fn rule_for_member(&self, profile: &MemberProfile) -> BenefitRule {
        self.rule_for(profile.retirement_group, profile.membership_era)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::PayoutOption;
    use std::collections::HashMap;

    #[test]
    fn test_rule_selection() {
        let plan = PlanAssumptions::default_plan();

        assert!(matches!(
            plan.rule_for(RetirementGroup::Group3, MembershipEra::AfterApril2012),
            BenefitRule::FlatRate { .. }
        ));

        match plan.rule_for(RetirementGroup::Group4, MembershipEra::AfterApril2012) {
            BenefitRule::AgeFactor { starting_age, era_reduction, .. } => {
                assert_eq!(starting_age, 50);
                assert_eq!(era_reduction, 0.25);
            }
            other => panic!("unexpected rule {:?}", other),
        }

        match plan.rule_for(RetirementGroup::Group1, MembershipEra::BeforeApril2012) {
            BenefitRule::AgeFactor { starting_age, era_reduction, .. } => {
                assert_eq!(starting_age, 60);
                assert_eq!(era_reduction, 0.0);
            }
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn test_from_loaded_overrides() {
        let mut group_rules = HashMap::new();
        group_rules.insert(RetirementGroup::Group2, 57);
        let mut payout_options = HashMap::new();
        payout_options.insert(PayoutOption::OptionB, 0.95);
        let mut plan_parameters = HashMap::new();
        plan_parameters.insert("deferral_years".to_string(), 3.0);

        let loaded = LoadedAssumptions { group_rules, payout_options, plan_parameters };
        let plan = PlanAssumptions::from_loaded(&loaded).unwrap();

        assert_eq!(plan.age_factor.starting_age(RetirementGroup::Group2), 57);
        assert_eq!(plan.age_factor.starting_age(RetirementGroup::Group1), 60);
        assert_eq!(plan.payout.multiplier(PayoutOption::OptionB), 0.95);
        assert_eq!(plan.payout.multiplier(PayoutOption::OptionC), 0.88);
        assert_eq!(plan.deferral_years, 3);
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let mut plan_parameters = HashMap::new();
        plan_parameters.insert("cola_rate".to_string(), 0.03);
        let loaded = LoadedAssumptions {
            group_rules: HashMap::new(),
            payout_options: HashMap::new(),
            plan_parameters,
        };

        assert!(matches!(
            PlanAssumptions::from_loaded(&loaded),
            Err(AssumptionError::UnknownKey { .. })
        ));
    }

    fn with_parameter(name: &str, value: f64) -> LoadedAssumptions {
        let mut plan_parameters = HashMap::new();
        plan_parameters.insert(name.to_string(), value);
        LoadedAssumptions {
            group_rules: HashMap::new(),
            payout_options: HashMap::new(),
            plan_parameters,
        }
    }

    #[test]
    fn test_whole_number_parameters_rejected_when_not_counts() {
        let cases = [
            ("deferral_years", -1.0),
            ("deferral_years", 6.9),
            ("deferral_years", 5e9),
            ("deferral_years", f64::NAN),
            ("flat_rate_full_service_years", 24.5),
            ("max_factor_steps", 101.0),
        ];

        for (name, value) in cases {
            match PlanAssumptions::from_loaded(&with_parameter(name, value)) {
                Err(AssumptionError::OutOfRange { key, max, .. }) => {
                    assert_eq!(key, name);
                    assert_eq!(max, MAX_PLAN_YEARS);
                }
                other => panic!("{} = {} gave {:?}", name, value, other),
            }
        }

        let plan = PlanAssumptions::from_loaded(&with_parameter("flat_rate_full_service_years", 30.0)).unwrap();
        assert_eq!(plan.flat_rate.full_service_years, 30);
    }

    #[test]
    fn test_csv_matches_defaults() {
        let plan = PlanAssumptions::from_csv().expect("Failed to load assumptions");
        let defaults = PlanAssumptions::default_plan();

        for group in RetirementGroup::ALL {
            assert_eq!(plan.age_factor.starting_age(group), defaults.age_factor.starting_age(group));
        }
        assert_eq!(plan.payout, defaults.payout);
        assert_eq!(plan.deferral_years, defaults.deferral_years);
        assert_eq!(plan.flat_rate.full_service_years, 25);
        assert_eq!(plan.quick.max_service_years, defaults.quick.max_service_years);
        assert_eq!(plan.quick.group2_factor, defaults.quick.group2_factor);
    }
}
