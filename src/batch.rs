//! Batch runner for projecting many members
//!
//! Pre-loads plan assumptions once, then projects member files or alternative
//! assumption sets without re-reading CSV files.

use rayon::prelude::*;

use crate::assumptions::{AssumptionError, PlanAssumptions};
use crate::member::MemberProfile;
use crate::projection::{BenefitEstimator, BenefitProjection};

/// Pre-loaded batch runner
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_csv()?;
/// let members = load_members("data/members.csv")?;
/// let projections = runner.run_batch(&members);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    estimator: BenefitEstimator,
}

impl BatchRunner {
    /// Create runner with the default plan assumptions
    pub fn new() -> Self {
        Self::with_assumptions(PlanAssumptions::default_plan())
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(PlanAssumptions::from_csv()?))
    }

    /// Create runner from a specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, AssumptionError> {
        Ok(Self::with_assumptions(PlanAssumptions::from_csv_path(path)?))
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: PlanAssumptions) -> Self {
        Self {
            estimator: BenefitEstimator::new(assumptions),
        }
    }

    /// Project a single member
    pub fn run(&self, profile: &MemberProfile) -> BenefitProjection {
        self.estimator.project(profile)
    }

    /// Project many members in parallel; output order matches input order
    pub fn run_batch(&self, profiles: &[MemberProfile]) -> Vec<BenefitProjection> {
        log::info!("projecting {} members", profiles.len());
        profiles.par_iter().map(|p| self.estimator.project(p)).collect()
    }

    /// Project one member under several assumption sets
    pub fn run_scenarios(&self, profile: &MemberProfile, plans: &[PlanAssumptions]) -> Vec<BenefitProjection> {
        plans
            .iter()
            .map(|plan| BenefitEstimator::new(plan.clone()).project(profile))
            .collect()
    }

    /// Get reference to the plan assumptions
    pub fn assumptions(&self) -> &PlanAssumptions {
        self.estimator.assumptions()
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
