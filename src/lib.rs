//! Retirement Estimator - Benefit projections for public safety retirement plans
//!
//! This library provides:
//! - Member profile validation from raw form input
//! - Retirement benefit projections across groups, membership eras and payout options
//! - Deferred-retirement projection tables
//! - Quick estimates from ages and years of service
//! - Configurable plan assumptions loaded from CSV
//! - Overtime pay calculation by slip type
//! - Batch projections over member files

pub mod member;
pub mod assumptions;
pub mod projection;
pub mod overtime;
pub mod batch;

// Re-export commonly used types
pub use member::{MemberProfile, ProfileForm, InputError, RetirementGroup, MembershipEra, PayoutOption};
pub use assumptions::{PlanAssumptions, BenefitRule};
pub use projection::{BenefitEstimator, BenefitProjection, ProjectionRow, QuickEstimate, QuickInputs};
pub use overtime::{OvertimeCalculator, OvertimeInputs, OvertimeResult};
pub use batch::BatchRunner;
