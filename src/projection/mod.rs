//! Benefit projection for single members and deferred retirement dates

pub mod dates;
mod state;
mod engine;
mod results;
mod quick;

pub use state::RetirementPoint;
pub use engine::{BenefitEstimator, compute_projection};
pub use results::{BenefitProjection, ProjectionRow};
pub use quick::{QuickEstimate, QuickInputs};
pub use dates::complete_years;
