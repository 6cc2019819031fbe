//! Member profile data, validation, and member file loading

mod data;
mod validation;
pub mod loader;

pub use data::{MemberProfile, RetirementGroup, MembershipEra, PayoutOption};
pub use validation::{ProfileForm, InputError, parse_date, parse_salary, parse_amount, check_amount, check_salary};
pub use loader::{load_members, load_members_from_reader, LoadError};
