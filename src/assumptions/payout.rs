//! Payout option multipliers

use serde::{Deserialize, Serialize};

use crate::member::PayoutOption;

/// Benefit multiplier for each survivor election.
///
/// Option B and C reductions are illustrative, not statutory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutOptions {
    pub option_a: f64,
    pub option_b: f64,
    pub option_c: f64,
}

impl Default for PayoutOptions {
    fn default() -> Self {
        Self {
            option_a: 1.0,
            option_b: 0.97,
            option_c: 0.88,
        }
    }
}

impl PayoutOptions {
    pub fn multiplier(&self, option: PayoutOption) -> f64 {
        match option {
            PayoutOption::OptionA => self.option_a,
            PayoutOption::OptionB => self.option_b,
            PayoutOption::OptionC => self.option_c,
        }
    }

    pub fn set_multiplier(&mut self, option: PayoutOption, multiplier: f64) {
        match option {
            PayoutOption::OptionA => self.option_a = multiplier,
            PayoutOption::OptionB => self.option_b = multiplier,
            PayoutOption::OptionC => self.option_c = multiplier,
        }
    }

    /// Reduction from the full allowance, in percent
    pub fn reduction_pct(&self, option: PayoutOption) -> f64 {
        (1.0 - self.multiplier(option)) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_multipliers() {
        let options = PayoutOptions::default();
        assert_eq!(options.multiplier(PayoutOption::OptionA), 1.0);
        assert_eq!(options.multiplier(PayoutOption::OptionB), 0.97);
        assert_eq!(options.multiplier(PayoutOption::OptionC), 0.88);
    }

    #[test]
    fn test_reduction_pct() {
        let options = PayoutOptions::default();
        assert_relative_eq!(options.reduction_pct(PayoutOption::OptionA), 0.0);
        assert_relative_eq!(options.reduction_pct(PayoutOption::OptionB), 3.0, epsilon = 1e-9);
        assert_relative_eq!(options.reduction_pct(PayoutOption::OptionC), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_set_multiplier() {
        let mut options = PayoutOptions::default();
        options.set_multiplier(PayoutOption::OptionB, 0.95);
        assert_eq!(options.multiplier(PayoutOption::OptionB), 0.95);
        assert_eq!(options.multiplier(PayoutOption::OptionC), 0.88);
    }
}
