//! Overtime pay calculator by slip type
//!
//! Regular hours are paid at the officer's hourly rate. White and blue slip
//! hours are paid at time and a half of that rate. Yellow and pink slips pay
//! either fixed hourly rates or a premium over time and a half of the top-step
//! patrol rate, depending on the configured [`SlipRateBasis`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::member::{check_amount, InputError};

/// Overtime assignment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlipType {
    White,
    Blue,
    Yellow,
    Pink,
}

impl SlipType {
    pub const ALL: [SlipType; 4] = [SlipType::White, SlipType::Blue, SlipType::Yellow, SlipType::Pink];

    pub fn description(&self) -> &'static str {
        match self {
            SlipType::White => "Standard overtime at 1.5x your hourly rate",
            SlipType::Blue => "Equivalent to White Slip (1.5x your hourly rate)",
            SlipType::Yellow => "Fixed detail rate, or 15% of top step plus 1.5x top step patrol rate",
            SlipType::Pink => "Fixed detail rate, or 7.5% of top step plus 1.5x top step patrol rate",
        }
    }
}

impl fmt::Display for SlipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlipType::White => "White Slip",
            SlipType::Blue => "Blue Slip",
            SlipType::Yellow => "Yellow Slip",
            SlipType::Pink => "Pink Slip",
        };
        f.write_str(name)
    }
}

/// Hours worked per slip type in a pay period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlipHours {
    pub white: f64,
    pub blue: f64,
    pub yellow: f64,
    pub pink: f64,
}

impl SlipHours {
    pub fn get(&self, slip: SlipType) -> f64 {
        match slip {
            SlipType::White => self.white,
            SlipType::Blue => self.blue,
            SlipType::Yellow => self.yellow,
            SlipType::Pink => self.pink,
        }
    }

    pub fn total(&self) -> f64 {
        self.white + self.blue + self.yellow + self.pink
    }
}

/// Pay rate inputs for one pay period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertimeInputs {
    /// Top step patrol officer hourly rate, the base for top-step slip rates
    pub top_step_rate: f64,

    /// Officer's own hourly rate
    pub officer_rate: f64,

    /// Regular hours in the bi-monthly pay period
    pub regular_hours: f64,

    pub hours: SlipHours,
}

impl Default for OvertimeInputs {
    fn default() -> Self {
        Self {
            top_step_rate: 45.00,
            officer_rate: 41.02,
            regular_hours: 80.0,
            hours: SlipHours::default(),
        }
    }
}

impl OvertimeInputs {
    /// Reject negative or non-finite rates and hours
    pub fn validate(&self) -> Result<(), InputError> {
        check_amount("top step rate", self.top_step_rate)?;
        check_amount("hourly rate", self.officer_rate)?;
        check_amount("regular hours", self.regular_hours)?;
        check_amount("white slip hours", self.hours.white)?;
        check_amount("blue slip hours", self.hours.blue)?;
        check_amount("yellow slip hours", self.hours.yellow)?;
        check_amount("pink slip hours", self.hours.pink)?;
        Ok(())
    }
}

/// How yellow and pink slip rates are set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlipRateBasis {
    /// Published fixed hourly rates
    #[default]
    Fixed,
    /// Top-step rate times (premium + time and a half)
    TopStep,
}

/// Rate multipliers and slip rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRates {
    /// Multiplier for white and blue slips, and the base multiplier on the top step
    pub time_and_a_half: f64,

    pub basis: SlipRateBasis,

    /// Fixed hourly rate for yellow slips
    pub yellow_slip_rate: f64,

    /// Fixed hourly rate for pink slips
    pub pink_slip_rate: f64,

    /// Share of the top-step rate added for yellow slips
    pub yellow_premium: f64,

    /// Share of the top-step rate added for pink slips
    pub pink_premium: f64,
}

impl Default for OvertimeRates {
    fn default() -> Self {
        Self {
            time_and_a_half: 1.5,
            basis: SlipRateBasis::Fixed,
            yellow_slip_rate: 70.75,
            pink_slip_rate: 66.14,
            yellow_premium: 0.15,
            pink_premium: 0.075,
        }
    }
}

impl OvertimeRates {
    /// Default rates with yellow and pink derived from the top-step rate
    pub fn top_step() -> Self {
        Self {
            basis: SlipRateBasis::TopStep,
            ..Self::default()
        }
    }
}

/// Earnings for one slip type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlipLine {
    pub slip: SlipType,
    pub hours: f64,
    pub rate: f64,
    pub earnings: f64,
}

/// Overtime calculation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeResult {
    pub regular_rate: f64,
    pub regular_hours: f64,
    pub regular_pay: f64,
    pub slips: Vec<SlipLine>,
    pub overtime_total: f64,
    pub total_earnings: f64,
    pub total_hours: f64,
}

impl OvertimeResult {
    pub fn slip(&self, slip: SlipType) -> Option<&SlipLine> {
        self.slips.iter().find(|line| line.slip == slip)
    }
}

/// Overtime pay calculator
#[derive(Debug, Clone, Default)]
pub struct OvertimeCalculator {
    rates: OvertimeRates,
}

impl OvertimeCalculator {
    pub fn new(rates: OvertimeRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &OvertimeRates {
        &self.rates
    }

    /// Hourly rate for a slip type given the officer's own rate and the top-step rate
    pub fn slip_rate(&self, slip: SlipType, officer_rate: f64, top_step_rate: f64) -> f64 {
        let rates = &self.rates;
        match (slip, rates.basis) {
            (SlipType::White | SlipType::Blue, _) => officer_rate * rates.time_and_a_half,
            (SlipType::Yellow, SlipRateBasis::Fixed) => rates.yellow_slip_rate,
            (SlipType::Pink, SlipRateBasis::Fixed) => rates.pink_slip_rate,
            (SlipType::Yellow, SlipRateBasis::TopStep) => {
                top_step_rate * (rates.yellow_premium + rates.time_and_a_half)
            }
            (SlipType::Pink, SlipRateBasis::TopStep) => {
                top_step_rate * (rates.pink_premium + rates.time_and_a_half)
            }
        }
    }

    /// Validate inputs and calculate pay for the period
    pub fn calculate(&self, inputs: &OvertimeInputs) -> Result<OvertimeResult, InputError> {
        inputs.validate()?;

        let slips: Vec<SlipLine> = SlipType::ALL
            .iter()
            .map(|&slip| {
                let hours = inputs.hours.get(slip);
                let rate = self.slip_rate(slip, inputs.officer_rate, inputs.top_step_rate);
                SlipLine {
                    slip,
                    hours,
                    rate,
                    earnings: rate * hours,
                }
            })
            .collect();

        let regular_pay = inputs.officer_rate * inputs.regular_hours;
        let overtime_total: f64 = slips.iter().map(|line| line.earnings).sum();

        log::debug!(
            "overtime ({:?} slip rates): {:.2} regular + {:.2} overtime over {} slip hours",
            self.rates.basis,
            regular_pay,
            overtime_total,
            inputs.hours.total()
        );

        Ok(OvertimeResult {
            regular_rate: inputs.officer_rate,
            regular_hours: inputs.regular_hours,
            regular_pay,
            slips,
            overtime_total,
            total_earnings: regular_pay + overtime_total,
            total_hours: inputs.regular_hours + inputs.hours.total(),
        })
    }
}
