//! Retirement Estimator CLI
//!
//! Command-line interface for benefit projections and overtime pay

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use retirement_estimator::member::parse_salary;
use retirement_estimator::{
    BenefitEstimator, BenefitProjection, MemberProfile, OvertimeCalculator, OvertimeInputs,
    OvertimeResult, PayoutOption, PlanAssumptions, ProfileForm, QuickEstimate, QuickInputs,
    RetirementGroup,
};
use retirement_estimator::overtime::{OvertimeRates, SlipHours};
use retirement_estimator::projection::dates::format_us;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "retirement_estimator",
    version,
    about = "Retirement benefit estimator and overtime pay calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project retirement benefits for one member
    Estimate(EstimateArgs),
    /// Quick estimate from current age, service and retirement age
    Quick(QuickArgs),
    /// Calculate overtime pay for a pay period
    Overtime(OvertimeArgs),
}

#[derive(Args, Debug)]
struct EstimateArgs {
    #[arg(long, help = "Date of birth (YYYY-MM-DD or M/D/YYYY)")]
    birth_date: String,
    #[arg(long, help = "Date of hire (YYYY-MM-DD or M/D/YYYY)")]
    hire_date: String,
    #[arg(long, help = "Projected retirement date (YYYY-MM-DD or M/D/YYYY)")]
    retirement_date: String,
    #[arg(long, help = "Average annual salary of the highest paid years")]
    salary: String,
    #[arg(long, default_value = "group2", help = "Retirement group: group1, group2, group3, group4")]
    group: String,
    #[arg(
        long,
        default_value = "before-april-2012",
        help = "Membership date: before-april-2012 or after-april-2012"
    )]
    era: String,
    #[arg(long, default_value = "optionA", help = "Retirement option: optionA, optionB, optionC")]
    option: String,
    #[arg(long, help = "Directory of plan assumption CSV files; built-in plan if omitted")]
    assumptions: Option<PathBuf>,
    #[arg(long, help = "Fall back to the default member profile on invalid input")]
    lenient: bool,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

#[derive(Args, Debug)]
struct QuickArgs {
    #[arg(long, help = "Current age")]
    age: u32,
    #[arg(long, help = "Complete years of service to date")]
    years_of_service: u32,
    #[arg(long, help = "Planned retirement age")]
    retirement_age: u32,
    #[arg(long, help = "Average annual salary of the highest paid years")]
    salary: String,
    #[arg(long, default_value = "group2", help = "Retirement group: group1, group2, group3, group4")]
    group: String,
    #[arg(long, default_value = "optionA", help = "Retirement option: optionA, optionB, optionC")]
    option: String,
    #[arg(long, help = "Directory of plan assumption CSV files; built-in plan if omitted")]
    assumptions: Option<PathBuf>,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RateBasis {
    /// Fixed yellow and pink slip rates
    Fixed,
    /// Yellow and pink slip rates derived from the top-step rate
    TopStep,
}

#[derive(Args, Debug)]
struct OvertimeArgs {
    #[arg(long, default_value_t = 41.02, help = "Your hourly rate")]
    officer_rate: f64,
    #[arg(long, default_value_t = 45.00, help = "Top step patrol officer rate")]
    top_step_rate: f64,
    #[arg(long, default_value_t = 80.0, help = "Regular bi-monthly hours")]
    regular_hours: f64,
    #[arg(long, default_value_t = 0.0)]
    white: f64,
    #[arg(long, default_value_t = 0.0)]
    blue: f64,
    #[arg(long, default_value_t = 0.0)]
    yellow: f64,
    #[arg(long, default_value_t = 0.0)]
    pink: f64,
    #[arg(long, value_enum, default_value_t = RateBasis::Fixed, help = "How yellow and pink slip rates are set")]
    rate_basis: RateBasis,
    #[arg(long, help = "Print JSON instead of a table")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Estimate(args) => run_estimate(args),
        Command::Quick(args) => run_quick(args),
        Command::Overtime(args) => run_overtime(args),
    }
}

fn load_plan(dir: Option<&Path>) -> Result<PlanAssumptions> {
    match dir {
        Some(dir) => PlanAssumptions::from_csv_path(dir)
            .with_context(|| format!("loading plan assumptions from {}", dir.display())),
        None => Ok(PlanAssumptions::default_plan()),
    }
}

fn run_estimate(args: EstimateArgs) -> Result<()> {
    let assumptions = load_plan(args.assumptions.as_deref())?;

    let form = ProfileForm {
        birth_date: args.birth_date,
        hire_date: args.hire_date,
        retirement_date: args.retirement_date,
        average_salary: args.salary,
        retirement_group: args.group,
        membership_era: args.era,
        payout_option: args.option,
    };

    let profile = if args.lenient {
        let (profile, err) = form.validate_or_default();
        if let Some(err) = err {
            eprintln!("Warning: {}. Showing the default member profile.", err);
        }
        profile
    } else {
        form.validate().context("invalid member input")?
    };

    let projection = BenefitEstimator::new(assumptions).project(&profile);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print_projection(&profile, &projection);
    }
    Ok(())
}

fn print_projection(profile: &MemberProfile, projection: &BenefitProjection) {
    println!("Retirement Benefit Estimate");
    println!("===========================\n");

    println!("Member:");
    println!("  {}", profile.retirement_group);
    println!("  Membership: {}", profile.membership_era);
    println!("  {}", profile.payout_option);
    println!("  Average Salary: ${:.2}", profile.average_salary);
    println!();

    println!("At retirement on {}:", format_us(profile.retirement_date));
    println!("  Years of Service: {}", projection.years_of_service);
    println!("  Age at Retirement: {}", projection.age_at_retirement);
    println!("  Benefit Factor: {:.2}%", projection.factor_percent);
    println!("  Benefit Percentage: {:.1}%", projection.benefit_percent);
    if projection.option_reduction_pct > 0.0 {
        println!("  Option Reduction: {:.0}%", projection.option_reduction_pct);
    }
    println!("  Annual Benefit: ${:.2}", projection.annual_benefit);
    println!("  Monthly Benefit: ${:.2}", projection.monthly_benefit);
    println!("  Replacement Ratio: {:.1}%", projection.replacement_ratio);
    println!();

    println!("{:>6} {:>5} {:>4} {:>12} {:>8} {:>14} {:>12}",
        "Factor", "Years", "Age", "Date", "Pct", "Annual", "Monthly");
    println!("{}", "-".repeat(67));

    for row in &projection.rows {
        println!("{:>5.2}% {:>5} {:>4} {:>12} {:>7.1}% {:>14.2} {:>12.2}",
            row.factor,
            row.years_of_service,
            row.age,
            row.projected_date_us(),
            row.percent,
            row.annual_benefit,
            row.monthly_benefit,
        );
    }
}

fn run_quick(args: QuickArgs) -> Result<()> {
    let assumptions = load_plan(args.assumptions.as_deref())?;

    let inputs = QuickInputs {
        current_age: args.age,
        years_of_service: args.years_of_service,
        retirement_age: args.retirement_age,
        average_salary: parse_salary(&args.salary).context("invalid member input")?,
        retirement_group: args.group.parse::<RetirementGroup>().context("invalid member input")?,
        payout_option: args.option.parse::<PayoutOption>().context("invalid member input")?,
    };

    let estimate = BenefitEstimator::new(assumptions)
        .quick_estimate(&inputs)
        .context("invalid member input")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print_quick(&inputs, &estimate);
    }
    Ok(())
}

fn print_quick(inputs: &QuickInputs, estimate: &QuickEstimate) {
    println!("Quick Retirement Estimate");
    println!("=========================\n");

    println!("  {}", inputs.retirement_group);
    println!("  {}", inputs.payout_option);
    println!("  Retirement Age: {}", inputs.retirement_age);
    println!("  Projected Years of Service: {}", estimate.projected_years_of_service);
    println!("  Benefit Factor: {:.1}%", estimate.factor_percent);
    println!("  Benefit Percentage: {:.1}%", estimate.benefit_percent);
    if estimate.option_reduction_pct > 0.0 {
        println!("  Option Reduction: {:.0}%", estimate.option_reduction_pct);
    }
    println!("  Annual Benefit: ${:.2}", estimate.annual_benefit);
    println!("  Monthly Benefit: ${:.2}", estimate.monthly_benefit);
    println!("  Replacement Ratio: {:.1}%", estimate.replacement_ratio);
}

fn run_overtime(args: OvertimeArgs) -> Result<()> {
    let inputs = OvertimeInputs {
        top_step_rate: args.top_step_rate,
        officer_rate: args.officer_rate,
        regular_hours: args.regular_hours,
        hours: SlipHours {
            white: args.white,
            blue: args.blue,
            yellow: args.yellow,
            pink: args.pink,
        },
    };

    let rates = match args.rate_basis {
        RateBasis::Fixed => OvertimeRates::default(),
        RateBasis::TopStep => OvertimeRates::top_step(),
    };

    let result = OvertimeCalculator::new(rates)
        .calculate(&inputs)
        .context("invalid overtime input")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_overtime(&result);
    }
    Ok(())
}

fn print_overtime(result: &OvertimeResult) {
    println!("Overtime Calculation Results");
    println!("============================\n");

    println!("{:<16} {:>8} {:>10} {:>12}", "Type", "Hours", "Rate", "Earnings");
    println!("{}", "-".repeat(49));
    println!("{:<16} {:>8.2} {:>10.2} {:>12.2}",
        "Regular", result.regular_hours, result.regular_rate, result.regular_pay);

    for line in &result.slips {
        println!("{:<16} {:>8.2} {:>10.2} {:>12.2}",
            line.slip.to_string(), line.hours, line.rate, line.earnings);
    }

    println!("{}", "-".repeat(49));
    println!("{:<16} {:>8} {:>10} {:>12.2}", "Overtime Subtotal", "", "", result.overtime_total);
    println!("{:<16} {:>8.2} {:>10} {:>12.2}", "Total", result.total_hours, "", result.total_earnings);
}
