//! Run benefit projections for every member in a member file
//!
//! Outputs one row per member per deferral year

use anyhow::{Context, Result};
use clap::Parser;
use retirement_estimator::member::loader::DEFAULT_MEMBERS_PATH;
use retirement_estimator::member::load_members;
use retirement_estimator::{BatchRunner, BenefitProjection};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_block", about = "Project retirement benefits for a member file")]
struct Cli {
    #[arg(long, default_value = DEFAULT_MEMBERS_PATH)]
    members: PathBuf,
    #[arg(long, help = "Directory of plan assumption CSV files; built-in plan if omitted")]
    assumptions: Option<PathBuf>,
    #[arg(long, default_value = "block_projection_output.csv")]
    output: PathBuf,
}

/// Flattened output row
#[derive(Debug, serde::Serialize)]
struct OutputRow {
    #[serde(rename = "MemberID")]
    member_id: Option<u32>,
    #[serde(rename = "Deferral")]
    deferral_years: u32,
    #[serde(rename = "RetirementDate")]
    retirement_date: String,
    #[serde(rename = "YearsOfService")]
    years_of_service: u32,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Factor")]
    factor: String,
    #[serde(rename = "Percent")]
    percent: String,
    #[serde(rename = "AnnualBenefit")]
    annual_benefit: String,
    #[serde(rename = "MonthlyBenefit")]
    monthly_benefit: String,
}

fn output_rows(projection: &BenefitProjection) -> impl Iterator<Item = OutputRow> + '_ {
    projection.rows.iter().map(move |row| OutputRow {
        member_id: projection.member_id,
        deferral_years: row.deferral_years,
        retirement_date: row.projected_date.to_string(),
        years_of_service: row.years_of_service,
        age: row.age,
        factor: format!("{:.2}", row.factor),
        percent: format!("{:.2}", row.percent),
        annual_benefit: format!("{:.2}", row.annual_benefit),
        monthly_benefit: format!("{:.2}", row.monthly_benefit),
    })
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading members from {}...", cli.members.display());

    let members = load_members(&cli.members)
        .with_context(|| format!("loading members from {}", cli.members.display()))?;
    println!("Loaded {} members in {:?}", members.len(), start.elapsed());

    let runner = match &cli.assumptions {
        Some(dir) => BatchRunner::from_csv_path(dir)
            .with_context(|| format!("loading plan assumptions from {}", dir.display()))?,
        None => BatchRunner::new(),
    };

    println!("Running projections...");
    let proj_start = Instant::now();
    let projections = runner.run_batch(&members);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for projection in &projections {
        for row in output_rows(projection) {
            writer.serialize(row)?;
        }
    }
    writer.flush()?;

    println!("Output written to {}", cli.output.display());

    // Print summary stats
    let total_annual: f64 = projections.iter().map(|p| p.annual_benefit).sum();
    let capped = members
        .iter()
        .zip(&projections)
        .filter(|(member, projection)| {
            let rule = runner.assumptions().rule_for_member(member);
            projection.benefit_percent >= rule.max_percent()
        })
        .count();

    println!("\nBlock Summary:");
    println!("  Members: {}", projections.len());
    println!("  Total annual benefit at requested dates: ${:.2}", total_annual);
    if !projections.is_empty() {
        println!("  Average annual benefit: ${:.2}", total_annual / projections.len() as f64);
    }
    println!("  Members at their group maximum: {}", capped);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
