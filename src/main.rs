//! Rental Sim CLI
//!
//! Command-line interface for simulating rental property investments

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use serde::Serialize;

use rental_sim::property::loader::load_scenarios;
use rental_sim::{OptimizationMode, PropertyInvestment, ScenarioOutcome, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "rental_sim", version, about = "Simulate a rental property investment")]
struct Args {
    /// Purchase price of the property
    #[arg(long, default_value_t = 300_000.0)]
    purchase_price: f64,

    /// Transaction costs (agent, notary, transfer tax)
    #[arg(long, default_value_t = 30_000.0)]
    additional_costs: f64,

    /// Building share of the purchase price (AfA base)
    #[arg(long, default_value_t = 240_000.0)]
    building_value: f64,

    /// Loan amount
    #[arg(long, default_value_t = 300_000.0)]
    debt: f64,

    /// Annual loan interest rate in percent
    #[arg(long, default_value_t = 4.0)]
    rate: f64,

    /// Fixed monthly loan payment
    #[arg(long, default_value_t = 1_500.0)]
    payment: f64,

    /// Monthly rental income
    #[arg(long, default_value_t = 1_200.0)]
    rent: f64,

    /// Deductible non-financing expenses per year
    #[arg(long, default_value_t = 1_200.0)]
    expenses: f64,

    /// Marginal tax rate in percent
    #[arg(long, default_value_t = 42.0)]
    tax_rate: f64,

    /// Disable tax effects in the simulation
    #[arg(long)]
    no_tax: bool,

    /// Calendar month of the first simulated month (0 = January); defaults
    /// to the current month
    #[arg(long)]
    start_month: Option<u32>,

    /// Calendar year of the first simulated month; defaults to the current year
    #[arg(long)]
    start_year: Option<i32>,

    /// Solve for payment and minimum rent instead of using --payment/--rent
    #[arg(long)]
    optimize: bool,

    /// Target monthly cash flow for the optimizer
    #[arg(long, default_value_t = 0.0)]
    target_cash_flow: f64,

    /// Target annual repayment rate in percent for the optimizer
    #[arg(long, default_value_t = 2.0)]
    repayment_rate: f64,

    /// Run all scenarios from a CSV file instead of the flag inputs
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Write the monthly cash-flow schedule to this CSV file
    #[arg(long)]
    monthly_csv: Option<PathBuf>,

    /// Write the calendar-year table to this CSV file
    #[arg(long)]
    yearly_csv: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

/// Compact summary for the --json output
#[derive(Debug, Serialize)]
struct ScenarioSummary {
    scenario_id: u32,
    monthly_payment: f64,
    monthly_rent: f64,
    loan_months: usize,
    total_interest: f64,
    total_net_cash_flow: f64,
    break_even_years: f64,
    max_investment_needed: f64,
    roi_10y: Option<f64>,
}

impl ScenarioSummary {
    fn from_outcome(outcome: &ScenarioOutcome) -> Self {
        let loan_months = outcome
            .schedule
            .iter()
            .filter(|e| e.payment > 0.0)
            .count();
        Self {
            scenario_id: outcome.property.scenario_id,
            monthly_payment: outcome.property.monthly_payment,
            monthly_rent: outcome.property.monthly_rent,
            loan_months,
            total_interest: outcome.metrics.totals.interest_paid,
            total_net_cash_flow: outcome.metrics.totals.net_cash_flow,
            break_even_years: outcome.metrics.break_even_years,
            max_investment_needed: outcome.metrics.max_investment_needed,
            roi_10y: outcome.metrics.roi_10y,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let now = chrono::Local::now();

    let properties = match &args.scenarios {
        Some(path) => load_scenarios(path)
            .with_context(|| format!("loading scenarios from {}", path.display()))?,
        None => vec![PropertyInvestment {
            scenario_id: 1,
            purchase_price: args.purchase_price,
            additional_costs: args.additional_costs,
            building_value: args.building_value,
            debt: args.debt,
            annual_rate_pct: args.rate,
            monthly_payment: args.payment,
            monthly_rent: args.rent,
            annual_expenses: args.expenses,
            tax_rate_pct: args.tax_rate,
            apply_tax: !args.no_tax,
            start_month: args.start_month.unwrap_or(now.month0()),
            start_year: args.start_year.unwrap_or(now.year()),
        }],
    };

    let mode = if args.optimize {
        OptimizationMode::TargetCashFlow {
            target_cash_flow: args.target_cash_flow,
            target_repayment_rate_pct: args.repayment_rate,
        }
    } else {
        OptimizationMode::Off
    };

    let runner = ScenarioRunner::with_mode(mode);
    let outcomes = runner.run_batch(&properties);

    if args.json {
        let summaries: Vec<ScenarioSummary> =
            outcomes.iter().map(ScenarioSummary::from_outcome).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for outcome in &outcomes {
        print_outcome(outcome);
    }

    // CSV exports cover the first (or only) scenario
    if let Some(outcome) = outcomes.first() {
        if let Some(path) = &args.monthly_csv {
            write_monthly_csv(outcome, path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Monthly schedule written to: {}", path.display());
        }
        if let Some(path) = &args.yearly_csv {
            write_yearly_csv(outcome, path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Calendar-year table written to: {}", path.display());
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ScenarioOutcome) {
    let property = &outcome.property;

    println!("Scenario {}", property.scenario_id);
    println!("  Purchase price:   {:>12.2}", property.purchase_price);
    println!("  Additional costs: {:>12.2}", property.additional_costs);
    println!("  Debt:             {:>12.2}", property.debt);
    println!("  Initial equity:   {:>12.2}", property.initial_equity());
    if let Some(opt) = &outcome.optimization {
        println!(
            "  Optimizer: payment {:.2}, minimum rent {:.2}",
            opt.monthly_payment, opt.minimum_rent
        );
    }
    println!();

    println!(
        "{:>5} {:>10} {:>10} {:>10} {:>8} {:>10} {:>12} {:>12} {:>12}",
        "Month", "Rent", "Payment", "Interest", "Tax", "Net", "Liquid", "Equity", "Total"
    );
    println!("{}", "-".repeat(96));

    for rec in outcome.metrics.monthly_schedule.iter().take(24) {
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>10.2} {:>8.2} {:>10.2} {:>12.2} {:>12.2} {:>12.2}",
            rec.month,
            rec.rent_income,
            rec.mortgage_payment,
            rec.interest_paid,
            rec.tax_effect,
            rec.net_cash_flow,
            rec.cumulative_liquid,
            rec.cumulative_illiquid,
            rec.cumulative_total,
        );
    }
    println!(
        "... ({} more months)\n",
        outcome.metrics.monthly_schedule.len() - 24
    );

    let metrics = &outcome.metrics;
    println!("Summary:");
    println!("  Total rent:          {:>12.2}", metrics.totals.rent_income);
    println!(
        "  Total payments:      {:>12.2}",
        metrics.totals.mortgage_payments
    );
    println!(
        "  Total interest:      {:>12.2}",
        metrics.totals.interest_paid
    );
    println!("  Total tax effects:   {:>12.2}", metrics.totals.tax_effects);
    println!(
        "  Total net cash flow: {:>12.2}",
        metrics.totals.net_cash_flow
    );
    match metrics.break_even_month {
        Some(month) => println!(
            "  Break-even:          month {} ({:.1} years)",
            month, metrics.break_even_years
        ),
        None => println!("  Break-even:          not reached"),
    }
    println!(
        "  Max investment:      {:>12.2} (at {:.1} years)",
        metrics.max_investment_needed, metrics.max_investment_at_years
    );
    if let Some(roi) = metrics.roi_10y {
        println!("  10-year ROI:         {:>11.1}%", roi);
    }

    // Key calendar years for cross-checking against the yearly table
    println!("\nKey calendar years:");
    for bucket in outcome.yearly_cash_flow.iter().take(5) {
        println!(
            "  {}: {} months, net {:>10.2}, balance {:>12.2} -> {:>12.2}",
            bucket.calendar_year,
            bucket.months,
            bucket.net_cash_flow,
            bucket.start_balance,
            bucket.end_balance,
        );
    }
    println!();
}

fn write_monthly_csv(outcome: &ScenarioOutcome, path: &PathBuf) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Month,Rent,Payment,Interest,Principal,TaxEffect,NetCashFlow,Balance,CumLiquid,CumIlliquid,CumTotal"
    )?;
    for rec in &outcome.metrics.monthly_schedule {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            rec.month,
            rec.rent_income,
            rec.mortgage_payment,
            rec.interest_paid,
            rec.principal_paid,
            rec.tax_effect,
            rec.net_cash_flow,
            rec.balance,
            rec.cumulative_liquid,
            rec.cumulative_illiquid,
            rec.cumulative_total,
        )?;
    }

    Ok(())
}

fn write_yearly_csv(outcome: &ScenarioOutcome, path: &PathBuf) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Year,Months,Rent,Payments,Interest,Principal,TaxEffect,NetCashFlow,StartBalance,EndBalance,StartTotal,EndTotal"
    )?;
    for bucket in &outcome.yearly_cash_flow {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            bucket.calendar_year,
            bucket.months,
            bucket.rent_income,
            bucket.mortgage_payments,
            bucket.interest_paid,
            bucket.principal_paid,
            bucket.tax_effect,
            bucket.net_cash_flow,
            bucket.start_balance,
            bucket.end_balance,
            bucket.start_cumulative_total,
            bucket.end_cumulative_total,
        )?;
    }

    Ok(())
}
