//! Sweep optimizer targets over a base scenario
//!
//! Runs the full pipeline for a grid of repayment-rate and tax-rate
//! combinations and writes one summary row per combination for comparison.

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use rayon::prelude::*;

use rental_sim::{OptimizationMode, PropertyInvestment, ScenarioRunner};

const REPAYMENT_RATES: [f64; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
const TAX_RATES: [f64; 5] = [0.0, 25.0, 35.0, 42.0, 45.0];

/// One summary row of the sweep output
#[derive(Debug, Clone)]
struct SweepRow {
    repayment_rate_pct: f64,
    tax_rate_pct: f64,
    monthly_payment: f64,
    minimum_rent: f64,
    loan_months: usize,
    total_interest: f64,
    break_even_years: f64,
    max_investment_needed: f64,
}

fn base_scenario(tax_rate_pct: f64) -> PropertyInvestment {
    PropertyInvestment {
        scenario_id: 0,
        purchase_price: 300_000.0,
        additional_costs: 30_000.0,
        building_value: 240_000.0,
        debt: 300_000.0,
        annual_rate_pct: 4.0,
        monthly_payment: 0.0, // overridden by the optimizer
        monthly_rent: 0.0,
        annual_expenses: 1_200.0,
        tax_rate_pct,
        apply_tax: tax_rate_pct > 0.0,
        start_month: 0,
        start_year: 2026,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();

    let grid: Vec<(f64, f64)> = REPAYMENT_RATES
        .iter()
        .flat_map(|&rr| TAX_RATES.iter().map(move |&tr| (rr, tr)))
        .collect();
    println!("Running {} scenario combinations...", grid.len());

    let rows: Vec<SweepRow> = grid
        .par_iter()
        .map(|&(repayment_rate_pct, tax_rate_pct)| {
            let runner = ScenarioRunner::with_mode(OptimizationMode::TargetCashFlow {
                target_cash_flow: 0.0,
                target_repayment_rate_pct: repayment_rate_pct,
            });
            let outcome = runner.run(&base_scenario(tax_rate_pct));
            let loan_months = outcome.schedule.iter().filter(|e| e.payment > 0.0).count();

            SweepRow {
                repayment_rate_pct,
                tax_rate_pct,
                monthly_payment: outcome.property.monthly_payment,
                minimum_rent: outcome.property.monthly_rent,
                loan_months,
                total_interest: outcome.metrics.totals.interest_paid,
                break_even_years: outcome.metrics.break_even_years,
                max_investment_needed: outcome.metrics.max_investment_needed,
            }
        })
        .collect();

    println!("Sweep complete in {:?}", start.elapsed());

    let output_path = "scenario_sweep.csv";
    let mut file = File::create(output_path)?;
    writeln!(
        file,
        "RepaymentRatePct,TaxRatePct,MonthlyPayment,MinimumRent,LoanMonths,TotalInterest,BreakEvenYears,MaxInvestmentNeeded"
    )?;
    for row in &rows {
        writeln!(
            file,
            "{:.1},{:.1},{:.2},{:.2},{},{:.2},{:.2},{:.2}",
            row.repayment_rate_pct,
            row.tax_rate_pct,
            row.monthly_payment,
            row.minimum_rent,
            row.loan_months,
            row.total_interest,
            row.break_even_years,
            row.max_investment_needed,
        )?;
    }
    println!("Output written to {}", output_path);

    // Quick bounds for eyeballing the grid
    if let (Some(fastest), Some(slowest)) = (
        rows.iter()
            .min_by(|a, b| a.loan_months.cmp(&b.loan_months)),
        rows.iter()
            .max_by(|a, b| a.loan_months.cmp(&b.loan_months)),
    ) {
        println!(
            "Fastest payoff: {} months at {:.1}% repayment",
            fastest.loan_months, fastest.repayment_rate_pct
        );
        println!(
            "Slowest payoff: {} months at {:.1}% repayment",
            slowest.loan_months, slowest.repayment_rate_pct
        );
    }

    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
