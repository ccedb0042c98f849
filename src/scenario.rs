//! Scenario runner wiring the full pipeline
//!
//! Optimizer (optional) -> amortization generator -> metrics accumulator ->
//! schedule extender -> calendar-year aggregation. Each run is a pure
//! function of the scenario inputs; nothing is retained between runs.

use crate::loan::{self, AmortizationEntry};
use crate::optimizer::{self, OptimizationResult, OptimizerInputs};
use crate::property::PropertyInvestment;
use crate::simulation::calendar::{self, CalendarYearBucket, RunningState};
use crate::simulation::cashflow::InvestmentMetrics;
use crate::simulation::engine::{self, SIMULATION_MONTHS};

/// How payment and rent are chosen before the simulation runs
#[derive(Debug, Clone, Copy, Default)]
pub enum OptimizationMode {
    /// Use the payment and rent from the scenario inputs as-is
    #[default]
    Off,

    /// Override payment and rent with the closed-form optimum
    TargetCashFlow {
        target_cash_flow: f64,
        target_repayment_rate_pct: f64,
    },
}

/// Everything one simulation run produces
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Effective inputs after any optimizer override
    pub property: PropertyInvestment,

    /// The optimizer's solution when an optimization mode was requested
    pub optimization: Option<OptimizationResult>,

    /// Amortization schedule, extended to the simulation horizon
    pub schedule: Vec<AmortizationEntry>,

    pub metrics: InvestmentMetrics,

    /// Monthly cash flow grouped by calendar year
    pub yearly_cash_flow: Vec<CalendarYearBucket>,

    /// Extended loan schedule grouped by calendar year
    pub yearly_loan: Vec<CalendarYearBucket>,
}

/// Runs scenarios through the whole pipeline
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    mode: OptimizationMode,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self {
            mode: OptimizationMode::Off,
        }
    }

    pub fn with_mode(mode: OptimizationMode) -> Self {
        Self { mode }
    }

    /// Run a single scenario
    pub fn run(&self, property: &PropertyInvestment) -> ScenarioOutcome {
        let mut property = property.clone();

        let optimization = match self.mode {
            OptimizationMode::Off => None,
            OptimizationMode::TargetCashFlow {
                target_cash_flow,
                target_repayment_rate_pct,
            } => {
                let inputs = OptimizerInputs {
                    debt: property.debt,
                    annual_rate_pct: property.annual_rate_pct,
                    building_value: property.building_value,
                    annual_expenses: property.annual_expenses,
                    tax_rate_pct: property.tax_rate_pct,
                    apply_tax: property.apply_tax,
                    target_cash_flow,
                    target_repayment_rate_pct,
                };
                let result = optimizer::solve(&inputs);
                property.monthly_payment = result.monthly_payment;
                property.monthly_rent = result.minimum_rent;
                Some(result)
            }
        };

        let start_month = property.start_month;
        let mut schedule = loan::generate_schedule(&property.loan_terms());
        let metrics = engine::compute_investment_metrics(&property, &schedule, |m| {
            calendar::months_in_calendar_year(start_month, m)
        });
        loan::extend_schedule(&mut schedule, SIMULATION_MONTHS);

        // State immediately before month 0 seeds the first year's snapshot
        let initial_liquid = -property.initial_equity();
        let initial_illiquid = property.purchase_price - property.debt;
        let cash_flow_initial = RunningState {
            balance: property.debt,
            cumulative_liquid: initial_liquid,
            cumulative_illiquid: initial_illiquid,
            cumulative_total: initial_liquid + initial_illiquid,
        };
        let loan_initial = RunningState {
            balance: property.debt,
            ..Default::default()
        };

        let yearly_cash_flow = calendar::aggregate_to_calendar_years(
            &metrics.monthly_schedule,
            property.start_month,
            property.start_year,
            Some(cash_flow_initial),
        );
        let yearly_loan = calendar::aggregate_to_calendar_years(
            &schedule,
            property.start_month,
            property.start_year,
            Some(loan_initial),
        );

        ScenarioOutcome {
            property,
            optimization,
            schedule,
            metrics,
            yearly_cash_flow,
            yearly_loan,
        }
    }

    /// Run several scenarios with the same mode
    pub fn run_batch(&self, properties: &[PropertyInvestment]) -> Vec<ScenarioOutcome> {
        properties.iter().map(|p| self.run(p)).collect()
    }
}
