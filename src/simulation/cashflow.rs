//! Cash-flow output structures for the investment simulation

use serde::{Deserialize, Serialize};

use super::roi::RoiPoint;

/// One month of the investment cash-flow schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCashFlowRecord {
    /// Month index (0-based, contiguous)
    pub month: u32,

    pub rent_income: f64,
    pub mortgage_payment: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,

    /// Tax saving for the month (>= 0)
    pub tax_effect: f64,

    /// rent - payment + tax saving
    pub net_cash_flow: f64,

    /// Remaining loan balance after the month
    pub balance: f64,

    /// Running cash position, starting at minus the initial equity outlay
    pub cumulative_liquid: f64,

    /// Property equity: purchase price minus remaining balance. Transaction
    /// costs are sunk and excluded from the asset view.
    pub cumulative_illiquid: f64,

    /// cumulative_liquid + cumulative_illiquid
    pub cumulative_total: f64,
}

/// Horizon totals across the monthly schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowTotals {
    pub rent_income: f64,
    pub mortgage_payments: f64,
    pub interest_paid: f64,
    pub tax_effects: f64,
    pub net_cash_flow: f64,
}

/// One calendar-year slice of the annual cash-flow schedule. Partial years
/// carry their actual month count; annualized figures are prorated by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualCashFlow {
    pub calendar_year: i32,

    /// Simulated months falling in this calendar year (1-12)
    pub months: u32,

    pub rent_income: f64,
    pub mortgage_payments: f64,
    pub interest_paid: f64,
    pub tax_effect: f64,
    pub net_cash_flow: f64,
}

/// Complete accumulator output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    pub totals: CashFlowTotals,

    /// First month where the cumulative total is non-negative
    pub break_even_month: Option<u32>,

    /// Break-even month / 12, or 0 when never reached
    pub break_even_years: f64,

    /// Absolute value of the most negative cumulative total
    pub max_investment_needed: f64,

    /// Month of that minimum, in years
    pub max_investment_at_years: f64,

    pub monthly_schedule: Vec<MonthlyCashFlowRecord>,
    pub annual_schedule: Vec<AnnualCashFlow>,

    /// Legacy secondary metric: rent plus linear appreciation over equity
    pub roi_schedule: Vec<RoiPoint>,
    pub roi_10y: Option<f64>,
}
