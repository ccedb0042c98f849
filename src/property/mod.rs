//! Rental property investment inputs

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::loan::LoanTerms;

/// Input parameters for one investment scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInvestment {
    /// Scenario identifier
    pub scenario_id: u32,

    /// Purchase price of the property
    pub purchase_price: f64,

    /// Transaction costs (agent, notary, transfer tax). Sunk costs: part of
    /// the cash outlay but not of the property equity.
    pub additional_costs: f64,

    /// Building share of the purchase price, the AfA base
    pub building_value: f64,

    /// Loan amount
    pub debt: f64,

    /// Annual loan interest rate in percent
    pub annual_rate_pct: f64,

    /// Fixed monthly loan payment
    pub monthly_payment: f64,

    /// Monthly rental income
    pub monthly_rent: f64,

    /// Deductible non-financing expenses per year
    pub annual_expenses: f64,

    /// Marginal tax rate in percent
    pub tax_rate_pct: f64,

    /// Whether tax effects enter the cash-flow simulation
    pub apply_tax: bool,

    /// Calendar month of the first simulated month (0 = January)
    pub start_month: u32,

    /// Calendar year of the first simulated month
    pub start_year: i32,
}

impl PropertyInvestment {
    /// Total cash required at purchase
    pub fn total_investment(&self) -> f64 {
        self.purchase_price + self.additional_costs
    }

    /// Cash contributed beyond the loan, the initial outlay
    pub fn initial_equity(&self) -> f64 {
        self.total_investment() - self.debt
    }

    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.debt,
            monthly_payment: self.monthly_payment,
            annual_rate_pct: self.annual_rate_pct,
        }
    }
}
