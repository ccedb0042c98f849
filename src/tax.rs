//! Simplified German-style rental tax model
//!
//! Deductions are flat-rate building depreciation (AfA), loan interest, and
//! other expenses. Only a rental loss produces a visible cash effect: the
//! loss offsets other income at the marginal rate. A rental profit is taxed
//! outside this simulation and reported with a zero effect.

use serde::{Deserialize, Serialize};

/// Flat-rate annual building depreciation (AfA), 2% of building value
pub const BUILDING_DEPRECIATION_RATE: f64 = 0.02;

/// Deduction breakdown and resulting tax effect for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSnapshot {
    pub depreciation: f64,
    pub interest: f64,
    pub other_expenses: f64,
    pub total_deductible: f64,
    pub rental_income: f64,

    /// rental_income - total_deductible
    pub net_result: f64,

    /// Tax saving (>= 0); zero whenever the period shows a profit
    pub tax_effect: f64,
}

/// Tax snapshot for a full year.
pub fn compute_tax_snapshot(
    building_value: f64,
    period_interest: f64,
    period_expenses: f64,
    tax_rate_pct: f64,
    rental_income: f64,
) -> TaxSnapshot {
    compute_tax_snapshot_prorated(
        building_value,
        period_interest,
        period_expenses,
        tax_rate_pct,
        rental_income,
        1.0,
    )
}

/// Tax snapshot for a fraction of a year.
///
/// Depreciation is prorated by `fraction_of_year`; interest, expenses and
/// income are period amounts and taken as passed.
pub fn compute_tax_snapshot_prorated(
    building_value: f64,
    period_interest: f64,
    period_expenses: f64,
    tax_rate_pct: f64,
    rental_income: f64,
    fraction_of_year: f64,
) -> TaxSnapshot {
    let depreciation = building_value * BUILDING_DEPRECIATION_RATE * fraction_of_year;
    let total_deductible = depreciation + period_interest + period_expenses;
    let net_result = rental_income - total_deductible;
    let tax_effect = if net_result < 0.0 {
        -net_result * tax_rate_pct / 100.0
    } else {
        0.0
    };

    TaxSnapshot {
        depreciation,
        interest: period_interest,
        other_expenses: period_expenses,
        total_deductible,
        rental_income,
        net_result,
        tax_effect,
    }
}
