//! Month-by-month amortization of a fixed-payment annuity loan

use serde::{Deserialize, Serialize};

/// Remaining balance at or below this is snapped to exactly zero
pub const PAYOFF_TOLERANCE: f64 = 0.01;

/// Hard ceiling on schedule length. A payment at or below the interest-only
/// amount never pays down principal; the schedule stops here instead of
/// looping, and a full-length schedule is the caller's non-convergence signal.
pub const MAX_SCHEDULE_MONTHS: u32 = 1200;

/// Immutable loan inputs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Loan principal at month 0
    pub principal: f64,

    /// Fixed nominal monthly payment
    pub monthly_payment: f64,

    /// Annual interest rate in percent (4.0 = 4%)
    pub annual_rate_pct: f64,
}

/// One month of the amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Month index (0-based, contiguous)
    pub month: u32,

    /// Payment actually made this month. Smaller than the nominal payment in
    /// the final month when only a partial payment is left.
    pub payment: f64,

    /// Interest portion of the payment
    pub interest: f64,

    /// Principal portion of the payment
    pub principal: f64,

    /// Remaining balance after the payment
    pub balance: f64,

    /// Total interest paid through this month
    pub cumulative_interest: f64,
}

/// Generate the amortization schedule for the given terms.
///
/// A zero or negative principal yields an empty schedule (cash purchase).
/// The principal portion is floored at zero, so an underwater payment keeps
/// the balance flat rather than going negative, and the schedule runs to the
/// [`MAX_SCHEDULE_MONTHS`] ceiling. Invalid inputs degrade numerically; this
/// function never fails.
pub fn generate_schedule(terms: &LoanTerms) -> Vec<AmortizationEntry> {
    let mut entries = Vec::new();
    if terms.principal <= 0.0 {
        return entries;
    }

    let monthly_rate = terms.annual_rate_pct / 100.0 / 12.0;
    let mut balance = terms.principal;
    let mut cumulative_interest = 0.0;

    for month in 0..MAX_SCHEDULE_MONTHS {
        let interest = balance * monthly_rate;
        let wanted = (terms.monthly_payment - interest).max(0.0);
        let principal = wanted.min(balance);

        // The last month reports the payment actually made, not the nominal one
        let payment = if wanted > balance {
            interest + principal
        } else {
            terms.monthly_payment
        };

        balance -= principal;
        if balance <= PAYOFF_TOLERANCE {
            balance = 0.0;
        }
        cumulative_interest += interest;

        entries.push(AmortizationEntry {
            month,
            payment,
            interest,
            principal,
            balance,
            cumulative_interest,
        });

        if balance <= 0.0 {
            return entries;
        }
    }

    log::warn!(
        "amortization hit the {}-month ceiling (payment {:.2} vs interest-only {:.2})",
        MAX_SCHEDULE_MONTHS,
        terms.monthly_payment,
        terms.principal * monthly_rate
    );
    entries
}
