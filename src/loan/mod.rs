//! Loan amortization schedules and horizon padding

pub mod amortization;
pub mod extend;

pub use amortization::{
    generate_schedule, AmortizationEntry, LoanTerms, MAX_SCHEDULE_MONTHS, PAYOFF_TOLERANCE,
};
pub use extend::extend_schedule;
