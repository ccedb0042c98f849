//! Rental Sim - Financial simulation engine for rental property investments
//!
//! This library provides:
//! - Fixed-payment mortgage amortization schedules with horizon padding
//! - A simplified German-style tax model (AfA, interest, expense deductions)
//! - Closed-form payment/rent optimization against a cash-flow target
//! - A 481-month liquid/illiquid cash-flow simulation with break-even and
//!   maximum-drawdown statistics
//! - Calendar-year aggregation with start/end-of-year snapshots

pub mod loan;
pub mod optimizer;
pub mod property;
pub mod scenario;
pub mod simulation;
pub mod tax;

// Re-export commonly used types
pub use loan::{generate_schedule, AmortizationEntry, LoanTerms};
pub use optimizer::{OptimizationResult, OptimizerInputs};
pub use property::PropertyInvestment;
pub use scenario::{OptimizationMode, ScenarioOutcome, ScenarioRunner};
pub use simulation::{aggregate_to_calendar_years, CalendarYearBucket, InvestmentMetrics};
pub use tax::{compute_tax_snapshot, TaxSnapshot};
