//! Monthly investment simulation and calendar-year aggregation

pub mod calendar;
pub mod cashflow;
pub mod engine;
pub mod roi;

pub use calendar::{
    aggregate_to_calendar_years, months_in_calendar_year, CalendarYearBucket, MonthlyRecord,
    RunningState,
};
pub use cashflow::{AnnualCashFlow, CashFlowTotals, InvestmentMetrics, MonthlyCashFlowRecord};
pub use engine::{compute_investment_metrics, SIMULATION_MONTHS};
