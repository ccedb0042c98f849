//! Calendar-year aggregation of monthly schedules
//!
//! Groups 0-based simulation months into calendar years from an arbitrary
//! (start month, start year). Stock variables are snapshotted at year start
//! and year end through an explicit running carry updated per processed
//! record; positional `records[month - 1]` lookups break as soon as a
//! schedule has been extended, filtered, or reindexed.

use serde::{Deserialize, Serialize};

use super::cashflow::MonthlyCashFlowRecord;
use crate::loan::AmortizationEntry;

/// Read access shared by the monthly schedules so they aggregate through one
/// code path. Flow accessors return per-month amounts, stock accessors the
/// end-of-month state.
pub trait MonthlyRecord {
    fn month(&self) -> u32;
    fn rent_income(&self) -> f64;
    fn mortgage_payment(&self) -> f64;
    fn interest_paid(&self) -> f64;
    fn principal_paid(&self) -> f64;
    fn tax_effect(&self) -> f64;
    fn net_cash_flow(&self) -> f64;
    fn balance(&self) -> f64;
    fn cumulative_liquid(&self) -> f64;
    fn cumulative_illiquid(&self) -> f64;
    fn cumulative_total(&self) -> f64;
}

impl MonthlyRecord for MonthlyCashFlowRecord {
    fn month(&self) -> u32 {
        self.month
    }
    fn rent_income(&self) -> f64 {
        self.rent_income
    }
    fn mortgage_payment(&self) -> f64 {
        self.mortgage_payment
    }
    fn interest_paid(&self) -> f64 {
        self.interest_paid
    }
    fn principal_paid(&self) -> f64 {
        self.principal_paid
    }
    fn tax_effect(&self) -> f64 {
        self.tax_effect
    }
    fn net_cash_flow(&self) -> f64 {
        self.net_cash_flow
    }
    fn balance(&self) -> f64 {
        self.balance
    }
    fn cumulative_liquid(&self) -> f64 {
        self.cumulative_liquid
    }
    fn cumulative_illiquid(&self) -> f64 {
        self.cumulative_illiquid
    }
    fn cumulative_total(&self) -> f64 {
        self.cumulative_total
    }
}

/// A loan schedule carries no rent or tax flows and no cumulative cash
/// positions; those aggregate as zero.
impl MonthlyRecord for AmortizationEntry {
    fn month(&self) -> u32 {
        self.month
    }
    fn rent_income(&self) -> f64 {
        0.0
    }
    fn mortgage_payment(&self) -> f64 {
        self.payment
    }
    fn interest_paid(&self) -> f64 {
        self.interest
    }
    fn principal_paid(&self) -> f64 {
        self.principal
    }
    fn tax_effect(&self) -> f64 {
        0.0
    }
    fn net_cash_flow(&self) -> f64 {
        0.0
    }
    fn balance(&self) -> f64 {
        self.balance
    }
    fn cumulative_liquid(&self) -> f64 {
        0.0
    }
    fn cumulative_illiquid(&self) -> f64 {
        0.0
    }
    fn cumulative_total(&self) -> f64 {
        0.0
    }
}

/// Stock-variable state immediately before a record is processed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunningState {
    pub balance: f64,
    pub cumulative_liquid: f64,
    pub cumulative_illiquid: f64,
    pub cumulative_total: f64,
}

impl RunningState {
    fn from_record<R: MonthlyRecord>(record: &R) -> Self {
        Self {
            balance: record.balance(),
            cumulative_liquid: record.cumulative_liquid(),
            cumulative_illiquid: record.cumulative_illiquid(),
            cumulative_total: record.cumulative_total(),
        }
    }
}

/// One calendar year of aggregated records: summed flows plus start-of-year
/// and end-of-year snapshots of the stock variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarYearBucket {
    pub calendar_year: i32,

    /// Simulated months falling in this year (1-12; partial years as-is)
    pub months: u32,

    // Summed flows
    pub rent_income: f64,
    pub mortgage_payments: f64,
    pub interest_paid: f64,
    pub principal_paid: f64,
    pub tax_effect: f64,
    pub net_cash_flow: f64,

    // State before the year's first simulated month
    pub start_balance: f64,
    pub start_cumulative_liquid: f64,
    pub start_cumulative_illiquid: f64,
    pub start_cumulative_total: f64,

    // State after the year's last simulated month
    pub end_balance: f64,
    pub end_cumulative_liquid: f64,
    pub end_cumulative_illiquid: f64,
    pub end_cumulative_total: f64,
}

impl CalendarYearBucket {
    fn open(calendar_year: i32, carry: &RunningState) -> Self {
        Self {
            calendar_year,
            months: 0,
            rent_income: 0.0,
            mortgage_payments: 0.0,
            interest_paid: 0.0,
            principal_paid: 0.0,
            tax_effect: 0.0,
            net_cash_flow: 0.0,
            start_balance: carry.balance,
            start_cumulative_liquid: carry.cumulative_liquid,
            start_cumulative_illiquid: carry.cumulative_illiquid,
            start_cumulative_total: carry.cumulative_total,
            end_balance: carry.balance,
            end_cumulative_liquid: carry.cumulative_liquid,
            end_cumulative_illiquid: carry.cumulative_illiquid,
            end_cumulative_total: carry.cumulative_total,
        }
    }
}

/// Calendar year containing `month_index`
pub fn calendar_year_of(start_month: u32, start_year: i32, month_index: u32) -> i32 {
    start_year + ((start_month + month_index) / 12) as i32
}

/// How many of the investment's months fall in the same calendar year as
/// `month_index`: 12 for interior years, fewer for a mid-year start.
pub fn months_in_calendar_year(start_month: u32, month_index: u32) -> u32 {
    if start_month + month_index < 12 {
        12 - start_month
    } else {
        12
    }
}

/// Group a monthly schedule into calendar-year buckets.
///
/// `initial` seeds the start-of-series snapshot; the start-of-year state of
/// every later bucket is the carry from the last processed record. Buckets
/// come out sorted ascending by calendar year.
pub fn aggregate_to_calendar_years<R: MonthlyRecord>(
    records: &[R],
    start_month: u32,
    start_year: i32,
    initial: Option<RunningState>,
) -> Vec<CalendarYearBucket> {
    let mut buckets: Vec<CalendarYearBucket> = Vec::new();
    let mut carry = initial.unwrap_or_default();

    for record in records {
        let year = calendar_year_of(start_month, start_year, record.month());

        if buckets.last().map_or(true, |b| b.calendar_year != year) {
            buckets.push(CalendarYearBucket::open(year, &carry));
        }
        if let Some(bucket) = buckets.last_mut() {
            bucket.months += 1;
            bucket.rent_income += record.rent_income();
            bucket.mortgage_payments += record.mortgage_payment();
            bucket.interest_paid += record.interest_paid();
            bucket.principal_paid += record.principal_paid();
            bucket.tax_effect += record.tax_effect();
            bucket.net_cash_flow += record.net_cash_flow();

            bucket.end_balance = record.balance();
            bucket.end_cumulative_liquid = record.cumulative_liquid();
            bucket.end_cumulative_illiquid = record.cumulative_illiquid();
            bucket.end_cumulative_total = record.cumulative_total();
        }

        carry = RunningState::from_record(record);
    }

    buckets.sort_by_key(|b| b.calendar_year);
    buckets
}
