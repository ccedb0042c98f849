//! Legacy ROI metric: rent received plus linear property appreciation,
//! relative to the starting equity. Retained as an optional secondary output.

use serde::{Deserialize, Serialize};

/// Assumed linear property appreciation per year
pub const ANNUAL_APPRECIATION_RATE: f64 = 0.03;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiPoint {
    /// Years since purchase (1-based)
    pub year: u32,

    /// Cumulative return on starting equity, in percent
    pub roi_pct: f64,
}

/// Build the per-year ROI series over `years` years.
///
/// Returns an empty series for a non-positive starting equity (fully
/// financed purchase), where the ratio is undefined.
pub fn roi_schedule(
    monthly_rent: f64,
    purchase_price: f64,
    initial_equity: f64,
    years: u32,
) -> Vec<RoiPoint> {
    if initial_equity <= 0.0 {
        return Vec::new();
    }

    (1..=years)
        .map(|year| {
            let y = year as f64;
            let rent_received = monthly_rent * 12.0 * y;
            let appreciation = purchase_price * ANNUAL_APPRECIATION_RATE * y;
            RoiPoint {
                year,
                roi_pct: (rent_received + appreciation) / initial_equity * 100.0,
            }
        })
        .collect()
}

/// The 10-year figure, when the series reaches that far
pub fn ten_year_roi(schedule: &[RoiPoint]) -> Option<f64> {
    schedule.iter().find(|p| p.year == 10).map(|p| p.roi_pct)
}
