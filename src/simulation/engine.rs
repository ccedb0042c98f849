//! Investment metrics accumulator
//!
//! Walks a fixed 481-month horizon over the amortization schedule, producing
//! the monthly liquid/illiquid cash-flow schedule, horizon totals, break-even
//! and maximum-drawdown statistics, and the calendar-year cash-flow table.

use crate::loan::AmortizationEntry;
use crate::property::PropertyInvestment;
use crate::tax;

use super::calendar;
use super::cashflow::{AnnualCashFlow, CashFlowTotals, InvestmentMetrics, MonthlyCashFlowRecord};
use super::roi;

/// Fixed simulation horizon in months (months 0..=480)
pub const SIMULATION_MONTHS: u32 = 481;

/// Years covered by the legacy ROI schedule
const ROI_YEARS: u32 = 40;

/// Run the monthly simulation.
///
/// Months past the end of the schedule are treated as paid off: zero
/// mortgage flows, zero balance. The payment for a simulated month is the
/// schedule entry's own reported payment, so a partial final payment is
/// respected exactly.
///
/// `months_in_calendar_year` maps a month index to the number of the
/// investment's months sharing its calendar year; the annual schedule uses
/// it to pro-rate annualized figures in partial years.
pub fn compute_investment_metrics<F>(
    property: &PropertyInvestment,
    schedule: &[AmortizationEntry],
    months_in_calendar_year: F,
) -> InvestmentMetrics
where
    F: Fn(u32) -> u32,
{
    let equity = property.initial_equity();
    let monthly_expenses = property.annual_expenses / 12.0;

    let mut monthly = Vec::with_capacity(SIMULATION_MONTHS as usize);
    let mut totals = CashFlowTotals::default();
    let mut cumulative_liquid = -equity;
    let mut break_even_month = None;
    let mut min_total = f64::INFINITY;
    let mut min_total_month = 0u32;

    for month in 0..SIMULATION_MONTHS {
        let (payment, interest, principal, balance) = match schedule.get(month as usize) {
            Some(entry) => (entry.payment, entry.interest, entry.principal, entry.balance),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        let tax_effect = if property.apply_tax {
            tax::compute_tax_snapshot_prorated(
                property.building_value,
                interest,
                monthly_expenses,
                property.tax_rate_pct,
                property.monthly_rent,
                1.0 / 12.0,
            )
            .tax_effect
        } else {
            0.0
        };

        let net_cash_flow = property.monthly_rent - payment + tax_effect;
        cumulative_liquid += net_cash_flow;
        let cumulative_illiquid = property.purchase_price - balance;
        let cumulative_total = cumulative_liquid + cumulative_illiquid;

        if break_even_month.is_none() && cumulative_total >= 0.0 {
            break_even_month = Some(month);
        }
        if cumulative_total < min_total {
            min_total = cumulative_total;
            min_total_month = month;
        }

        totals.rent_income += property.monthly_rent;
        totals.mortgage_payments += payment;
        totals.interest_paid += interest;
        totals.tax_effects += tax_effect;
        totals.net_cash_flow += net_cash_flow;

        monthly.push(MonthlyCashFlowRecord {
            month,
            rent_income: property.monthly_rent,
            mortgage_payment: payment,
            interest_paid: interest,
            principal_paid: principal,
            tax_effect,
            net_cash_flow,
            balance,
            cumulative_liquid,
            cumulative_illiquid,
            cumulative_total,
        });
    }

    let break_even_years = break_even_month.map(|m| m as f64 / 12.0).unwrap_or(0.0);
    let max_investment_needed = if min_total < 0.0 { min_total.abs() } else { 0.0 };
    let max_investment_at_years = min_total_month as f64 / 12.0;

    let annual_schedule = build_annual_schedule(property, schedule, &months_in_calendar_year);

    let roi_schedule = roi::roi_schedule(
        property.monthly_rent,
        property.purchase_price,
        equity,
        ROI_YEARS,
    );
    let roi_10y = roi::ten_year_roi(&roi_schedule);

    InvestmentMetrics {
        totals,
        break_even_month,
        break_even_years,
        max_investment_needed,
        max_investment_at_years,
        monthly_schedule: monthly,
        annual_schedule,
        roi_schedule,
        roi_10y,
    }
}

/// Calendar-year cash-flow table. Each slice covers the months of one
/// calendar year within the horizon; the tax snapshot is prorated by the
/// actual month count, never an assumed 12.
fn build_annual_schedule<F>(
    property: &PropertyInvestment,
    schedule: &[AmortizationEntry],
    months_in_calendar_year: &F,
) -> Vec<AnnualCashFlow>
where
    F: Fn(u32) -> u32,
{
    let mut annual = Vec::new();
    let mut month = 0u32;

    while month < SIMULATION_MONTHS {
        let in_year = months_in_calendar_year(month).min(SIMULATION_MONTHS - month);
        let fraction = in_year as f64 / 12.0;

        let mut interest_paid = 0.0;
        let mut mortgage_payments = 0.0;
        for offset in 0..in_year {
            if let Some(entry) = schedule.get((month + offset) as usize) {
                interest_paid += entry.interest;
                mortgage_payments += entry.payment;
            }
        }

        let rent_income = property.monthly_rent * in_year as f64;
        let tax_effect = if property.apply_tax {
            tax::compute_tax_snapshot_prorated(
                property.building_value,
                interest_paid,
                property.annual_expenses * fraction,
                property.tax_rate_pct,
                rent_income,
                fraction,
            )
            .tax_effect
        } else {
            0.0
        };

        annual.push(AnnualCashFlow {
            calendar_year: calendar::calendar_year_of(
                property.start_month,
                property.start_year,
                month,
            ),
            months: in_year,
            rent_income,
            mortgage_payments,
            interest_paid,
            tax_effect,
            net_cash_flow: rent_income - mortgage_payments + tax_effect,
        });

        month += in_year;
    }

    annual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::generate_schedule;
    use approx::assert_abs_diff_eq;

    fn test_property() -> PropertyInvestment {
        PropertyInvestment {
            scenario_id: 1,
            purchase_price: 300_000.0,
            additional_costs: 30_000.0,
            building_value: 240_000.0,
            debt: 280_000.0,
            annual_rate_pct: 4.0,
            monthly_payment: 1_500.0,
            monthly_rent: 1_200.0,
            annual_expenses: 1_200.0,
            tax_rate_pct: 42.0,
            apply_tax: true,
            start_month: 0,
            start_year: 2026,
        }
    }

    fn run(property: &PropertyInvestment) -> InvestmentMetrics {
        let schedule = generate_schedule(&property.loan_terms());
        let start_month = property.start_month;
        compute_investment_metrics(property, &schedule, |m| {
            calendar::months_in_calendar_year(start_month, m)
        })
    }

    #[test]
    fn test_horizon_is_481_months() {
        let metrics = run(&test_property());

        assert_eq!(metrics.monthly_schedule.len(), 481);
        for (i, rec) in metrics.monthly_schedule.iter().enumerate() {
            assert_eq!(rec.month, i as u32);
        }
    }

    #[test]
    fn test_paid_off_months_have_zero_mortgage_flows() {
        let property = test_property();
        let schedule = generate_schedule(&property.loan_terms());
        let metrics = run(&property);

        let payoff = schedule.len();
        assert!(payoff < 481);
        let after = &metrics.monthly_schedule[payoff];
        assert_eq!(after.mortgage_payment, 0.0);
        assert_eq!(after.interest_paid, 0.0);
        assert_eq!(after.balance, 0.0);
        // Fully paid off: equity equals the purchase price
        assert_abs_diff_eq!(after.cumulative_illiquid, 300_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_total_payments_cover_principal_plus_interest() {
        let property = test_property();
        let schedule = generate_schedule(&property.loan_terms());
        let metrics = run(&property);

        let final_interest = schedule.last().unwrap().cumulative_interest;
        // Payments repay the debt plus all interest, up to the payoff snap
        assert_abs_diff_eq!(
            metrics.totals.mortgage_payments,
            property.debt + final_interest,
            epsilon = 0.02
        );
    }

    #[test]
    fn test_liquid_cumulative_starts_at_minus_equity() {
        let property = test_property();
        let metrics = run(&property);

        let first = &metrics.monthly_schedule[0];
        assert_abs_diff_eq!(
            first.cumulative_liquid,
            -property.initial_equity() + first.net_cash_flow,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_break_even_at_month_37() {
        // No loan, no tax: cash purchase of 3800 in transaction costs that
        // earn 100/month. The cumulative total crosses zero at month 37.
        let property = PropertyInvestment {
            scenario_id: 2,
            purchase_price: 0.0,
            additional_costs: 3_800.0,
            building_value: 0.0,
            debt: 0.0,
            annual_rate_pct: 0.0,
            monthly_payment: 0.0,
            monthly_rent: 100.0,
            annual_expenses: 0.0,
            tax_rate_pct: 0.0,
            apply_tax: false,
            start_month: 0,
            start_year: 2026,
        };
        let metrics = run(&property);

        assert_eq!(metrics.break_even_month, Some(37));
        assert_abs_diff_eq!(metrics.break_even_years, 37.0 / 12.0, epsilon = 1e-9);
        // Deepest point is after the first month's rent
        assert_abs_diff_eq!(metrics.max_investment_needed, 3_700.0, epsilon = 1e-9);
        assert_eq!(metrics.max_investment_at_years, 0.0);
    }

    #[test]
    fn test_never_breaking_even_reports_zero_years() {
        let property = PropertyInvestment {
            scenario_id: 3,
            purchase_price: 0.0,
            additional_costs: 1_000_000.0,
            building_value: 0.0,
            debt: 0.0,
            annual_rate_pct: 0.0,
            monthly_payment: 0.0,
            monthly_rent: 1.0,
            annual_expenses: 0.0,
            tax_rate_pct: 0.0,
            apply_tax: false,
            start_month: 0,
            start_year: 2026,
        };
        let metrics = run(&property);

        assert_eq!(metrics.break_even_month, None);
        assert_eq!(metrics.break_even_years, 0.0);
    }

    #[test]
    fn test_monthly_tax_effect_matches_model() {
        let property = test_property();
        let schedule = generate_schedule(&property.loan_terms());
        let metrics = run(&property);

        let rec = &metrics.monthly_schedule[0];
        let expected = tax::compute_tax_snapshot_prorated(
            property.building_value,
            schedule[0].interest,
            property.annual_expenses / 12.0,
            property.tax_rate_pct,
            property.monthly_rent,
            1.0 / 12.0,
        );
        assert_abs_diff_eq!(rec.tax_effect, expected.tax_effect, epsilon = 1e-9);
        assert_abs_diff_eq!(
            rec.net_cash_flow,
            property.monthly_rent - rec.mortgage_payment + rec.tax_effect,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_annual_schedule_prorates_partial_first_year() {
        let mut property = test_property();
        property.start_month = 6; // July start
        let schedule = generate_schedule(&property.loan_terms());
        let start_month = property.start_month;
        let metrics = compute_investment_metrics(&property, &schedule, |m| {
            calendar::months_in_calendar_year(start_month, m)
        });

        let first = &metrics.annual_schedule[0];
        assert_eq!(first.calendar_year, 2026);
        assert_eq!(first.months, 6);
        assert_abs_diff_eq!(first.rent_income, 1_200.0 * 6.0, epsilon = 1e-9);

        let second = &metrics.annual_schedule[1];
        assert_eq!(second.calendar_year, 2027);
        assert_eq!(second.months, 12);
    }

    #[test]
    fn test_annual_rent_matches_monthly_sum() {
        let property = test_property();
        let metrics = run(&property);

        let annual_rent: f64 = metrics.annual_schedule.iter().map(|y| y.rent_income).sum();
        assert_abs_diff_eq!(annual_rent, metrics.totals.rent_income, epsilon = 1e-6);
    }
}
