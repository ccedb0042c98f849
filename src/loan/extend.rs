//! Pads a finished amortization schedule out to a fixed horizon

use super::amortization::AmortizationEntry;

/// Append zero-flow months through `target_months` (0-based exclusive bound,
/// so a target of 481 covers months 0..=480).
///
/// The next padding index comes from the last entry's own `month` field,
/// never from the array length; numbering stays contiguous even when the
/// source was reindexed or filtered upstream. Every padded entry repeats the
/// final cumulative interest. An empty source pads from month 0.
pub fn extend_schedule(schedule: &mut Vec<AmortizationEntry>, target_months: u32) {
    let (mut next, cumulative_interest) = match schedule.last() {
        Some(last) => (last.month + 1, last.cumulative_interest),
        None => (0, 0.0),
    };

    while next < target_months {
        schedule.push(AmortizationEntry {
            month: next,
            payment: 0.0,
            interest: 0.0,
            principal: 0.0,
            balance: 0.0,
            cumulative_interest,
        });
        next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::amortization::{generate_schedule, LoanTerms};
    use super::*;

    #[test]
    fn test_padding_is_contiguous_and_preserves_interest() {
        let terms = LoanTerms {
            principal: 50_000.0,
            monthly_payment: 2_500.0,
            annual_rate_pct: 3.0,
        };
        let mut schedule = generate_schedule(&terms);
        let source_len = schedule.len();
        let final_interest = schedule.last().unwrap().cumulative_interest;

        extend_schedule(&mut schedule, 481);

        assert_eq!(schedule.len(), 481);
        for (i, entry) in schedule.iter().enumerate() {
            assert_eq!(entry.month, i as u32);
        }
        for entry in &schedule[source_len..] {
            assert_eq!(entry.payment, 0.0);
            assert_eq!(entry.interest, 0.0);
            assert_eq!(entry.balance, 0.0);
            assert_eq!(entry.cumulative_interest, final_interest);
        }
    }

    #[test]
    fn test_padding_follows_last_month_number_not_length() {
        // A filtered schedule whose indices no longer start at 0
        let mut schedule = vec![AmortizationEntry {
            month: 7,
            payment: 100.0,
            interest: 10.0,
            principal: 90.0,
            balance: 0.0,
            cumulative_interest: 42.0,
        }];

        extend_schedule(&mut schedule, 12);

        let months: Vec<u32> = schedule.iter().map(|e| e.month).collect();
        assert_eq!(months, vec![7, 8, 9, 10, 11]);
        assert!(schedule[1..].iter().all(|e| e.cumulative_interest == 42.0));
    }

    #[test]
    fn test_empty_source_pads_from_zero() {
        let mut schedule = Vec::new();
        extend_schedule(&mut schedule, 3);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].month, 0);
        assert!(schedule.iter().all(|e| e.cumulative_interest == 0.0));
    }

    #[test]
    fn test_noop_when_already_at_target() {
        let mut schedule = Vec::new();
        extend_schedule(&mut schedule, 5);
        let before = schedule.len();
        extend_schedule(&mut schedule, 5);
        assert_eq!(schedule.len(), before);
    }
}
