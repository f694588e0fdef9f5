use chrono::NaiveDate;

use crate::calendar::add_days;
use crate::models::{CyclePhase, FertileWindow, Period};

/// Days between ovulation and the next period start. A population-level
/// approximation, not personalized.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Fertile window opens this many days before ovulation.
pub const FERTILE_DAYS_BEFORE: i64 = 5;
/// Fertile window closes this many days after ovulation.
pub const FERTILE_DAYS_AFTER: i64 = 1;
/// Peak fertility opens this many days before ovulation (and closes on it).
pub const PEAK_DAYS_BEFORE: i64 = 2;

/// Predicted start of the next period: the most recent period start plus the
/// average cycle length. `None` when there is no history at all.
pub fn next_period_start(periods: &[Period], avg_cycle_length: i64) -> Option<NaiveDate> {
    let last_start = periods.iter().map(|p| p.start_date).max()?;
    Some(add_days(last_start, avg_cycle_length))
}

/// Estimated ovulation: a fixed [`LUTEAL_PHASE_DAYS`] before the predicted
/// next period.
pub fn ovulation_date(next_period: NaiveDate) -> NaiveDate {
    add_days(next_period, -LUTEAL_PHASE_DAYS)
}

/// The unadjusted fertile window around an ovulation date. Callers that want
/// the irregularity widening get it from the insights aggregation, not here.
pub fn fertile_window(ovulation: NaiveDate) -> FertileWindow {
    FertileWindow {
        start: add_days(ovulation, -FERTILE_DAYS_BEFORE),
        end: add_days(ovulation, FERTILE_DAYS_AFTER),
    }
}

/// True when `date` falls in the unadjusted fertile window for `ovulation`.
/// Operates on a given ovulation date and applies no regularity widening;
/// calendar highlighting uses the raw window on purpose.
pub fn is_in_fertile_window(date: NaiveDate, ovulation: NaiveDate) -> bool {
    let window = fertile_window(ovulation);
    date >= window.start && date <= window.end
}

pub fn is_ovulation_day(date: NaiveDate, ovulation: NaiveDate) -> bool {
    crate::calendar::is_same_day(date, ovulation)
}

/// True within the peak-fertility sub-window, the two days before ovulation
/// through ovulation day itself.
pub fn is_peak_fertility_day(date: NaiveDate, ovulation: NaiveDate) -> bool {
    date >= add_days(ovulation, -PEAK_DAYS_BEFORE) && date <= ovulation
}

/// Coarse four-phase bucket for a 1-based day of cycle.
///
/// Driven by the cycle midpoint, independently of the fixed-luteal-offset
/// model used for ovulation prediction. The two models can disagree near
/// cycle boundaries; both are kept as-is rather than reconciled.
pub fn phase_for_day(day_of_cycle: i64, cycle_length: i64) -> CyclePhase {
    let midpoint = cycle_length / 2;
    if day_of_cycle <= 5 {
        CyclePhase::Menstrual
    } else if day_of_cycle <= midpoint - 2 {
        CyclePhase::Follicular
    } else if day_of_cycle <= midpoint + 2 {
        CyclePhase::Ovulation
    } else {
        CyclePhase::Luteal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn period(start: &str) -> Period {
        Period::new(date(start), None).unwrap()
    }

    #[test]
    fn no_prediction_without_history() {
        assert!(next_period_start(&[], 28).is_none());
    }

    #[test]
    fn prediction_uses_most_recent_start_whatever_the_order() {
        let periods = vec![period("2026-02-26"), period("2026-01-29")];
        assert_eq!(
            next_period_start(&periods, 28),
            Some(date("2026-03-26"))
        );
    }

    #[test]
    fn single_period_is_enough_for_a_prediction() {
        let periods = vec![period("2026-01-01")];
        assert_eq!(next_period_start(&periods, 30), Some(date("2026-01-31")));
    }

    #[test]
    fn ovulation_is_14_days_before_next_period() {
        assert_eq!(ovulation_date(date("2026-02-26")), date("2026-02-12"));
    }

    #[test]
    fn fertile_window_spans_minus_5_to_plus_1() {
        let w = fertile_window(date("2026-02-12"));
        assert_eq!(w.start, date("2026-02-07"));
        assert_eq!(w.end, date("2026-02-13"));
    }

    #[test]
    fn fertile_window_predicate_matches_bounds() {
        let ov = date("2026-02-12");
        assert!(is_in_fertile_window(date("2026-02-07"), ov));
        assert!(is_in_fertile_window(date("2026-02-13"), ov));
        assert!(!is_in_fertile_window(date("2026-02-06"), ov));
        assert!(!is_in_fertile_window(date("2026-02-14"), ov));
    }

    #[test]
    fn peak_window_is_two_days_up_to_ovulation() {
        let ov = date("2026-02-12");
        assert!(is_peak_fertility_day(date("2026-02-10"), ov));
        assert!(is_peak_fertility_day(ov, ov));
        assert!(!is_peak_fertility_day(date("2026-02-09"), ov));
        assert!(!is_peak_fertility_day(date("2026-02-13"), ov));
    }

    #[test]
    fn ovulation_day_is_exact_match_only() {
        let ov = date("2026-02-12");
        assert!(is_ovulation_day(ov, ov));
        assert!(!is_ovulation_day(date("2026-02-11"), ov));
    }

    #[test]
    fn phase_buckets_for_a_28_day_cycle() {
        assert_eq!(phase_for_day(1, 28), CyclePhase::Menstrual);
        assert_eq!(phase_for_day(5, 28), CyclePhase::Menstrual);
        assert_eq!(phase_for_day(6, 28), CyclePhase::Follicular);
        assert_eq!(phase_for_day(12, 28), CyclePhase::Follicular);
        assert_eq!(phase_for_day(13, 28), CyclePhase::Ovulation);
        assert_eq!(phase_for_day(16, 28), CyclePhase::Ovulation);
        assert_eq!(phase_for_day(17, 28), CyclePhase::Luteal);
        assert_eq!(phase_for_day(28, 28), CyclePhase::Luteal);
    }

    #[test]
    fn phase_midpoint_uses_floor_division_for_odd_cycles() {
        // 31-day cycle: midpoint 15, ovulation bucket is days 14..=17
        assert_eq!(phase_for_day(13, 31), CyclePhase::Follicular);
        assert_eq!(phase_for_day(14, 31), CyclePhase::Ovulation);
        assert_eq!(phase_for_day(17, 31), CyclePhase::Ovulation);
        assert_eq!(phase_for_day(18, 31), CyclePhase::Luteal);
    }

    /// The day-count phase model and the fixed-luteal-offset ovulation model
    /// are independent and disagree for long cycles. For a 35-day cycle the
    /// midpoint model puts ovulation around day 15-19, while the 14-day
    /// luteal offset puts it on day 21. Known characteristic, kept as-is.
    #[test]
    fn phase_model_diverges_from_luteal_offset_model() {
        let cycle_length = 35;
        let offset_ovulation_day = cycle_length - LUTEAL_PHASE_DAYS; // day 21
        assert_eq!(
            phase_for_day(offset_ovulation_day, cycle_length),
            CyclePhase::Luteal
        );
    }
}
