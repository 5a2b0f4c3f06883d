//! Savings-goal projection.
//!
//! Pure calendar arithmetic over a goal snapshot: how many months are left
//! until the target date, and how much must be saved each month to close the
//! gap. No I/O, no error conditions.

use chrono::{Datelike, NaiveDate};

/// Result of [`plan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GoalPlan {
    /// Calendar-month horizon to the target date, always >= 1.
    pub months_remaining: i32,
    /// Even monthly contribution that closes the gap within the horizon.
    pub monthly_required: f64,
}

/// Computes the months remaining until `target_date` and the required even
/// monthly contribution.
///
/// The horizon is the calendar-month difference between `today` and
/// `target_date`, plus one when the target's day-of-month has not yet passed
/// (the current partial month still counts as available for saving). The
/// clamp to >= 1 keeps past-due goals meaningful and is what rules out a
/// division by zero below.
pub fn plan(
    target_amount: f64,
    current_amount: f64,
    target_date: NaiveDate,
    today: NaiveDate,
) -> GoalPlan {
    let mut months = (target_date.year() - today.year()) * 12
        + (target_date.month() as i32 - today.month() as i32);
    if target_date.day() >= today.day() {
        months += 1;
    }
    let months_remaining = months.max(1);

    let remaining = (target_amount - current_amount).max(0.0);
    GoalPlan {
        months_remaining,
        monthly_required: remaining / f64::from(months_remaining),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn six_months_out_gets_inclusive_bump() {
        let p = plan(1200.0, 0.0, date(2024, 7, 15), date(2024, 1, 10));
        assert_eq!(p.months_remaining, 7);
        assert!((p.monthly_required - 1200.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn day_before_todays_day_skips_the_bump() {
        let p = plan(600.0, 0.0, date(2024, 7, 5), date(2024, 1, 10));
        assert_eq!(p.months_remaining, 6);
        assert!((p.monthly_required - 100.0).abs() < 1e-9);
    }

    #[test]
    fn due_today_and_funded_is_one_month_zero_due() {
        let today = date(2024, 3, 1);
        let p = plan(500.0, 500.0, today, today);
        assert_eq!(p.months_remaining, 1);
        assert_eq!(p.monthly_required, 0.0);
    }

    #[test]
    fn past_target_clamps_to_one_month() {
        let p = plan(300.0, 50.0, date(2023, 6, 1), date(2024, 1, 10));
        assert_eq!(p.months_remaining, 1);
        assert!((p.monthly_required - 250.0).abs() < 1e-9);
    }

    #[test]
    fn overfunded_goal_requires_nothing() {
        let p = plan(100.0, 250.0, date(2025, 1, 1), date(2024, 1, 1));
        assert_eq!(p.monthly_required, 0.0);
    }

    #[test]
    fn contribution_times_horizon_covers_remaining() {
        for (target, current, target_date, today) in [
            (1200.0, 0.0, date(2024, 7, 15), date(2024, 1, 10)),
            (999.99, 10.0, date(2026, 2, 28), date(2024, 1, 31)),
            (50.0, 49.5, date(2024, 1, 10), date(2024, 1, 10)),
        ] {
            let p = plan(target, current, target_date, today);
            assert!(p.months_remaining >= 1);
            assert!(p.monthly_required >= 0.0);
            let remaining = (target - current).max(0.0);
            let covered = p.monthly_required * f64::from(p.months_remaining);
            assert!((covered - remaining).abs() < 1e-9);
        }
    }
}
