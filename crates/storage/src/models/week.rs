//! Calendar arithmetic for scoring weeks. Weeks are Monday-anchored and
//! totally ordered by their start date.

use chrono::{Datelike, Duration, NaiveDate};

/// The Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn previous_week(week_start: NaiveDate) -> NaiveDate {
    week_start - Duration::days(7)
}

pub fn next_week(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(7)
}

/// Sunday of the week, the weigh-in day.
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(6)
}

/// Whole weeks between `today` and `end_date`, never negative.
pub fn weeks_remaining(today: NaiveDate, end_date: NaiveDate) -> i64 {
    ((end_date - today).num_days() / 7).max(0)
}

/// Days between `today` and `end_date`, never negative.
pub fn days_remaining(today: NaiveDate, end_date: NaiveDate) -> i64 {
    (end_date - today).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monday_maps_to_itself() {
        // 2026-08-03 is a Monday
        assert_eq!(week_start_for(d(2026, 8, 3)), d(2026, 8, 3));
    }

    #[test]
    fn sunday_maps_back_to_monday() {
        assert_eq!(week_start_for(d(2026, 8, 9)), d(2026, 8, 3));
    }

    #[test]
    fn midweek_maps_back_to_monday() {
        assert_eq!(week_start_for(d(2026, 8, 6)), d(2026, 8, 3));
    }

    #[test]
    fn week_neighbours() {
        let monday = d(2026, 8, 3);
        assert_eq!(previous_week(monday), d(2026, 7, 27));
        assert_eq!(next_week(monday), d(2026, 8, 10));
        assert_eq!(week_end(monday), d(2026, 8, 9));
    }

    #[test]
    fn weeks_remaining_floors_partial_weeks() {
        assert_eq!(weeks_remaining(d(2026, 8, 3), d(2026, 8, 23)), 2);
        assert_eq!(weeks_remaining(d(2026, 8, 3), d(2026, 8, 24)), 3);
    }

    #[test]
    fn weeks_remaining_clamps_past_end_date() {
        assert_eq!(weeks_remaining(d(2026, 8, 3), d(2026, 7, 1)), 0);
        assert_eq!(days_remaining(d(2026, 8, 3), d(2026, 7, 1)), 0);
    }
}
