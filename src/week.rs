// ABOUTME: Monday-anchored week math for the meal planner calendar
// ABOUTME: Week start derivation, day expansion, navigation, and display labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! Calendar-week helpers. All windows are Monday-anchored: the week containing
//! a Sunday starts on the *previous* Monday.

use chrono::{Datelike, Days, Duration, NaiveDate};

/// The Monday on or before `date`.
///
/// Idempotent: applying it to its own result is a no-op.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// The seven consecutive dates starting at `start`.
///
/// `start` is typically a [`week_start`] result, but any date works; the
/// window simply begins there.
#[must_use]
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
    core::array::from_fn(|i| start + Days::new(i as u64))
}

/// Move `start` by `delta` whole weeks, re-anchored to a Monday.
#[must_use]
pub fn shift_weeks(start: NaiveDate, delta: i64) -> NaiveDate {
    week_start(start + Duration::weeks(delta))
}

/// Display heading for the week beginning at `start`, e.g. `Jan 8 - Jan 14, 2024`.
#[must_use]
pub fn week_label(start: NaiveDate) -> String {
    let end = start + Days::new(6);
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_wraps_back_to_previous_monday() {
        // 2024-01-07 is a Sunday; its week began on 2024-01-01.
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 1));
    }

    #[test]
    fn monday_maps_to_itself() {
        assert_eq!(week_start(date(2024, 1, 8)), date(2024, 1, 8));
    }

    #[test]
    fn result_is_always_a_monday_and_idempotent() {
        let mut d = date(2023, 11, 1);
        while d < date(2024, 2, 1) {
            let start = week_start(d);
            assert_eq!(start.weekday(), Weekday::Mon);
            assert_eq!(week_start(start), start);
            assert!(start <= d && d < start + Days::new(7));
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn week_days_are_consecutive() {
        let days = week_days(date(2024, 1, 8));
        assert_eq!(days[0], date(2024, 1, 8));
        assert_eq!(days[6], date(2024, 1, 14));
        for pair in days.windows(2) {
            assert_eq!(pair[1], pair[0] + Days::new(1));
        }
    }

    #[test]
    fn shifting_weeks_stays_monday_anchored() {
        let start = date(2024, 1, 8);
        assert_eq!(shift_weeks(start, 1), date(2024, 1, 15));
        assert_eq!(shift_weeks(start, -1), date(2024, 1, 1));
        assert_eq!(shift_weeks(start, 0), start);
    }

    #[test]
    fn label_spans_start_to_end() {
        assert_eq!(week_label(date(2024, 1, 8)), "Jan 8 - Jan 14, 2024");
        // Year shown once, on the end date, even across a year boundary.
        assert_eq!(week_label(date(2023, 12, 25)), "Dec 25 - Dec 31, 2023");
    }
}
