use chrono::{Datelike, NaiveDate, TimeZone, Timelike, Weekday};
use chrono_tz::Europe::Berlin;
use trove_dates::{DateExt, DaysOfWeek, RecurrencePattern, WeekOfMonth};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn first_n(pattern: &RecurrencePattern, start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    pattern.recurrences_from(start).take(n).collect()
}

#[test_log::test]
fn daily_steps_by_interval_and_keeps_time() {
    let pattern = RecurrencePattern::daily(3).unwrap();
    let start = ymd(2019, 2, 26).and_hms_opt(8, 15, 30).unwrap();

    let occurrences: Vec<_> = pattern.recurrences_from(start).take(50).collect();
    assert_eq!(occurrences[0], start);
    for pair in occurrences.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 3);
        assert_eq!(pair[1].time(), start.time());
    }
    assert_eq!(occurrences[1].date(), ymd(2019, 3, 1));
}

#[test]
fn weekly_first_day_of_week_shifts_alignment() {
    let start = ymd(2018, 12, 2);

    let monday_weeks = RecurrencePattern::weekly(DaysOfWeek::MONDAY, 2, Weekday::Mon).unwrap();
    assert_eq!(
        first_n(&monday_weeks, start, 3),
        vec![ymd(2018, 12, 10), ymd(2018, 12, 24), ymd(2019, 1, 7)]
    );

    let sunday_weeks = RecurrencePattern::weekly(DaysOfWeek::MONDAY, 2, Weekday::Sun).unwrap();
    assert_eq!(
        first_n(&sunday_weeks, start, 3),
        vec![ymd(2018, 12, 3), ymd(2018, 12, 17), ymd(2018, 12, 31)]
    );
}

#[test]
fn weekly_weekend() {
    let start = ymd(2018, 12, 2);

    let every_week = RecurrencePattern::weekly(DaysOfWeek::WEEKEND, 1, Weekday::Mon).unwrap();
    assert_eq!(
        first_n(&every_week, start, 3),
        vec![ymd(2018, 12, 2), ymd(2018, 12, 8), ymd(2018, 12, 9)]
    );

    let fortnightly = RecurrencePattern::weekly(DaysOfWeek::WEEKEND, 2, Weekday::Sun).unwrap();
    assert_eq!(
        first_n(&fortnightly, start, 7),
        vec![
            ymd(2018, 12, 2),
            ymd(2018, 12, 8),
            ymd(2018, 12, 16),
            ymd(2018, 12, 22),
            ymd(2018, 12, 30),
            ymd(2019, 1, 5),
            ymd(2019, 1, 13),
        ]
    );
}

#[test]
fn weekly_without_days_is_empty() {
    for first_day in [Weekday::Mon, Weekday::Sun] {
        let pattern = RecurrencePattern::weekly(DaysOfWeek::NONE, 1, first_day).unwrap();
        assert_eq!(pattern.recurrences_from(ymd(2018, 12, 2)).next(), None);
    }
}

#[test]
fn weekly_yields_only_selected_days_in_order() {
    let days = DaysOfWeek::TUESDAY | DaysOfWeek::THURSDAY | DaysOfWeek::SATURDAY;
    let pattern = RecurrencePattern::weekly(days, 1, Weekday::Wed).unwrap();
    let occurrences = first_n(&pattern, ymd(2019, 5, 15), 30);

    assert!(occurrences.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(occurrences.iter().all(|date| days.contains_day(date.weekday())));
    assert_eq!(occurrences[0], ymd(2019, 5, 16));
}

#[test]
fn monthly_day_31_skips_short_months() {
    let pattern = RecurrencePattern::monthly_by_day(31, 1).unwrap();
    let occurrences = first_n(&pattern, ymd(2019, 1, 1), 7);
    assert_eq!(
        occurrences,
        vec![
            ymd(2019, 1, 31),
            ymd(2019, 3, 31),
            ymd(2019, 5, 31),
            ymd(2019, 7, 31),
            ymd(2019, 8, 31),
            ymd(2019, 10, 31),
            ymd(2019, 12, 31),
        ]
    );
    assert!(occurrences.iter().all(|date| ![2, 4, 6, 9, 11].contains(&date.month())));
}

#[test]
fn monthly_day_already_passed_moves_by_interval() {
    let pattern = RecurrencePattern::monthly_by_day(10, 3).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 1, 11), 3),
        vec![ymd(2019, 4, 10), ymd(2019, 7, 10), ymd(2019, 10, 10)]
    );
    assert_eq!(first_n(&pattern, ymd(2019, 1, 10), 1), vec![ymd(2019, 1, 10)]);
}

#[test]
fn monthly_last_weekend() {
    let start = ymd(2019, 1, 1);

    let monthly = RecurrencePattern::monthly_by_week(WeekOfMonth::Last, DaysOfWeek::WEEKEND, 1).unwrap();
    assert_eq!(
        first_n(&monthly, start, 8),
        vec![
            ymd(2019, 1, 27),
            ymd(2019, 2, 24),
            ymd(2019, 3, 31),
            ymd(2019, 4, 28),
            ymd(2019, 5, 26),
            ymd(2019, 6, 30),
            ymd(2019, 7, 28),
            ymd(2019, 8, 31),
        ]
    );

    let bimonthly = RecurrencePattern::monthly_by_week(WeekOfMonth::Last, DaysOfWeek::WEEKEND, 2).unwrap();
    assert_eq!(
        first_n(&bimonthly, start, 8),
        vec![
            ymd(2019, 1, 27),
            ymd(2019, 3, 31),
            ymd(2019, 5, 26),
            ymd(2019, 7, 28),
            ymd(2019, 9, 29),
            ymd(2019, 11, 30),
            ymd(2020, 1, 26),
            ymd(2020, 3, 29),
        ]
    );
}

#[test]
fn monthly_last_weekend_is_latest_in_month() {
    let pattern = RecurrencePattern::monthly_by_week(WeekOfMonth::Last, DaysOfWeek::WEEKEND, 1).unwrap();
    for date in pattern.recurrences_from(ymd(2000, 1, 1)).take(400) {
        assert!(DaysOfWeek::WEEKEND.contains_day(date.weekday()), "{date}");
        let month_end = date.end_of_month();
        let mut later = date.succ_opt().unwrap();
        while later <= month_end {
            assert!(!DaysOfWeek::WEEKEND.contains_day(later.weekday()), "{later} after {date}");
            later = later.succ_opt().unwrap();
        }
    }
}

#[test]
fn monthly_first_monday() {
    let pattern = RecurrencePattern::monthly_by_week(WeekOfMonth::First, DaysOfWeek::MONDAY, 1).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 1, 1), 7),
        vec![
            ymd(2019, 1, 7),
            ymd(2019, 2, 4),
            ymd(2019, 3, 4),
            ymd(2019, 4, 1),
            ymd(2019, 5, 6),
            ymd(2019, 6, 3),
            ymd(2019, 7, 1),
        ]
    );
}

#[test]
fn monthly_by_week_skips_passed_first_month() {
    let pattern = RecurrencePattern::monthly_by_week(WeekOfMonth::First, DaysOfWeek::MONDAY, 1).unwrap();
    assert_eq!(first_n(&pattern, ymd(2019, 1, 8), 1), vec![ymd(2019, 2, 4)]);

    let empty = RecurrencePattern::monthly_by_week(WeekOfMonth::First, DaysOfWeek::NONE, 1).unwrap();
    assert_eq!(empty.recurrences_from(ymd(2019, 1, 1)).count(), 0);
}

#[test]
fn yearly_by_day_366_only_in_leap_years() {
    let pattern = RecurrencePattern::yearly_by_day(366, 1).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 1, 1), 3),
        vec![ymd(2020, 12, 31), ymd(2024, 12, 31), ymd(2028, 12, 31)]
    );
}

#[test]
fn yearly_by_day_passed_this_year() {
    let pattern = RecurrencePattern::yearly_by_day(32, 2).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 2, 2), 2),
        vec![ymd(2021, 2, 1), ymd(2023, 2, 1)]
    );
}

#[test]
fn yearly_feb_29() {
    let pattern = RecurrencePattern::yearly_by_month_day(2, 29, 1).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2018, 1, 1), 3),
        vec![ymd(2020, 2, 29), ymd(2024, 2, 29), ymd(2028, 2, 29)]
    );
}

#[test]
fn yearly_month_day_already_passed() {
    let pattern = RecurrencePattern::yearly_by_month_day(7, 4, 1).unwrap();
    assert_eq!(first_n(&pattern, ymd(2019, 7, 5), 1), vec![ymd(2020, 7, 4)]);
    assert_eq!(first_n(&pattern, ymd(2019, 7, 4), 1), vec![ymd(2019, 7, 4)]);
}

#[test]
fn yearly_by_week() {
    // US Labor Day: first Monday in September.
    let pattern = RecurrencePattern::yearly_by_week(WeekOfMonth::First, DaysOfWeek::MONDAY, 9, 1).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 1, 1), 3),
        vec![ymd(2019, 9, 2), ymd(2020, 9, 7), ymd(2021, 9, 6)]
    );
    assert_eq!(first_n(&pattern, ymd(2019, 9, 3), 1), vec![ymd(2020, 9, 7)]);
    assert_eq!(first_n(&pattern, ymd(2019, 10, 1), 1), vec![ymd(2020, 9, 7)]);
}

#[test]
fn yearly_by_week_last_tie_break() {
    let pattern = RecurrencePattern::yearly_by_week(WeekOfMonth::Last, DaysOfWeek::WEEKEND, 3, 1).unwrap();
    assert_eq!(
        first_n(&pattern, ymd(2019, 1, 1), 2),
        vec![ymd(2019, 3, 31), ymd(2020, 3, 29)]
    );
}

#[test]
fn sequences_are_restartable() {
    let pattern = RecurrencePattern::weekly(DaysOfWeek::WEEKDAYS, 3, Weekday::Mon).unwrap();
    let start = ymd(2019, 4, 17);
    assert_eq!(first_n(&pattern, start, 40), first_n(&pattern, start, 40));
}

#[test]
fn sequences_end_at_last_representable_date() {
    let yearly = RecurrencePattern::yearly_by_month_day(12, 31, 1).unwrap();
    assert_eq!(
        yearly.recurrences_from(ymd(9997, 6, 1)).collect::<Vec<_>>(),
        vec![ymd(9997, 12, 31), ymd(9998, 12, 31), ymd(9999, 12, 31)]
    );

    let monthly = RecurrencePattern::monthly_by_day(1, 1).unwrap();
    assert_eq!(monthly.recurrences_from(ymd(9999, 10, 2)).count(), 2);

    let weekly = RecurrencePattern::weekly(DaysOfWeek::ANY, 1, Weekday::Mon).unwrap();
    assert_eq!(weekly.recurrences_from(ymd(9999, 12, 25)).count(), 7);

    let by_week = RecurrencePattern::monthly_by_week(WeekOfMonth::Last, DaysOfWeek::FRIDAY, 1).unwrap();
    assert_eq!(
        by_week.recurrences_from(ymd(9999, 11, 1)).collect::<Vec<_>>(),
        vec![ymd(9999, 11, 26), ymd(9999, 12, 31)]
    );
}

#[test_log::test]
fn zone_and_time_are_preserved() {
    let start = Berlin.with_ymd_and_hms(2019, 3, 1, 9, 30, 0).unwrap();
    let pattern = RecurrencePattern::monthly_by_day(1, 1).unwrap();

    let occurrences: Vec<_> = pattern.recurrences_from(start).take(12).collect();
    for occurrence in &occurrences {
        assert_eq!(occurrence.timezone(), Berlin);
        assert_eq!((occurrence.hour(), occurrence.minute()), (9, 30));
        assert_eq!(occurrence.day(), 1);
    }
    // Winter and summer offsets differ, the wall-clock time does not.
    assert_ne!(occurrences[0].offset().to_string(), occurrences[1].offset().to_string());
}

#[test_log::test]
fn nonexistent_local_times_are_skipped() {
    // 2019-03-31 02:30 does not exist in Berlin.
    let start = Berlin.with_ymd_and_hms(2019, 3, 30, 2, 30, 0).unwrap();
    let pattern = RecurrencePattern::daily(1).unwrap();
    let dates: Vec<_> = pattern
        .recurrences_from(start)
        .take(2)
        .map(|occurrence| occurrence.date_naive())
        .collect();
    assert_eq!(dates, vec![ymd(2019, 3, 30), ymd(2019, 4, 1)]);
}
