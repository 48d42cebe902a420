// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_milli_opt(h, mi, s, 250))
        .unwrap()
}

#[parameterized(
    second = { Granularity::Second, dt(2026, 5, 17, 13, 45, 30) },
    minute = { Granularity::Minute, dt(2026, 5, 17, 13, 45, 30) },
    hour = { Granularity::Hour, dt(2026, 5, 17, 13, 45, 30) },
    day = { Granularity::Day, dt(2026, 5, 17, 13, 45, 30) },
)]
fn truncate_lands_on_period_start(granularity: Granularity, time: NaiveDateTime) {
    let start = granularity.truncate(time);
    assert!(start <= time);
    assert!(time < start + granularity.period());
    assert_eq!(start.nanosecond(), 0);
    assert_eq!(granularity.next_boundary(time), start + granularity.period());
}

#[test]
fn minute_truncation_clears_seconds() {
    let start = Granularity::Minute.truncate(dt(2026, 5, 17, 13, 45, 30));
    assert_eq!((start.hour(), start.minute(), start.second()), (13, 45, 0));
}

#[test]
fn next_day_boundary_rolls_over_year() {
    let next = Granularity::Day.next_boundary(dt(2026, 12, 31, 23, 59, 59));
    let new_year = NaiveDate::from_ymd_opt(2027, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    assert_eq!(next, new_year);
}

#[parameterized(
    second = { "second", Granularity::Second },
    minute = { "minute", Granularity::Minute },
    hour = { "hour", Granularity::Hour },
    day = { "day", Granularity::Day },
)]
fn granularity_name_round_trips(name: &str, granularity: Granularity) {
    assert_eq!(name.parse::<Granularity>().unwrap(), granularity);
    assert_eq!(granularity.to_string(), name);
}

#[test]
fn unknown_granularity_is_rejected() {
    assert!("fortnight".parse::<Granularity>().is_err());
}

#[test]
fn signal_fields_describe_period_start() {
    // Friday 2026-02-27, 08:15:42
    let signal = TickSignal::at(dt(2026, 2, 27, 8, 15, 42), Granularity::Second);

    assert_eq!(signal.second, 42);
    assert_eq!(signal.minute, 15);
    assert_eq!(signal.hour, 8);
    assert_eq!(signal.day, 27);
    assert_eq!(signal.month, 2);
    assert_eq!(signal.year, 2026);
    assert_eq!(signal.day_of_week, 5);
    assert_eq!(signal.week, 9);
    assert_eq!(signal.day_of_year, 58);
    assert_eq!(signal.day_of_month_reverse, 2);
    assert_eq!(signal.second_of_day, 8 * 3600 + 15 * 60 + 42);
    assert_eq!(signal.time().nanosecond(), 0);
}

#[test]
fn minute_signal_has_zero_second() {
    let signal = TickSignal::at(dt(2026, 2, 27, 8, 15, 42), Granularity::Minute);
    assert_eq!(signal.second, 0);
    assert_eq!(signal.minute, 15);
    assert_eq!(signal.granularity(), Granularity::Minute);
}

#[parameterized(
    last_day_of_january = { 2026, 1, 31, 1 },
    leap_february = { 2028, 2, 29, 1 },
    first_day_of_leap_february = { 2028, 2, 1, 29 },
    first_day_of_april = { 2026, 4, 1, 30 },
)]
fn day_of_month_reverse_counts_from_month_end(y: i32, m: u32, d: u32, expected: u32) {
    let signal = TickSignal::at(dt(y, m, d, 0, 0, 0), Granularity::Day);
    assert_eq!(signal.day_of_month_reverse, expected);
}

#[test]
fn field_lookup_matches_struct_fields() {
    let signal = TickSignal::at(dt(2026, 7, 4, 23, 59, 1), Granularity::Second);
    assert_eq!(signal.field(SignalField::Second), 1);
    assert_eq!(signal.field(SignalField::Hour), 23);
    assert_eq!(signal.field(SignalField::Year), 2026);
    assert_eq!(signal.field(SignalField::DayOfWeek), 6);
    assert_eq!(signal.field(SignalField::SecondOfDay), 86341);
}

#[test]
fn every_signal_field_name_resolves() {
    for field in SignalField::ALL {
        assert_eq!(SignalField::from_name(field.name()), Some(field));
    }
    assert_eq!(SignalField::from_name("dayofweek"), None);
}

#[test]
fn signal_serializes_with_camel_case_fields() {
    let signal = TickSignal::at(dt(2026, 7, 4, 10, 0, 0), Granularity::Minute);
    let json = serde_json::to_value(&signal).unwrap();
    assert_eq!(json["dayOfWeek"], 6);
    assert_eq!(json["granularity"], "minute");
    assert_eq!(json["secondOfDay"], 36000);
}

#[test]
fn signal_display_shows_time_and_granularity() {
    let signal = TickSignal::at(dt(2026, 7, 4, 10, 0, 5), Granularity::Second);
    assert_eq!(signal.to_string(), "2026-07-04 10:00:05 (second)");
}
