// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick signals: calendar snapshots delivered once per elapsed period

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Period length of the ticking clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Second,
    Minute,
    Hour,
    Day,
}

impl Granularity {
    /// Length of one period
    pub fn period(self) -> TimeDelta {
        match self {
            Granularity::Second => TimeDelta::seconds(1),
            Granularity::Minute => TimeDelta::minutes(1),
            Granularity::Hour => TimeDelta::hours(1),
            Granularity::Day => TimeDelta::days(1),
        }
    }

    /// Floor a time to the start of its period
    pub fn truncate(self, time: NaiveDateTime) -> NaiveDateTime {
        let (h, m, s) = match self {
            Granularity::Second => (time.hour(), time.minute(), time.second()),
            Granularity::Minute => (time.hour(), time.minute(), 0),
            Granularity::Hour => (time.hour(), 0, 0),
            Granularity::Day => (0, 0, 0),
        };
        time.date().and_hms_opt(h, m, s).unwrap_or(time)
    }

    /// Start of the period following the one containing `time`
    pub fn next_boundary(self, time: NaiveDateTime) -> NaiveDateTime {
        self.truncate(time)
            .checked_add_signed(self.period())
            .unwrap_or(NaiveDateTime::MAX)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Second => write!(f, "second"),
            Granularity::Minute => write!(f, "minute"),
            Granularity::Hour => write!(f, "hour"),
            Granularity::Day => write!(f, "day"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" => Ok(Granularity::Second),
            "minute" => Ok(Granularity::Minute),
            "hour" => Ok(Granularity::Hour),
            "day" => Ok(Granularity::Day),
            _ => Err(format!("unknown granularity: {}", s)),
        }
    }
}

/// A named field of a [`TickSignal`], addressable from formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalField {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    DayOfWeek,
    DayOfMonthReverse,
    DayOfYear,
    SecondOfDay,
}

impl SignalField {
    pub const ALL: [SignalField; 11] = [
        SignalField::Second,
        SignalField::Minute,
        SignalField::Hour,
        SignalField::Day,
        SignalField::Week,
        SignalField::Month,
        SignalField::Year,
        SignalField::DayOfWeek,
        SignalField::DayOfMonthReverse,
        SignalField::DayOfYear,
        SignalField::SecondOfDay,
    ];

    /// Identifier used in formula text
    pub fn name(self) -> &'static str {
        match self {
            SignalField::Second => "second",
            SignalField::Minute => "minute",
            SignalField::Hour => "hour",
            SignalField::Day => "day",
            SignalField::Week => "week",
            SignalField::Month => "month",
            SignalField::Year => "year",
            SignalField::DayOfWeek => "dayOfWeek",
            SignalField::DayOfMonthReverse => "dayOfMonthReverse",
            SignalField::DayOfYear => "dayOfYear",
            SignalField::SecondOfDay => "secondOfDay",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for SignalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable snapshot of one elapsed period
///
/// All fields describe the *start* of the period, so a minute tick always
/// has `second == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSignal {
    time: NaiveDateTime,
    granularity: Granularity,
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
    /// Day of month, 1-based
    pub day: u32,
    /// ISO week number
    pub week: u32,
    /// Month, 1-based
    pub month: u32,
    pub year: i32,
    /// ISO weekday, Monday = 1 .. Sunday = 7
    pub day_of_week: u32,
    /// 1 on the last day of the month, 2 on the day before, ...
    pub day_of_month_reverse: u32,
    pub day_of_year: u32,
    pub second_of_day: u32,
}

impl TickSignal {
    /// Build the signal for the period containing `time`
    pub fn at(time: NaiveDateTime, granularity: Granularity) -> Self {
        let t = granularity.truncate(time);
        let day = t.day();
        Self {
            time: t,
            granularity,
            second: t.second(),
            minute: t.minute(),
            hour: t.hour(),
            day,
            week: t.iso_week().week(),
            month: t.month(),
            year: t.year(),
            day_of_week: t.weekday().number_from_monday(),
            day_of_month_reverse: days_in_month(t.year(), t.month()).saturating_sub(day) + 1,
            day_of_year: t.ordinal(),
            second_of_day: t.num_seconds_from_midnight(),
        }
    }

    /// Start of the period this signal describes
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Read a field by name, widened for formula arithmetic
    pub fn field(&self, field: SignalField) -> i64 {
        match field {
            SignalField::Second => i64::from(self.second),
            SignalField::Minute => i64::from(self.minute),
            SignalField::Hour => i64::from(self.hour),
            SignalField::Day => i64::from(self.day),
            SignalField::Week => i64::from(self.week),
            SignalField::Month => i64::from(self.month),
            SignalField::Year => i64::from(self.year),
            SignalField::DayOfWeek => i64::from(self.day_of_week),
            SignalField::DayOfMonthReverse => i64::from(self.day_of_month_reverse),
            SignalField::DayOfYear => i64::from(self.day_of_year),
            SignalField::SecondOfDay => i64::from(self.second_of_day),
        }
    }
}

impl fmt::Display for TickSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.time.format("%Y-%m-%d %H:%M:%S"), self.granularity)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(31)
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
