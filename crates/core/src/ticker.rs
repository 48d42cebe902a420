// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticker state machine
//!
//! The ticker turns clock readings into a strictly increasing sequence of
//! [`TickSignal`]s. It holds no timer of its own: the driving loop polls it
//! and sleeps for [`Ticker::until_next`] between polls.

use crate::tick::{Granularity, TickSignal};
use chrono::NaiveDateTime;
use std::time::Duration;

/// Upper bound on a single sleep so wall-clock adjustments are noticed
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Lower bound on a single sleep to avoid spinning right at a boundary
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct Ticker {
    granularity: Granularity,
    last: Option<NaiveDateTime>,
}

impl Ticker {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            last: None,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Start of the most recently emitted period
    pub fn last_tick(&self) -> Option<NaiveDateTime> {
        self.last
    }

    /// Emit a signal if `now` lies in a period after the last emitted one
    ///
    /// Missed periods are not replayed: after a stall only the current
    /// period is emitted. A clock that moved backwards emits nothing until
    /// it passes the last emitted period again.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<TickSignal> {
        let period = self.granularity.truncate(now);
        match self.last {
            Some(last) if period <= last => None,
            _ => {
                self.last = Some(period);
                Some(TickSignal::at(period, self.granularity))
            }
        }
    }

    /// How long to sleep before polling again
    pub fn until_next(&self, now: NaiveDateTime) -> Duration {
        let boundary = self.granularity.next_boundary(now);
        (boundary - now)
            .to_std()
            .unwrap_or(MIN_POLL_INTERVAL)
            .clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL)
    }
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
