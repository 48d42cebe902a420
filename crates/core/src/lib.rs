// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tick-core: building blocks of the tick scheduler
//!
//! This crate provides:
//! - A wall-clock abstraction and the tick signal derived from it
//! - The `Ticker` state machine that turns clock readings into ticks
//! - The scheduling formula language (parser, formatter, evaluator)
//! - Job identity and lifecycle flags

pub mod clock;
pub mod formula;
pub mod id;
pub mod job;
pub mod tick;
pub mod ticker;

pub use clock::{Clock, FakeClock, SystemClock};
pub use formula::{EvalError, ParseError, SchedulingFormula, Value};
pub use id::{RunId, RunIdGen, SequentialRunIds, UuidRunIds};
pub use job::{JobKey, JobLifecycle, JobState};
pub use tick::{Granularity, SignalField, TickSignal};
pub use ticker::Ticker;
