// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background task turning clock readings into scheduler ticks

use crate::scheduler::WeakScheduler;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tick_core::Clock;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A running tick loop
pub(crate) struct TickLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TickLoop {
    /// Spawn the loop. It polls the clock, hands each new tick to the
    /// scheduler and sleeps until the next period boundary.
    pub(crate) fn spawn<C: Clock + 'static>(
        runtime: &Handle,
        scheduler: WeakScheduler,
        clock: C,
    ) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);
        let handle = runtime.spawn(async move {
            let Some(granularity) = scheduler.upgrade().map(|s| s.granularity()) else {
                return;
            };
            tracing::info!(%granularity, "tick loop started");
            loop {
                // Exit once every scheduler handle is gone
                let Some(scheduler) = scheduler.upgrade() else {
                    break;
                };
                if let Some(signal) = scheduler.poll_tick(clock.now()) {
                    let outcome = catch_unwind(AssertUnwindSafe(|| scheduler.handle_tick(&signal)));
                    match outcome {
                        Ok(started) => tracing::debug!(tick = %signal, started, "tick handled"),
                        Err(_) => tracing::error!(tick = %signal, "tick handling panicked"),
                    }
                }
                let wait = scheduler.until_next_tick(clock.now());
                drop(scheduler);

                tokio::select! {
                    _ = tokio::time::sleep(wait) => {}
                    _ = stopped.changed() => break,
                }
            }
            tracing::info!("tick loop stopped");
        });
        Self { shutdown, handle }
    }

    /// Signal the loop to exit and wait for it
    pub(crate) async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                tracing::error!("tick loop panicked");
            }
        }
    }
}
