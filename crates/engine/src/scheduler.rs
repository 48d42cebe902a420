// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick-driven job scheduler
//!
//! The scheduler owns a registry of jobs keyed by [`JobKey`] and the set of
//! jobs currently running. Both live behind one mutex so every snapshot is
//! consistent: a running job is always also registered. Runs execute on
//! tokio tasks and never hold the lock.

use crate::tick_loop::TickLoop;
use crate::{Job, SchedulerError};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::{Duration, Instant};
use tick_core::{
    Clock, Granularity, JobKey, JobState, RunId, RunIdGen, SystemClock, TickSignal, Ticker,
    UuidRunIds,
};
use tokio::runtime::Handle;
use tracing::Instrument;

/// Handle to a scheduler; clones share the same registry
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

struct Inner {
    granularity: Granularity,
    id_gen: Box<dyn RunIdGen>,
    active: AtomicBool,
    registry: Mutex<Registry>,
    /// Outlives any single tick loop so a restart never re-delivers a period
    ticker: Mutex<Ticker>,
    tick_loop: Mutex<Option<TickLoop>>,
}

#[derive(Default)]
struct Registry {
    jobs: BTreeMap<JobKey, Arc<dyn Job>>,
    running: BTreeMap<JobKey, RunId>,
}

impl Registry {
    /// Drop disposed jobs that are not running
    fn reap(&mut self) -> usize {
        let Registry { jobs, running } = self;
        let before = jobs.len();
        jobs.retain(|key, job| {
            let keep = !job.is_disposed() || running.contains_key(key);
            if !keep {
                tracing::info!(job = %key, "disposed job removed");
            }
            keep
        });
        before - jobs.len()
    }

    fn select(&self, group_id: Option<&str>, job_id: Option<&str>) -> Vec<Arc<dyn Job>> {
        self.jobs
            .iter()
            .filter(|(key, _)| key.matches(group_id, job_id))
            .map(|(_, job)| Arc::clone(job))
            .collect()
    }

    fn select_running(&self, group_id: Option<&str>, job_id: Option<&str>) -> Vec<Arc<dyn Job>> {
        self.running
            .keys()
            .filter(|key| key.matches(group_id, job_id))
            .filter_map(|key| self.jobs.get(key).cloned())
            .collect()
    }
}

impl Inner {
    fn lock_registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Ticker> {
        self.ticker.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_tick_loop(&self) -> MutexGuard<'_, Option<TickLoop>> {
        self.tick_loop.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Weak handle held by the tick loop so it does not keep the scheduler alive
#[derive(Clone)]
pub(crate) struct WeakScheduler(Weak<Inner>);

impl WeakScheduler {
    pub(crate) fn upgrade(&self) -> Option<Scheduler> {
        self.0.upgrade().map(|inner| Scheduler { inner })
    }
}

impl Scheduler {
    /// Create a stopped scheduler with UUID run ids
    pub fn new(granularity: Granularity) -> Self {
        Self::with_id_gen(granularity, UuidRunIds)
    }

    pub fn with_id_gen(granularity: Granularity, id_gen: impl RunIdGen + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                granularity,
                id_gen: Box::new(id_gen),
                active: AtomicBool::new(true),
                registry: Mutex::new(Registry::default()),
                ticker: Mutex::new(Ticker::new(granularity)),
                tick_loop: Mutex::new(None),
            }),
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.inner.granularity
    }

    /// Register a job and hand back a shared handle to it
    pub fn add_job<J: Job>(&self, job: J) -> Result<Arc<J>, SchedulerError> {
        let job = Arc::new(job);
        self.add_shared_job(Arc::clone(&job) as Arc<dyn Job>)?;
        Ok(job)
    }

    /// Register an already shared job
    ///
    /// A key that is still registered is rejected, unless the existing
    /// entry is disposed and idle, in which case it is replaced.
    pub fn add_shared_job(&self, job: Arc<dyn Job>) -> Result<(), SchedulerError> {
        let key = job.key().clone();
        let mut registry = self.inner.lock_registry();
        if let Some(existing) = registry.jobs.get(&key) {
            if !existing.is_disposed() || registry.running.contains_key(&key) {
                return Err(SchedulerError::DuplicateJob(key));
            }
            tracing::info!(job = %key, "replacing disposed job");
        }
        registry.jobs.insert(key.clone(), job);
        tracing::info!(job = %key, "job added");
        Ok(())
    }

    /// Dispose a job. Returns false when no job has this key.
    ///
    /// An idle job leaves the registry at once; a running job when its run
    /// finishes.
    pub fn remove_job(&self, key: &JobKey) -> bool {
        self.remove_jobs(Some(&key.group_id), Some(&key.job_id)) > 0
    }

    /// Dispose every job matching the filters; `None` matches anything
    pub fn remove_jobs(&self, group_id: Option<&str>, job_id: Option<&str>) -> usize {
        let mut registry = self.inner.lock_registry();
        let matched = registry.select(group_id, job_id);
        for job in &matched {
            job.dispose();
            tracing::info!(
                job = %job.key(),
                running = registry.running.contains_key(job.key()),
                "job removal requested"
            );
        }
        registry.reap();
        matched.len()
    }

    pub fn get_job(&self, key: &JobKey) -> Option<Arc<dyn Job>> {
        self.inner.lock_registry().jobs.get(key).cloned()
    }

    pub fn get_jobs(&self, group_id: Option<&str>, job_id: Option<&str>) -> Vec<Arc<dyn Job>> {
        self.inner.lock_registry().select(group_id, job_id)
    }

    /// Snapshot of all registered jobs, ordered by key
    pub fn get_all_jobs(&self) -> Vec<Arc<dyn Job>> {
        self.get_jobs(None, None)
    }

    pub fn get_job_count(&self) -> usize {
        self.inner.lock_registry().jobs.len()
    }

    /// Snapshot of the jobs whose `run` is executing
    pub fn get_running_jobs(
        &self,
        group_id: Option<&str>,
        job_id: Option<&str>,
    ) -> Vec<Arc<dyn Job>> {
        self.inner.lock_registry().select_running(group_id, job_id)
    }

    pub fn get_running_job_count(&self) -> usize {
        self.inner.lock_registry().running.len()
    }

    /// Current state of a registered job, `None` if unknown
    pub fn job_state(&self, key: &JobKey) -> Option<JobState> {
        let registry = self.inner.lock_registry();
        let job = registry.jobs.get(key)?;
        Some(if registry.running.contains_key(key) {
            JobState::Running
        } else if job.is_disposed() {
            JobState::Disposed
        } else {
            JobState::Registered
        })
    }

    /// Raise the interrupt flag of matching running jobs
    pub fn interrupt_jobs(&self, group_id: Option<&str>, job_id: Option<&str>) -> usize {
        let running = self.get_running_jobs(group_id, job_id);
        for job in &running {
            job.lifecycle().interrupt();
            tracing::info!(job = %job.key(), "job interrupted");
        }
        running.len()
    }

    /// An inactive scheduler keeps ticking and reaping but starts no runs
    pub fn set_active(&self, active: bool) {
        let was = self.inner.active.swap(active, Ordering::SeqCst);
        if was != active {
            tracing::info!(active, "scheduler activity changed");
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Start the tick loop on the current tokio runtime using wall time
    pub fn start(&self) -> Result<(), SchedulerError> {
        self.start_with_clock(SystemClock)
    }

    pub fn start_with_clock<C: Clock + 'static>(&self, clock: C) -> Result<(), SchedulerError> {
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        let mut tick_loop = self.inner.lock_tick_loop();
        if tick_loop.is_some() {
            return Err(SchedulerError::AlreadyStarted);
        }
        *tick_loop = Some(TickLoop::spawn(&runtime, self.downgrade(), clock));
        tracing::info!(granularity = %self.granularity(), "scheduler started");
        Ok(())
    }

    /// Stop the tick loop and wait for it to exit
    ///
    /// Runs already in flight continue to completion.
    pub async fn stop(&self) {
        let tick_loop = self.inner.lock_tick_loop().take();
        if let Some(tick_loop) = tick_loop {
            tick_loop.shutdown().await;
            tracing::info!(running = self.get_running_job_count(), "scheduler stopped");
        }
    }

    pub fn is_started(&self) -> bool {
        self.inner.lock_tick_loop().is_some()
    }

    /// Process one tick and return the number of runs started
    ///
    /// Disposed idle jobs are reaped first. When active, every job that is
    /// neither disposed nor running is asked to accept the tick, and each
    /// accepting job is spawned on its own task.
    pub fn handle_tick(&self, signal: &TickSignal) -> usize {
        let span = tracing::debug_span!("tick", time = %signal.time());
        let _guard = span.enter();

        let candidates = {
            let mut registry = self.inner.lock_registry();
            registry.reap();
            if !self.is_active() {
                tracing::debug!("scheduler inactive, tick ignored");
                return 0;
            }
            registry.select(None, None)
        };

        let Ok(runtime) = Handle::try_current() else {
            tracing::error!("no tokio runtime, tick not dispatched");
            return 0;
        };

        let mut started = 0;
        for job in candidates {
            if job.is_disposed() || self.is_running(job.key()) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| job.accept_tick(signal))) {
                Ok(true) => {
                    if self.dispatch(&runtime, job, signal) {
                        started += 1;
                    }
                }
                Ok(false) => {}
                Err(_) => tracing::error!(job = %job.key(), "accept_tick panicked"),
            }
        }
        started
    }

    fn is_running(&self, key: &JobKey) -> bool {
        self.inner.lock_registry().running.contains_key(key)
    }

    fn dispatch(&self, runtime: &Handle, job: Arc<dyn Job>, signal: &TickSignal) -> bool {
        let key = job.key().clone();
        let run_id = self.inner.id_gen.next_run_id();
        {
            let mut registry = self.inner.lock_registry();
            // The job may have been removed or replaced since the snapshot
            let current = registry.jobs.get(&key).is_some_and(|j| Arc::ptr_eq(j, &job));
            if !current || job.is_disposed() || registry.running.contains_key(&key) {
                return false;
            }
            // Cleared under the lock so an interrupt of this run cannot be lost
            job.lifecycle().clear_interrupt();
            registry.running.insert(key.clone(), run_id.clone());
        }

        let span = tracing::info_span!("run", job = %key, run_id = %run_id);
        let guard = RunGuard {
            inner: Arc::clone(&self.inner),
            key,
            run_id,
        };
        let scheduler = self.clone();
        let signal = signal.clone();
        runtime.spawn(
            async move {
                let _guard = guard;
                tracing::info!("run started");
                let start = Instant::now();
                let result = job.run(&scheduler, &signal).await;
                let elapsed_ms = start.elapsed().as_millis() as u64;
                match result {
                    Ok(()) => tracing::info!(elapsed_ms, "run finished"),
                    Err(e) => tracing::error!(elapsed_ms, error = %e, "run failed"),
                }
            }
            .instrument(span),
        );
        true
    }

    /// Next tick for a clock reading, if `now` entered a new period
    pub(crate) fn poll_tick(&self, now: NaiveDateTime) -> Option<TickSignal> {
        self.inner.lock_ticker().poll(now)
    }

    pub(crate) fn until_next_tick(&self, now: NaiveDateTime) -> Duration {
        self.inner.lock_ticker().until_next(now)
    }

    pub(crate) fn downgrade(&self) -> WeakScheduler {
        WeakScheduler(Arc::downgrade(&self.inner))
    }
}

/// Removes a job from the running set when its run ends, however it ends
struct RunGuard {
    inner: Arc<Inner>,
    key: JobKey,
    run_id: RunId,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::error!(job = %self.key, run_id = %self.run_id, "run panicked");
        }
        let mut registry = self.inner.lock_registry();
        if registry.running.get(&self.key) == Some(&self.run_id) {
            registry.running.remove(&self.key);
        }
        let disposed = registry
            .jobs
            .get(&self.key)
            .is_some_and(|job| job.is_disposed());
        if disposed && !registry.running.contains_key(&self.key) {
            registry.jobs.remove(&self.key);
            tracing::info!(job = %self.key, run_id = %self.run_id, "disposed job removed");
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
