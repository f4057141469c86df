// crates/biou-console-util/src/timing.rs
// ============================================================================
// Module: Call Rate Shaping
// Description: Debounce and throttle wrappers for callbacks.
// Purpose: Collapse bursts of UI-driven calls (search boxes, resize, refresh).
// Dependencies: tokio
// ============================================================================

//! ## Overview
//! [`debounce`] runs the wrapped callback once, on the trailing edge, after
//! `delay` has elapsed since the most recent call; the last call's argument
//! wins. [`throttle`] runs the callback immediately and then ignores calls
//! until `delay` has elapsed since the last *executed* call.
//!
//! Both wrappers read the tokio clock, so tests can drive them with a paused
//! runtime. [`Debounced::call`] schedules onto the current tokio runtime; a
//! call made outside any runtime is dropped and reported as not scheduled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

// ============================================================================
// SECTION: Debounce
// ============================================================================

/// Trailing-edge debounced callback.
///
/// # Invariants
/// - At most one pending invocation exists; a new call replaces it.
pub struct Debounced<A> {
    /// Wrapped callback.
    func: Arc<dyn Fn(A) + Send + Sync>,
    /// Quiet period required before the callback fires.
    delay: Duration,
    /// Pending timer task, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Wraps `func` so bursts of calls collapse into one trailing invocation.
pub fn debounce<A, F>(func: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        func: Arc::new(func),
        delay,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Schedules the callback with `args`, cancelling any pending invocation.
    ///
    /// Returns `false` without scheduling when no tokio runtime is running.
    pub fn call(&self, args: A) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            return false;
        };
        let func = Arc::clone(&self.func);
        let delay = self.delay;
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            func(args);
        });
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
        true
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(task) = pending {
            task.abort();
        }
    }
}

// ============================================================================
// SECTION: Throttle
// ============================================================================

/// Leading-edge throttled callback.
///
/// # Invariants
/// - `last_run` only moves forward, and only when the callback executes.
pub struct Throttled<A> {
    /// Wrapped callback.
    func: Box<dyn Fn(A) + Send + Sync>,
    /// Minimum spacing between executed calls.
    delay: Duration,
    /// Instant of the most recent executed call.
    last_run: Mutex<Option<Instant>>,
}

/// Wraps `func` so it runs at most once per `delay` window.
pub fn throttle<A, F>(func: F, delay: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        func: Box::new(func),
        delay,
        last_run: Mutex::new(None),
    }
}

impl<A> Throttled<A> {
    /// Runs the callback when the window has elapsed; returns whether it ran.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut last_run = match self.last_run.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(previous) = *last_run
                && now.duration_since(previous) < self.delay
            {
                return false;
            }
            *last_run = Some(now);
        }
        (self.func)(args);
        true
    }
}
