#![forbid(unsafe_code)]

//! Dispatch observability.
//!
//! This module provides:
//!
//! - **Tracing spans**: a `reducer.dispatch` span per action with the
//!   action tag, duration, and outcome.
//! - **Structured events** on the `blueprint.reducer` target for applied,
//!   rejected, and no-op actions.
//! - **Metrics counters**: monotonic totals of applied, rejected, and no-op
//!   dispatches.
//!
//! No subscriber is installed here; applications choose their own.

use std::sync::atomic::{AtomicU64, Ordering};
use web_time::Instant;

use crate::error::ReduceError;

/// Tracing target for every reducer event.
pub const TARGET: &str = "blueprint.reducer";

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static DISPATCH_APPLIED_TOTAL: AtomicU64 = AtomicU64::new(0);
static DISPATCH_REJECTED_TOTAL: AtomicU64 = AtomicU64::new(0);
static DISPATCH_NOOP_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total dispatches that produced a state (no-ops included).
#[must_use]
pub fn dispatch_applied_total() -> u64 {
    DISPATCH_APPLIED_TOTAL.load(Ordering::Relaxed)
}

/// Total dispatches rejected with a [`ReduceError`].
#[must_use]
pub fn dispatch_rejected_total() -> u64 {
    DISPATCH_REJECTED_TOTAL.load(Ordering::Relaxed)
}

/// Total dispatches that were benign identity transitions.
#[must_use]
pub fn dispatch_noop_total() -> u64 {
    DISPATCH_NOOP_TOTAL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Dispatch instrumentation
// ---------------------------------------------------------------------------

/// Run one reducer transition inside a `reducer.dispatch` span.
///
/// Records `duration_us` and `result` (`"ok"` or `"rejected"`) on the span
/// and emits a `debug` event on success or a `warn` event on rejection.
pub fn trace_dispatch<T, F>(action: &'static str, f: F) -> Result<T, ReduceError>
where
    F: FnOnce() -> Result<T, ReduceError>,
{
    let start = Instant::now();
    let span = tracing::debug_span!(
        "reducer.dispatch",
        action = %action,
        duration_us = tracing::field::Empty,
        result = tracing::field::Empty,
    );
    let _entered = span.enter();

    let result = f();
    let duration_us = start.elapsed().as_micros() as u64;
    span.record("duration_us", duration_us);

    match &result {
        Ok(_) => {
            DISPATCH_APPLIED_TOTAL.fetch_add(1, Ordering::Relaxed);
            span.record("result", "ok");
            tracing::debug!(
                target: TARGET,
                action = %action,
                duration_us = duration_us,
                "action applied"
            );
        }
        Err(err) => {
            DISPATCH_REJECTED_TOTAL.fetch_add(1, Ordering::Relaxed);
            span.record("result", "rejected");
            tracing::warn!(
                target: TARGET,
                action = %action,
                error = err.kind(),
                detail = %err,
                "action rejected"
            );
        }
    }

    result
}

/// Record an action that resolved to an identity transition.
pub fn record_noop(action: &'static str, reason: &'static str) {
    DISPATCH_NOOP_TOTAL.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(
        target: TARGET,
        action = %action,
        reason = reason,
        "action left state unchanged"
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::ChildId;

    #[test]
    fn trace_dispatch_returns_value() {
        assert_eq!(trace_dispatch("UNDO", || Ok(7)), Ok(7));
    }

    #[test]
    fn rejection_is_counted() {
        let before = dispatch_rejected_total();
        let result = trace_dispatch::<(), _>("DELETE CHILD", || {
            Err(ReduceError::UnknownChildId(ChildId::new(3)))
        });
        assert_eq!(result, Err(ReduceError::UnknownChildId(ChildId::new(3))));
        assert!(dispatch_rejected_total() > before);
    }

    #[test]
    fn success_is_counted() {
        let before = dispatch_applied_total();
        let _ = trace_dispatch("ADD CHILD", || Ok(()));
        assert!(dispatch_applied_total() > before);
    }

    #[test]
    fn noop_is_counted() {
        let before = dispatch_noop_total();
        record_noop("UNDO", "nothing to undo");
        assert!(dispatch_noop_total() > before);
    }
}
