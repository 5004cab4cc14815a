// Copyright 2025-present The talpa authors
// SPDX-License-Identifier: Apache-2.0

//! Trailing-edge query debouncing as a clock-injected state machine.
//!
//! Queries triggered by typing should only execute after the input has been
//! quiet for a fixed delay, and a newer keystroke must cancel the pending
//! older one — at most one execution per quiescence window. The library owns
//! no timers: the host loop feeds `Instant`s in, which keeps the semantics
//! deterministic and testable.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use talpa::Debouncer;
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//! let t0 = Instant::now();
//! debouncer.submit("rea", t0);
//! debouncer.submit("react", t0 + Duration::from_millis(100)); // cancels "rea"
//! assert_eq!(debouncer.poll(t0 + Duration::from_millis(200)), None);
//! assert_eq!(
//!     debouncer.poll(t0 + Duration::from_millis(450)),
//!     Some("react".to_string())
//! );
//! ```

use std::time::{Duration, Instant};

/// Holds at most one pending query and releases it after `delay` of quiet.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Record a query at time `now`, replacing (and thereby cancelling) any
    /// query still waiting out its quiescence window.
    pub fn submit(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// Release the pending query if its window has elapsed by `now`.
    ///
    /// Returns `Some(query)` exactly once per submitted query; the pending
    /// slot is cleared on release so a window never fires twice.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.delay => {
                self.pending.take().map(|(query, _)| query)
            }
            _ => None,
        }
    }

    /// Drop any pending query without executing it. Teardown semantics: after
    /// this, no further poll fires until a new submit.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a query is waiting out its window.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn fires_only_after_quiescence() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("query", t0);

        assert_eq!(d.poll(at(t0, 100)), None);
        assert_eq!(d.poll(at(t0, 299)), None);
        assert_eq!(d.poll(at(t0, 300)), Some("query".to_string()));
    }

    #[test]
    fn newer_submit_cancels_older() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("rea", t0);
        d.submit("react", at(t0, 150));

        // Old window elapsed, but "rea" was replaced; new window not yet done.
        assert_eq!(d.poll(at(t0, 350)), None);
        assert_eq!(d.poll(at(t0, 450)), Some("react".to_string()));
    }

    #[test]
    fn fires_at_most_once_per_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("query", t0);

        assert_eq!(d.poll(at(t0, 400)), Some("query".to_string()));
        assert_eq!(d.poll(at(t0, 800)), None);
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_stops_pending_callback() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(DELAY);
        d.submit("query", t0);
        d.cancel();

        assert_eq!(d.poll(at(t0, 1000)), None);
    }

    #[test]
    fn poll_without_submit_is_quiet() {
        let mut d = Debouncer::new(DELAY);
        assert_eq!(d.poll(Instant::now()), None);
        assert!(!d.is_pending());
    }
}
