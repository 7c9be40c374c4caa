//! Trailing-edge debounce.
//!
//! Bursts of calls collapse into one: each call replaces the pending
//! arguments and pushes the deadline out by the quiet interval. The owner
//! polls with the current time (or arms a timer for [`Debounce::deadline`])
//! and gets the latest arguments once the burst has gone quiet.

/// Debounced call holding the most recent arguments.
#[derive(Debug, Clone)]
pub struct Debounce<A> {
    quiet_ms: f64,
    pending: Option<(A, f64)>,
}

impl<A> Debounce<A> {
    /// Create a debounce that fires `quiet_ms` after the last call.
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(0.0),
            pending: None,
        }
    }

    pub fn quiet_ms(&self) -> f64 {
        self.quiet_ms
    }

    /// Record a call at `now_ms`, superseding any pending one.
    pub fn call(&mut self, args: A, now_ms: f64) {
        self.pending = Some((args, now_ms + self.quiet_ms));
    }

    /// Time at which the pending call becomes due.
    pub fn deadline(&self) -> Option<f64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending arguments if the quiet interval has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<A> {
        match &self.pending {
            Some((_, due)) if now_ms >= *due => self.pending.take().map(|(args, _)| args),
            _ => None,
        }
    }

    /// Drop the pending call without firing it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|(args, _)| args)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_quiet_window() {
        let mut debounce = Debounce::new(150.0);
        debounce.call(1, 0.0);
        debounce.call(2, 50.0);
        debounce.call(3, 100.0);

        assert_eq!(debounce.poll(200.0), None, "window restarts on each call");
        assert_eq!(debounce.deadline(), Some(250.0));
        assert_eq!(debounce.poll(250.0), Some(3));
        assert_eq!(debounce.poll(1000.0), None, "fires at most once");
    }

    #[test]
    fn test_cancel() {
        let mut debounce = Debounce::new(150.0);
        debounce.call("resize", 0.0);
        assert!(debounce.is_pending());
        assert_eq!(debounce.cancel(), Some("resize"));
        assert!(!debounce.is_pending());
        assert_eq!(debounce.poll(500.0), None);
    }

    #[test]
    fn test_negative_interval_clamped() {
        let mut debounce = Debounce::new(-5.0);
        assert_eq!(debounce.quiet_ms(), 0.0);
        debounce.call((), 10.0);
        assert_eq!(debounce.poll(10.0), Some(()));
    }
}
