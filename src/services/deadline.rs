use saturation_key::AbortSignal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Abort signal that fires once a deadline has passed or on request.
#[derive(Debug)]
pub struct Deadline {
    at: Option<Instant>,
    cancelled: AtomicBool,
}

impl Deadline {
    /// A deadline `budget` from now, or none at all.
    pub fn after(budget: Option<Duration>) -> Self {
        Self {
            at: budget.map(|d| Instant::now() + d),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn never() -> Self {
        Self::after(None)
    }

    /// Fire the signal now.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

impl AbortSignal for Deadline {
    fn is_aborted(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }
        match self.at {
            Some(at) if Instant::now() >= at => {
                // Latch the expiry
                self.cancelled.store(true, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }
}
