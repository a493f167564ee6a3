//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Answers "has this render been asked to stop?".
///
/// Polled by every worker before each row, so implementations must be
/// cheap and callable from any thread.
pub trait AbortSignal: Sync {
    fn is_aborted(&self) -> bool;
}

impl AbortSignal for AtomicBool {
    #[inline]
    fn is_aborted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<A: AbortSignal + ?Sized> AbortSignal for &A {
    #[inline]
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

impl<A: AbortSignal + Send + ?Sized> AbortSignal for Arc<A> {
    #[inline]
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    #[inline]
    fn is_aborted(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        assert!(!flag.is_aborted());
        flag.store(true, Ordering::Relaxed);
        assert!(flag.is_aborted());
        assert!((&*flag).is_aborted());
    }

    #[test]
    fn test_never_abort() {
        assert!(!NeverAbort.is_aborted());
    }
}
