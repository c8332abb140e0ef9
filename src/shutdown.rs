//! Process shutdown signal shared with the retry layer.
//!
//! The retry layer only ever asks "is the process shutting down right
//! now"; it never blocks on the signal. The flag is consulted when a
//! transport failure arrives so a tearing-down process does not race
//! its own dependencies by scheduling fresh retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable point-in-time shutdown query. All clones observe the same
/// underlying flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    flag: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the process as shutting down. Idempotent; never unset.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let signal = ShutdownSignal::new();
        let observer = signal.clone();
        assert!(!observer.is_shutting_down());
        signal.request_shutdown();
        assert!(observer.is_shutting_down());
    }
}
