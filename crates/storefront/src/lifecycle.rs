//! View lifetime guard for late-arriving async results.
//!
//! The address resolve and draft submit calls cross an I/O boundary. If the
//! shopper navigates away while one is in flight, the response must be
//! discarded rather than applied to state that no longer has a consumer.
//! A [`ViewLifetime`] is owned by the consuming view; flows hold a
//! [`LifetimeHandle`] and check it after every await before touching state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Disposal flag owned by a view. Dropping it (or calling
/// [`ViewLifetime::dispose`]) invalidates all handles.
#[derive(Debug)]
pub struct ViewLifetime {
    alive: Arc<AtomicBool>,
}

impl ViewLifetime {
    /// Create a live lifetime for a freshly mounted view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// A handle for an async flow tied to this view.
    #[must_use]
    pub fn handle(&self) -> LifetimeHandle {
        LifetimeHandle {
            alive: Arc::clone(&self.alive),
        }
    }

    /// Mark the view as gone. Idempotent.
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Cheap clonable check for whether the owning view still exists.
#[derive(Debug, Clone)]
pub struct LifetimeHandle {
    alive: Arc<AtomicBool>,
}

impl LifetimeHandle {
    /// Whether the owning view is still mounted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_live_until_disposed() {
        let view = ViewLifetime::new();
        let handle = view.handle();
        assert!(handle.is_live());

        view.dispose();
        assert!(!handle.is_live());
    }

    #[test]
    fn test_drop_invalidates_handles() {
        let view = ViewLifetime::new();
        let handle = view.handle();
        drop(view);
        assert!(!handle.is_live());
    }
}
