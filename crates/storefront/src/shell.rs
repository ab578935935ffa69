//! Outward-facing UI intents.
//!
//! The domain layer never navigates or renders; it queues intents here and
//! the presentation layer drains them. Navigation targets and notification
//! payloads are the only effects that cross that boundary.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Where a navigation intent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationTarget {
    /// The checkout page.
    Checkout,
    /// The payment stage.
    Payment,
}

impl NavigationTarget {
    /// Route name as the shell expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::Payment => "payment",
        }
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Something worked; show a confirmation.
    Success,
    /// Something failed; show an error.
    Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Message shown to the shopper.
    pub message: String,
}

impl Notification {
    /// A success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// An effect the shell must perform on the domain layer's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellSignal {
    /// Transition to another stage.
    Navigate(NavigationTarget),
    /// Show a notification.
    Notify(Notification),
}

/// FIFO queue of pending shell signals, drained by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct SignalQueue {
    queue: VecDeque<ShellSignal>,
}

impl SignalQueue {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue a signal.
    pub fn push(&mut self, signal: ShellSignal) {
        self.queue.push_back(signal);
    }

    /// Take all pending signals, oldest first.
    pub fn drain(&mut self) -> Vec<ShellSignal> {
        self.queue.drain(..).collect()
    }

    /// Whether any signals are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
