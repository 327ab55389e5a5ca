//! Transient notifications
//!
//! Toasts are pure UI feedback: they expire on their own after a fixed
//! delay and are never persisted.

use parking_lot::Mutex;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default lifetime of a toast
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: ToastSeverity,
    #[serde(skip)]
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Queue of live toasts
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    state: Mutex<QueueState>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(QueueState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Enqueue a toast and return its id
    pub fn show_toast(&self, message: impl Into<String>, severity: ToastSeverity) -> u64 {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = state.next_id;
        let toast = Toast {
            id,
            message: message.into(),
            severity,
            expires_at: Instant::now() + self.ttl,
        };
        tracing::debug!(id, severity = ?severity, message = %toast.message, "Toast shown");
        state.toasts.push(toast);
        id
    }

    /// Live toasts, oldest first. Expired entries are dropped.
    pub fn active(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut state = self.state.lock();
        state.toasts.retain(|t| t.expires_at > now);
        state.toasts.clone()
    }

    /// Remove a toast before it expires
    pub fn dismiss(&self, id: u64) -> bool {
        let mut state = self.state.lock();
        let before = state.toasts.len();
        state.toasts.retain(|t| t.id != id);
        state.toasts.len() != before
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
