//! Theme store
//!
//! Holds the one process-wide [`ThemeSettings`] value. Every mutation goes
//! through [`ThemeStore::update_theme`], which in order:
//!
//! 1. shallow-merges the patch over the current record
//! 2. re-derives every style variable and the document background/font
//! 3. writes the full merged record to local storage
//! 4. bumps the revision and notifies subscribers
//!
//! Storage problems never reach callers: a failed read or a malformed blob
//! behaves like "no saved theme", a failed write is logged.

use parking_lot::RwLock;
use shared::keys;
use shared::models::ThemeSettings;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::presets;
use super::style::{StyleSink, apply_styles};
use crate::storage::{LocalStorage, read_json, write_json};
use crate::toast::{ToastQueue, ToastSeverity};

/// Process-wide theme state
pub struct ThemeStore {
    storage: Arc<dyn LocalStorage>,
    sink: Arc<dyn StyleSink>,
    settings: RwLock<ThemeSettings>,
    /// Change counter; every receiver sees the latest revision
    revision_tx: watch::Sender<u64>,
    toasts: ToastQueue,
}

impl ThemeStore {
    /// Resolve the saved record over the defaults, then apply styles once.
    ///
    /// Styles are only pushed after the saved record is known, so views never
    /// see the default look flash before the saved one.
    pub fn load(storage: Arc<dyn LocalStorage>, sink: Arc<dyn StyleSink>) -> Self {
        let settings = Self::resolve_initial(storage.as_ref());
        apply_styles(&settings, sink.as_ref());
        let (revision_tx, _) = watch::channel(0);

        Self {
            storage,
            sink,
            settings: RwLock::new(settings),
            revision_tx,
            toasts: ToastQueue::new(),
        }
    }

    /// Replace the toast queue lifetime
    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toasts = ToastQueue::with_ttl(ttl);
        self
    }

    fn resolve_initial(storage: &dyn LocalStorage) -> ThemeSettings {
        let defaults = ThemeSettings::defaults();
        match read_json::<ThemeSettings>(storage, keys::THEME_SETTINGS) {
            Ok(Some(saved)) => {
                tracing::debug!(keys = saved.len(), "Loaded saved theme settings");
                saved.merged_over(&defaults)
            }
            Ok(None) => defaults,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable theme settings, using defaults");
                defaults
            }
        }
    }

    /// Snapshot of the current record
    pub fn get_theme(&self) -> ThemeSettings {
        self.settings.read().clone()
    }

    /// Read the current record without cloning it
    pub fn with_theme<R>(&self, f: impl FnOnce(&ThemeSettings) -> R) -> R {
        f(&self.settings.read())
    }

    /// Merge a partial record over the current one
    pub fn update_theme(&self, patch: &ThemeSettings) {
        let mut settings = self.settings.write();
        settings.merge(patch);
        self.commit(&settings);
        tracing::debug!(keys = patch.len(), "Theme updated");
    }

    /// Apply a named preset. Unknown names change nothing and return false.
    pub fn apply_preset(&self, name: &str) -> bool {
        match presets::preset(name) {
            Some(patch) => {
                self.update_theme(&patch);
                tracing::info!(preset = %name, "Theme preset applied");
                true
            }
            None => {
                tracing::debug!(preset = %name, "Unknown theme preset ignored");
                false
            }
        }
    }

    /// Overwrite the whole record with the defaults
    pub fn reset_theme(&self) {
        let mut settings = self.settings.write();
        *settings = ThemeSettings::defaults();
        self.commit(&settings);
        tracing::info!("Theme reset to defaults");
    }

    /// Side effects shared by every mutation; called with the write lock held
    /// so that storage always receives records in mutation order.
    fn commit(&self, settings: &ThemeSettings) {
        apply_styles(settings, self.sink.as_ref());
        if let Err(e) = write_json(self.storage.as_ref(), keys::THEME_SETTINGS, settings) {
            tracing::warn!(error = %e, "Failed to persist theme settings");
        }
        self.revision_tx.send_modify(|rev| *rev += 1);
    }

    /// Monotonic change counter, 0 right after load
    pub fn revision(&self) -> u64 {
        *self.revision_tx.borrow()
    }

    /// Change notifications carrying the revision
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision_tx.subscribe()
    }

    /// Enqueue a transient notification
    pub fn show_toast(&self, message: impl Into<String>, severity: ToastSeverity) -> u64 {
        self.toasts.show_toast(message, severity)
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }
}
