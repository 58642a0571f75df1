//! When to save
//!
//! Pure timing logic driven by the caller's clock (ms). The front end polls it
//! from a timer and writes a snapshot whenever it answers with a reason.

use crate::consts::{BACKUP_INTERVAL_MS, SAVE_DEBOUNCE_MS};

/// Why a save is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    /// Quiet period after a move or settings change elapsed
    SettlePoint,
    /// Periodic backup
    Backup,
    /// Page is being hidden; best effort, the browser may not let it finish
    PageHidden,
}

#[derive(Debug, Clone)]
pub struct SaveScheduler {
    debounce_ms: f64,
    backup_interval_ms: f64,
    /// Deadline of the pending debounced save
    pending: Option<f64>,
    last_save: f64,
}

impl SaveScheduler {
    pub fn new(now: f64) -> Self {
        Self::with_intervals(SAVE_DEBOUNCE_MS, BACKUP_INTERVAL_MS, now)
    }

    pub fn with_intervals(debounce_ms: f64, backup_interval_ms: f64, now: f64) -> Self {
        Self {
            debounce_ms,
            backup_interval_ms,
            pending: None,
            last_save: now,
        }
    }

    /// Note a settle point; replaces any pending save so only the latest runs
    pub fn request(&mut self, now: f64) {
        self.pending = Some(now + self.debounce_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Check whether a save is due at `now`
    pub fn poll(&mut self, now: f64) -> Option<SaveReason> {
        if let Some(deadline) = self.pending {
            if now >= deadline {
                self.pending = None;
                self.last_save = now;
                return Some(SaveReason::SettlePoint);
            }
        }
        if now - self.last_save >= self.backup_interval_ms {
            self.last_save = now;
            return Some(SaveReason::Backup);
        }
        None
    }

    /// Save immediately, cancelling anything pending
    pub fn flush(&mut self, now: f64) -> SaveReason {
        self.pending = None;
        self.last_save = now;
        SaveReason::PageHidden
    }
}
