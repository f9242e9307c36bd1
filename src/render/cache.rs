// src/render/cache.rs

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Latest row for one host.
///
/// One writer (the host's update task) and one reader (the render loop).
/// A write replaces the whole slot under the lock, so a reader sees either
/// the previous row or the new one, never a mix.
#[derive(Debug, Default)]
pub struct RowCache {
    slot: Mutex<String>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached row.
    pub fn write(&self, row: impl Into<String>) {
        *self.lock() = row.into();
    }

    /// Current row, or an empty string before the first write.
    pub fn read(&self) -> String {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        // A panicked writer cannot leave a half-written String behind.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
