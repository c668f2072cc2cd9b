// src/core/history.rs — Append-only workflow history log

use std::sync::Mutex;

use crate::core::types::WorkflowHistoryEntry;

/// Append-only store for run summaries.
///
/// Shared by every run against one coordinator, so implementations must
/// serialize appends; entries are ordered by completion time and are never
/// edited or removed.
pub trait HistoryStore: Send + Sync {
    fn append(&self, entry: WorkflowHistoryEntry);
    fn entries(&self) -> Vec<WorkflowHistoryEntry>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutex-guarded in-memory history. The default store, and the substitute
/// tests inject.
#[derive(Default)]
pub struct InMemoryHistory {
    entries: Mutex<Vec<WorkflowHistoryEntry>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another writer panicked mid-append of its
    // own entry; the vec itself is still usable, so recover rather than
    // drop this run's entry.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<WorkflowHistoryEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(&self, entry: WorkflowHistoryEntry) {
        self.lock().push(entry);
    }

    fn entries(&self) -> Vec<WorkflowHistoryEntry> {
        self.lock().clone()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}
