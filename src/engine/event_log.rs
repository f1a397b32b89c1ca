// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Kind of outcome recorded for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Success,
    Error,
    UnsupportedTransition,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Success => "SUCCESS",
            EventType::Error => "ERROR",
            EventType::UnsupportedTransition => "UNSUPPORTED_TRANSITION",
        }
    }
}

/// One recorded node outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLogEntry {
    pub task: String,
    pub node: String,
    pub event_type: EventType,
    pub order: u64,
    #[serde(default)]
    pub node_log: Option<Value>,
}

/// Append-only log of node outcomes shared by every branch of one task run.
///
/// Cloning the log hands out another handle to the same entries. `order` values come
/// from a single atomic counter, so an entry recorded after another entry finished
/// recording always carries a higher order, whatever task recorded it.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    inner: Arc<EventLogInner>,
}

#[derive(Debug, Default)]
struct EventLogInner {
    next_order: AtomicU64,
    entries: Mutex<Vec<EventLogEntry>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome for `node` and return the order assigned to it.
    pub fn record(
        &self,
        task: &str,
        node: &str,
        event_type: EventType,
        node_log: Option<Value>,
    ) -> u64 {
        let order = self.inner.next_order.fetch_add(1, Ordering::SeqCst);
        self.lock().push(EventLogEntry {
            task: task.to_string(),
            node: node.to_string(),
            event_type,
            order,
            node_log,
        });
        order
    }

    /// Snapshot of all entries, sorted by order.
    pub fn entries(&self) -> Vec<EventLogEntry> {
        let mut entries = self.lock().clone();
        entries.sort_by_key(|entry| entry.order);
        entries
    }

    pub fn entries_for(&self, node: &str) -> Vec<EventLogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.node == node)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.entries()).unwrap_or(Value::Array(Vec::new()))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<EventLogEntry>> {
        // Entries are only ever pushed, so a panic while the lock was held cannot
        // leave a half-written entry behind.
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Serialize for EventLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(serializer)
    }
}
