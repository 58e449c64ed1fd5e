//! Change events emitted by the expense store
//!
//! Every successful mutation produces exactly one `StoreEvent` tagged with the
//! store version it brought the list to. A view can either subscribe to these
//! or poll `ExpenseStore::version` and re-read when it moves.

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::models::ExpenseRecord;

/// What changed in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum StoreChange {
    /// A record was appended
    Added { record: ExpenseRecord },
    /// A record was removed
    Removed { record: ExpenseRecord },
    /// The list was emptied
    Cleared { removed: usize },
}

impl fmt::Display for StoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { record } => write!(f, "ADD    {}", record),
            Self::Removed { record } => write!(f, "REMOVE {}", record),
            Self::Cleared { removed } => write!(f, "CLEAR  {} expense(s)", removed),
        }
    }
}

/// A single change notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreEvent {
    /// Store version after the change
    pub version: u64,

    /// The change itself
    #[serde(flatten)]
    pub change: StoreChange,
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:<4} {}", self.version, self.change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Callback invoked after each mutation
pub type Listener = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// In-memory journal of store events
///
/// Cheap to clone; clones share the same journal. Register it with
/// `EventLog::listener` and read it back with `entries`.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<StoreEvent>>>,
}

impl EventLog {
    /// Create an empty journal
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener appending to this journal
    pub fn listener(&self) -> Listener {
        let entries = Arc::clone(&self.entries);
        Box::new(move |event| {
            if let Ok(mut entries) = entries.lock() {
                entries.push(event.clone());
            }
        })
    }

    /// All recorded events, oldest first
    pub fn entries(&self) -> Vec<StoreEvent> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// The most recent `count` events, oldest first
    pub fn recent(&self, count: usize) -> Vec<StoreEvent> {
        let entries = self.entries();
        let skip = entries.len().saturating_sub(count);
        entries.into_iter().skip(skip).collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn record() -> ExpenseRecord {
        ExpenseRecord::new(
            12,
            "Food",
            "tacos",
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_event_log_records() {
        let log = EventLog::new();
        let listener = log.listener();

        listener(&StoreEvent {
            version: 1,
            change: StoreChange::Added { record: record() },
        });
        listener(&StoreEvent {
            version: 2,
            change: StoreChange::Cleared { removed: 1 },
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.recent(1)[0].version, 2);
        assert_eq!(log.recent(10).len(), 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = StoreEvent {
            version: 3,
            change: StoreChange::Removed { record: record() },
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["operation"], "removed");
        assert_eq!(json["version"], 3);
        assert_eq!(json["record"]["note"], "tacos");
    }

    #[test]
    fn test_event_display() {
        let event = StoreEvent {
            version: 7,
            change: StoreChange::Cleared { removed: 4 },
        };
        assert_eq!(event.to_string(), "v7    CLEAR  4 expense(s)");
    }
}
