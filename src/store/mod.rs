//! In-memory expense store
//!
//! `ExpenseStore` owns the authoritative list of expenses in insertion order.
//! Records only enter through validation, are never edited in place, and
//! leave only through `remove` or `clear`. Nothing is persisted.
//!
//! Views learn about changes either by subscribing a listener or by polling
//! the version counter, which moves exactly once per successful mutation.

pub mod events;
pub mod shared;

pub use events::{EventLog, Listener, StoreChange, StoreEvent, SubscriptionId};
pub use shared::SharedExpenseStore;

use std::fmt;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, ExpenseRecord, NewExpense};

/// Ordered, owned list of expenses
#[derive(Default)]
pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ExpenseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate form input and append it
    ///
    /// On a validation failure the list, version and listeners are untouched.
    pub fn add(&mut self, input: NewExpense) -> ExpenseResult<ExpenseRecord> {
        match ExpenseRecord::try_from(input) {
            Ok(record) => Ok(self.push(record)),
            Err(err) => {
                warn!(error = %err, "rejected expense");
                Err(ExpenseError::Validation(err))
            }
        }
    }

    /// Validate form input and append it, stamped with the clock's current instant
    pub fn add_now(
        &mut self,
        amount: i64,
        category: &str,
        note: &str,
        clock: &impl Clock,
    ) -> ExpenseResult<ExpenseRecord> {
        self.add(NewExpense::at(amount, category, note, clock.now()))
    }

    /// Append an already-validated record
    pub fn push(&mut self, record: ExpenseRecord) -> ExpenseRecord {
        self.records.push(record.clone());
        debug!(
            amount = record.amount().units(),
            category = %record.category(),
            len = self.records.len(),
            "expense added"
        );
        self.notify(StoreChange::Added {
            record: record.clone(),
        });
        record
    }

    /// Remove the first record structurally equal to `record`
    ///
    /// Returns `false` (and changes nothing) when no such record exists.
    pub fn remove(&mut self, record: &ExpenseRecord) -> bool {
        match self.records.iter().position(|r| r == record) {
            Some(index) => {
                self.take(index);
                true
            }
            None => false,
        }
    }

    /// Remove the record at a list position
    pub fn remove_at(&mut self, index: usize) -> ExpenseResult<ExpenseRecord> {
        if index >= self.records.len() {
            return Err(ExpenseError::expense_not_found(format!("#{}", index + 1)));
        }
        Ok(self.take(index))
    }

    /// Remove every record, returning how many were removed
    ///
    /// Clearing an empty store is a no-op and emits no event.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        if removed == 0 {
            return 0;
        }
        self.records.clear();
        debug!(removed, "expenses cleared");
        self.notify(StoreChange::Cleared { removed });
        removed
    }

    /// Read-only view of the records in insertion order
    pub fn list(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Owned copy of the records, for handing to readers
    pub fn snapshot(&self) -> Vec<ExpenseRecord> {
        self.records.clone()
    }

    /// Sum of all amounts, zero when empty
    pub fn total(&self) -> Amount {
        self.records.iter().map(|r| r.amount()).sum()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mutation counter; starts at 0 and moves once per successful change
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a listener called after every successful mutation
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Drop a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn take(&mut self, index: usize) -> ExpenseRecord {
        let record = self.records.remove(index);
        debug!(
            amount = record.amount().units(),
            category = %record.category(),
            len = self.records.len(),
            "expense removed"
        );
        self.notify(StoreChange::Removed {
            record: record.clone(),
        });
        record
    }

    fn notify(&mut self, change: StoreChange) {
        self.version += 1;
        let event = StoreEvent {
            version: self.version,
            change,
        };
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }
}

impl fmt::Debug for ExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseStore")
            .field("records", &self.records)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
