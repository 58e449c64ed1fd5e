//! Thread-safe wrapper around `ExpenseStore`
//!
//! All mutations go through one write lock. Readers never hold a reference
//! into the live list: they get an owned snapshot and aggregate over that.
//!
//! Listeners registered on the handle run after the write lock is released,
//! so they may read from or mutate the store themselves. Events from one
//! mutation are delivered in order; across threads, use `StoreEvent::version`
//! to order them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{ExpenseStore, Listener, StoreEvent, SubscriptionId};
use crate::clock::Clock;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, ExpenseRecord, NewExpense};

type SharedListener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Cloneable handle to a lock-guarded store
#[derive(Clone)]
pub struct SharedExpenseStore {
    inner: Arc<RwLock<ExpenseStore>>,
    pending: Arc<Mutex<Vec<StoreEvent>>>,
    listeners: Arc<Mutex<Vec<(SubscriptionId, SharedListener)>>>,
    next_subscription: Arc<AtomicU64>,
}

impl SharedExpenseStore {
    /// Wrap a fresh, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing store
    ///
    /// Listeners already on `store` keep running inside the lock.
    pub fn from_store(mut store: ExpenseStore) -> Self {
        let pending = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::clone(&pending);
        store.subscribe(Box::new(move |event: &StoreEvent| {
            if let Ok(mut queue) = queue.lock() {
                queue.push(event.clone());
            }
        }));

        Self {
            inner: Arc::new(RwLock::new(store)),
            pending,
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_subscription: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Validate and append
    pub fn add(&self, input: NewExpense) -> ExpenseResult<ExpenseRecord> {
        self.mutate(|store| store.add(input))?
    }

    /// Validate and append, stamped with the clock's current instant
    pub fn add_now(
        &self,
        amount: i64,
        category: &str,
        note: &str,
        clock: &impl Clock,
    ) -> ExpenseResult<ExpenseRecord> {
        self.mutate(|store| store.add_now(amount, category, note, clock))?
    }

    /// Remove the first structurally equal record
    pub fn remove(&self, record: &ExpenseRecord) -> ExpenseResult<bool> {
        self.mutate(|store| store.remove(record))
    }

    /// Remove every record
    pub fn clear(&self) -> ExpenseResult<usize> {
        self.mutate(|store| store.clear())
    }

    /// Owned copy of the current list
    pub fn snapshot(&self) -> ExpenseResult<Vec<ExpenseRecord>> {
        Ok(self.read()?.snapshot())
    }

    /// Sum of all amounts
    pub fn total(&self) -> ExpenseResult<Amount> {
        Ok(self.read()?.total())
    }

    /// Current version counter
    pub fn version(&self) -> ExpenseResult<u64> {
        Ok(self.read()?.version())
    }

    /// Register a change listener
    pub fn subscribe(&self, listener: Listener) -> ExpenseResult<SubscriptionId> {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners()?.push((id, Arc::from(listener)));
        Ok(id)
    }

    /// Drop a change listener
    pub fn unsubscribe(&self, id: SubscriptionId) -> ExpenseResult<bool> {
        let mut listeners = self.lock_listeners()?;
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        Ok(listeners.len() != before)
    }

    /// Run a mutation under the write lock, then notify with no lock held
    fn mutate<T>(&self, op: impl FnOnce(&mut ExpenseStore) -> T) -> ExpenseResult<T> {
        let (result, events) = {
            let mut store = self.write()?;
            let result = op(&mut store);
            let events = std::mem::take(&mut *self.lock_pending()?);
            (result, events)
        };

        if !events.is_empty() {
            let listeners: Vec<SharedListener> = self
                .lock_listeners()?
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect();
            for event in &events {
                for listener in &listeners {
                    listener(event);
                }
            }
        }

        Ok(result)
    }

    fn read(&self) -> ExpenseResult<RwLockReadGuard<'_, ExpenseStore>> {
        self.inner
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ExpenseResult<RwLockWriteGuard<'_, ExpenseStore>> {
        self.inner
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn lock_pending(&self) -> ExpenseResult<MutexGuard<'_, Vec<StoreEvent>>> {
        self.pending
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to lock event queue: {}", e)))
    }

    fn lock_listeners(&self) -> ExpenseResult<MutexGuard<'_, Vec<(SubscriptionId, SharedListener)>>> {
        self.listeners
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to lock listeners: {}", e)))
    }
}

impl Default for SharedExpenseStore {
    fn default() -> Self {
        Self::from_store(ExpenseStore::new())
    }
}

impl fmt::Debug for SharedExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.lock().map(|l| l.len()).unwrap_or_default();
        f.debug_struct("SharedExpenseStore")
            .field("inner", &self.inner)
            .field("listeners", &listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::EventLog;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn clock() -> FixedClock {
        FixedClock::on(
            NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_concurrent_adds() {
        let store = SharedExpenseStore::new();
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let store = store.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        store
                            .add_now(1, "Other", &format!("w{} #{}", worker, i), &clock())
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.snapshot().unwrap().len(), 100);
        assert_eq!(store.total().unwrap(), Amount::new(100));
        assert_eq!(store.version().unwrap(), 100);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = SharedExpenseStore::new();
        store.add_now(10, "Food", "bread", &clock()).unwrap();

        let snapshot = store.snapshot().unwrap();
        store.clear().unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_rejection_and_events() {
        let store = SharedExpenseStore::new();
        let log = EventLog::new();
        store.subscribe(log.listener()).unwrap();

        assert!(store.add_now(0, "Food", "free", &clock()).is_err());
        let record = store.add_now(3, "Food", "apple", &clock()).unwrap();
        assert!(store.remove(&record).unwrap());
        assert!(!store.remove(&record).unwrap());

        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_listener_can_read_back_into_store() {
        let store = SharedExpenseStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let handle = store.clone();
        let sink = Arc::clone(&seen);
        store
            .subscribe(Box::new(move |event: &StoreEvent| {
                let total = handle.total().unwrap();
                let len = handle.snapshot().unwrap().len();
                sink.lock().unwrap().push((event.version, total, len));
            }))
            .unwrap();

        let (done, finished) = mpsc::channel();
        let worker = store.clone();
        thread::spawn(move || {
            let record = worker.add_now(7, "Food", "tea", &clock()).unwrap();
            worker.add_now(5, "Food", "scone", &clock()).unwrap();
            worker.remove(&record).unwrap();
            done.send(()).unwrap();
        });
        finished
            .recv_timeout(Duration::from_secs(5))
            .expect("listener re-entered the store and deadlocked");

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (1, Amount::new(7), 1),
                (2, Amount::new(12), 2),
                (3, Amount::new(5), 1),
            ]
        );
    }

    #[test]
    fn test_listener_can_mutate_and_unsubscribe() {
        let store = SharedExpenseStore::new();
        let handle = store.clone();
        store
            .subscribe(Box::new(move |event: &StoreEvent| {
                if event.version == 1 {
                    handle.add_now(1, "Other", "tip", &clock()).unwrap();
                }
            }))
            .unwrap();

        store.add_now(20, "Food", "lunch", &clock()).unwrap();
        assert_eq!(store.version().unwrap(), 2);
        assert_eq!(store.total().unwrap(), Amount::new(21));

        let log = EventLog::new();
        let id = store.subscribe(log.listener()).unwrap();
        assert!(store.unsubscribe(id).unwrap());
        assert!(!store.unsubscribe(id).unwrap());
        store.clear().unwrap();
        assert!(log.is_empty());
    }
}
