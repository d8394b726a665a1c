use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::topic::TopicTrie;
use crate::value::{StateValue, SubscriptionId};

/// Change callback: receives the concrete path and the new value.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-keyed state with pattern subscriptions.
///
/// Values live in a `BTreeMap` so `scan` can walk a prefix in order.
/// Subscribers run synchronously after the write lock has been released,
/// so a subscriber may read (or write) the store itself.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    watchers: TopicTrie<Watcher>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Watcher {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            watchers: TopicTrie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn read_map(&self) -> RwLockReadGuard<'_, BTreeMap<String, StateValue>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, BTreeMap<String, StateValue>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, path: &str, value: &StateValue) {
        for watcher in self.watchers.lookup(path) {
            (watcher.handler)(path, value);
        }
    }

    /// Store `value` at `path`, then notify.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.write_map().insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.read_map().get(path).cloned()
    }

    /// Typed read. `None` when the path is unset or holds another type.
    pub fn read<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.read_map().get(path).and_then(StateValue::cloned::<T>)
    }

    /// Atomic read-modify-write of the `T` stored at `path`.
    ///
    /// The closure runs under the write lock on a copy of the current value;
    /// the copy replaces the old value and subscribers are told afterwards.
    /// Returns `None` (and changes nothing) when `path` holds no `T`.
    pub fn update<T, R, F>(&self, path: &str, f: F) -> Option<R>
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce(&mut T) -> R,
    {
        let (result, value) = {
            let mut map = self.write_map();
            let mut current = map.get(path)?.cloned::<T>()?;
            let result = f(&mut current);
            let value = StateValue::new(current);
            map.insert(path.to_string(), value.clone());
            (result, value)
        };
        self.notify(path, &value);
        Some(result)
    }

    /// Removes without notifying.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.write_map().remove(path)
    }

    /// Entries strictly below `prefix` (`prefix/...`), in path order.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let below = format!("{prefix}/");
        self.read_map()
            .range(below.clone()..)
            .take_while(|(k, _)| k.starts_with(&below))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.read_map().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> Vec<String> {
        self.read_map().keys().cloned().collect()
    }

    pub fn snapshot(&self) -> Vec<(String, StateValue)> {
        self.read_map()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.watchers.insert(
            pattern,
            Watcher {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// `pattern` must be the one passed to `subscribe`.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.watchers.remove_where(pattern, |w| w.id == id)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
