use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// The engine a shell talks to: one store plus one request router.
///
/// ```ignore
/// let app = Flux::new();
/// bff.register(&app);
/// app.emit("session/boot", SessionBootReq).await;
/// let session = app.read::<SessionState>("session/state");
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.store.get(path)
    }

    pub fn read<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.read(path)
    }

    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        self.store.scan(prefix)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.store.contains(path)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Dispatch a request and wait for every matching handler to finish.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) -> usize {
        self.emit_arc(path, Arc::new(payload)).await
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) -> usize {
        tracing::trace!(path, "emit");
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    pub fn has_handler(&self, path: &str) -> bool {
        self.router.matches(path)
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.store.unsubscribe(pattern, id)
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
