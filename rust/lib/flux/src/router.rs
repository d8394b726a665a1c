use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::store::StateStore;
use crate::topic::TopicTrie;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload as seen by handlers.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Routes request paths to async handlers.
///
/// Several handlers may match one path; they run one after another in
/// registration order within a single `dispatch`.
pub struct Router {
    handlers: TopicTrie<ErasedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: TopicTrie::new(),
        }
    }

    /// Register `handler` for requests matching `pattern`.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let erased: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.handlers.insert(pattern, erased);
    }

    /// Run every handler matching `path`. Returns how many ran.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) -> usize {
        let matched = self.handlers.lookup(path);
        if matched.is_empty() {
            tracing::debug!(path, "no handler for request");
            return 0;
        }
        for handler in &matched {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
        matched.len()
    }

    /// Whether `pattern` itself was registered.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.has_pattern(pattern)
    }

    /// Whether some registered pattern covers `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.lookup(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
