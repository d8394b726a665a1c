//! Search-as-you-type.
//!
//! Every input bumps `search_generation`; a debounced query only fires if no
//! newer input arrived while it slept. Responses are tagged with the query
//! they answer and dropped when the input has moved on.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use picfeed_flux::StateStore;

use super::{navigate, PicfeedBff};
use crate::request::*;
use crate::state::*;

impl PicfeedBff {
    pub(super) async fn handle_search_input(self: &Arc<Self>, req: &SearchInputReq, store: &Arc<StateStore>) {
        let query = req.text.trim().to_string();
        let generation = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let short = query.chars().count() < self.search_min_chars;

        let text = req.text.clone();
        let updated = store.update(SearchState::PATH, |s: &mut SearchState| {
            s.query = text;
            if short {
                s.results.clear();
                s.loading = false;
                s.open = false;
                s.error = None;
            }
        });
        if updated.is_none() {
            store.set(
                SearchState::PATH,
                SearchState {
                    query: req.text.clone(),
                    ..SearchState::default()
                },
            );
        }
        if short {
            return;
        }

        let bff = Arc::clone(self);
        let store = Arc::clone(store);
        tokio::spawn(async move { bff.run_search(generation, query, &store).await });
    }

    async fn run_search(&self, generation: u64, query: String, store: &StateStore) {
        tokio::time::sleep(self.search_debounce).await;
        if self.search_generation.load(Ordering::SeqCst) != generation {
            tracing::trace!(%query, "search superseded");
            return;
        }

        store.update(SearchState::PATH, |s: &mut SearchState| s.loading = true);
        tracing::debug!(%query, "search");
        let result = self.api.search(&query).await;

        let current = store
            .read::<SearchState>(SearchState::PATH)
            .map(|s| s.query.trim().to_string())
            .unwrap_or_default();
        if current != query {
            tracing::debug!(%query, %current, "discarding stale search response");
            return;
        }

        store.update(SearchState::PATH, |s: &mut SearchState| {
            s.loading = false;
            match result {
                Ok(users) => {
                    s.open = !users.is_empty();
                    s.results = users;
                    s.error = None;
                }
                Err(e) => {
                    tracing::warn!(error = %e, %query, "search failed");
                    s.results.clear();
                    s.open = false;
                    s.error = Some(e.user_message("Search failed"));
                }
            }
        });
    }

    pub(super) async fn handle_search_clear(&self, _req: &SearchClearReq, store: &StateStore) {
        self.clear_search(store);
    }

    pub(super) async fn handle_search_select(&self, req: &SearchSelectReq, store: &StateStore) {
        self.clear_search(store);
        navigate(store, &format!("/user/{}", req.username));
    }

    fn clear_search(&self, store: &StateStore) {
        self.search_generation.fetch_add(1, Ordering::SeqCst);
        store.set(SearchState::PATH, SearchState::default());
    }
}
