//! Per-screen slug resolution that only ever commits the latest request.
//!
//! Each call to [`SlugLookup::request`] takes a new generation number before
//! it suspends. When a lookup resolves, its result is committed to the
//! screen's display state only if no newer request has been made since;
//! otherwise it is dropped and reported as [`LookupOutcome::Superseded`].

use crate::catalog::DEFAULT_RELATED_LIMIT;
use crate::store::{CatalogStore, DetailView};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// What a detail screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    Loading { slug: String },
    Found(DetailView),
    NotFound { slug: String },
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(DetailView),
    NotFound,
    /// A newer request was made before this one resolved.
    Superseded,
}

#[derive(Debug)]
pub struct SlugLookup {
    store: Arc<CatalogStore>,
    related_limit: usize,
    // Generation and display state change together under the watch lock.
    state: watch::Sender<(u64, DetailState)>,
}

impl SlugLookup {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self::with_related_limit(store, DEFAULT_RELATED_LIMIT)
    }

    pub fn with_related_limit(store: Arc<CatalogStore>, related_limit: usize) -> Self {
        let (state, _) = watch::channel((0, DetailState::Idle));
        Self {
            store,
            related_limit,
            state,
        }
    }

    pub fn current(&self) -> DetailState {
        self.state.borrow().1.clone()
    }

    /// Generation of the most recent request; 0 before the first one.
    pub fn generation(&self) -> u64 {
        self.state.borrow().0
    }

    /// Display-state changes for this screen.
    pub fn subscribe(&self) -> watch::Receiver<(u64, DetailState)> {
        self.state.subscribe()
    }

    /// Start resolving `slug`.
    ///
    /// The request is registered synchronously, so any request made earlier
    /// is already stale by the time this returns, even if its future has not
    /// been polled yet.
    pub fn request(&self, slug: &str) -> impl Future<Output = LookupOutcome> + '_ {
        let slug = slug.to_string();
        let mut generation = 0;
        self.state.send_modify(|(latest, shown)| {
            *latest += 1;
            generation = *latest;
            *shown = DetailState::Loading { slug: slug.clone() };
        });

        async move {
            let view = self.store.detail(&slug, self.related_limit).await;
            match self.commit(generation, &slug, view) {
                Some(outcome) => outcome,
                None => {
                    debug!(slug = %slug, generation, "discarding superseded lookup");
                    LookupOutcome::Superseded
                }
            }
        }
    }

    fn commit(
        &self,
        generation: u64,
        slug: &str,
        view: Option<DetailView>,
    ) -> Option<LookupOutcome> {
        let mut outcome = None;
        self.state.send_if_modified(|(latest, shown)| {
            if *latest != generation {
                return false;
            }
            let (next, result) = match view {
                Some(view) => (DetailState::Found(view.clone()), LookupOutcome::Found(view)),
                None => (
                    DetailState::NotFound {
                        slug: slug.to_string(),
                    },
                    LookupOutcome::NotFound,
                ),
            };
            *shown = next;
            outcome = Some(result);
            true
        });
        outcome
    }
}
