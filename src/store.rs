//! The process-wide catalog store shared by every screen.
//!
//! Loads run one at a time behind an async writer lock. Readers clone the
//! current `Arc<Catalog>` and never block on a load beyond waiting for the
//! `loading` flag to clear.

use crate::catalog::{Catalog, CatalogLoadError};
use crate::loading::{LoadingFlag, LoadingWatch};
use crate::model::{CaseStudyEntry, CaseStudyId};
use crate::source::CatalogSource;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// A resolved detail page: the record plus its related set, both taken
/// from the same snapshot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DetailView {
    pub entry: CaseStudyEntry,
    pub related: Vec<CaseStudyEntry>,
}

#[derive(Debug)]
pub struct CatalogStore {
    snapshot: RwLock<Arc<Catalog>>,
    loading: LoadingFlag,
    writer: Mutex<()>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Catalog::empty())),
            loading: LoadingFlag::new(),
            writer: Mutex::new(()),
        }
    }

    /// The catalog as of now. Later loads do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn subscribe_loading(&self) -> LoadingWatch {
        self.loading.subscribe()
    }

    /// (Re)populate the catalog from `source`.
    ///
    /// A call made while another load is running waits for it, then runs.
    /// On failure the previous snapshot stays in place.
    #[instrument(skip_all)]
    pub async fn load(&self, source: &dyn CatalogSource) -> Result<Arc<Catalog>, CatalogLoadError> {
        let _writer = self.writer.lock().await;
        let _loading = self.loading.raise();
        let origin = source.describe();
        info!(source = %origin, "loading case study catalog");

        let records = match source.fetch().await {
            Ok(records) => records,
            Err(err) => {
                warn!(source = %origin, error = %err, "catalog load failed; keeping previous snapshot");
                return Err(err.into());
            }
        };

        let revision = self.snapshot().revision() + 1;
        let catalog = match Catalog::build(records, revision) {
            Ok(catalog) => Arc::new(catalog),
            Err(err) => {
                warn!(source = %origin, error = %err, "catalog rebuild rejected; keeping previous snapshot");
                return Err(err);
            }
        };

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = catalog.clone();
        info!(records = catalog.len(), revision, "case study catalog loaded");
        Ok(catalog)
    }

    /// Resolve a slug once any in-flight load has finished.
    pub async fn case_study_by_slug(&self, slug: &str) -> Option<CaseStudyEntry> {
        self.loading.wait_idle().await;
        self.snapshot().by_slug(slug).cloned()
    }

    /// Related case studies once any in-flight load has finished.
    pub async fn related(&self, id: CaseStudyId, industry: &str, limit: usize) -> Vec<CaseStudyEntry> {
        self.loading.wait_idle().await;
        self.snapshot()
            .related(id, industry, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Slug lookup plus related set from a single snapshot.
    pub async fn detail(&self, slug: &str, related_limit: usize) -> Option<DetailView> {
        self.loading.wait_idle().await;
        let catalog = self.snapshot();
        let entry = catalog.by_slug(slug)?;
        let related = catalog
            .related(entry.id(), &entry.study.industry, related_limit)
            .into_iter()
            .cloned()
            .collect();
        Some(DetailView {
            entry: entry.clone(),
            related,
        })
    }

    /// Link slug for a display name in the current snapshot.
    pub fn slug_for_name(&self, name: &str) -> String {
        self.snapshot().slug_for_name(name)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
