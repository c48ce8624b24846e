//! Immutable catalog snapshot: ordered records plus the derived slug index.
//!
//! A [`Catalog`] is built in one pass over the authored records and never
//! mutated afterwards; a refresh builds a new one. Records, slugs and both
//! indexes therefore always agree.

use crate::model::{CaseStudy, CaseStudyEntry, CaseStudyId};
use crate::slug::{normalize_slug, slug_from_name, SlugAllocator};
use crate::source::SourceError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;

/// Number of related case studies shown next to a detail page.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("record source failed: {0}")]
    Source(#[from] SourceError),
    #[error("duplicate case study id {id} (\"{first}\" and \"{second}\")")]
    DuplicateId {
        id: CaseStudyId,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    revision: u64,
    loaded_at: Option<DateTime<Utc>>,
    entries: Vec<CaseStudyEntry>,
    slug_index: HashMap<String, CaseStudyId>,
    positions: HashMap<CaseStudyId, usize>,
}

impl Catalog {
    /// The catalog a store starts with before its first load.
    pub fn empty() -> Self {
        Self {
            revision: 0,
            loaded_at: None,
            entries: Vec::new(),
            slug_index: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Build a catalog from records in display order.
    ///
    /// Fails on duplicate ids; slug collisions are resolved, never rejected.
    pub fn build(records: Vec<CaseStudy>, revision: u64) -> Result<Self, CatalogLoadError> {
        let mut positions: HashMap<CaseStudyId, usize> = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if let Some(&first) = positions.get(&record.id) {
                return Err(CatalogLoadError::DuplicateId {
                    id: record.id,
                    first: records[first].name.clone(),
                    second: record.name.clone(),
                });
            }
            positions.insert(record.id, pos);
        }

        let mut slugs = SlugAllocator::with_capacity(records.len());
        let entries: Vec<CaseStudyEntry> = records
            .into_iter()
            .map(|study| CaseStudyEntry {
                slug: slugs.assign(study.id, &study.name),
                study,
            })
            .collect();

        Ok(Self {
            revision,
            loaded_at: Some(Utc::now()),
            entries,
            slug_index: slugs.into_index(),
            positions,
        })
    }

    /// 0 for the initial empty catalog, then one per successful load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CaseStudyEntry] {
        &self.entries
    }

    pub fn by_id(&self, id: CaseStudyId) -> Option<&CaseStudyEntry> {
        self.positions.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Resolve a URL slug. A miss is `None`, not an error.
    pub fn by_slug(&self, slug: &str) -> Option<&CaseStudyEntry> {
        let key = normalize_slug(slug);
        self.slug_index.get(&key).and_then(|&id| self.by_id(id))
    }

    /// Slug assigned to the first record with exactly this display name,
    /// or the base slug of `name` when no record carries it.
    pub fn slug_for_name(&self, name: &str) -> String {
        self.entries
            .iter()
            .find(|e| e.study.name == name)
            .map(|e| e.slug.clone())
            .unwrap_or_else(|| slug_from_name(name))
    }

    /// Related case studies for record `id`.
    ///
    /// Records sharing `industry` come first in catalog order; the rest of
    /// the catalog backfills in order up to `limit`. Record `id` itself
    /// never appears.
    pub fn related(&self, id: CaseStudyId, industry: &str, limit: usize) -> Vec<&CaseStudyEntry> {
        if limit == 0 {
            return Vec::new();
        }
        let wanted = industry.trim();
        let mut picked: Vec<usize> = Vec::with_capacity(limit);

        if !wanted.is_empty() {
            for (pos, entry) in self.entries.iter().enumerate() {
                if picked.len() == limit {
                    break;
                }
                if entry.id() != id && entry.study.industry.trim().eq_ignore_ascii_case(wanted) {
                    picked.push(pos);
                }
            }
        }

        for (pos, entry) in self.entries.iter().enumerate() {
            if picked.len() == limit {
                break;
            }
            if entry.id() == id || picked.contains(&pos) {
                continue;
            }
            picked.push(pos);
        }

        picked.into_iter().map(|pos| &self.entries[pos]).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
