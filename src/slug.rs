//! Slug derivation and collision handling for case-study URLs.
//!
//! Slugs are lowercase ASCII letters, digits and single hyphens, never
//! starting or ending with a hyphen. A name with nothing slug-legal in it
//! becomes [`EMPTY_SLUG`].

use crate::model::CaseStudyId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Slug used for names that are empty or carry no slug-legal characters.
pub const EMPTY_SLUG: &str = "item";

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]+").expect("valid slug pattern"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid hyphen pattern"));

/// Derive the base slug for a display name.
///
/// Pure function of `name`; catalog-level collision suffixes are applied by
/// [`SlugAllocator`].
pub fn slug_from_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = NON_SLUG_RUN.replace_all(&lowered, "-");
    let collapsed = HYPHEN_RUN.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Case-fold a slug taken from a URL so it can be compared with index keys.
pub fn normalize_slug(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Returns true when `value` is already in canonical slug form.
#[cfg(test)]
fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Assigns unique slugs to records in the order they are offered.
///
/// A base slug already owned by another record gets the lowest free numeric
/// suffix starting at `-2`.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    taken: HashMap<String, CaseStudyId>,
}

impl SlugAllocator {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            taken: HashMap::with_capacity(capacity),
        }
    }

    /// Assign the slug for `name` to record `id`.
    pub fn assign(&mut self, id: CaseStudyId, name: &str) -> String {
        let base = slug_from_name(name);
        match self.taken.get(&base) {
            None => {
                self.taken.insert(base.clone(), id);
                return base;
            }
            Some(owner) if *owner == id => return base,
            Some(_) => {}
        }

        let mut suffix = 2u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.taken.contains_key(&candidate) {
                debug!(id, base = %base, slug = %candidate, "slug collision resolved with suffix");
                self.taken.insert(candidate.clone(), id);
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Consume the allocator, yielding the slug → id index it built.
    pub fn into_index(self) -> HashMap<String, CaseStudyId> {
        self.taken
    }
}
