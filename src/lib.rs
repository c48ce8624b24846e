//! Case-study catalog for the agency site.
//!
//! Holds the ordered list of client records, derives unique URL slugs from
//! display names, resolves slugs back to records and picks related case
//! studies. Screens share one [`CatalogStore`]; each detail screen resolves
//! slugs through its own [`SlugLookup`].

pub mod catalog;
pub mod config;
pub mod loading;
pub mod lookup;
pub mod model;
pub mod presentation;
pub mod seo;
pub mod slug;
pub mod source;
pub mod store;

pub use catalog::{Catalog, CatalogLoadError, DEFAULT_RELATED_LIMIT};
pub use loading::LoadingWatch;
pub use lookup::{DetailState, LookupOutcome, SlugLookup};
pub use model::{CaseStudy, CaseStudyEntry, CaseStudyId};
pub use slug::slug_from_name;
pub use source::{CatalogSource, FileSource, HttpSource, SourceError, StaticSource};
pub use store::{CatalogStore, DetailView};
