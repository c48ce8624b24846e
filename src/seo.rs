//! Page metadata for the catalog and detail screens.
//!
//! These are plain values; turning them into `<meta>` tags is up to the
//! rendering layer.

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::model::CaseStudyEntry;
use serde::Serialize;
use serde_json::{json, Value};

/// Longest description excerpt carried into a detail page description.
pub const DESCRIPTION_EXCERPT_CHARS: usize = 155;

const DEFAULT_DETAIL_BLURB: &str = "View our work and results for this project.";
const CATALOG_TITLE: &str = "Case Studies";
const CATALOG_DESCRIPTION: &str =
    "Explore our client success stories and case studies showcasing real brands with real results.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_image: String,
    pub keywords: Vec<String>,
    pub structured_data: Value,
}

/// Public path of a detail page.
pub fn case_study_path(slug: &str) -> String {
    format!("/caseStudy/{slug}")
}

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn detail_meta(site: &SiteConfig, entry: &CaseStudyEntry) -> PageMeta {
    let study = &entry.study;
    let blurb = match study.description.trim() {
        "" => DEFAULT_DETAIL_BLURB,
        text => excerpt(text, DESCRIPTION_EXCERPT_CHARS),
    };
    let description = format!("Case study for {}. {}", study.name, blurb);
    let canonical_url = site.url(&case_study_path(&entry.slug));
    let og_image = study.logo_or(&site.default_og_image).to_string();

    let mut keywords = site.keywords.clone();
    if study.has_industry() {
        keywords.push(format!("{} branding", study.industry.trim()));
    }

    let structured_data = json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": study.name,
        "description": description,
        "url": canonical_url,
        "about": {
            "@type": "Organization",
            "name": study.name,
            "image": og_image,
        },
        "isPartOf": {
            "@type": "WebSite",
            "name": site.name,
            "url": site.url(""),
        },
    });

    PageMeta {
        title: format!("{} - Case Study | {}", study.name, site.name),
        description,
        canonical_url,
        og_image,
        keywords,
        structured_data,
    }
}

pub fn not_found_meta(site: &SiteConfig) -> PageMeta {
    let canonical_url = site.url("/caseStudy");
    PageMeta {
        title: format!("Case Study Not Found | {}", site.name),
        description: "The case study you are looking for does not exist.".to_string(),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": "Case Study Not Found",
            "url": canonical_url,
        }),
        canonical_url,
        og_image: site.default_og_image.clone(),
        keywords: Vec::new(),
    }
}

/// Catalog page metadata with an `ItemList` of every record in order.
pub fn catalog_meta(site: &SiteConfig, catalog: &Catalog) -> PageMeta {
    let items: Vec<Value> = catalog
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            json!({
                "@type": "ListItem",
                "position": idx + 1,
                "item": {
                    "@type": "Organization",
                    "name": entry.study.name,
                    "description": entry.study.description,
                    "image": entry.study.logo_or(&site.placeholder_image),
                    "url": case_study_path(&entry.slug),
                },
            })
        })
        .collect();

    PageMeta {
        title: format!("{} | {}", CATALOG_TITLE, site.name),
        description: CATALOG_DESCRIPTION.to_string(),
        canonical_url: site.url("/caseStudy"),
        og_image: site.default_og_image.clone(),
        keywords: site.keywords.clone(),
        structured_data: json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": format!("{} - {}", CATALOG_TITLE, site.name),
            "description": CATALOG_DESCRIPTION,
            "mainEntity": {
                "@type": "ItemList",
                "itemListElement": items,
            },
        }),
    }
}
