//! Render-time fallbacks for optional record fields.
//!
//! The catalog stores records exactly as authored; screens call these when
//! they need something to show for a missing image or a video link.

use crate::model::{CaseStudy, CaseStudyId};

pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";
pub const PLACEHOLDER_LOGO: &str = "/api/placeholder/200/100";

/// Hero background classes for detail pages, cycled by record id.
pub const HERO_COLORS: [&str; 9] = [
    "bg-red-600",
    "bg-[#11262c]",
    "bg-black",
    "bg-[#211d1d]",
    "bg-[#2626df]",
    "bg-lime-950",
    "bg-[#FFFFFF]",
    "bg-yellow-300",
    "bg-red-950",
];

/// Hero class for a detail page. Ids start at 1; any id maps somewhere.
pub fn hero_color_class(id: CaseStudyId) -> &'static str {
    let len = HERO_COLORS.len() as i64;
    let idx = (id.rem_euclid(len) + len - 1) % len;
    HERO_COLORS[idx as usize]
}

/// `value` unless it is absent or blank.
pub fn image_or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder,
    }
}

impl CaseStudy {
    pub fn logo_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        image_or_placeholder(self.logo_url.as_deref(), placeholder)
    }

    pub fn project_image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        image_or_placeholder(self.project_image.as_deref(), placeholder)
    }

    pub fn cover_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        image_or_placeholder(self.case_study_cover.as_deref(), placeholder)
    }
}

/// Extract the video id from a `watch?v=` or `youtu.be/` link.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = url.split_once("watch?v=") {
        rest.split('&').next().unwrap_or_default()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split(['?', '&', '#']).next().unwrap_or_default()
    } else {
        return None;
    };
    (!id.is_empty()).then_some(id)
}

pub fn youtube_embed_url(url: &str) -> Option<String> {
    youtube_video_id(url).map(|id| format!("https://www.youtube.com/embed/{id}"))
}
