use serde::{Deserialize, Serialize};

/// Stable identifier of a case study as authored in the record source.
pub type CaseStudyId = i64;

/// One client engagement exactly as authored by the record source.
///
/// The slug is not part of the authored record; it is derived when a
/// catalog is built and handed out through [`CaseStudyEntry`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub id: CaseStudyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study_cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl CaseStudy {
    pub fn new(id: CaseStudyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            industry: String::new(),
            logo_url: None,
            project_image: None,
            case_study_cover: None,
            video_url: None,
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// True when the industry tag is present after trimming.
    pub fn has_industry(&self) -> bool {
        !self.industry.trim().is_empty()
    }
}

/// A case study together with the slug assigned to it in one catalog.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CaseStudyEntry {
    pub slug: String,
    #[serde(flatten)]
    pub study: CaseStudy,
}

impl CaseStudyEntry {
    pub fn id(&self) -> CaseStudyId {
        self.study.id
    }

    pub fn name(&self) -> &str {
        &self.study.name
    }
}

/// Authored record documents come either as a bare array or wrapped in an
/// object under `caseStudies`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordDocument {
    List(Vec<CaseStudy>),
    #[serde(rename_all = "camelCase")]
    Wrapped { case_studies: Vec<CaseStudy> },
}

impl RecordDocument {
    pub fn into_records(self) -> Vec<CaseStudy> {
        match self {
            RecordDocument::List(records) => records,
            RecordDocument::Wrapped { case_studies } => case_studies,
        }
    }
}
