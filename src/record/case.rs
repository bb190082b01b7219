use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Structured data extracted from one case page
///
/// Every field is always present once serialized: fields missing from the
/// source page become empty strings, an empty list or an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseRecord {
    /// The case page URL
    pub url: String,

    /// Case title
    pub title: String,

    /// Patient details (age, gender, presentation...) in page order
    pub patient_data: IndexMap<String, String>,

    /// Study description (modality, plane, phase)
    pub study: String,

    /// Imaging findings
    pub findings: String,

    /// Final diagnosis
    pub diagnosis: String,

    /// Case discussion
    pub discussion: String,

    /// Absolute image URLs in page order
    pub images: Vec<String>,
}

impl CaseRecord {
    /// Returns true when nothing but the URL could be extracted
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.patient_data.is_empty()
            && self.study.is_empty()
            && self.findings.is_empty()
            && self.diagnosis.is_empty()
            && self.discussion.is_empty()
            && self.images.is_empty()
    }
}
