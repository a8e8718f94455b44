//! Core domain types for confscrape.

use serde::{Deserialize, Serialize};

/// An attendee profile, the unit of output.
///
/// A profile starts life as a bare stub (id only) from the listing endpoint,
/// is filled in by one detail fetch, and may be mutated exactly once more by
/// LinkedIn enrichment. The final sequence is written verbatim to the output
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend-assigned identifier; may be empty for locally-built values.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Display name, trimmed first and last name joined by a single space.
    /// May be empty when the detail payload had no matching user record,
    /// but the field itself is always serialized.
    #[serde(default)]
    pub name: String,

    /// Job title, free text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Company name, free text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,

    /// Comma-joined company countries, or the timezone string as fallback.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// Resolved primary LinkedIn URL, from the backend or from enrichment.
    /// Always serialized, possibly empty.
    #[serde(default)]
    pub linkedin_url: String,

    /// Secondary candidate URLs found during enrichment. Never contains the
    /// value already placed in `linkedin_url`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_linkedin_urls: Vec<String>,
}

impl Profile {
    /// A bare stub carrying only the backend identifier.
    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}
