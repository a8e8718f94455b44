//! Vendor response envelopes and their mapping to [`Profile`].
//!
//! Every backend-specific field name lives in this module; supporting a
//! different backend means swapping only this mapping.

use serde::Deserialize;

use confscrape_shared::Profile;

/// The `included` record type holding user attributes.
const USER_RECORD_TYPE: &str = "user";

// ---------------------------------------------------------------------------
// Attendees list envelope
// ---------------------------------------------------------------------------

/// Minimal attendees-list envelope: only the stub ids are read.
#[derive(Debug, Deserialize)]
pub(crate) struct AttendeeListResponse {
    #[serde(default)]
    pub data: Vec<AttendeeListItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttendeeListItem {
    #[serde(default)]
    pub id: String,
}

// ---------------------------------------------------------------------------
// Attendee detail envelope
// ---------------------------------------------------------------------------

/// Per-attendee detail envelope: a sparse JSON:API document whose primary
/// record references a user record by id/type inside the `included` list.
#[derive(Debug, Deserialize)]
pub(crate) struct AttendeeDetailResponse {
    pub data: AttendeeRecord,
    #[serde(default)]
    pub included: Vec<IncludedRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AttendeeRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub relationships: Relationships,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Relationships {
    #[serde(default)]
    pub user: UserRelationship,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserRelationship {
    #[serde(default)]
    pub data: UserRef,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserRef {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncludedRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: UserAttributes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserAttributes {
    #[serde(default, rename = "first-name")]
    pub first_name: String,
    #[serde(default, rename = "last-name")]
    pub last_name: String,
    #[serde(default, rename = "company-title")]
    pub company_title: String,
    #[serde(default, rename = "company-name")]
    pub company_name: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default, rename = "time-zone")]
    pub time_zone: String,
    #[serde(default, rename = "company-countries")]
    pub company_countries: Vec<String>,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Map a detail envelope into a normalized [`Profile`].
///
/// When the user reference is empty, or `included` holds no record of type
/// `"user"` with the referenced id, the profile keeps only the primary id.
pub(crate) fn profile_from_detail(resp: AttendeeDetailResponse) -> Profile {
    let mut profile = Profile::stub(resp.data.id);

    let user_id = resp.data.relationships.user.data.id;
    if user_id.is_empty() {
        return profile;
    }

    let Some(user) = resp
        .included
        .into_iter()
        .find(|inc| inc.kind == USER_RECORD_TYPE && inc.id == user_id)
    else {
        return profile;
    };

    let attrs = user.attributes;

    let first = attrs.first_name.trim();
    let last = attrs.last_name.trim();
    profile.name = format!("{first} {last}").trim().to_string();

    profile.title = attrs.company_title;
    profile.company = attrs.company_name;
    profile.location = if attrs.company_countries.is_empty() {
        attrs.time_zone
    } else {
        attrs.company_countries.join(", ")
    };
    profile.linkedin_url = attrs.linkedin;

    profile
}
