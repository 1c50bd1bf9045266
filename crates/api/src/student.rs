use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A roster entry. Owned entirely by the frontend; the mock backend only
/// defines the shape and validation rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,

    /// Id of the course this student is enrolled in. Not checked against the
    /// catalog, so dangling ids are possible.
    pub course_id: u32,

    /// URI or inline data for an avatar, if one was provided.
    pub profile_image: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Checks the shape of an email address: a local part with no whitespace, an
/// `@`, and a domain containing at least one dot.
pub fn validate_email(email: &str) -> bool {
    let email_re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    email_re.is_match(email)
}

/// Names just have to be non-blank.
pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}
