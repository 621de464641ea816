//! Checks applied to incoming payloads before anything is stored.
//!
//! Unlike the stored-row normalization, these reject: a status outside the
//! closed set is an error here, never coerced.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::{
    models::{
        activity::CreateActivityRequest, child::CreateChildRequest, parent::CreateParentRequest,
    },
    services::{groups::GroupService, normalize::media_item, status::StatusService},
};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_PHONE_LEN: usize = 50;
pub const MAX_MEDIA_ITEMS: usize = 12;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"^[\d\s\-+()]{8,}$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title and description are required")]
    MissingTitleOrDescription,
    #[error("Missing required fields")]
    MissingChildFields,
    #[error("Missing required fields: name, email, phone")]
    MissingParentFields,
    #[error("{field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("Too many media items (max 12)")]
    TooManyMedia,
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("Invalid parentId")]
    InvalidParentId,
}

impl ValidationError {
    /// HTTP status the API boundary answers with.
    pub fn status_code(&self) -> u16 {
        400
    }
}

/// Trimmed, with `<` and `>` removed.
pub fn clean_text(value: &str) -> String {
    value.trim().replace(['<', '>'], "")
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_activity_payload(body: &Value) -> Result<CreateActivityRequest, ValidationError> {
    let title = cleaned(body, "title");
    let description = cleaned(body, "description");
    let (Some(title), Some(description)) = (title, description) else {
        return Err(ValidationError::MissingTitleOrDescription);
    };
    check_length("title", &title, MAX_TITLE_LEN)?;
    check_length("description", &description, MAX_DESCRIPTION_LEN)?;

    let group = body
        .get("group")
        .and_then(Value::as_str)
        .map(GroupService::canonical_label)
        .filter(|g| !g.is_empty());

    let media = match body.get("media") {
        Some(Value::Array(items)) => {
            if items.len() > MAX_MEDIA_ITEMS {
                return Err(ValidationError::TooManyMedia);
            }
            items.iter().filter_map(media_item).collect()
        }
        _ => Vec::new(),
    };

    Ok(CreateActivityRequest {
        title,
        description,
        group,
        media,
        image_url: cleaned(body, "imageUrl"),
        video_url: cleaned(body, "videoUrl"),
    })
}

pub fn validate_child_payload(body: &Value) -> Result<CreateChildRequest, ValidationError> {
    let name = cleaned(body, "name");
    let group = cleaned(body, "group");
    let (Some(name), Some(group)) = (name, group) else {
        return Err(ValidationError::MissingChildFields);
    };
    let parent_id = match body.get("parentId") {
        None | Some(Value::Null) => return Err(ValidationError::MissingChildFields),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
    .ok_or(ValidationError::InvalidParentId)?;
    check_length("name", &name, MAX_NAME_LEN)?;

    let status = match body.get("status") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            StatusService::to_status(value)
                .ok_or_else(|| ValidationError::InvalidStatus(value.to_string()))?,
        ),
    };

    let age = match body.get("age") {
        Some(Value::Number(n)) => n.as_u64().and_then(|a| u32::try_from(a).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };

    let allergies = match body.get("allergies") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(CreateChildRequest {
        name,
        birth_date: cleaned(body, "birthDate"),
        age,
        group,
        allergies,
        status,
        parent_id,
    })
}

pub fn validate_parent_payload(body: &Value) -> Result<CreateParentRequest, ValidationError> {
    let (Some(name), Some(email), Some(phone)) =
        (cleaned(body, "name"), cleaned(body, "email"), cleaned(body, "phone"))
    else {
        return Err(ValidationError::MissingParentFields);
    };
    check_length("name", &name, MAX_NAME_LEN)?;
    check_length("email", &email, MAX_EMAIL_LEN)?;
    check_length("phone", &phone, MAX_PHONE_LEN)?;

    Ok(CreateParentRequest {
        name,
        email,
        phone,
        address: cleaned(body, "address"),
        verified: body.get("verified").and_then(Value::as_bool).unwrap_or(false),
        children_ids: match body.get("childrenIds") {
            Some(Value::Array(ids)) => ids.iter().filter_map(Value::as_i64).collect(),
            _ => Vec::new(),
        },
    })
}

/// Trimmed string field, `None` when absent, not a string, or blank.
fn cleaned(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
