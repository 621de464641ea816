use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::status::ChildStatus;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
    pub age: Option<u32>,
    /// Canonical display label when the group resolves, raw text otherwise.
    pub group: String,
    pub status: ChildStatus,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub consent_given: bool,
    /// Fields this crate does not model (pickup authorizations etc.), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Child as shown in lists: name and age sanitized, group reduced to a display
/// name or `""` when out of taxonomy.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChildView {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub group: String,
    pub status: ChildStatus,
}

/// Payload accepted when creating a child, after boundary validation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    pub name: String,
    pub birth_date: Option<String>,
    pub age: Option<u32>,
    pub group: String,
    pub allergies: Vec<String>,
    pub status: Option<ChildStatus>,
    pub parent_id: i64,
}
