//! Lenient conversion of stored JSON into typed records.
//!
//! The database file is hand-edited and carries legacy rows, so nothing here
//! fails: missing or malformed fields fall back to defaults. Group labels go
//! through the same resolver the display layer uses.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::{
    models::{
        activity::{Activity, ActivityMedia},
        child::Child,
        database::Database,
        group::GroupRecord,
        message::{Message, MessageSender},
        parent::Parent,
        status::ChildStatus,
    },
    services::{groups::GroupService, status::StatusService},
};

pub const UNKNOWN_CHILD_NAME: &str = "Ukjent barn";

const CHILD_FIELDS: [&str; 11] = [
    "id", "name", "birthDate", "age", "group", "status", "allergies", "checkedInAt",
    "checkedOutAt", "parentId", "consentGiven",
];
const PARENT_FIELDS: [&str; 7] =
    ["id", "name", "email", "phone", "address", "verified", "childrenIds"];
const ACTIVITY_FIELDS: [&str; 8] = [
    "id", "title", "description", "group", "imageUrl", "videoUrl", "media", "createdAt",
];
const GROUP_FIELDS: [&str; 4] = ["id", "name", "currentCount", "totalCapacity"];

pub fn normalize_database(raw: &Value, now: DateTime<Utc>) -> Database {
    Database {
        children: objects(raw, "children").map(normalize_child).collect(),
        parents: objects(raw, "parents").map(normalize_parent).collect(),
        activities: objects(raw, "activities")
            .map(|a| normalize_activity(a, now))
            .collect(),
        groups: objects(raw, "groups").map(normalize_group).collect(),
        messages: objects(raw, "messages")
            .map(|m| normalize_message(m, now))
            .collect(),
    }
}

pub fn normalize_child(obj: &Map<String, Value>) -> Child {
    let id = int(obj.get("id")).unwrap_or(0);
    let status = match obj.get("status") {
        None | Some(Value::Null) => ChildStatus::Home,
        Some(value) => StatusService::to_status(value).unwrap_or_else(|| {
            tracing::warn!(child_id = id, status = %value, "invalid status stored, using home");
            ChildStatus::Home
        }),
    };

    Child {
        id,
        name: text(obj.get("name"))
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_CHILD_NAME)
            .to_string(),
        birth_date: text(obj.get("birthDate")).unwrap_or_default().to_string(),
        age: age(obj.get("age")),
        group: GroupService::canonical_label(text(obj.get("group")).unwrap_or_default()),
        status,
        allergies: match obj.get("allergies") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|a| a.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        },
        checked_in_at: timestamp(obj.get("checkedInAt")),
        checked_out_at: timestamp(obj.get("checkedOutAt")),
        parent_id: int(obj.get("parentId")),
        consent_given: truthy(obj.get("consentGiven")),
        extra: extras(obj, &CHILD_FIELDS),
    }
}

pub fn normalize_parent(obj: &Map<String, Value>) -> Parent {
    Parent {
        id: int(obj.get("id")).unwrap_or(0),
        name: text(obj.get("name")).unwrap_or_default().to_string(),
        email: text(obj.get("email")).unwrap_or_default().to_string(),
        phone: text(obj.get("phone")).unwrap_or_default().to_string(),
        address: text(obj.get("address")).unwrap_or_default().to_string(),
        verified: truthy(obj.get("verified")),
        children_ids: match obj.get("childrenIds") {
            Some(Value::Array(ids)) => ids.iter().filter_map(|v| int(Some(v))).collect(),
            _ => Vec::new(),
        },
        extra: extras(obj, &PARENT_FIELDS),
    }
}

pub fn normalize_activity(obj: &Map<String, Value>, now: DateTime<Utc>) -> Activity {
    let group = GroupService::canonical_label(text(obj.get("group")).unwrap_or_default());

    Activity {
        id: int(obj.get("id")).unwrap_or(0),
        title: text(obj.get("title")).unwrap_or_default().to_string(),
        description: text(obj.get("description")).unwrap_or_default().to_string(),
        group: (!group.is_empty()).then_some(group),
        image_url: text(obj.get("imageUrl")).map(str::to_string),
        video_url: text(obj.get("videoUrl")).map(str::to_string),
        media: match obj.get("media") {
            Some(Value::Array(items)) => items.iter().filter_map(media_item).collect(),
            _ => Vec::new(),
        },
        created_at: timestamp(obj.get("createdAt")).unwrap_or(now),
        extra: extras(obj, &ACTIVITY_FIELDS),
    }
}

pub fn normalize_group(obj: &Map<String, Value>) -> GroupRecord {
    let raw_name = text(obj.get("name")).unwrap_or_default();
    let label = GroupService::canonical_label(raw_name);

    GroupRecord {
        id: int(obj.get("id")).unwrap_or(0),
        name: if label.is_empty() { raw_name.to_string() } else { label },
        current_count: count(obj.get("currentCount")),
        total_capacity: count(obj.get("totalCapacity")),
        extra: extras(obj, &GROUP_FIELDS),
    }
}

pub fn normalize_message(obj: &Map<String, Value>, now: DateTime<Utc>) -> Message {
    Message {
        id: int(obj.get("id")).unwrap_or(0),
        parent_id: int(obj.get("parentId")).unwrap_or(0),
        sender: match text(obj.get("sender")) {
            Some("staff") => MessageSender::Staff,
            _ => MessageSender::Parent,
        },
        content: text(obj.get("content")).unwrap_or_default().trim().to_string(),
        created_at: timestamp(obj.get("createdAt")).unwrap_or(now),
        read: truthy(obj.get("read")),
    }
}

pub(crate) fn media_item(value: &Value) -> Option<ActivityMedia> {
    let obj = value.as_object()?;
    let url = text(obj.get("url")).map(str::trim).filter(|u| !u.is_empty())?;
    let kind = text(obj.get("type"))?.parse().ok()?;
    Some(ActivityMedia {
        kind,
        url: url.to_string(),
        poster_url: text(obj.get("posterUrl"))
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string),
    })
}

fn objects<'a>(raw: &'a Value, collection: &'a str) -> impl Iterator<Item = &'a Map<String, Value>> {
    raw.get(collection)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(move |item| {
            let obj = item.as_object();
            if obj.is_none() {
                tracing::warn!(collection, "skipping non-object entry");
            }
            obj
        })
}

fn text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// Integer from a JSON number or a numeric string ("12").
fn int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn age(value: Option<&Value>) -> Option<u32> {
    let n = value?.as_f64()?;
    (n.is_finite() && n >= 0.0 && n <= u32::MAX as f64).then_some(n as u32)
}

fn count(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = text(value)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// JavaScript truthiness, which is what the legacy rows were written with.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn extras(obj: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    obj.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 12, 8, 0, 0).unwrap()
    }

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn child_defaults_and_group_label() {
        let child = normalize_child(&obj(json!({
            "id": 3,
            "group": "blĺ",
            "status": "sleeping",
            "age": "four",
            "allergies": "nuts",
            "consentGiven": 1,
            "pickupAuthorizations": ["Mormor"]
        })));

        assert_eq!(child.name, UNKNOWN_CHILD_NAME);
        assert_eq!(child.group, "Blå gruppe");
        assert_eq!(child.status, ChildStatus::Home);
        assert_eq!(child.age, None);
        assert!(child.allergies.is_empty());
        assert!(child.consent_given);
        assert_eq!(child.extra.get("pickupAuthorizations"), Some(&json!(["Mormor"])));
    }

    #[test]
    fn child_keeps_valid_status_and_unknown_group() {
        let child = normalize_child(&obj(json!({
            "id": 1,
            "name": "Ola",
            "group": " Gul ",
            "status": "checked_in",
            "age": 4,
            "checkedInAt": "2025-12-12T07:45:00Z",
            "parentId": "2"
        })));

        assert_eq!(child.status, ChildStatus::CheckedIn);
        assert_eq!(child.group, "Gul");
        assert_eq!(child.age, Some(4));
        assert_eq!(child.parent_id, Some(2));
        assert_eq!(
            child.checked_in_at,
            Some(Utc.with_ymd_and_hms(2025, 12, 12, 7, 45, 0).unwrap())
        );
    }

    #[test]
    fn activity_group_blank_becomes_absent() {
        let activity = normalize_activity(&obj(json!({ "id": 1, "title": "Tur", "group": "" })), now());
        assert_eq!(activity.group, None);
        assert_eq!(activity.created_at, now());

        let activity = normalize_activity(
            &obj(json!({
                "id": 2,
                "title": "Maling",
                "group": "RŘD",
                "media": [
                    { "type": "image", "url": "/uploads/a.jpg" },
                    { "type": "audio", "url": "/uploads/b.mp3" },
                    { "type": "video" }
                ]
            })),
            now(),
        );
        assert_eq!(activity.group.as_deref(), Some("Rød gruppe"));
        assert_eq!(activity.media.len(), 1);
    }

    #[test]
    fn message_coercions() {
        let message = normalize_message(
            &obj(json!({ "id": 9, "parentId": "4", "sender": "Staff", "content": "  Hei  ", "read": 0 })),
            now(),
        );
        assert_eq!(message.parent_id, 4);
        assert_eq!(message.sender, MessageSender::Parent);
        assert_eq!(message.content, "Hei");
        assert!(!message.read);
        assert_eq!(message.created_at, now());
    }

    #[test]
    fn group_counts_default_to_zero() {
        let group = normalize_group(&obj(json!({ "id": 1, "name": "bla", "currentCount": "x" })));
        assert_eq!(group.name, "Blå gruppe");
        assert_eq!(group.current_count, 0);
        assert_eq!(group.total_capacity, 0);
    }

    #[test]
    fn database_tolerates_missing_collections() {
        let db = normalize_database(&json!({ "children": "oops", "parents": [1, { "id": 1 }] }), now());
        assert!(db.children.is_empty());
        assert_eq!(db.parents.len(), 1);
        assert!(db.messages.is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = json!({
            "children": [{ "id": 1, "name": "Kari", "group": "rod", "status": "home", "extra": true }],
            "activities": [{ "id": 1, "title": "Tur", "group": "blue", "createdAt": "2025-12-11T10:00:00Z" }],
            "groups": [{ "id": 1, "name": "Rød", "totalCapacity": 12 }],
            "messages": [{ "id": 1, "parentId": 1, "content": "Hei", "createdAt": "2025-12-11T10:00:00Z" }]
        });
        let once = normalize_database(&raw, now());
        let twice = normalize_database(&serde_json::to_value(&once).unwrap(), now());
        assert_eq!(once, twice);
    }
}
