use std::fs;

use barnehage::{
    db,
    models::status::ChildStatus,
    services::{children::ChildService, stats::compute_stats},
};
use chrono::Utc;
use serde_json::{json, Value};

fn legacy_file() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.json");
    let legacy = json!({
        "children": [
            { "id": 1, "name": "Ola", "group": "blĺ", "status": "checked_in",
              "pickupAuthorizations": [{ "name": "Mormor" }] },
            { "id": 2, "name": "", "group": "RŘD", "status": "away" },
            { "id": 3, "name": "Lise", "group": "Gul gruppe", "status": "checked_out" }
        ],
        "parents": [{ "id": 1, "name": "Anne", "email": "anne@example.no", "phone": "12345678" }],
        "activities": [{ "id": 1, "title": "Tur", "group": "red", "createdAt": "2025-12-11T10:00:00Z" }],
        "groups": [{ "id": 1, "name": "Blå", "totalCapacity": 14 }]
    });
    fs::write(&path, serde_json::to_string(&legacy).unwrap()).unwrap();
    (dir, path)
}

#[tokio::test]
async fn read_normalizes_legacy_rows() {
    let (_dir, path) = legacy_file();
    let database = db::read_database(&path).await.unwrap();

    assert_eq!(database.children[0].group, "Blå gruppe");
    assert_eq!(database.children[1].group, "Rød gruppe");
    assert_eq!(database.children[1].name, "Ukjent barn");
    assert_eq!(database.children[1].status, ChildStatus::Home);
    assert_eq!(database.children[2].group, "Gul gruppe");
    assert_eq!(database.activities[0].group.as_deref(), Some("Rød gruppe"));
    assert!(database.messages.is_empty());

    let stats = compute_stats(&database);
    assert_eq!(stats.checked_in, 1);
    assert_eq!(stats.groups[0].current_count, 1);
}

#[tokio::test]
async fn write_round_trips_and_keeps_unknown_fields() {
    let (_dir, path) = legacy_file();
    let mut database = db::read_database(&path).await.unwrap();
    ChildService::check_in(&mut database, 3, Utc::now()).unwrap();

    let written = db::write_database(&path, &database).await.unwrap();
    let reread = db::read_database(&path).await.unwrap();
    assert_eq!(written, reread);
    assert_eq!(reread.children[2].status, ChildStatus::CheckedIn);

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["children"][0]["pickupAuthorizations"][0]["name"], "Mormor");
    assert_eq!(on_disk["children"][1]["status"], "home");
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = db::read_database(&dir.path().join("nope.json")).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
