use chrono::{DateTime, Utc};
use serde_json::Map;

use crate::{
    models::{
        child::{Child, CreateChildRequest},
        database::Database,
        status::ChildStatus,
    },
    services::groups::GroupService,
};

pub struct ChildService;

impl ChildService {
    /// Insert a validated child and link it to its parent.
    pub fn add(db: &mut Database, req: &CreateChildRequest, now: DateTime<Utc>) -> anyhow::Result<Child> {
        let parent = db
            .parents
            .iter_mut()
            .find(|p| p.id == req.parent_id)
            .ok_or_else(|| anyhow::anyhow!("Parent not found: {}", req.parent_id))?;

        let id = db.children.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let status = req.status.unwrap_or(ChildStatus::Home);
        let child = Child {
            id,
            name: req.name.clone(),
            birth_date: req.birth_date.clone().unwrap_or_default(),
            age: req.age,
            group: GroupService::canonical_label(&req.group),
            status,
            allergies: req.allergies.clone(),
            checked_in_at: (status == ChildStatus::CheckedIn).then_some(now),
            checked_out_at: None,
            parent_id: Some(req.parent_id),
            consent_given: false,
            extra: Map::new(),
        };

        if !parent.children_ids.contains(&id) {
            parent.children_ids.push(id);
        }
        db.children.push(child.clone());
        tracing::info!(child_id = id, group = %child.group, "child added");
        Ok(child)
    }

    pub fn check_in(db: &mut Database, id: i64, now: DateTime<Utc>) -> Option<&Child> {
        let child = db.children.iter_mut().find(|c| c.id == id)?;
        child.status = ChildStatus::CheckedIn;
        child.checked_in_at = Some(now);
        child.checked_out_at = None;
        tracing::info!(child_id = id, "checked in");
        Some(child)
    }

    pub fn check_out(db: &mut Database, id: i64, now: DateTime<Utc>) -> Option<&Child> {
        let child = db.children.iter_mut().find(|c| c.id == id)?;
        child.status = ChildStatus::CheckedOut;
        child.checked_out_at = Some(now);
        tracing::info!(child_id = id, "checked out");
        Some(child)
    }

    /// Reported home for the day. Timestamps are left alone.
    pub fn mark_home(db: &mut Database, id: i64) -> Option<&Child> {
        let child = db.children.iter_mut().find(|c| c.id == id)?;
        child.status = ChildStatus::Home;
        tracing::info!(child_id = id, "marked home");
        Some(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalize::normalize_database;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 12, hour, 0, 0).unwrap()
    }

    fn db() -> Database {
        normalize_database(
            &json!({
                "children": [{ "id": 1, "name": "Ola", "group": "Blå", "status": "home" }],
                "parents": [{ "id": 1, "name": "Anne", "email": "a@b.no", "phone": "12345678", "childrenIds": [1] }]
            }),
            at(0),
        )
    }

    fn request(parent_id: i64, status: Option<ChildStatus>) -> CreateChildRequest {
        CreateChildRequest {
            name: "Kari".into(),
            birth_date: None,
            age: Some(3),
            group: "rřd".into(),
            allergies: vec![],
            status,
            parent_id,
        }
    }

    #[test]
    fn add_links_parent_and_canonicalizes_group() {
        let mut db = db();
        let child = ChildService::add(&mut db, &request(1, Some(ChildStatus::CheckedIn)), at(8)).unwrap();
        assert_eq!(child.id, 2);
        assert_eq!(child.group, "Rød gruppe");
        assert_eq!(child.checked_in_at, Some(at(8)));
        assert_eq!(db.parents[0].children_ids, vec![1, 2]);
    }

    #[test]
    fn add_rejects_unknown_parent() {
        let mut db = db();
        assert!(ChildService::add(&mut db, &request(42, None), at(8)).is_err());
        assert_eq!(db.children.len(), 1);
    }

    #[test]
    fn any_status_can_follow_any_other() {
        let mut db = db();
        assert_eq!(ChildService::check_out(&mut db, 1, at(7)).unwrap().status, ChildStatus::CheckedOut);

        let child = ChildService::check_in(&mut db, 1, at(8)).unwrap();
        assert_eq!(child.status, ChildStatus::CheckedIn);
        assert_eq!(child.checked_out_at, None);

        let child = ChildService::mark_home(&mut db, 1).unwrap();
        assert_eq!(child.status, ChildStatus::Home);
        assert_eq!(child.checked_in_at, Some(at(8)));
    }

    #[test]
    fn unknown_child_is_none() {
        let mut db = db();
        assert!(ChildService::check_in(&mut db, 99, at(8)).is_none());
        assert!(ChildService::mark_home(&mut db, 99).is_none());
    }
}
