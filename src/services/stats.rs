use std::collections::HashMap;

use crate::{
    models::{
        database::{Database, Stats},
        group::GroupKey,
        status::ChildStatus,
    },
    services::groups::GroupService,
};

/// Attendance totals, plus a live checked-in count per group row. Children and
/// group rows are matched by canonical key, so a row named "Rød" counts
/// children stored as "rød gruppe".
pub fn compute_stats(db: &Database) -> Stats {
    let count_status = |status: ChildStatus| db.children.iter().filter(|c| c.status == status).count();

    let mut inside: HashMap<GroupKey, u32> = HashMap::new();
    for child in db.children.iter().filter(|c| c.status == ChildStatus::CheckedIn) {
        if let Some(key) = GroupService::resolve_key(&child.group) {
            *inside.entry(key).or_default() += 1;
        }
    }

    let groups = db
        .groups
        .iter()
        .map(|g| {
            let mut row = g.clone();
            row.current_count = GroupService::resolve_key(&g.name)
                .and_then(|key| inside.get(&key).copied())
                .unwrap_or(0);
            row
        })
        .collect();

    Stats {
        total_children: db.children.len(),
        checked_in: count_status(ChildStatus::CheckedIn),
        checked_out: count_status(ChildStatus::CheckedOut),
        home: count_status(ChildStatus::Home),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalize::normalize_database;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn counts_per_status_and_group() {
        let db = normalize_database(
            &json!({
                "children": [
                    { "id": 1, "name": "Ola", "group": "Blå", "status": "checked_in" },
                    { "id": 2, "name": "Kari", "group": "blue", "status": "checked_in" },
                    { "id": 3, "name": "Per", "group": "Rød", "status": "checked_out" },
                    { "id": 4, "name": "Lise", "group": "Gul", "status": "checked_in" },
                    { "id": 5, "name": "Nils", "group": "rod", "status": "home" }
                ],
                "groups": [
                    { "id": 1, "name": "Blå gruppe", "currentCount": 99, "totalCapacity": 14 },
                    { "id": 2, "name": "Rød gruppe", "currentCount": 3, "totalCapacity": 12 },
                    { "id": 3, "name": "Gul", "totalCapacity": 10 }
                ]
            }),
            Utc::now(),
        );

        let stats = compute_stats(&db);
        assert_eq!(stats.total_children, 5);
        assert_eq!(stats.checked_in, 3);
        assert_eq!(stats.checked_out, 1);
        assert_eq!(stats.home, 1);

        let counts: Vec<u32> = stats.groups.iter().map(|g| g.current_count).collect();
        assert_eq!(counts, vec![2, 0, 0]);
        assert_eq!(stats.groups[0].total_capacity, 14);
    }

    #[test]
    fn empty_database() {
        let stats = compute_stats(&Database::default());
        assert_eq!(stats.total_children, 0);
        assert!(stats.groups.is_empty());
    }
}
