use crate::{
    models::{activity::Activity, child::{Child, ChildView}},
    services::groups::GroupService,
};

/// Trimmed name, with placeholder names replaced by "Barn {id}".
fn sanitize_child_name(name: &str, fallback_id: i64) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.to_lowercase() == "ukjent barn" {
        return format!("Barn {fallback_id}");
    }
    trimmed.to_string()
}

/// Child ready for lists. Unknown groups become `""` so they never leak into
/// group-themed UI.
pub fn child_for_display(child: &Child) -> ChildView {
    ChildView {
        id: child.id,
        name: sanitize_child_name(&child.name, child.id),
        age: child.age.filter(|a| *a > 0).unwrap_or(0),
        group: GroupService::display_name(&child.group).to_string(),
        status: child.status,
    }
}

/// Activities outside the known groups are dropped from the feed.
pub fn activity_for_display(activity: &Activity) -> Option<Activity> {
    let key = GroupService::resolve_key(activity.group.as_deref().unwrap_or_default())?;
    Some(Activity {
        group: Some(key.display_name().to_string()),
        ..activity.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::ChildStatus;
    use chrono::Utc;
    use serde_json::Map;

    fn child(name: &str, group: &str, age: Option<u32>) -> Child {
        Child {
            id: 7,
            name: name.to_string(),
            birth_date: String::new(),
            age,
            group: group.to_string(),
            status: ChildStatus::CheckedOut,
            allergies: vec![],
            checked_in_at: None,
            checked_out_at: None,
            parent_id: Some(1),
            consent_given: true,
            extra: Map::new(),
        }
    }

    fn activity(group: Option<&str>) -> Activity {
        Activity {
            id: 1,
            title: "Tur i skogen".into(),
            description: "Vi gikk tur.".into(),
            group: group.map(str::to_string),
            image_url: None,
            video_url: None,
            media: vec![],
            created_at: Utc::now(),
            extra: Map::new(),
        }
    }

    #[test]
    fn placeholder_names_are_replaced() {
        assert_eq!(child_for_display(&child("  ", "bla", Some(3))).name, "Barn 7");
        assert_eq!(child_for_display(&child("Ukjent Barn", "bla", Some(3))).name, "Barn 7");
        assert_eq!(child_for_display(&child(" Emma ", "bla", Some(3))).name, "Emma");
    }

    #[test]
    fn group_and_age_are_sanitized() {
        let view = child_for_display(&child("Emma", "Gul gruppe", Some(0)));
        assert_eq!(view.group, "");
        assert_eq!(view.age, 0);

        let view = child_for_display(&child("Emma", "blĺ", None));
        assert_eq!(view.group, "Blå gruppe");
        assert_eq!(view.age, 0);
    }

    #[test]
    fn feed_keeps_only_known_groups() {
        assert!(activity_for_display(&activity(None)).is_none());
        assert!(activity_for_display(&activity(Some("Gul"))).is_none());
        let shown = activity_for_display(&activity(Some("red"))).unwrap();
        assert_eq!(shown.group.as_deref(), Some("Rød gruppe"));
    }
}
