use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
    models::{activity::Activity, child::Child},
    services::groups::GroupService,
};

pub fn date_key(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Activities matching both filters. Groups compare by canonical key, so
/// "Blå" selects activities stored as "Blå gruppe".
pub fn filter_activities<'a>(
    activities: &'a [Activity],
    group: Option<&str>,
    date: Option<NaiveDate>,
) -> Vec<&'a Activity> {
    activities
        .iter()
        .filter(|a| group.map_or(true, |g| activity_in_group(a, g)))
        .filter(|a| date.map_or(true, |d| date_key(&a.created_at) == d))
        .collect()
}

/// Distinct non-empty group labels in first-seen order.
pub fn activity_groups(activities: &[Activity]) -> Vec<String> {
    distinct(activities.iter().filter_map(|a| a.group.as_deref()))
}

pub fn child_groups(children: &[Child]) -> Vec<String> {
    distinct(children.iter().map(|c| c.group.as_str()))
}

/// Days with at least one activity in `group`, newest first.
pub fn available_dates_for_group(activities: &[Activity], group: &str) -> Vec<NaiveDate> {
    dates_desc(activities.iter().filter(|a| activity_in_group(a, group)))
}

pub fn available_dates(activities: &[Activity]) -> Vec<NaiveDate> {
    dates_desc(activities.iter())
}

pub fn filter_children_by_group<'a>(children: &'a [Child], group: &str) -> Vec<&'a Child> {
    children
        .iter()
        .filter(|c| GroupService::groups_equal(&c.group, group))
        .collect()
}

/// Sorted by name in Norwegian alphabetical order (æ, ø, å after z).
pub fn sort_children_alphabetically(children: &[Child]) -> Vec<Child> {
    let mut sorted = children.to_vec();
    sorted.sort_by_cached_key(|c| collation_key(&c.name));
    sorted
}

pub fn sort_activities_newest_first(activities: &[Activity]) -> Vec<Activity> {
    let mut sorted = activities.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

fn activity_in_group(activity: &Activity, group: &str) -> bool {
    activity
        .group
        .as_deref()
        .is_some_and(|g| GroupService::groups_equal(g, group))
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    labels
        .filter(|l| !l.is_empty() && seen.insert(*l))
        .map(str::to_string)
        .collect()
}

fn dates_desc<'a>(activities: impl Iterator<Item = &'a Activity>) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = activities
        .map(|a| date_key(&a.created_at))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

fn collation_key(name: &str) -> Vec<u32> {
    const AFTER_Z: u32 = 'z' as u32;
    let lower = name.trim().to_lowercase();
    let mut key = Vec::with_capacity(lower.len());
    for c in lower.chars() {
        let weight = match c {
            'æ' | 'ä' => AFTER_Z + 1,
            'ø' | 'ö' => AFTER_Z + 2,
            'å' => AFTER_Z + 3,
            other => other
                .nfd()
                .find(|d| !is_combining_mark(*d))
                .unwrap_or(other) as u32,
        };
        key.push(weight);
    }
    key
}
