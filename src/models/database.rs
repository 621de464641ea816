use serde::{Deserialize, Serialize};

use super::{
    activity::Activity, child::Child, group::GroupRecord, message::Message, parent::Parent,
};

/// Full contents of the database file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Database {
    pub children: Vec<Child>,
    pub parents: Vec<Parent>,
    pub activities: Vec<Activity>,
    pub groups: Vec<GroupRecord>,
    pub messages: Vec<Message>,
}

/// Attendance overview returned by `services::stats::compute_stats`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_children: usize,
    pub checked_in: usize,
    pub checked_out: usize,
    pub home: usize,
    /// Group rows with `current_count` replaced by the live checked-in count.
    pub groups: Vec<GroupRecord>,
}
