use serde_json::Value;

use crate::models::status::{ChildStatus, ALL_STATUSES, NEUTRAL_BORDER_COLOR};

pub struct StatusService;

impl StatusService {
    /// Strict membership in the closed set. Only the exact strings qualify:
    /// no trimming, no case folding, no numbers.
    pub fn is_valid_status(value: &Value) -> bool {
        Self::to_status(value).is_some()
    }

    /// Validated status for input coming from outside (API bodies, stored rows).
    pub fn to_status(value: &Value) -> Option<ChildStatus> {
        value.as_str().and_then(Self::parse)
    }

    pub fn parse(raw: &str) -> Option<ChildStatus> {
        raw.parse().ok()
    }

    /// Label for an untrusted status string. Unknown input yields `None` rather
    /// than being shown as "ute".
    pub fn label_of(raw: &str) -> Option<&'static str> {
        Self::parse(raw).map(|s| s.label())
    }

    pub fn describe(name: &str, raw: &str) -> String {
        match Self::parse(raw) {
            Some(status) => status.description(name),
            None => format!("{name} status er ukjent."),
        }
    }

    pub fn color_of(raw: &str) -> &'static str {
        Self::parse(raw)
            .map(|s| s.color())
            .unwrap_or(NEUTRAL_BORDER_COLOR)
    }

    pub fn list_all() -> [ChildStatus; 3] {
        ALL_STATUSES
    }
}
