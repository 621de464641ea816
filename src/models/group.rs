use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical group identifier. Every accepted spelling of a group name resolves
/// to one of these.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Bla,
    Rod,
}

impl GroupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Bla => "bla",
            GroupKey::Rod => "rod",
        }
    }

    pub fn definition(&self) -> &'static GroupDefinition {
        match self {
            GroupKey::Bla => &GROUP_DEFINITIONS[0],
            GroupKey::Rod => &GROUP_DEFINITIONS[1],
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.definition().display_name
    }

    pub fn colors(&self) -> GroupColors {
        self.definition().colors
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GroupKey {
    type Err = anyhow::Error;

    /// Exact key only. Free text goes through `services::groups::resolve_key`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bla" => Ok(GroupKey::Bla),
            "rod" => Ok(GroupKey::Rod),
            _ => Err(anyhow::anyhow!("Unknown group key: {s}")),
        }
    }
}

/// Text/background/border colour triple used to theme a group.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct GroupColors {
    pub text: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    pub key: GroupKey,
    pub display_name: &'static str,
    /// Aliases matched against normalized input, after the short-form rules.
    pub keywords: &'static [&'static str],
    pub colors: GroupColors,
}

/// Declaration order is the listing order. `GroupKey::definition` indexes into it.
pub static GROUP_DEFINITIONS: [GroupDefinition; 2] = [
    GroupDefinition {
        key: GroupKey::Bla,
        display_name: "Blå gruppe",
        keywords: &["blå", "bla", "blue"],
        colors: GroupColors {
            text: "#2563EB",
            background: "#DBEAFE",
            border: "#93C5FD",
        },
    },
    GroupDefinition {
        key: GroupKey::Rod,
        display_name: "Rød gruppe",
        // "ra,d" shows up in legacy exports where the ø was mangled.
        keywords: &["rød", "rod", "roed", "red", "ra,d"],
        colors: GroupColors {
            text: "#DC2626",
            background: "#FECACA",
            border: "#FCA5A5",
        },
    },
];

/// Theme for anything that does not resolve. Has no display name on purpose:
/// an unresolved group is unknown, not a group called "default".
pub const DEFAULT_GROUP_COLORS: GroupColors = GroupColors {
    text: "#374151",
    background: "#E5E7EB",
    border: "#D1D5DB",
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TextStyle {
    pub color: &'static str,
}

/// Group row as persisted in the database file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
    pub current_count: u32,
    pub total_capacity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

