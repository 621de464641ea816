use serde::{Deserialize, Serialize};

/// Daily attendance state of a child. Exactly these three values are valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChildStatus {
    CheckedIn,
    CheckedOut,
    Home,
}

/// Declaration order, used for listings.
pub const ALL_STATUSES: [ChildStatus; 3] = [
    ChildStatus::CheckedIn,
    ChildStatus::CheckedOut,
    ChildStatus::Home,
];

// Palette entries used for status badges.
pub const STATUS_IN_COLOR: &str = "#DCFCE7";
pub const STATUS_OUT_COLOR: &str = "#FEE2E2";
pub const STATUS_HOME_COLOR: &str = "#E5E7EB";
/// Neutral border colour shown for a status we cannot classify.
pub const NEUTRAL_BORDER_COLOR: &str = "#E5E7EB";

impl ChildStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildStatus::CheckedIn => "checked_in",
            ChildStatus::CheckedOut => "checked_out",
            ChildStatus::Home => "home",
        }
    }

    /// Short Norwegian label.
    pub fn label(&self) -> &'static str {
        match self {
            ChildStatus::CheckedIn => "inne",
            ChildStatus::CheckedOut => "ute",
            ChildStatus::Home => "hjemme",
        }
    }

    pub fn description(&self, name: &str) -> String {
        match self {
            ChildStatus::CheckedIn => format!("{name} er for tiden i barnehagen."),
            ChildStatus::CheckedOut => format!("{name} er ikke sjekket inn."),
            ChildStatus::Home => format!("{name} er meldt hjemme i dag."),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ChildStatus::CheckedIn => STATUS_IN_COLOR,
            ChildStatus::CheckedOut => STATUS_OUT_COLOR,
            ChildStatus::Home => STATUS_HOME_COLOR,
        }
    }
}

impl std::fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChildStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked_in" => Ok(ChildStatus::CheckedIn),
            "checked_out" => Ok(ChildStatus::CheckedOut),
            "home" => Ok(ChildStatus::Home),
            _ => Err(anyhow::anyhow!("Unknown child status: {s}")),
        }
    }
}
