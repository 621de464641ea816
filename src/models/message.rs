use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Staff,
    Parent,
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MessageSender::Staff => "staff",
            MessageSender::Parent => "parent",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for MessageSender {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(MessageSender::Staff),
            "parent" => Ok(MessageSender::Parent),
            _ => Err(anyhow::anyhow!("Unknown message sender: {s}")),
        }
    }
}

/// Parent-staff message thread entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub parent_id: i64,
    pub sender: MessageSender,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}
