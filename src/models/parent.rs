use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub children_ids: Vec<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateParentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub verified: bool,
    pub children_ids: Vec<i64>,
}
