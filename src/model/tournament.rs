use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tournament, the root object every filterable list hangs off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: u32,
    pub name: String,
    pub season: Option<String>,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}
