use serde::{Deserialize, Serialize};

/// A playing venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub address: Option<String>,
    pub courts: Option<u8>,
}

/// Payload for creating or updating a venue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courts: Option<u8>,
}
