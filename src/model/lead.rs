use super::types::LeadType;
use serde::{Deserialize, Serialize};

/// Metadata of a file attached to a lead form. File contents are never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Body posted to the lead intake endpoint.
///
/// Built fresh for each submission and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub source_site: String,
    pub org_type: String,
    pub lead_type: LeadType,
    pub org_name: String,
    pub full_name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub message: String,
    pub source_url: String,
    pub timestamp: String,

    /// Recovered questionnaire data, always encoded as a JSON string.
    pub wizard_state: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl LeadPayload {
    /// Decode `wizard_state` back into a JSON value.
    pub fn wizard_state_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.wizard_state)
    }
}
