use super::contact::Contact;
use super::step::StepId;
use super::types::Answer;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Questionnaire progress, persisted as one JSON blob.
///
/// Keys are camelCase to stay compatible with blobs written by the pages.
/// Every field is read on its own: a missing, null or mistyped field loads
/// as its default and the rest of the blob is kept. Map and list entries
/// that do not fit are dropped one by one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardState {
    /// Empty means "not set yet"; readers resolve it to the first step.
    #[serde(deserialize_with = "or_default")]
    pub current_step_id: StepId,
    #[serde(deserialize_with = "valid_entries")]
    pub answers: BTreeMap<StepId, Answer>,
    #[serde(deserialize_with = "valid_entries")]
    pub notes: BTreeMap<StepId, String>,
    #[serde(deserialize_with = "valid_items")]
    pub history: Vec<StepId>,
    #[serde(deserialize_with = "or_default")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "or_default")]
    pub user_contact: Option<Contact>,
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn valid_entries<'de, D, T>(deserializer: D) -> Result<BTreeMap<StepId, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(id, value)| T::deserialize(value).ok().map(|v| (id, v)))
        .collect())
}

fn valid_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|value| T::deserialize(value).ok())
        .collect())
}

impl WizardState {
    pub fn new(first_step: &str) -> Self {
        Self {
            current_step_id: first_step.to_string(),
            ..Self::default()
        }
    }

    /// Record an answer, its optional note, and the visit in history.
    pub fn record(&mut self, step_id: &str, answer: Answer, note: Option<&str>) {
        self.answers.insert(step_id.to_string(), answer);
        if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
            self.notes.insert(step_id.to_string(), note.to_string());
        }
        if !self.history.iter().any(|id| id == step_id) {
            self.history.push(step_id.to_string());
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_suppresses_duplicate_history() {
        let mut state = WizardState::new("immobili");
        state.record("immobili", Answer::Yes, None);
        state.record("consumi", Answer::No, Some("  "));
        state.record("immobili", Answer::No, Some("sede principale"));

        assert_eq!(state.history, vec!["immobili", "consumi"]);
        assert_eq!(state.answers["immobili"], Answer::No);
        assert_eq!(state.notes.get("immobili").unwrap(), "sede principale");
        assert!(!state.notes.contains_key("consumi"));
        assert_eq!(state.answered_count(), 2);
    }

    #[test]
    fn test_blob_uses_camel_case_keys() {
        let state = WizardState::new("immobili");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentStepId"], "immobili");
        assert!(json["lastUpdated"].is_null());
        assert!(json["userContact"].is_null());
    }

    #[test]
    fn test_partial_blob_loads_defaults() {
        let state: WizardState =
            serde_json::from_str(r#"{"answers":{"cer":"yes"}}"#).unwrap();
        assert_eq!(state.current_step_id, "");
        assert_eq!(state.answers["cer"], Answer::Yes);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_null_and_mistyped_fields_keep_the_rest() {
        let state: WizardState = serde_json::from_str(
            r#"{"currentStepId":"cer","answers":{"immobili":"yes","consumi":"yes"},"notes":null,"history":"oops","lastUpdated":12}"#,
        )
        .unwrap();
        assert_eq!(state.current_step_id, "cer");
        assert_eq!(state.answered_count(), 2);
        assert!(state.notes.is_empty());
        assert!(state.history.is_empty());
        assert!(state.last_updated.is_none());

        let state: WizardState =
            serde_json::from_str(r#"{"currentStepId":null,"answers":{"immobili":"yes"}}"#)
                .unwrap();
        assert_eq!(state.current_step_id, "");
        assert_eq!(state.answers["immobili"], Answer::Yes);
    }

    #[test]
    fn test_bad_entries_dropped_individually() {
        let state: WizardState = serde_json::from_str(
            r#"{"answers":{"immobili":"yes","cer":"forse","vincoli":true},"notes":{"cer":"ok","vincoli":3},"history":["immobili",7,"cer"]}"#,
        )
        .unwrap();
        assert_eq!(state.answers.len(), 1);
        assert_eq!(state.answers["immobili"], Answer::Yes);
        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.notes["cer"], "ok");
        assert_eq!(state.history, vec!["immobili", "cer"]);
    }
}
