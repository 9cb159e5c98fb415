//! Assembly of the lead payload from storage, page state and form fields.
//!
//! Building never fails. Storage entries that do not parse, page state that
//! is not an object and missing form fields are skipped or defaulted.

use crate::config::LeadSettings;
use crate::model::{Attachment, Contact, LeadPayload, LeadType, WizardState};
use crate::storage::{CONTACT_KEY, KeyValueStore, STATE_KEY};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// Prefix reserved for keys written by cooperating page scripts.
pub const NAMESPACE_PREFIX: &str = "rts.";

/// Substrings that mark a storage key as questionnaire data in older pages.
pub const LEGACY_HINTS: &[&str] = &[
    "wizard",
    "questionario",
    "answers",
    "selections",
    "esito",
    "result",
    "rts_",
];

/// Page-level names older scripts used to expose their in-memory state.
pub const LEGACY_GLOBALS: &[&str] = &[
    "RTS_STATE",
    "rtsState",
    "wizardState",
    "WIZARD_STATE",
    "__RTS_WIZARD__",
];

const SELECTION_KEYS: &[&str] = &["answers", "selections"];
const RESULT_KEYS: &[&str] = &["result", "esito", "outcome"];
const SCORE_KEYS: &[&str] = &["score", "punteggio"];

/// Payload field name and the form names it is read from, in priority order.
const FORM_FIELDS: &[(&str, &[&str])] = &[
    ("org_name", &["org_name", "ente", "organizzazione"]),
    ("full_name", &["full_name", "nome", "name"]),
    ("role", &["role", "ruolo"]),
    ("email", &["email"]),
    ("phone", &["phone", "telefono"]),
    ("city", &["city", "citta"]),
    ("message", &["message", "messaggio"]),
];

/// Which storage keys are treated as questionnaire data.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    pub known_keys: Vec<String>,
    pub namespace_prefix: String,
    pub hints: Vec<String>,
    pub legacy_hints: bool,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            known_keys: vec![STATE_KEY.to_string()],
            namespace_prefix: NAMESPACE_PREFIX.to_string(),
            hints: LEGACY_HINTS.iter().map(|h| h.to_string()).collect(),
            legacy_hints: true,
        }
    }
}

impl ScanPolicy {
    pub fn matches(&self, key: &str) -> bool {
        if self.known_keys.iter().any(|k| k == key) {
            return true;
        }
        if !self.namespace_prefix.is_empty() && key.starts_with(&self.namespace_prefix) {
            return true;
        }
        if self.legacy_hints {
            let lowered = key.to_lowercase();
            return self.hints.iter().any(|hint| lowered.contains(hint.as_str()));
        }
        false
    }
}

/// A named storage area to scan, such as the long-lived or the session area.
pub struct StorageArea<'a> {
    pub name: &'static str,
    pub store: &'a dyn KeyValueStore,
}

/// State a page script hands over explicitly instead of leaving it on a global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedState {
    pub source: String,
    pub data: Map<String, Value>,
}

/// Everything the builder knows about the page the form lives on.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub url: Option<String>,
    pub shared: Vec<SharedState>,
    /// Page globals from older scripts. Only [`LEGACY_GLOBALS`] names are read.
    pub legacy_globals: BTreeMap<String, Value>,
}

/// Values read from the submitted form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub fields: BTreeMap<String, String>,
    pub hidden: BTreeMap<String, String>,
    pub files: Vec<Attachment>,
    pub lead_type: Option<LeadType>,
}

/// Questionnaire data recovered from every source, before encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recovered {
    pub selections: Map<String, Value>,
    pub result: Map<String, Value>,
    pub sources: Vec<String>,
}

impl Recovered {
    /// Fold one source object in.
    ///
    /// Selections keep the first value seen for a key; results take the last.
    fn merge(&mut self, source: &str, object: &Map<String, Value>) {
        for key in SELECTION_KEYS {
            if let Some(Value::Object(entries)) = object.get(*key) {
                for (k, v) in entries {
                    if !self.selections.contains_key(k) {
                        self.selections.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        for key in RESULT_KEYS {
            if let Some(Value::Object(entries)) = object.get(*key) {
                for (k, v) in entries {
                    self.result.insert(k.clone(), v.clone());
                }
            }
        }
        for key in SCORE_KEYS {
            if let Some(v @ (Value::Number(_) | Value::String(_) | Value::Bool(_))) =
                object.get(*key)
            {
                self.result.insert(key.to_string(), v.clone());
            }
        }
        self.sources.push(source.to_string());
    }

    /// Hidden form values only fill selections nobody else provided.
    fn fill_hidden(&mut self, hidden: &BTreeMap<String, String>) {
        for (k, v) in hidden {
            if !self.selections.contains_key(k) {
                self.selections.insert(k.clone(), Value::String(v.clone()));
            }
        }
    }

    fn org_type(&self) -> Option<&str> {
        ["org_type", "ente_type"]
            .iter()
            .filter_map(|key| self.selections.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|v| !v.is_empty())
    }
}

pub struct LeadPayloadBuilder<'a> {
    areas: Vec<StorageArea<'a>>,
    policy: ScanPolicy,
    settings: LeadSettings,
}

impl<'a> LeadPayloadBuilder<'a> {
    pub fn new(settings: LeadSettings) -> Self {
        let policy = ScanPolicy {
            legacy_hints: settings.legacy_hints,
            ..ScanPolicy::default()
        };
        Self {
            areas: Vec::new(),
            policy,
            settings,
        }
    }

    /// Add a storage area. Areas are scanned in the order they are added.
    pub fn with_area(mut self, name: &'static str, store: &'a dyn KeyValueStore) -> Self {
        self.areas.push(StorageArea { name, store });
        self
    }

    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parsed JSON entries of every matching storage key, area by area.
    pub fn scan_storage(&self) -> Vec<(String, Value)> {
        let mut found = Vec::new();
        for area in &self.areas {
            for key in area.store.keys() {
                if !self.policy.matches(&key) {
                    continue;
                }
                let Some(raw) = area.store.get(&key) else {
                    continue;
                };
                match serde_json::from_str::<Value>(&raw) {
                    Ok(value) => found.push((format!("{}:{}", area.name, key), value)),
                    Err(e) => {
                        tracing::debug!(area = area.name, key, error = %e, "Skipping unparsable entry")
                    }
                }
            }
        }
        found
    }

    /// Collect selections and results from storage, shared page state and hidden fields.
    pub fn recover(&self, form: &FormSubmission, page: &PageContext) -> Recovered {
        let mut recovered = Recovered::default();

        for (source, value) in self.scan_storage() {
            if let Value::Object(object) = &value {
                recovered.merge(&source, object);
            }
        }

        for shared in &page.shared {
            recovered.merge(&format!("shared:{}", shared.source), &shared.data);
        }

        for name in LEGACY_GLOBALS {
            match page.legacy_globals.get(*name) {
                Some(Value::Object(object)) => {
                    tracing::debug!(global = name, "Reading legacy page global");
                    recovered.merge(&format!("global:{}", name), object);
                }
                Some(_) => tracing::debug!(global = name, "Ignoring non-object page global"),
                None => {}
            }
        }

        recovered.fill_hidden(&form.hidden);
        recovered
    }

    /// Contact saved by the reserved area, used for fields the form leaves empty.
    fn fallback_contact(&self) -> Option<Contact> {
        for area in &self.areas {
            let from_state = area
                .store
                .get(STATE_KEY)
                .and_then(|raw| serde_json::from_str::<WizardState>(&raw).ok())
                .and_then(|state| state.user_contact);
            if from_state.is_some() {
                return from_state;
            }
            let snapshot = area
                .store
                .get(CONTACT_KEY)
                .and_then(|raw| serde_json::from_str::<Contact>(&raw).ok());
            if snapshot.is_some() {
                return snapshot;
            }
        }
        None
    }

    pub fn build(&self, form: &FormSubmission, page: &PageContext) -> LeadPayload {
        let recovered = self.recover(form, page);
        let contact = self.fallback_contact();

        let source_url = page
            .url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.settings.page_url.clone());
        let lead_type = form
            .lead_type
            .unwrap_or_else(|| LeadType::from_path(&page_path(&source_url)));
        let org_type = recovered
            .org_type()
            .unwrap_or(&self.settings.default_org_type)
            .to_string();

        let field = |name: &str| resolve_field(name, &form.fields, contact.as_ref());

        let captured_at = Utc::now().to_rfc3339();
        let wizard_state = json!({
            "selections": recovered.selections,
            "result": recovered.result,
            "sources": recovered.sources,
            "captured_at": captured_at,
        })
        .to_string();

        tracing::debug!(
            %lead_type,
            sources = recovered.sources.len(),
            attachments = form.files.len(),
            "Built lead payload"
        );

        LeadPayload {
            source_site: self.settings.source_site.clone(),
            org_type,
            lead_type,
            org_name: field("org_name"),
            full_name: field("full_name"),
            role: field("role"),
            email: field("email"),
            phone: field("phone"),
            city: field("city"),
            message: field("message"),
            source_url,
            timestamp: captured_at,
            wizard_state,
            attachments: form.files.clone(),
        }
    }
}

/// Path part of a page URL; anything that is not a URL is taken as a path.
fn page_path(source_url: &str) -> String {
    match url::Url::parse(source_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => source_url.to_string(),
    }
}

/// Trimmed form value for a payload field, then the saved contact, then empty.
fn resolve_field(
    payload_name: &str,
    fields: &BTreeMap<String, String>,
    contact: Option<&Contact>,
) -> String {
    let names = FORM_FIELDS
        .iter()
        .find(|(name, _)| *name == payload_name)
        .map(|(_, names)| *names)
        .unwrap_or(&[]);

    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .or_else(|| {
            let contact = contact?;
            names
                .iter()
                .filter_map(|name| contact.field(name))
                .map(str::trim)
                .find(|v| !v.is_empty())
        })
        .unwrap_or_default()
        .to_string()
}
