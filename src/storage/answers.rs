use super::kv::KeyValueStore;
use crate::error::Result;
use crate::model::{Contact, WizardState};
use crate::wizard::steps;
use chrono::Utc;

/// Key holding the questionnaire blob.
pub const STATE_KEY: &str = "rts_area_state_v1";

/// Key holding the standalone contact snapshot.
pub const CONTACT_KEY: &str = "userContact";

/// Questionnaire progress stored as a single JSON blob.
///
/// There is no cached copy: every read parses the blob again and every write
/// replaces it whole. Two writers on the same store race last-write-wins.
pub struct AnswerStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AnswerStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the current state. A missing or unparsable blob yields a fresh
    /// state; a parsable one keeps every field that still makes sense.
    pub fn load(&self) -> WizardState {
        let first = steps::first().id;
        let Some(raw) = self.store.get(STATE_KEY) else {
            return WizardState::new(first);
        };

        match serde_json::from_str::<WizardState>(&raw) {
            Ok(mut state) => {
                if state.current_step_id.is_empty() {
                    state.current_step_id = first.to_string();
                }
                state
            }
            Err(e) => {
                tracing::warn!(key = STATE_KEY, error = %e, "Discarding unreadable wizard state");
                WizardState::new(first)
            }
        }
    }

    /// Stamp `last_updated` and replace the stored blob.
    pub fn save(&mut self, mut state: WizardState) -> Result<WizardState> {
        state.last_updated = Some(Utc::now());
        let content = serde_json::to_string(&state)?;
        self.store.set(STATE_KEY, &content)?;
        tracing::debug!(
            step = %state.current_step_id,
            answered = state.answered_count(),
            "Saved wizard state"
        );
        Ok(state)
    }

    /// Drop both the questionnaire blob and the contact snapshot.
    pub fn reset(&mut self) -> Result<WizardState> {
        self.store.remove(STATE_KEY)?;
        self.store.remove(CONTACT_KEY)?;
        tracing::info!("Wizard state reset");
        Ok(self.load())
    }

    /// Contact snapshot stored on its own, if present and readable.
    pub fn stored_contact(&self) -> Option<Contact> {
        let raw = self.store.get(CONTACT_KEY)?;
        serde_json::from_str(&raw)
            .inspect_err(|e| tracing::debug!(error = %e, "Ignoring unreadable contact snapshot"))
            .ok()
    }

    /// Store the contact both standalone and inside the questionnaire blob.
    pub fn set_user_contact(&mut self, contact: Contact) -> Result<WizardState> {
        self.store
            .set(CONTACT_KEY, &serde_json::to_string(&contact)?)?;
        let mut state = self.load();
        state.user_contact = Some(contact);
        self.save(state)
    }

    /// Contact from the blob, falling back to the standalone snapshot.
    pub fn effective_contact(&self, state: &WizardState) -> Option<Contact> {
        state.user_contact.clone().or_else(|| self.stored_contact())
    }
}
