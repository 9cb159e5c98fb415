use super::outcome::Outcome;
use super::steps;
use crate::error::Result;
use crate::model::{Answer, Contact, LeadType, Step, WizardState};
use crate::storage::{AnswerStore, KeyValueStore};
use crate::validation;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Shown on the dashboard when the questionnaire was never saved.
pub const NOT_AVAILABLE: &str = "Non disponibile";

/// Lead family reported in the questionnaire summary.
pub const SUMMARY_TYPE: &str = "terzo_settore";

/// Result of answering the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved to the next step.
    Next(&'static Step),
    /// The answered step was terminal; show the outcome.
    Complete,
}

/// Snapshot of the questionnaire as rendered in the pages' debug panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSummary {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub lead_type: Option<LeadType>,
    pub timestamp: DateTime<Utc>,
    pub current_step_id: String,
    pub answers: BTreeMap<String, Answer>,
    pub notes: BTreeMap<String, String>,
    pub user_contact: Option<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub completion: u32,
    pub last_updated: String,
    pub current_step: &'static str,
    pub answered: usize,
    pub total: usize,
}

/// Format a save time the way the dashboard shows it.
pub fn format_last_updated(last_updated: Option<DateTime<Utc>>) -> String {
    match last_updated {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `round(100 * answered / total)`, halves rounding up.
pub fn completion_percent(answered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((answered * 100 * 2 + total) / (total * 2)) as u32
}

/// State machine over the step graph, persisted through an [`AnswerStore`].
///
/// Every operation reloads the blob and writes it back whole.
pub struct Wizard<S: KeyValueStore> {
    store: AnswerStore<S>,
}

impl<S: KeyValueStore> Wizard<S> {
    pub fn new(store: AnswerStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &AnswerStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AnswerStore<S> {
        &mut self.store
    }

    pub fn state(&self) -> WizardState {
        self.store.load()
    }

    /// The step being asked. Unknown ids resolve to the first step.
    pub fn current_step(&self) -> &'static Step {
        steps::resolve(&self.store.load().current_step_id)
    }

    /// Record `answer` (and a non-blank `note`) for the current step and move on.
    pub fn answer(&mut self, answer: Answer, note: Option<&str>) -> Result<Transition> {
        if let Some(note) = note {
            validation::validate_note(note.trim())?;
        }

        let mut state = self.store.load();
        let step = steps::resolve(&state.current_step_id);
        state.record(step.id, answer, note);

        let transition = match step.next(answer) {
            Some(next_id) => {
                let next = steps::resolve(next_id);
                state.current_step_id = next.id.to_string();
                Transition::Next(next)
            }
            None => {
                state.current_step_id = step.id.to_string();
                Transition::Complete
            }
        };

        self.store.save(state)?;
        tracing::debug!(step = step.id, %answer, ?transition, "Recorded answer");
        Ok(transition)
    }

    /// Attach a note to the current step without answering it.
    ///
    /// Returns `false` when the trimmed note is empty and nothing was saved.
    pub fn save_note(&mut self, note: &str) -> Result<bool> {
        let note = note.trim();
        if note.is_empty() {
            return Ok(false);
        }
        validation::validate_note(note)?;

        let mut state = self.store.load();
        let step = steps::resolve(&state.current_step_id);
        state.notes.insert(step.id.to_string(), note.to_string());
        self.store.save(state)?;
        Ok(true)
    }

    /// Undo the last visit: drop the newest history entry and return to the one before.
    pub fn back(&mut self) -> Result<&'static Step> {
        let mut state = self.store.load();
        let target = if state.history.len() > 1 {
            state.history.pop();
            state
                .history
                .last()
                .map(|id| steps::resolve(id))
                .unwrap_or_else(steps::first)
        } else {
            steps::first()
        };

        state.current_step_id = target.id.to_string();
        self.store.save(state)?;
        Ok(target)
    }

    pub fn completion(&self) -> u32 {
        completion_percent(self.store.load().answered_count(), steps::total())
    }

    pub fn reset(&mut self) -> Result<WizardState> {
        self.store.reset()
    }

    pub fn register_contact(&mut self, contact: Contact) -> Result<WizardState> {
        self.store.set_user_contact(contact)
    }

    pub fn outcome(&self) -> Outcome {
        let state = self.store.load();
        let completion = completion_percent(state.answered_count(), steps::total());
        Outcome::from_state(&state, completion)
    }

    pub fn dashboard(&self) -> Dashboard {
        let state = self.store.load();
        Dashboard {
            completion: completion_percent(state.answered_count(), steps::total()),
            last_updated: format_last_updated(state.last_updated),
            current_step: steps::resolve(&state.current_step_id).id,
            answered: state.answered_count(),
            total: steps::total(),
        }
    }

    pub fn summary(&self, lead_type: Option<LeadType>) -> WizardSummary {
        let state = self.store.load();
        let user_contact = self.store.effective_contact(&state);
        WizardSummary {
            kind: SUMMARY_TYPE,
            lead_type,
            timestamp: Utc::now(),
            current_step_id: steps::resolve(&state.current_step_id).id.to_string(),
            answers: state.answers,
            notes: state.notes,
            user_contact,
        }
    }
}
