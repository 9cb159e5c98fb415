//! Priority-path indications derived from the answers.

use super::steps::STEPS;
use crate::model::{Answer, StepId, WizardState};
use serde::Serialize;
use std::collections::BTreeMap;

pub type Answers = BTreeMap<StepId, Answer>;

/// Emitted alone when no rule matches.
pub const FALLBACK_INDICATION: &str = "È necessaria un’analisi tecnica preliminare aggiuntiva.";

pub const STATUS_COMPLETE: &str = "Valutazione completata";
pub const STATUS_IN_PROGRESS: &str = "Valutazione in corso";

/// One entry of the rule table: when `matches` holds, `indication` is shown.
pub struct OutcomeRule {
    pub indication: &'static str,
    pub matches: fn(&Answers) -> bool,
}

fn is_yes(answers: &Answers, id: &str) -> bool {
    answers.get(id) == Some(&Answer::Yes)
}

pub static DEFAULT_RULES: &[OutcomeRule] = &[
    OutcomeRule {
        indication: "Percorso CER/CEC prioritario",
        matches: |a| is_yes(a, "immobili") && is_yes(a, "consumi") && is_yes(a, "cer"),
    },
    OutcomeRule {
        indication: "Percorso Conto Termico prioritario",
        matches: |a| is_yes(a, "impianti_termici"),
    },
    OutcomeRule {
        indication: "Percorso Rigenerazione immobiliare prioritario",
        matches: |a| is_yes(a, "rigenerazione"),
    },
];

/// Evaluate every rule in declaration order and keep all matches.
pub fn compose_with(rules: &[OutcomeRule], answers: &Answers) -> Vec<String> {
    let indications: Vec<String> = rules
        .iter()
        .filter(|rule| (rule.matches)(answers))
        .map(|rule| rule.indication.to_string())
        .collect();

    if indications.is_empty() {
        vec![FALLBACK_INDICATION.to_string()]
    } else {
        indications
    }
}

pub fn compose(answers: &Answers) -> Vec<String> {
    compose_with(DEFAULT_RULES, answers)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub step_id: &'static str,
    pub question: &'static str,
    pub answer: Answer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Everything the outcome page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub completion: u32,
    pub status: &'static str,
    pub responses: Vec<Response>,
    pub indications: Vec<String>,
}

impl Outcome {
    pub fn from_state(state: &WizardState, completion: u32) -> Self {
        let responses = STEPS
            .iter()
            .filter_map(|step| {
                let answer = *state.answers.get(step.id)?;
                Some(Response {
                    step_id: step.id,
                    question: step.question,
                    answer,
                    note: state.notes.get(step.id).cloned(),
                })
            })
            .collect();

        Self {
            completion,
            status: if completion >= 100 {
                STATUS_COMPLETE
            } else {
                STATUS_IN_PROGRESS
            },
            responses,
            indications: compose(&state.answers),
        }
    }
}
