use super::types::Answer;
use serde::Serialize;

pub type StepId = String;

/// One node of the questionnaire graph.
///
/// Steps are static data, so every field borrows from the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub id: &'static str,
    pub question: &'static str,
    pub help: &'static str,
    pub next_yes: Option<&'static str>,
    pub next_no: Option<&'static str>,
}

impl Step {
    /// Step id to move to after `answer`, or `None` on the terminal step.
    pub fn next(&self, answer: Answer) -> Option<&'static str> {
        match answer {
            Answer::Yes => self.next_yes,
            Answer::No => self.next_no,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_yes.is_none() && self.next_no.is_none()
    }
}
