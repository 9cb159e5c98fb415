//! Data models for the reserved area.
//!
//! - [`Step`]: One question node of the questionnaire graph
//! - [`WizardState`]: Persisted questionnaire progress
//! - [`Answer`]: Yes/no answer to a step
//! - [`Contact`]: Contact details captured by the reserved-area form
//! - [`LeadPayload`]: Normalized body posted to the lead intake endpoint
//! - [`LeadType`]: Which page a lead originates from

mod contact;
mod lead;
mod state;
mod step;
mod types;

pub use contact::Contact;
pub use lead::{Attachment, LeadPayload};
pub use state::WizardState;
pub use step::{Step, StepId};
pub use types::{Answer, LeadType};
