//! The yes/no questionnaire.
//!
//! - [`steps`]: The fixed step graph
//! - [`Wizard`]: Answer, note, back-navigation and completion over a store
//! - [`outcome`]: Priority-path indications and the outcome page model

mod controller;
pub mod outcome;
pub mod steps;

pub use controller::{
    Dashboard, NOT_AVAILABLE, SUMMARY_TYPE, Transition, Wizard, WizardSummary,
    completion_percent, format_last_updated,
};
pub use outcome::{FALLBACK_INDICATION, Outcome, OutcomeRule};
