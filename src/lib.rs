//! # rts - Reserved-area questionnaire and lead intake client
//!
//! Third-sector organizations answer a short yes/no questionnaire about their
//! buildings, energy use and plans. Progress is kept in a local storage area,
//! summarized into priority-path indications, and sent along with contact
//! details to a remote lead intake endpoint.
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a project in the current directory
//! rts init
//!
//! # Answer the questionnaire interactively
//! rts wizard
//!
//! # See the indications
//! rts outcome
//!
//! # Send a lead
//! rts lead submit -f nome="Maria Rossi" -f email=maria@aurora.org
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`lead`]: Lead payload assembly and submission
//! - [`model`]: Data models (WizardState, Step, Contact, LeadPayload)
//! - [`storage`]: Key-value storage areas and the answer store
//! - [`validation`]: Input validation utilities
//! - [`wizard`]: Questionnaire graph, controller and outcome rules

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.rts.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `RtsError` enum and `Result<T>` type alias.
pub mod error;

/// Lead capture.
///
/// Builds the lead payload from storage, page state and form fields, and posts it.
pub mod lead;

/// Data models for the reserved area.
pub mod model;

/// Storage areas and the questionnaire blob.
pub mod storage;

/// Input validation utilities.
///
/// Validates storage keys, notes and contact fields.
pub mod validation;

/// The yes/no questionnaire.
pub mod wizard;

pub mod logging;
