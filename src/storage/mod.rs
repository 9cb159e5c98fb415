//! Storage layer for questionnaire progress.
//!
//! The browser keeps the questionnaire in local storage; here the storage area
//! is injected through the [`KeyValueStore`] trait so the same logic runs over
//! a directory on disk, an in-memory session area, or a test double.
//!
//! ## Layout
//!
//! ```text
//! .rts/local/rts_area_state_v1.json   questionnaire blob (WizardState)
//! .rts/local/userContact.json         standalone contact snapshot
//! ```
//!
//! ## Components
//!
//! - [`KeyValueStore`]: String key-value storage area
//! - [`MemoryStore`]: In-process area, also used as the session area
//! - [`FileStore`]: One file per key under a directory
//! - [`AnswerStore`]: Load/save/reset of the questionnaire blob

mod answers;
mod kv;

pub use answers::{AnswerStore, CONTACT_KEY, STATE_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
