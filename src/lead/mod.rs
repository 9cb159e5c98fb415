//! Lead capture: payload assembly, form state and delivery.
//!
//! ```text
//! storage areas ─┐
//! page state ────┼─> LeadPayloadBuilder ─> LeadPayload ─> LeadTransport ─> endpoint
//! form fields ───┘                                        (HttpTransport)
//! ```
//!
//! - [`LeadPayloadBuilder`]: Never-failing merge of every questionnaire source
//! - [`LeadForm`]: Submit control, busy label and notices around one submission
//! - [`HttpTransport`]: Single JSON POST, 2xx is success

mod builder;
mod form;
mod submit;

pub use builder::{
    FormSubmission, LEGACY_GLOBALS, LEGACY_HINTS, LeadPayloadBuilder, NAMESPACE_PREFIX,
    PageContext, Recovered, ScanPolicy, SharedState, StorageArea,
};
pub use form::{
    BUSY_LABEL, ControlHandle, DEFAULT_SUBMIT_LABEL, FAILURE_NOTICE, LeadForm, Notice, NoticeKind,
    REGISTERED_NOTICE, SUCCESS_NOTICE, SubmitControl,
};
pub use submit::{HttpTransport, LeadTransport, SubmitError};
