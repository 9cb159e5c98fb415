//! State of a lead form around a submission: fields, submit control and notice.

use super::builder::{FormSubmission, LeadPayloadBuilder, PageContext};
use super::submit::{LeadTransport, SubmitError};
use crate::model::{Attachment, Contact, LeadPayload, LeadType};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const DEFAULT_SUBMIT_LABEL: &str = "Invia richiesta";
pub const BUSY_LABEL: &str = "Invio in corso...";
pub const SUCCESS_NOTICE: &str = "Richiesta inviata correttamente. Ti ricontatteremo a breve.";
pub const FAILURE_NOTICE: &str = "Invio non riuscito. Riprova più tardi.";
pub const REGISTERED_NOTICE: &str = "Richiesta registrata. Verrai ricontattato.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

/// Read-only view of a form's submit control, shared with whoever renders it.
#[derive(Debug, Clone)]
pub struct ControlHandle(Arc<RwLock<SubmitControl>>);

impl ControlHandle {
    fn new(control: SubmitControl) -> Self {
        Self(Arc::new(RwLock::new(control)))
    }

    pub fn get(&self) -> SubmitControl {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, enabled: bool, label: &str) {
        let mut control = self.0.write().unwrap_or_else(PoisonError::into_inner);
        control.enabled = enabled;
        control.label = label.to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: &str) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.to_string(),
        }
    }
}

/// A contact form as the visitor sees it.
///
/// Nothing stops a second submission while one is in flight on another
/// handle; only this form's control is disabled.
#[derive(Debug)]
pub struct LeadForm {
    pub fields: BTreeMap<String, String>,
    pub hidden: BTreeMap<String, String>,
    pub files: Vec<Attachment>,
    pub lead_type: Option<LeadType>,
    control: ControlHandle,
    idle_label: String,
    notice: Option<Notice>,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LABEL)
    }
}

impl LeadForm {
    pub fn new(submit_label: &str) -> Self {
        Self {
            fields: BTreeMap::new(),
            hidden: BTreeMap::new(),
            files: Vec::new(),
            lead_type: None,
            control: ControlHandle::new(SubmitControl {
                enabled: true,
                label: submit_label.to_string(),
            }),
            idle_label: submit_label.to_string(),
            notice: None,
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_hidden(mut self, name: &str, value: &str) -> Self {
        self.hidden.insert(name.to_string(), value.to_string());
        self
    }

    pub fn control(&self) -> SubmitControl {
        self.control.get()
    }

    /// Handle that keeps tracking the control while a submission is in flight.
    pub fn control_handle(&self) -> ControlHandle {
        self.control.clone()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn submission(&self) -> FormSubmission {
        FormSubmission {
            fields: self.fields.clone(),
            hidden: self.hidden.clone(),
            files: self.files.clone(),
            lead_type: self.lead_type,
        }
    }

    fn begin_submit(&mut self) {
        self.control.set(false, BUSY_LABEL);
    }

    fn finish_submit(&mut self, outcome: &Result<(), SubmitError>) {
        match outcome {
            Ok(()) => {
                // Like a form reset: visible inputs and files clear, hidden inputs stay
                self.fields.clear();
                self.files.clear();
                self.notice = Some(Notice::success(SUCCESS_NOTICE));
            }
            Err(_) => {
                self.notice = Some(Notice::error(FAILURE_NOTICE));
            }
        }
        self.control.set(true, &self.idle_label);
    }

    /// Build the payload from this form and send it once through `transport`.
    pub async fn submit<T: LeadTransport>(
        &mut self,
        builder: &LeadPayloadBuilder<'_>,
        page: &PageContext,
        transport: &T,
    ) -> (LeadPayload, Result<(), SubmitError>) {
        let payload = builder.build(&self.submission(), page);
        self.begin_submit();
        let outcome = transport.send(&payload).await;
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "Lead submission failed");
        }
        self.finish_submit(&outcome);
        (payload, outcome)
    }

    /// Contact record from the reserved-area contact form fields.
    pub fn to_contact(&self) -> Contact {
        let get = |name: &str| self.fields.get(name).cloned().unwrap_or_default();
        Contact {
            nome: get("nome"),
            ruolo: get("ruolo"),
            ente: get("ente"),
            sede: get("sede"),
            citta: get("citta"),
            email: get("email"),
            telefono: get("telefono"),
            messaggio: get("messaggio"),
            privacy: self
                .fields
                .get("privacy")
                .is_some_and(|v| !v.trim().is_empty()),
            ..Contact::new()
        }
    }

    /// Mark the contact as registered locally, without contacting the endpoint.
    pub fn mark_registered(&mut self) {
        self.notice = Some(Notice::success(REGISTERED_NOTICE));
    }
}
