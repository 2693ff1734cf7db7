//! Point-in-time snapshot of a form and its lifecycle phase.
//!
//! Each phase is its own variant and carries only what is meaningful in it:
//! a `Success` holds the receipt and nothing else, so a password can never
//! outlive a successful login and an error banner can never coexist with a
//! success.

use serde::Serialize;
use strum::Display;

use crate::form::Form;

/// Sequence number of one submission. Allocated monotonically per container.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Phase {
    Idle,
    Loading,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState<F: Form> {
    Idle(F),
    /// Exactly one submission is outstanding, identified by `ticket`.
    /// `request` is the validated snapshot handed to the backend.
    Loading {
        form: F,
        ticket: Ticket,
        request: F::Request,
    },
    Error {
        form: F,
        message: String,
    },
    Success(F::Receipt),
}

impl<F: Form> FormState<F> {
    /// State at mount: empty fields, `Idle`.
    pub fn initial() -> Self {
        FormState::Idle(F::default())
    }

    pub fn phase(&self) -> Phase {
        match self {
            FormState::Idle(_) => Phase::Idle,
            FormState::Loading { .. } => Phase::Loading,
            FormState::Error { .. } => Phase::Error,
            FormState::Success(_) => Phase::Success,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FormState::Loading { .. })
    }

    /// Field values, unless the form already succeeded.
    pub fn form(&self) -> Option<&F> {
        match self {
            FormState::Idle(form)
            | FormState::Loading { form, .. }
            | FormState::Error { form, .. } => Some(form),
            FormState::Success(_) => None,
        }
    }

    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            FormState::Loading { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// Banner text, only present in `Error`.
    pub fn submission_error(&self) -> Option<&str> {
        match self {
            FormState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Inline field error. Suppressed while `Loading` and absent in `Success`.
    pub fn field_error(&self) -> Option<&str> {
        match self {
            FormState::Idle(form) | FormState::Error { form, .. } => form.field_error(),
            FormState::Loading { .. } | FormState::Success(_) => None,
        }
    }

    /// The submit button is never enabled while a submission is in flight.
    pub fn is_submit_enabled(&self) -> bool {
        match self {
            FormState::Idle(form) | FormState::Error { form, .. } => form.is_submit_enabled(),
            FormState::Loading { .. } | FormState::Success(_) => false,
        }
    }

    pub fn receipt(&self) -> Option<&F::Receipt> {
        match self {
            FormState::Success(receipt) => Some(receipt),
            _ => None,
        }
    }
}

impl<F: Form> Default for FormState<F> {
    fn default() -> Self {
        Self::initial()
    }
}
