//! Form models: the field values of one screen plus everything derived from
//! them.
//!
//! A [`Form`] knows nothing about phases or submissions; it only holds raw
//! input, recomputes derived values (`submit_enabled`, inline errors) and
//! performs the strict submit-time validation. The phase machine in
//! `crate::core` wraps a form in a [`crate::core::state::FormState`].
//!
//! Implementations:
//!   - `login.rs`   : email / password credentials
//!   - `payment.rs` : amount + payment method

pub mod login;
pub mod payment;

use std::fmt;

use crate::validation::ValidationError;

pub use login::{LoginEdit, LoginForm, LoginRequest, SignedIn};
pub use payment::{PaymentEdit, PaymentForm, PaymentMethod, PaymentReceipt, PaymentRequest};

/// Field values and derived state of a single screen.
///
/// `Default` is the state at mount: every field empty.
pub trait Form: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// A single field edit coming from the view.
    type Edit: fmt::Debug + Send + 'static;
    /// Validated snapshot handed to the backend.
    type Request: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;
    /// Success payload, derived from the request captured at submit time.
    type Receipt: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Short name used in log records.
    const NAME: &'static str;

    /// Replace a field and recompute derived values.
    fn apply(&mut self, edit: Self::Edit);

    /// Whether this edit, made while an error banner is shown, returns the
    /// form to `Idle`.
    fn edit_leaves_error(edit: &Self::Edit) -> bool;

    /// Recompute every derived value from the current fields.
    fn refresh(&mut self);

    /// UI-level enablement of the submit button.
    fn is_submit_enabled(&self) -> bool;

    /// Inline error text for forms that have a dedicated field validator.
    fn field_error(&self) -> Option<&str> {
        None
    }

    /// Full validation run on submit.
    fn validate(&self) -> Result<Self::Request, ValidationError>;

    fn receipt(request: &Self::Request) -> Self::Receipt;
}
