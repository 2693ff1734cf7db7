//! # formflow
//!
//! State containers for the login, payment and account summary screens.
//!
//! Each form screen is a [`SubmissionMachine`]: field edits are applied
//! synchronously and re-derive validation, submit runs the strict check and
//! then hands a validated snapshot to an async [`SubmissionBackend`]. At most
//! one submission is in flight per container, and results are fenced by a
//! ticket so a late answer never overwrites a newer outcome.
//!
//! ```ignore
//! let login = formflow::login_screen(&FlowSettings::default());
//! login.on_field_changed(LoginEdit::Email("a@b.com".into()));
//! login.on_field_changed(LoginEdit::Password("secret".into()));
//! login.on_submit();
//! let done = login.settled().await;
//! assert_eq!(done.phase(), Phase::Success);
//! ```

pub mod backend;
pub mod core;
pub mod errors;
pub mod form;
pub mod profile;
pub mod settings;
pub mod validation;

pub use crate::backend::{SimulatedLoginBackend, SimulatedPaymentBackend, SubmissionBackend};
pub use crate::core::{FormEvent, FormState, Phase, SubmissionMachine, Ticket};
pub use crate::errors::{LoadError, SettingsError, SubmissionError};
pub use crate::form::{
    Form, LoginEdit, LoginForm, PaymentEdit, PaymentForm, PaymentMethod, PaymentReceipt,
    SignedIn,
};
pub use crate::profile::{
    Profile, ProfileLoader, ProfileScreen, ProfileState, SimulatedProfileLoader,
};
pub use crate::settings::FlowSettings;
pub use crate::validation::ValidationError;

pub type LoginScreen<B = SimulatedLoginBackend> = SubmissionMachine<LoginForm, B>;
pub type PaymentScreen<B = SimulatedPaymentBackend> = SubmissionMachine<PaymentForm, B>;

/// Login container wired to the simulated backend.
pub fn login_screen(settings: &FlowSettings) -> LoginScreen {
    SubmissionMachine::new(
        SimulatedLoginBackend::new(settings.login.clone()),
        settings.submit_timeout(),
    )
}

/// Payment container wired to the simulated gateway.
pub fn payment_screen(settings: &FlowSettings) -> PaymentScreen {
    SubmissionMachine::new(
        SimulatedPaymentBackend::new(settings.payment.clone()),
        settings.submit_timeout(),
    )
}

/// Account summary container wired to the simulated loader.
pub fn profile_screen(settings: &FlowSettings) -> ProfileScreen<SimulatedProfileLoader> {
    ProfileScreen::new(
        SimulatedProfileLoader::new(settings.profile.clone()),
        settings.submit_timeout(),
    )
}
