/*!
Declarative side effects emitted by the reducer.

The reducer stays pure and only returns `Vec<Effect<F>>`; the container
(`core::machine`) interprets them. Completion of an async effect re-enters
the reducer as `FormEvent::Completed` carrying the same ticket.
*/

use std::fmt;

use super::state::Ticket;
use crate::errors::SubmissionError;
use crate::form::Form;

/// What a finished backend call reports back.
pub type SubmissionOutcome = Result<(), SubmissionError>;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect<F: Form> {
    /// Hand `request` to the backend. The result must be tagged with `ticket`.
    Submit { ticket: Ticket, request: F::Request },
    /// Informational log line.
    Log(String),
}

impl<F: Form> Effect<F> {
    pub fn log<T: Into<String>>(msg: T) -> Self {
        Effect::Log(msg.into())
    }
}

impl<F: Form> fmt::Display for Effect<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Submit { ticket, .. } => write!(f, "Submit({}#{ticket})", F::NAME),
            Effect::Log(msg) => write!(f, "Log({msg})"),
        }
    }
}
