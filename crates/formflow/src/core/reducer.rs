//! Pure phase reducer.
//!
//! `reduce` maps the current snapshot and one event to the next snapshot plus
//! the effects to run. It returns `None` when the event does not apply
//! (editing while `Loading`, a stale completion, dismissing without an
//! error, ...); the container then leaves the state untouched and observers
//! are not notified.
//!
//! Policy:
//!   - No side effects, no clock, no randomness.
//!   - Never panics; unknown combinations are ignored.
//!   - Completions are accepted only for the ticket currently `Loading`.

use tracing::trace;

use super::effects::{Effect, SubmissionOutcome};
use super::state::{FormState, Ticket};
use crate::form::Form;

#[derive(Debug)]
pub enum FormEvent<F: Form> {
    /// A field changed in the view.
    Edit(F::Edit),
    /// Submit pressed. The container allocates `ticket` up front.
    Submit { ticket: Ticket },
    DismissError,
    /// A backend call started under `ticket` resolved.
    Completed {
        ticket: Ticket,
        outcome: SubmissionOutcome,
    },
    /// Screen remounted: back to the initial state.
    Reset,
}

impl<F: Form> FormEvent<F> {
    pub fn label(&self) -> &'static str {
        match self {
            FormEvent::Edit(_) => "edit",
            FormEvent::Submit { .. } => "submit",
            FormEvent::DismissError => "dismiss_error",
            FormEvent::Completed { .. } => "completed",
            FormEvent::Reset => "reset",
        }
    }
}

#[derive(Debug)]
pub struct Transition<F: Form> {
    pub state: FormState<F>,
    pub effects: Vec<Effect<F>>,
}

impl<F: Form> Transition<F> {
    fn quiet(state: FormState<F>) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

pub fn reduce<F: Form>(state: &FormState<F>, event: FormEvent<F>) -> Option<Transition<F>> {
    let transition = match event {
        FormEvent::Edit(edit) => reduce_edit(state, edit),
        FormEvent::Submit { ticket } => reduce_submit(state, ticket),
        FormEvent::DismissError => reduce_dismiss(state),
        FormEvent::Completed { ticket, outcome } => reduce_completed(state, ticket, outcome),
        FormEvent::Reset => Some(Transition::quiet(FormState::initial())),
    }?;

    // An edit that rewrites a field with the same value is not a change.
    if transition.effects.is_empty() && transition.state == *state {
        trace!(form = F::NAME, "transition is a no-op");
        return None;
    }
    Some(transition)
}

fn reduce_edit<F: Form>(state: &FormState<F>, edit: F::Edit) -> Option<Transition<F>> {
    let (mut form, banner) = match state {
        FormState::Idle(form) => (form.clone(), None),
        FormState::Error { form, message } => (form.clone(), Some(message)),
        FormState::Loading { .. } | FormState::Success(_) => return None,
    };

    let leaves_error = F::edit_leaves_error(&edit);
    form.apply(edit);

    let next = match banner {
        Some(message) if !leaves_error => FormState::Error {
            form,
            message: message.clone(),
        },
        _ => FormState::Idle(form),
    };
    Some(Transition::quiet(next))
}

fn reduce_submit<F: Form>(state: &FormState<F>, ticket: Ticket) -> Option<Transition<F>> {
    let form = match state {
        FormState::Idle(form) | FormState::Error { form, .. } => form,
        FormState::Loading { .. } | FormState::Success(_) => return None,
    };

    match form.validate() {
        Err(error) => {
            let mut form = form.clone();
            form.refresh();
            Some(Transition {
                state: FormState::Error {
                    form,
                    message: error.to_string(),
                },
                effects: vec![Effect::log(format!(
                    "{} rejected locally: {error}",
                    F::NAME
                ))],
            })
        }
        Ok(request) => Some(Transition {
            state: FormState::Loading {
                form: form.clone(),
                ticket,
                request: request.clone(),
            },
            effects: vec![Effect::Submit { ticket, request }],
        }),
    }
}

fn reduce_dismiss<F: Form>(state: &FormState<F>) -> Option<Transition<F>> {
    let FormState::Error { form, .. } = state else {
        return None;
    };
    let mut form = form.clone();
    form.refresh();
    Some(Transition::quiet(FormState::Idle(form)))
}

fn reduce_completed<F: Form>(
    state: &FormState<F>,
    ticket: Ticket,
    outcome: SubmissionOutcome,
) -> Option<Transition<F>> {
    let FormState::Loading {
        form,
        ticket: current,
        request,
    } = state
    else {
        return None;
    };
    if *current != ticket {
        return None;
    }

    let next = match outcome {
        Ok(()) => FormState::Success(F::receipt(request)),
        Err(error) => FormState::Error {
            form: form.clone(),
            message: error.to_string(),
        },
    };
    Some(Transition::quiet(next))
}
