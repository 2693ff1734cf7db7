//! The state container behind one screen.
//!
//! `SubmissionMachine` owns the current `FormState` inside a
//! `tokio::sync::watch` channel. Views read it synchronously via
//! [`SubmissionMachine::snapshot`] or subscribe for pushes (last value wins).
//!
//! Every event, including backend completions, goes through
//! [`reduce`](super::reducer::reduce) inside `watch::Sender::send_if_modified`,
//! i.e. under the channel's write lock. The ticket comparison for a
//! completion and the state update it causes therefore happen atomically
//! with respect to any other event.
//!
//! Dropping the machine drops its executor, which abandons in-flight calls;
//! their results are never applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::effects::{Effect, SubmissionOutcome};
use super::executor::TaskExecutor;
use super::reducer::{FormEvent, reduce};
use super::state::{FormState, Ticket};
use crate::backend::SubmissionBackend;
use crate::form::Form;

pub struct SubmissionMachine<F: Form, B> {
    shared: Arc<Shared<F, B>>,
}

struct Shared<F: Form, B> {
    state: watch::Sender<FormState<F>>,
    backend: Arc<B>,
    tickets: AtomicU64,
    executor: TaskExecutor,
}

impl<F, B> SubmissionMachine<F, B>
where
    F: Form,
    B: SubmissionBackend<F> + 'static,
{
    /// Mount a fresh container. Must be called inside a Tokio runtime.
    pub fn new(backend: B, deadline: Duration) -> Self {
        let (state, _) = watch::channel(FormState::initial());
        Self {
            shared: Arc::new(Shared {
                state,
                backend: Arc::new(backend),
                tickets: AtomicU64::new(0),
                executor: TaskExecutor::new(F::NAME, deadline),
            }),
        }
    }

    /// Replace one field. Ignored while `Loading` or after `Success`.
    pub fn on_field_changed(&self, edit: F::Edit) {
        self.shared.dispatch(FormEvent::Edit(edit));
    }

    /// Validate and, if valid, start the backend call without waiting for it.
    pub fn on_submit(&self) {
        let ticket = self.shared.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        self.shared.dispatch(FormEvent::Submit { ticket });
    }

    pub fn on_dismiss_error(&self) {
        self.shared.dispatch(FormEvent::DismissError);
    }

    /// Return to the mount state. A submission still in flight becomes stale.
    pub fn reset(&self) {
        self.shared.dispatch(FormEvent::Reset);
    }

    pub fn snapshot(&self) -> FormState<F> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState<F>> {
        self.shared.state.subscribe()
    }

    /// Wait until no submission is in flight and return that state.
    pub async fn settled(&self) -> FormState<F> {
        let mut rx = self.subscribe();
        let settled = rx.wait_for(|state| !state.is_loading()).await;
        match settled {
            Ok(state) => (*state).clone(),
            // The sender lives in `self`; it cannot be gone.
            Err(_) => self.snapshot(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.shared.backend
    }
}

impl<F, B> Shared<F, B>
where
    F: Form,
    B: SubmissionBackend<F> + 'static,
{
    fn dispatch(self: &Arc<Self>, event: FormEvent<F>) {
        let label = event.label();
        let mut effects = Vec::new();

        let changed = self.state.send_if_modified(|state| match reduce(state, event) {
            Some(transition) => {
                *state = transition.state;
                effects = transition.effects;
                true
            }
            None => false,
        });

        if changed {
            debug!(
                form = F::NAME,
                event = label,
                phase = %self.state.borrow().phase(),
                "state updated"
            );
        } else {
            debug!(form = F::NAME, event = label, "event ignored");
        }

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self: &Arc<Self>, effect: Effect<F>) {
        match effect {
            Effect::Log(msg) => info!(form = F::NAME, "[effect] {msg}"),
            Effect::Submit { ticket, request } => {
                info!(form = F::NAME, ticket, "submission started");
                let backend = Arc::clone(&self.backend);
                let work = async move { backend.submit(request).await };
                let weak = Arc::downgrade(self);
                self.executor
                    .spawn(ticket, work, move |ticket, outcome| {
                        Self::complete(weak, ticket, outcome)
                    });
            }
        }
    }

    fn complete(weak: Weak<Self>, ticket: Ticket, outcome: SubmissionOutcome) {
        match &outcome {
            Ok(()) => info!(form = F::NAME, ticket, "submission succeeded"),
            Err(error) => warn!(form = F::NAME, ticket, %error, "submission failed"),
        }
        let Some(shared) = weak.upgrade() else {
            debug!(form = F::NAME, ticket, "container gone, result dropped");
            return;
        };
        shared.dispatch(FormEvent::Completed { ticket, outcome });
    }
}
