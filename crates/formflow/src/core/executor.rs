/*!
Task executor for backend calls.

Decouples the reducer's declarative `Effect::Submit` from the runtime side:
every call is spawned on the ambient Tokio runtime, raced against a deadline
and against the executor's shutdown token, and its outcome handed to a
completion callback together with the ticket it was started under.

Guarantees:
- One Tokio task per call; a stale call never delays a newer one.
- The executor never panics intentionally; deadline expiry becomes an error
  value produced through [`Deadline`].
- Once the executor is dropped (or [`TaskExecutor::shutdown`] is called),
  pending calls are abandoned and their callbacks never run.

The executor does not apply results itself. Fencing stale results against
the current ticket is the reducer's job.
*/

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::state::Ticket;
use crate::errors::{LoadError, SubmissionError};

/// Error types that can represent an expired deadline.
pub trait Deadline {
    fn elapsed(after: Duration) -> Self;
}

impl Deadline for SubmissionError {
    fn elapsed(after: Duration) -> Self {
        SubmissionError::TimedOut(after)
    }
}

impl Deadline for LoadError {
    fn elapsed(after: Duration) -> Self {
        LoadError::TimedOut(after)
    }
}

/// Spawns backend calls with a shared deadline and shutdown token.
#[derive(Debug)]
pub struct TaskExecutor {
    label: &'static str,
    deadline: Duration,
    shutdown: CancellationToken,
}

impl TaskExecutor {
    pub fn new(label: &'static str, deadline: Duration) -> Self {
        Self {
            label,
            deadline,
            shutdown: CancellationToken::new(),
        }
    }

    /// Run `work` in the background and report its outcome to `done`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<T, E, Fut, Done>(&self, ticket: Ticket, work: Fut, done: Done) -> JoinHandle<()>
    where
        T: Send + 'static,
        E: Deadline + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        Done: FnOnce(Ticket, Result<T, E>) + Send + 'static,
    {
        let token = self.shutdown.child_token();
        let deadline = self.deadline;
        let label = self.label;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(task = label, ticket, "task abandoned on shutdown");
                    return;
                }
                res = tokio::time::timeout(deadline, work) => match res {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(task = label, ticket, ?deadline, "task exceeded its deadline");
                        Err(E::elapsed(deadline))
                    }
                },
            };
            done(ticket, outcome);
        })
    }

    /// Abandon every pending call.
    fn shutdown(&self) {
        debug!(task = self.label, "abandoning pending calls");
        self.shutdown.cancel();
    }
}

impl Drop for TaskExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
