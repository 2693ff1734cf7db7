#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use formflow::{Form, SubmissionBackend, SubmissionError};
use tokio::sync::oneshot;

pub const DEADLINE: Duration = Duration::from_secs(10);

/// Wraps another backend and counts how often it was called.
pub struct CountingBackend<B> {
    inner: B,
    calls: AtomicUsize,
}

impl<B> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F, B> SubmissionBackend<F> for CountingBackend<B>
where
    F: Form,
    B: SubmissionBackend<F>,
{
    async fn submit(&self, request: F::Request) -> Result<(), SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.submit(request).await
    }
}

/// Backend whose calls only resolve when the test releases them.
pub struct GatedBackend<F: Form> {
    calls: Mutex<Vec<Call<F>>>,
}

struct Call<F: Form> {
    request: F::Request,
    gate: Option<oneshot::Sender<Result<(), SubmissionError>>>,
}

impl<F: Form> Default for GatedBackend<F> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<F: Form> GatedBackend<F> {
    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> F::Request {
        self.calls.lock().unwrap()[index].request.clone()
    }

    /// Resolve call `index` (0-based, in arrival order).
    pub fn release(&self, index: usize, outcome: Result<(), SubmissionError>) {
        let gate = self.calls.lock().unwrap()[index]
            .gate
            .take()
            .expect("call already released");
        let _ = gate.send(outcome);
    }

    /// Yield until `n` calls have reached the backend.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl<F: Form> SubmissionBackend<F> for GatedBackend<F> {
    async fn submit(&self, request: F::Request) -> Result<(), SubmissionError> {
        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(Call {
            request,
            gate: Some(tx),
        });
        rx.await
            .unwrap_or_else(|_| Err(SubmissionError::Rejected("gate dropped".into())))
    }
}

/// Give spawned tasks a chance to run to completion.
pub async fn drain_tasks() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
