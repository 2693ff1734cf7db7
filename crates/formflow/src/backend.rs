//! Submission backends.
//!
//! The phase machine only sees [`SubmissionBackend`]. The simulated
//! implementations below stand in for an authorization service and a
//! payment gateway: a fixed latency and a deterministic rule deciding
//! failure. Swapping them for real clients does not touch the machine.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SubmissionError;
use crate::form::{Form, LoginForm, LoginRequest, PaymentForm, PaymentMethod, PaymentRequest};
use crate::settings::{LoginSettings, PaymentSettings};

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";
pub const PAYMENT_FAILED: &str = "Payment failed. Please try a different amount or method.";

/// Async capability that accepts a validated request.
#[async_trait]
pub trait SubmissionBackend<F: Form>: Send + Sync {
    async fn submit(&self, request: F::Request) -> Result<(), SubmissionError>;
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedLoginBackend {
    settings: LoginSettings,
}

impl SimulatedLoginBackend {
    pub fn new(settings: LoginSettings) -> Self {
        Self { settings }
    }

    fn accepts(&self, request: &LoginRequest) -> bool {
        !request.email.ends_with(&self.settings.failing_email_suffix)
    }
}

#[async_trait]
impl SubmissionBackend<LoginForm> for SimulatedLoginBackend {
    async fn submit(&self, request: LoginRequest) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.settings.latency()).await;
        debug!(email = %request.email, "simulated login resolved");
        if self.accepts(&request) {
            Ok(())
        } else {
            Err(SubmissionError::Rejected(LOGIN_FAILED.into()))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedPaymentBackend {
    settings: PaymentSettings,
}

impl SimulatedPaymentBackend {
    pub fn new(settings: PaymentSettings) -> Self {
        Self { settings }
    }

    /// The declined amount must match as typed: with the default `13`,
    /// `13.0` and `13.00` go through.
    fn accepts(&self, request: &PaymentRequest) -> bool {
        let sentinel = self.settings.declined_amount;
        let declined = request.amount == sentinel && request.amount.scale() == sentinel.scale();
        let over_wallet_limit =
            request.method == PaymentMethod::Wallet && request.amount > self.settings.wallet_limit;
        !(declined || over_wallet_limit)
    }
}

#[async_trait]
impl SubmissionBackend<PaymentForm> for SimulatedPaymentBackend {
    async fn submit(&self, request: PaymentRequest) -> Result<(), SubmissionError> {
        tokio::time::sleep(self.settings.latency()).await;
        debug!(amount = %request.amount, method = %request.method, "simulated payment resolved");
        if self.accepts(&request) {
            Ok(())
        } else {
            Err(SubmissionError::Rejected(PAYMENT_FAILED.into()))
        }
    }
}
