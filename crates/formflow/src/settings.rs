//! Tunables for the simulated backends and the submission deadline.
//!
//! Every field has a default, so an empty document deserializes into the
//! reference behaviour: 1000 ms login/payment latency, 900 ms profile
//! latency, a 10 s submission deadline.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    /// Upper bound for a single backend call. Without it a backend that never
    /// resolves would pin the form in `Loading`.
    pub submit_timeout_ms: u64,
    pub login: LoginSettings,
    pub payment: PaymentSettings,
    pub profile: ProfileSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginSettings {
    pub latency_ms: u64,
    /// Emails ending with this suffix are always rejected.
    pub failing_email_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    pub latency_ms: u64,
    /// Amount that is always declined, whatever the method.
    pub declined_amount: Decimal,
    /// Wallet payments above this amount are declined.
    pub wallet_limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub latency_ms: u64,
    pub full_name: String,
    pub email: String,
    /// Make every load fail (exercises the retry path).
    pub fail: bool,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            submit_timeout_ms: 10_000,
            login: LoginSettings::default(),
            payment: PaymentSettings::default(),
            profile: ProfileSettings::default(),
        }
    }
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1_000,
            failing_email_suffix: "@fail.com".into(),
        }
    }
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            latency_ms: 1_000,
            declined_amount: Decimal::from(13),
            wallet_limit: Decimal::from(1_000),
        }
    }
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            latency_ms: 900,
            full_name: "Preeti Tundiwala".into(),
            email: "preeti@example.com".into(),
            fail: false,
        }
    }
}

impl FlowSettings {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    /// Reject values the containers cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.submit_timeout_ms == 0 {
            return Err(SettingsError::Invalid {
                key: "submit_timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.payment.wallet_limit <= Decimal::ZERO {
            return Err(SettingsError::Invalid {
                key: "payment.wallet_limit",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

impl LoginSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl PaymentSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl ProfileSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}
