//! Payment form: amount + payment method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Form;
use crate::validation::{ValidationError, sanitize_amount, validate_amount};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    Wallet,
}

/// Amount form backing the payment screen.
///
/// `amount_input` is stored sanitized. Unlike the login form, the amount has
/// an inline validator whose message is recomputed on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    amount_input: String,
    method: PaymentMethod,
    submit_enabled: bool,
    amount_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEdit {
    Amount(String),
    Method(PaymentMethod),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub amount: Decimal,
    pub method: PaymentMethod,
}

impl PaymentForm {
    pub fn new(amount: &str, method: PaymentMethod) -> Self {
        let mut form = Self {
            amount_input: sanitize_amount(amount),
            method,
            ..Self::default()
        };
        form.refresh();
        form
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }
}

impl Form for PaymentForm {
    type Edit = PaymentEdit;
    type Request = PaymentRequest;
    type Receipt = PaymentReceipt;

    const NAME: &'static str = "payment";

    fn apply(&mut self, edit: PaymentEdit) {
        match edit {
            PaymentEdit::Amount(raw) => self.amount_input = sanitize_amount(&raw),
            PaymentEdit::Method(method) => self.method = method,
        }
        self.refresh();
    }

    fn edit_leaves_error(_edit: &PaymentEdit) -> bool {
        false
    }

    fn refresh(&mut self) {
        let verdict = validate_amount(&self.amount_input);
        self.submit_enabled = verdict.is_ok();
        self.amount_error = verdict.err().map(|e| e.to_string());
    }

    fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn field_error(&self) -> Option<&str> {
        self.amount_error.as_deref()
    }

    fn validate(&self) -> Result<PaymentRequest, ValidationError> {
        let amount = validate_amount(&self.amount_input)?;
        Ok(PaymentRequest {
            amount,
            method: self.method,
        })
    }

    fn receipt(request: &PaymentRequest) -> PaymentReceipt {
        PaymentReceipt {
            amount: request.amount,
            method: request.method,
        }
    }
}
