//! Field validation rules for the login and payment forms.
//!
//! Everything in here is pure: no state, no I/O, no clock. The form models
//! call these on every edit (to derive enablement and inline errors) and once
//! more on submit (the strict check that gates the backend).
//!
//! Amounts are handled as `rust_decimal::Decimal` so that `13.50` stays
//! `13.50` with scale 2; binary floats would make the "at most two decimal
//! places" rule meaningless.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Minimum number of characters a password needs at submit time.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum number of fractional digits an amount may carry.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// A local (synchronous) validation failure.
///
/// The `Display` output is the user-facing message; forms surface it
/// verbatim in the error banner and, for the amount field, inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters.")]
    WeakPassword,
    /// Blank and unparseable amounts share this variant.
    #[error("Amount is required.")]
    AmountRequired,
    #[error("Amount must be greater than 0.")]
    AmountMustBePositive,
    #[error("Amount can have at most 2 decimal places.")]
    TooManyDecimals,
    /// Well-formed, but beyond what a decimal amount can hold.
    #[error("Amount is too large.")]
    AmountTooLarge,
}

/// Strict credential check run on submit.
///
/// The email is checked first; only one failure is reported at a time.
/// On success the trimmed email is returned, which is what gets submitted.
pub fn validate_email_password(email: &str, password: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if !(email.contains('@') && email.contains('.')) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword);
    }
    Ok(email.to_string())
}

/// Loose check driving the login button while typing.
///
/// Deliberately weaker than [`validate_email_password`]: `"bad"` / `"x"`
/// enables the button and is only rejected once submitted.
pub fn login_enabled(email: &str, password: &str) -> bool {
    !email.trim().is_empty() && !password.is_empty()
}

/// Normalize raw amount input into a numeric candidate.
///
/// Commas become periods and everything except ASCII digits and periods is
/// dropped. A single leading minus sign survives so negative input is
/// reported as non-positive instead of silently losing its sign.
pub fn sanitize_amount(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };

    let body = rest
        .chars()
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.');

    sign.chars().chain(body).collect()
}

/// Sanitize and validate an amount.
///
/// Order of checks: parse (blank or malformed => `AmountRequired`), sign,
/// then scale. A well-formed literal outside the decimal range is
/// `AmountTooLarge` unless the sign or scale rule already rejects it.
pub fn validate_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let candidate = sanitize_amount(raw);
    let amount = parse_amount(&candidate)?;

    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountMustBePositive);
    }
    if amount.scale() > MAX_AMOUNT_SCALE {
        return Err(ValidationError::TooManyDecimals);
    }
    Ok(amount)
}

/// The pay button mirrors full validation exactly.
pub fn payment_enabled(raw: &str) -> bool {
    validate_amount(raw).is_ok()
}

/// Parse a sanitized candidate of the shape `-?digits*(.digits*)?`.
///
/// At least one digit is required; `"1."` and `".5"` are accepted, `"."`
/// and `"1.2.3"` are not. The fractional digits are kept as typed so
/// trailing zeros count towards the scale.
fn parse_amount(candidate: &str) -> Result<Decimal, ValidationError> {
    let (sign, unsigned) = match candidate.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", candidate),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let only_digits = whole
        .chars()
        .chain(fraction.chars())
        .all(|c| c.is_ascii_digit());
    if !only_digits || (whole.is_empty() && fraction.is_empty()) {
        return Err(ValidationError::AmountRequired);
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let normalized = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };
    Decimal::from_str(&normalized).map_err(|_| {
        let nonzero = whole.chars().chain(fraction.chars()).any(|c| c != '0');
        if !sign.is_empty() && nonzero {
            ValidationError::AmountMustBePositive
        } else if fraction.len() > MAX_AMOUNT_SCALE as usize {
            ValidationError::TooManyDecimals
        } else {
            ValidationError::AmountTooLarge
        }
    })
}
