mod common;

use std::str::FromStr;

use common::{CountingBackend, DEADLINE};
use formflow::backend::PAYMENT_FAILED;
use formflow::settings::PaymentSettings;
use formflow::{
    FormState, PaymentEdit, PaymentForm, PaymentMethod, PaymentReceipt, Phase,
    SimulatedPaymentBackend, SubmissionMachine,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

type Payment = SubmissionMachine<PaymentForm, CountingBackend<SimulatedPaymentBackend>>;

fn payment() -> Payment {
    SubmissionMachine::new(
        CountingBackend::new(SimulatedPaymentBackend::new(PaymentSettings::default())),
        DEADLINE,
    )
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test(start_paused = true)]
async fn comma_amount_is_sanitized_and_paid() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("13,50".into()));

    let state = pay.snapshot();
    assert_eq!(state.form().map(PaymentForm::amount_input), Some("13.50"));
    assert!(state.is_submit_enabled());
    assert_eq!(state.field_error(), None);

    pay.on_submit();
    let done = pay.settled().await;
    assert_eq!(
        done,
        FormState::Success(PaymentReceipt {
            amount: dec("13.50"),
            method: PaymentMethod::Card,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn inline_errors_follow_typing() {
    let pay = payment();
    let cases = [
        ("abc", Some("Amount is required.")),
        ("-5", Some("Amount must be greater than 0.")),
        ("10.999", Some("Amount can have at most 2 decimal places.")),
        ("10.99", None),
    ];
    for (raw, expected) in cases {
        pay.on_field_changed(PaymentEdit::Amount(raw.into()));
        let state = pay.snapshot();
        assert_eq!(state.phase(), Phase::Idle, "input {raw:?}");
        assert_eq!(state.field_error(), expected, "input {raw:?}");
        assert_eq!(state.is_submit_enabled(), expected.is_none(), "input {raw:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn invalid_amount_errors_without_backend() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("10.999".into()));
    pay.on_submit();

    let state = pay.snapshot();
    assert_eq!(
        state.submission_error(),
        Some("Amount can have at most 2 decimal places.")
    );
    assert_eq!(
        state.field_error(),
        Some("Amount can have at most 2 decimal places.")
    );
    assert_eq!(pay.backend().calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn sentinel_amount_declined_for_every_method() {
    for method in [PaymentMethod::Card, PaymentMethod::Upi, PaymentMethod::Wallet] {
        let pay = payment();
        pay.on_field_changed(PaymentEdit::Amount("13".into()));
        pay.on_field_changed(PaymentEdit::Method(method));
        pay.on_submit();
        assert_eq!(pay.snapshot().phase(), Phase::Loading);

        let done = pay.settled().await;
        assert_eq!(done.submission_error(), Some(PAYMENT_FAILED), "{method}");
        assert_eq!(done.field_error(), None);
        assert_eq!(pay.backend().calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn sentinel_with_trailing_zeros_is_paid() {
    let cases = [
        ("13", Phase::Error),
        ("13.0", Phase::Success),
        ("13,00", Phase::Success),
    ];
    for (raw, expected) in cases {
        let pay = payment();
        pay.on_field_changed(PaymentEdit::Amount(raw.into()));
        pay.on_submit();
        assert_eq!(pay.settled().await.phase(), expected, "input {raw:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn wallet_limit_declines_large_wallet_payments() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("1000.01".into()));
    pay.on_field_changed(PaymentEdit::Method(PaymentMethod::Wallet));
    pay.on_submit();
    assert_eq!(pay.settled().await.phase(), Phase::Error);

    pay.on_dismiss_error();
    pay.on_field_changed(PaymentEdit::Method(PaymentMethod::Card));
    pay.on_submit();
    let done = pay.settled().await;
    assert_eq!(
        done.receipt(),
        Some(&PaymentReceipt {
            amount: dec("1000.01"),
            method: PaymentMethod::Card,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn editing_in_error_keeps_banner_and_updates_inline_error() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("13".into()));
    pay.on_submit();
    assert_eq!(pay.settled().await.phase(), Phase::Error);

    pay.on_field_changed(PaymentEdit::Amount("".into()));
    let state = pay.snapshot();
    assert_eq!(state.phase(), Phase::Error);
    assert_eq!(state.submission_error(), Some(PAYMENT_FAILED));
    assert_eq!(state.field_error(), Some("Amount is required."));
    assert!(!state.is_submit_enabled());
}

#[tokio::test(start_paused = true)]
async fn dismiss_keeps_invalid_amount_invalid() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("0".into()));
    pay.on_submit();
    assert_eq!(pay.snapshot().phase(), Phase::Error);

    pay.on_dismiss_error();
    let state = pay.snapshot();
    assert_eq!(state.phase(), Phase::Idle);
    assert_eq!(state.submission_error(), None);
    assert_eq!(state.field_error(), Some("Amount must be greater than 0."));
    assert!(!state.is_submit_enabled());
}

#[tokio::test(start_paused = true)]
async fn retry_after_error_runs_a_fresh_cycle() {
    let pay = payment();
    pay.on_field_changed(PaymentEdit::Amount("13".into()));
    pay.on_submit();
    assert_eq!(pay.settled().await.phase(), Phase::Error);

    pay.on_field_changed(PaymentEdit::Amount("14".into()));
    pay.on_submit();
    assert_eq!(pay.snapshot().phase(), Phase::Loading);
    assert_eq!(pay.settled().await.phase(), Phase::Success);
    assert_eq!(pay.backend().calls(), 2);
}
