//! Plain-text views of the published screen states, one line per state.

use std::fmt::Write as _;

use formflow::{Form, FormState, LoginForm, PaymentForm, PaymentReceipt, ProfileState, SignedIn};

/// How a form's fields and its receipt are shown.
pub trait FieldView: Form {
    fn fields(&self) -> String;
    fn receipt_line(receipt: &Self::Receipt) -> String;
}

impl FieldView for LoginForm {
    fn fields(&self) -> String {
        let password = if self.is_password_visible() {
            self.password().to_string()
        } else {
            "*".repeat(self.password().chars().count())
        };
        format!("email={:?} password={:?}", self.email(), password)
    }

    fn receipt_line(receipt: &SignedIn) -> String {
        format!("signed in as {}", receipt.email)
    }
}

impl FieldView for PaymentForm {
    fn fields(&self) -> String {
        format!("amount={:?} method={}", self.amount_input(), self.method())
    }

    fn receipt_line(receipt: &PaymentReceipt) -> String {
        format!("paid {} via {}", receipt.amount, receipt.method)
    }
}

pub fn form_line<F: FieldView>(state: &FormState<F>) -> String {
    let mut line = format!("[{}] {}", F::NAME, state.phase());
    match state {
        FormState::Success(receipt) => {
            let _ = write!(line, " {}", F::receipt_line(receipt));
        }
        _ => {
            if let Some(form) = state.form() {
                let _ = write!(line, " {}", form.fields());
            }
            let submit = if state.is_submit_enabled() { "on" } else { "off" };
            let _ = write!(line, " submit={submit}");
            if let Some(err) = state.field_error() {
                let _ = write!(line, " field-error={err:?}");
            }
            if let Some(err) = state.submission_error() {
                let _ = write!(line, " banner={err:?}");
            }
        }
    }
    line
}

pub fn profile_line(state: &ProfileState) -> String {
    match state {
        ProfileState::Loading { .. } => "[profile] Loading".to_string(),
        ProfileState::Content(p) => format!("[profile] Content {} <{}>", p.full_name, p.email),
        ProfileState::Error { message } => format!("[profile] Error banner={message:?}"),
    }
}

/// Prints lines to stdout, skipping a line identical to the previous one.
#[derive(Debug, Default)]
pub struct TextView {
    last: Option<String>,
    lines: Vec<String>,
}

impl TextView {
    pub fn show(&mut self, line: String) {
        if self.last.as_deref() == Some(line.as_str()) {
            return;
        }
        println!("{line}");
        self.lines.push(line.clone());
        self.last = Some(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
