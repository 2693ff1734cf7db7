//! Login credentials form.

use std::fmt;

use super::Form;
use crate::validation::{ValidationError, login_enabled, validate_email_password};

/// Email / password form backing the authentication screen.
///
/// `Debug` never prints the password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: String,
    password: String,
    password_visible: bool,
    submit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEdit {
    Email(String),
    Password(String),
    /// Show / hide the password characters. Not a field change.
    TogglePasswordVisibility,
}

/// Credentials as submitted: the email is already trimmed.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub email: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        let mut form = Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        };
        form.refresh();
        form
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_password_visible(&self) -> bool {
        self.password_visible
    }
}

impl Form for LoginForm {
    type Edit = LoginEdit;
    type Request = LoginRequest;
    type Receipt = SignedIn;

    const NAME: &'static str = "login";

    fn apply(&mut self, edit: LoginEdit) {
        match edit {
            LoginEdit::Email(email) => self.email = email,
            LoginEdit::Password(password) => self.password = password,
            LoginEdit::TogglePasswordVisibility => self.password_visible = !self.password_visible,
        }
        self.refresh();
    }

    fn edit_leaves_error(edit: &LoginEdit) -> bool {
        !matches!(edit, LoginEdit::TogglePasswordVisibility)
    }

    fn refresh(&mut self) {
        self.submit_enabled = login_enabled(&self.email, &self.password);
    }

    fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let email = validate_email_password(&self.email, &self.password)?;
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }

    fn receipt(request: &LoginRequest) -> SignedIn {
        SignedIn {
            email: request.email.clone(),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &Redacted(self.password.len()))
            .field("password_visible", &self.password_visible)
            .field("submit_enabled", &self.submit_enabled)
            .finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &Redacted(self.password.len()))
            .finish()
    }
}

struct Redacted(usize);

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} bytes>", self.0)
    }
}
