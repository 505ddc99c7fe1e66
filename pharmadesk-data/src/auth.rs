//! Login and registration forms.

use std::fmt;
use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema};
use pharmadesk_core::{FieldError, FormValues};
use serde::{Deserialize, Serialize};

use crate::form::to_payload;

static LOGIN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("login")
        .field(FieldSpec::required("username", FieldKind::Text).rule(Rule::Email))
        .field(
            FieldSpec::required("password", FieldKind::Text)
                .verbatim()
                .rule(Rule::MinLength(1)),
        )
});

static REGISTER: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("register")
        .field(FieldSpec::optional("name", FieldKind::Text))
        .field(FieldSpec::required("email", FieldKind::Text).rule(Rule::Email))
        .field(
            FieldSpec::required("password", FieldKind::Text)
                .verbatim()
                .rule(Rule::MinLength(8)),
        )
        .field(
            FieldSpec::required("confirm_password", FieldKind::Text)
                .verbatim()
                .rule(Rule::SameAs("password"))
                .local_only(),
        )
});

pub fn login_schema() -> &'static Schema {
    &LOGIN
}

pub fn register_schema() -> &'static Schema {
    &REGISTER
}

/// Credentials for the token endpoint. Sent form-encoded, not as JSON.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

impl LoginPayload {
    pub fn from_form(form: &FormValues) -> Result<Self, Vec<FieldError>> {
        to_payload(&LOGIN, form)
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RegisterPayload {
    pub fn from_form(form: &FormValues) -> Result<Self, Vec<FieldError>> {
        to_payload(&REGISTER, form)
    }
}

impl fmt::Debug for RegisterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterPayload")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}

/// Bearer token issued by the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[redacted]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmadesk_core::RuleCode;

    #[test]
    fn confirmation_is_checked_but_not_submitted() {
        let form = FormValues::new()
            .with("email", "ana@example.com")
            .with("password", "s3cretpass")
            .with("confirm_password", "s3cretpass");
        let payload = RegisterPayload::from_form(&form).unwrap();
        assert_eq!(payload.email, "ana@example.com");
        assert!(payload.name.is_none());
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("confirm_password").is_none());
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let form = FormValues::new()
            .with("email", "ana@example.com")
            .with("password", "s3cretpass")
            .with("confirm_password", "other-pass");
        let errors = RegisterPayload::from_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "confirm_password");
        assert_eq!(errors[0].code, RuleCode::Mismatch);
    }

    #[test]
    fn short_password_is_rejected() {
        let form = FormValues::new()
            .with("email", "ana@example.com")
            .with("password", "short")
            .with("confirm_password", "short");
        let errors = RegisterPayload::from_form(&form).unwrap_err();
        assert_eq!(errors[0].field, "password");
        assert_eq!(errors[0].code, RuleCode::MinLength);
    }

    #[test]
    fn login_requires_email_username() {
        let form = FormValues::new().with("username", "ana").with("password", "x");
        let errors = LoginPayload::from_form(&form).unwrap_err();
        assert_eq!(errors[0].code, RuleCode::EmailFormat);
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let token = Token {
            access_token: "abc.def".into(),
            token_type: "bearer".into(),
        };
        assert!(!format!("{token:?}").contains("abc.def"));
        let login = LoginPayload {
            username: "ana@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{login:?}").contains("hunter22"));
    }
}
