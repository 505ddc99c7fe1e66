//! Command implementations for the `pharmadesk` CLI.
//!
//! Commands are generic over [`Transport`](pharmadesk_client::Transport) so
//! they run the same against the HTTP backend and a scripted one.

use std::fmt;

use clap::ValueEnum;
use pharmadesk_client::ApiError;
use pharmadesk_core::{ConfigError, FormValues};
use serde::Serialize;
use serde_json::Value;

/// `resolve-alert`.
pub mod alerts;

/// `list`, `get`, `create`, `update` and `delete` over any [`Resource`].
pub mod crud;

/// `dashboard`: comparison cards, fulfillment and best sellers.
pub mod dashboard;

/// `invoicing`: fiscal data completeness of one client.
pub mod invoicing;

/// `login`.
pub mod login;

/// Backend collections reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Clients,
    Suppliers,
    Reports,
    Roles,
    Users,
    Alerts,
}

#[derive(Debug)]
pub enum CommandError {
    Api(ApiError),
    Config(ConfigError),
    Output(serde_json::Error),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Api(e) => f.write_str(&e.user_message()),
            CommandError::Config(e) => write!(f, "configuration: {e}"),
            CommandError::Output(e) => write!(f, "could not render output: {e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ApiError> for CommandError {
    fn from(e: ApiError) -> Self {
        CommandError::Api(e)
    }
}

impl From<ConfigError> for CommandError {
    fn from(e: ConfigError) -> Self {
        CommandError::Config(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Output(e)
    }
}

/// Parse one `--field key=value` argument. The value may be empty; a blank
/// optional field is left out of the payload, so an update keeps the stored
/// value unchanged.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Collect parsed fields into form state. Later duplicates win.
pub fn form_from_fields(fields: &[(String, String)]) -> FormValues {
    fields
        .iter()
        .fold(FormValues::new(), |form, (key, value)| {
            form.with(key.as_str(), value.as_str())
        })
}

pub(crate) fn to_json(value: &impl Serialize) -> Result<Value, CommandError> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields() {
        assert_eq!(
            parse_field("name=Acme"),
            Ok(("name".to_string(), "Acme".to_string()))
        );
        assert_eq!(
            parse_field("email="),
            Ok(("email".to_string(), String::new()))
        );
        assert_eq!(
            parse_field("data={\"a\"=1}"),
            Ok(("data".to_string(), "{\"a\"=1}".to_string()))
        );
        assert!(parse_field("name").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn later_fields_win() {
        let fields = vec![
            ("name".to_string(), "A".to_string()),
            ("name".to_string(), "Acme".to_string()),
        ];
        let form = form_from_fields(&fields);
        assert_eq!(form.text("name"), Some("Acme"));
    }

    #[test]
    fn api_errors_render_user_message() {
        let err = CommandError::from(ApiError::Conflict {
            field: "name".into(),
            message: "already exists".into(),
        });
        assert_eq!(err.to_string(), "name: already exists");
    }
}
