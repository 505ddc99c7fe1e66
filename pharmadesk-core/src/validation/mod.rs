mod rule;
mod schema;

use serde::{Deserialize, Serialize};

pub use rule::Rule;
pub use schema::{FieldKind, FieldSpec, Schema, SchemaKind};

// ── Error types ────────────────────────────────────────────

/// Identifier of the rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    Required,
    MinLength,
    EmailFormat,
    PositiveInteger,
    OneOf,
    Pattern,
    IsoDatetime,
    Mismatch,
    TypeMismatch,
    /// Rejected by the backend's own validation.
    Server,
}

impl RuleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::Required => "required",
            RuleCode::MinLength => "min_length",
            RuleCode::EmailFormat => "email_format",
            RuleCode::PositiveInteger => "positive_integer",
            RuleCode::OneOf => "one_of",
            RuleCode::Pattern => "pattern",
            RuleCode::IsoDatetime => "iso_datetime",
            RuleCode::Mismatch => "mismatch",
            RuleCode::TypeMismatch => "type_mismatch",
            RuleCode::Server => "server",
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: RuleCode,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}
