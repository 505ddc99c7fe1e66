//! Re-exports of the most commonly used core types.
pub use crate::form::{FormValue, FormValues};
pub use crate::validation::{FieldError, FieldKind, FieldSpec, Rule, RuleCode, Schema, SchemaKind};
pub use crate::{ConfigError, DeskConfig};
