pub mod config;
pub mod form;
pub mod logging;
pub mod prelude;
pub mod validation;

pub use config::{
    ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver, DeskConfig,
    FromConfigValue, PropertyMeta, SecretResolver,
};
pub use form::{FormValue, FormValues};
pub use logging::{init_tracing, try_init_tracing, LogFormat, LogSettings};
pub use validation::{FieldError, FieldKind, FieldSpec, Rule, RuleCode, Schema, SchemaKind};
