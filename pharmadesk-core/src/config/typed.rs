use super::{ConfigError, ConfigValidationDetail, DeskConfig};

/// Metadata about a single configuration property.
#[derive(Debug, Clone)]
pub struct PropertyMeta {
    /// Relative key (e.g., `"timeout"`).
    pub key: &'static str,
    /// Rust type name (e.g., `"u64"`).
    pub type_name: &'static str,
    /// Whether the property has no default and is not an `Option`.
    pub required: bool,
    pub default_value: Option<&'static str>,
    pub description: &'static str,
}

impl PropertyMeta {
    /// Absolute key under `prefix`.
    pub fn full_key(&self, prefix: &str) -> String {
        format!("{prefix}.{}", self.key)
    }
}

/// A strongly-typed configuration section.
///
/// ```ignore
/// impl ConfigProperties for ApiConfig {
///     fn prefix() -> &'static str { "pharmadesk.api" }
///     fn properties_metadata() -> Vec<PropertyMeta> { ... }
///     fn from_config(config: &DeskConfig) -> Result<Self, ConfigError> { ... }
/// }
/// ```
pub trait ConfigProperties: Sized {
    fn prefix() -> &'static str;

    fn properties_metadata() -> Vec<PropertyMeta>;

    fn from_config(config: &DeskConfig) -> Result<Self, ConfigError>;

    /// Keys of required properties missing from `config`.
    fn missing_keys(config: &DeskConfig) -> Vec<String> {
        Self::properties_metadata()
            .iter()
            .filter(|p| p.required)
            .map(|p| p.full_key(Self::prefix()))
            .filter(|key| !config.contains_key(key))
            .collect()
    }
}

/// Turn a garde report on a typed section into `ConfigError::Validation`,
/// prefixing every path with the section prefix.
pub fn report_to_config_error(prefix: &str, report: &garde::Report) -> ConfigError {
    let details = report
        .iter()
        .map(|(path, error)| ConfigValidationDetail {
            key: format!("{prefix}.{path}"),
            message: error.message().to_string(),
        })
        .collect();
    ConfigError::Validation(details)
}
