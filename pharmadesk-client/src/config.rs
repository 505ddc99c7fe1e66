use std::time::Duration;

use garde::Validate;
use pharmadesk_core::config::typed::report_to_config_error;
use pharmadesk_core::{ConfigError, ConfigProperties, DeskConfig, PropertyMeta};

/// `pharmadesk.api` section.
#[derive(Clone, PartialEq, Eq, Validate)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `http://localhost:8000`.
    #[garde(url)]
    pub url: String,
    /// Per-request timeout, in seconds.
    #[garde(range(min = 1, max = 300))]
    pub timeout: u64,
    /// Pre-issued bearer token, for unattended use.
    #[garde(skip)]
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: 30,
            token: None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ConfigProperties for ApiConfig {
    fn prefix() -> &'static str {
        "pharmadesk.api"
    }

    fn properties_metadata() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta {
                key: "url",
                type_name: "String",
                required: true,
                default_value: None,
                description: "Base URL of the backend",
            },
            PropertyMeta {
                key: "timeout",
                type_name: "u64",
                required: false,
                default_value: Some("30"),
                description: "Request timeout in seconds (1-300)",
            },
            PropertyMeta {
                key: "token",
                type_name: "Option<String>",
                required: false,
                default_value: None,
                description: "Pre-issued bearer token",
            },
        ]
    }

    fn from_config(config: &DeskConfig) -> Result<Self, ConfigError> {
        let section = Self {
            url: config.get("pharmadesk.api.url")?,
            timeout: config.get_or("pharmadesk.api.timeout", 30u64),
            token: config.get_or("pharmadesk.api.token", None),
        };
        section
            .validate()
            .map_err(|report| report_to_config_error(Self::prefix(), &report))?;
        Ok(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmadesk_core::ConfigValue;

    fn config(entries: &[(&str, ConfigValue)]) -> DeskConfig {
        let mut config = DeskConfig::empty();
        for (key, value) in entries {
            config.set(key, value.clone());
        }
        config
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[(
            "pharmadesk.api.url",
            ConfigValue::String("http://localhost:8000".into()),
        )]);
        let api = ApiConfig::from_config(&cfg).unwrap();
        assert_eq!(api.timeout, 30);
        assert!(api.token.is_none());
    }

    #[test]
    fn url_is_required() {
        assert_eq!(ApiConfig::missing_keys(&DeskConfig::empty()), vec!["pharmadesk.api.url"]);
        assert!(matches!(
            ApiConfig::from_config(&DeskConfig::empty()),
            Err(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        let cfg = config(&[
            ("pharmadesk.api.url", ConfigValue::String("http://localhost:8000".into())),
            ("pharmadesk.api.timeout", ConfigValue::Integer(0)),
        ]);
        let Err(ConfigError::Validation(details)) = ApiConfig::from_config(&cfg) else {
            panic!("expected validation error");
        };
        assert_eq!(details[0].key, "pharmadesk.api.timeout");
    }

    #[test]
    fn token_is_redacted() {
        let mut api = ApiConfig::new("http://localhost:8000");
        api.token = Some("secret-token".into());
        assert!(!format!("{api:?}").contains("secret-token"));
    }
}
