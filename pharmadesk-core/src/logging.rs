use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{ConfigError, ConfigProperties, DeskConfig, PropertyMeta};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// `pharmadesk.log` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

impl ConfigProperties for LogSettings {
    fn prefix() -> &'static str {
        "pharmadesk.log"
    }

    fn properties_metadata() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta {
                key: "format",
                type_name: "String",
                required: false,
                default_value: Some("pretty"),
                description: "Log output format: pretty or json",
            },
            PropertyMeta {
                key: "filter",
                type_name: "String",
                required: false,
                default_value: Some("info"),
                description: "Filter directive used when RUST_LOG is unset",
            },
        ]
    }

    fn from_config(config: &DeskConfig) -> Result<Self, ConfigError> {
        let format_key = "pharmadesk.log.format";
        let format = match config.get::<Option<String>>(format_key) {
            Ok(Some(raw)) => raw.parse().map_err(|_| ConfigError::TypeMismatch {
                key: format_key.to_string(),
                expected: "pretty | json",
            })?,
            Ok(None) | Err(ConfigError::NotFound(_)) => LogFormat::default(),
            Err(e) => return Err(e),
        };
        Ok(Self {
            format,
            filter: config.get_or("pharmadesk.log.filter", "info".to_string()),
        })
    }
}

/// Install the global subscriber, logging to stderr. Panics if one is already set.
pub fn init_tracing(settings: &LogSettings) {
    if let Err(e) = try_init_tracing(settings) {
        panic!("failed to install tracing subscriber: {e}");
    }
}

/// Install the global subscriber, reporting rather than panicking when one
/// is already set.
pub fn try_init_tracing(
    settings: &LogSettings,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter.as_str()));

    match settings.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr);
            Registry::default().with(env_filter).with(fmt_layer).try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr);
            Registry::default().with(env_filter).with(fmt_layer).try_init()
        }
    }
}
