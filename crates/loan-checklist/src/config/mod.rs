use chrono::NaiveDate;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub checklist: ChecklistConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let reference_date = match env::var("CHECKLIST_REFERENCE_DATE") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::InvalidReferenceDate { value: raw, source })?,
            ),
            _ => None,
        };

        let format = match env::var("CHECKLIST_FORMAT") {
            Ok(raw) => OutputFormat::parse(&raw).ok_or(ConfigError::InvalidFormat(raw))?,
            Err(_) => OutputFormat::Text,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            checklist: ChecklistConfig {
                reference_date,
                format,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Controls how checklists are evaluated and rendered by batch tooling.
#[derive(Debug, Clone)]
pub struct ChecklistConfig {
    /// Pinned evaluation date; tooling falls back to the local date when unset.
    pub reference_date: Option<NaiveDate>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidReferenceDate {
        value: String,
        source: chrono::ParseError,
    },
    InvalidFormat(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReferenceDate { value, .. } => write!(
                f,
                "CHECKLIST_REFERENCE_DATE must be YYYY-MM-DD (found '{value}')"
            ),
            ConfigError::InvalidFormat(value) => {
                write!(f, "CHECKLIST_FORMAT must be 'text' or 'json' (found '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidReferenceDate { source, .. } => Some(source),
            ConfigError::InvalidFormat(_) => None,
        }
    }
}
