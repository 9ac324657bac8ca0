use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::table::fields::DEFAULT_DATE_FORMAT;
use crate::table::{ColumnConfiguration, DatePattern, DEFAULT_COLUMNS};

pub const ENTRY_DETAILS: &str = "entry.details";
pub const DATE_FORMAT: &str = "date.format";
pub const CLEAR_CLIPBOARD_ON_EXIT: &str = "clear.clipboard.on.exit.enabled";
pub const CLIPBOARD_TIMEOUT: &str = "clipboard.timeout.seconds";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration must be a JSON object")]
    NotAnObject,
}

/// Flat key/value settings read once at startup.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    values: Map<String, Value>,
}

impl Configuration {
    /// A missing file is an empty configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_json_str(&data),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!(path = %path.display(), keys = config.values.len(), "configuration loaded");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        match serde_json::from_str::<Value>(data)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Accepts a JSON array of strings or one comma separated string.
    pub fn get_array(&self, key: &str, default: &[&str]) -> Vec<String> {
        match self.values.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) => s.split(',').map(|p| p.trim().to_string()).collect(),
            _ => default.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }
}

/// Application settings, resolved from the command line and [`Configuration`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub initial_file: Option<PathBuf>,
    pub columns: ColumnConfiguration,
    pub date_pattern: DatePattern,
    pub clear_clipboard_on_exit: bool,
    pub clipboard_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_configuration(&Configuration::default())
    }
}

impl AppConfig {
    pub fn from_configuration(config: &Configuration) -> Self {
        let default_names: Vec<&str> = DEFAULT_COLUMNS.iter().map(|k| k.name()).collect();
        let names = config.get_array(ENTRY_DETAILS, &default_names);

        Self {
            initial_file: None,
            columns: ColumnConfiguration::resolve(names.as_slice(), &DEFAULT_COLUMNS),
            date_pattern: DatePattern::from_config(&config.get(DATE_FORMAT, DEFAULT_DATE_FORMAT)),
            clear_clipboard_on_exit: config.is(CLEAR_CLIPBOARD_ON_EXIT, false),
            clipboard_timeout: Duration::from_secs(config.get_u64(CLIPBOARD_TIMEOUT, 15)),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("passbook")
        .join("config.json")
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("passbook")
}

/// Confirmation the user still owes an answer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteEntry(Uuid),
    ExitUnsaved,
    NewFileUnsaved,
    OpenUnsaved(PathBuf),
}

impl PendingAction {
    pub fn confirm_message(&self) -> &'static str {
        match self {
            Self::DeleteEntry(_) => "Delete this entry?",
            Self::ExitUnsaved | Self::NewFileUnsaved | Self::OpenUnsaved(_) => {
                "The current file has been modified. Save changes?"
            }
        }
    }

    /// Whether "no" is a distinct answer from "cancel".
    pub fn has_three_answers(&self) -> bool {
        !matches!(self, Self::DeleteEntry(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::FieldKind;

    #[test]
    fn test_typed_accessors() {
        let config = Configuration::from_json_str(
            r#"{
                "entry.details": ["TITLE", "USER"],
                "date.format": "dd.MM.yyyy",
                "clear.clipboard.on.exit.enabled": true,
                "clipboard.timeout.seconds": 30
            }"#,
        )
        .unwrap();

        assert_eq!(config.get_array(ENTRY_DETAILS, &[]), vec!["TITLE", "USER"]);
        assert_eq!(config.get(DATE_FORMAT, "x"), "dd.MM.yyyy");
        assert!(config.is(CLEAR_CLIPBOARD_ON_EXIT, false));
        assert_eq!(config.get_u64(CLIPBOARD_TIMEOUT, 15), 30);
    }

    #[test]
    fn test_defaults_when_missing_or_mistyped() {
        let config = Configuration::from_json_str(r#"{"clear.clipboard.on.exit.enabled": "maybe"}"#).unwrap();
        assert_eq!(config.get(DATE_FORMAT, "yyyy"), "yyyy");
        assert_eq!(config.get_array(ENTRY_DETAILS, &["TITLE"]), vec!["TITLE"]);
        assert!(config.is(CLEAR_CLIPBOARD_ON_EXIT, true));
        assert!(!config.is(CLEAR_CLIPBOARD_ON_EXIT, false));
    }

    #[test]
    fn test_comma_separated_array_and_string_bool() {
        let config = Configuration::from_json_str(
            r#"{"entry.details": "TITLE, URL ,PASSWORD", "clear.clipboard.on.exit.enabled": "true"}"#,
        )
        .unwrap();
        assert_eq!(config.get_array(ENTRY_DETAILS, &[]), vec!["TITLE", "URL", "PASSWORD"]);
        assert!(config.is(CLEAR_CLIPBOARD_ON_EXIT, false));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(Configuration::from_json_str("[1, 2]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(Configuration::from_json_str("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.get(DATE_FORMAT, "d"), "d");
    }

    #[test]
    fn test_app_config_resolution() {
        let config = Configuration::from_json_str(
            r#"{ "entry.details": ["PASSWORD", "NOPE", "TITLE"], "date.format": "qq" }"#,
        )
        .unwrap();

        let app_config = AppConfig::from_configuration(&config);
        assert_eq!(app_config.columns.kinds(), &[FieldKind::Password, FieldKind::Title]);
        assert_eq!(app_config.date_pattern, DatePattern::default());
        assert!(!app_config.clear_clipboard_on_exit);
        assert_eq!(app_config.clipboard_timeout, Duration::from_secs(15));
        assert_eq!(app_config.columns.position(FieldKind::Url), None);
    }

    #[test]
    fn test_app_config_defaults_show_all_columns() {
        let app_config = AppConfig::from_configuration(&Configuration::default());
        assert_eq!(app_config.columns.kinds(), &DEFAULT_COLUMNS);
    }
}
