//! Settings loading
//!
//! Priority (lowest to highest): built-in defaults > YAML file > `HEXPAD_*`
//! environment variables. Nested keys use a double underscore, e.g.
//! `HEXPAD_LOG__LEVEL=debug`.

use std::path::{Path, PathBuf};

use errors::{HexpadError, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use hexcode::CodeRange;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::serde_helpers::deserialize_string_flexible;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "hexpad.yaml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HEXPAD_";

pub const DEFAULT_INITIAL_TEXT: &str = "ABC";
pub const DEFAULT_INITIAL_CODES: &str = "41 42 43";
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Logging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive, overridden by RUST_LOG
    pub level: String,
    /// Directory for the UI's log file
    pub dir: PathBuf,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
        }
    }
}

/// Runtime settings for the converter front ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Value placed in the text field at startup
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub initial_text: String,
    /// Value placed in the codes field at startup (`41` works unquoted)
    #[serde(deserialize_with = "deserialize_string_flexible")]
    pub initial_codes: String,
    /// Codes the decoder accepts
    pub decode_range: CodeRange,
    /// Enable copy-to-clipboard on output fields
    pub clipboard: bool,
    /// UI redraw/poll interval
    pub tick_rate_ms: u64,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_text: DEFAULT_INITIAL_TEXT.to_string(),
            initial_codes: DEFAULT_INITIAL_CODES.to_string(),
            decode_range: CodeRange::Ascii,
            clipboard: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    /// Layered figment: defaults, then YAML file, then environment
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load settings
    ///
    /// An explicitly given file must exist; the default file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(HexpadError::ConfigNotFound(path.display().to_string()));
                }
                path.to_path_buf()
            },
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        debug!("Loading settings from {:?} + {}* env", path, ENV_PREFIX);
        Self::from_figment(Self::figment(&path))
    }

    /// Extract and validate settings from any figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate_ms == 0 {
            return Err(HexpadError::invalid_config(
                "tick_rate_ms",
                "must be greater than 0",
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(HexpadError::invalid_config("log.level", "must not be empty"));
        }
        Ok(())
    }

    /// Effective settings rendered as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| HexpadError::Internal(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use figment::Jail;

    fn from_yaml(yaml: &str) -> Result<Settings> {
        Settings::from_figment(
            Figment::from(Serialized::defaults(Settings::default())).merge(Yaml::string(yaml)),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.initial_text, "ABC");
        assert_eq!(settings.initial_codes, "41 42 43");
        assert_eq!(settings.decode_range, CodeRange::Ascii);
        assert!(settings.clipboard);
        assert_eq!(settings.tick_rate_ms, 250);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let settings = from_yaml(
            "initial_text: Hi\n\
             decode_range: utf16\n\
             clipboard: false\n\
             log:\n  level: debug\n",
        )
        .unwrap();
        assert_eq!(settings.initial_text, "Hi");
        assert_eq!(settings.initial_codes, "41 42 43");
        assert_eq!(settings.decode_range, CodeRange::Utf16);
        assert!(!settings.clipboard);
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.log.dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = from_yaml("tick_rate_ms: 0\n").unwrap_err();
        assert!(matches!(
            err,
            HexpadError::InvalidConfig { ref field, .. } if field == "tick_rate_ms"
        ));
    }

    #[test]
    fn test_rejects_empty_log_level() {
        let err = from_yaml("log:\n  level: ' '\n").unwrap_err();
        assert!(matches!(
            err,
            HexpadError::InvalidConfig { ref field, .. } if field == "log.level"
        ));
    }

    #[test]
    fn test_bad_range_is_config_error() {
        let err = from_yaml("decode_range: octal\n").unwrap_err();
        assert_eq!(err.category(), errors::ErrorCategory::Configuration);
    }

    #[test]
    fn test_yaml_numeric_text_fields() {
        let settings = from_yaml("initial_codes: 41\ninitial_text: 2024\n").unwrap();
        assert_eq!(settings.initial_codes, "41");
        assert_eq!(settings.initial_text, "2024");
    }

    #[test]
    fn test_load_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "initial_codes: \"48 69\"\ntick_rate_ms: 100\n")?;

            let settings = Settings::load(Some(Path::new("custom.yaml"))).unwrap();
            assert_eq!(settings.initial_codes, "48 69");
            assert_eq!(settings.tick_rate_ms, 100);
            Ok(())
        });
    }

    #[test]
    fn test_default_file_with_unquoted_code() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "initial_codes: 41\n")?;

            let settings = Settings::load(None).unwrap();
            assert_eq!(settings.initial_codes, "41");
            Ok(())
        });
    }

    #[test]
    fn test_env_numeric_code() {
        Jail::expect_with(|jail| {
            jail.set_env("HEXPAD_INITIAL_CODES", "41");
            jail.set_env("HEXPAD_INITIAL_TEXT", "7");

            let settings = Settings::load(None).unwrap();
            assert_eq!(settings.initial_codes, "41");
            assert_eq!(settings.initial_text, "7");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file_and_nests() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                "decode_range: ascii\ntick_rate_ms: 100\nlog:\n  level: warn\n",
            )?;
            jail.set_env("HEXPAD_DECODE_RANGE", "utf16");
            jail.set_env("HEXPAD_CLIPBOARD", "false");
            jail.set_env("HEXPAD_LOG__LEVEL", "debug");
            jail.set_env("HEXPAD_LOG__DIR", "/tmp/hexpad-logs");

            let settings = Settings::load(None).unwrap();
            assert_eq!(settings.decode_range, CodeRange::Utf16);
            assert!(!settings.clipboard);
            assert_eq!(settings.tick_rate_ms, 100);
            assert_eq!(settings.log.level, "debug");
            assert_eq!(settings.log.dir, PathBuf::from("/tmp/hexpad-logs"));
            Ok(())
        });
    }

    #[test]
    fn test_env_invalid_value_names_field() {
        Jail::expect_with(|jail| {
            jail.set_env("HEXPAD_TICK_RATE_MS", "fast");

            let err = Settings::load(None).unwrap_err();
            assert!(matches!(
                err,
                HexpadError::InvalidConfig { ref field, .. } if field == "tick_rate_ms"
            ));
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = Settings::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, HexpadError::ConfigNotFound(_)));
    }

    #[test]
    fn test_to_yaml_round_trips_through_figment() {
        let mut settings = Settings::default();
        settings.initial_text = "xyz".to_string();
        let yaml = settings.to_yaml().unwrap();
        assert_eq!(from_yaml(&yaml).unwrap(), settings);
    }
}
