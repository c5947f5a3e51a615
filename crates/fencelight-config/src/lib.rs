//! Configuration management for fencelight.
//!
//! Parses `fencelight.toml` with serde and discovers it in parent
//! directories when no explicit path is given.
//!
//! ```toml
//! [highlight]
//! theme = "github-dark"
//! line_numbers = { start = 10 }   # or true / false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `highlight.theme` supports `${VAR}` (error if unset) and
//! `${VAR:-default}`. A value without `${` is taken literally.

use std::path::{Path, PathBuf};

use fencelight_directives::LineNumbering;
use fencelight_transform::{DEFAULT_THEME, TransformOptions};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "fencelight.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub highlight: HighlightConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[highlight]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Theme identifier passed to the renderer.
    pub theme: String,
    /// Default line numbering for every block.
    pub line_numbers: Option<LineNumbersConfig>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            line_numbers: None,
        }
    }
}

/// `line_numbers = true` or `line_numbers = { start = N }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LineNumbersConfig {
    Toggle(bool),
    Start { start: u32 },
}

impl LineNumbersConfig {
    fn numbering(self) -> Option<LineNumbering> {
        match self {
            Self::Toggle(true) => Some(LineNumbering::Enabled),
            Self::Toggle(false) => None,
            Self::Start { start } => Some(LineNumbering::StartAt(start)),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`highlight.theme`").
        field: String,
        /// Error message (e.g., "${`THEME`}: environment variable not found").
        message: String,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `fencelight.toml` in the current directory and its parents, and
    /// falls back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        let cwd = std::env::current_dir()?;
        match Self::discover_from(&cwd) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.validate()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values. Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the theme is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.highlight.theme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "highlight.theme cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let theme = &mut self.highlight.theme;
        if !theme.contains("${") {
            return Ok(());
        }
        let expanded = shellexpand::env_with_context(theme.as_str(), |name| {
            std::env::var(name).map(Some)
        })
        .map_err(|err| ConfigError::EnvVar {
            field: "highlight.theme".to_owned(),
            message: format!("${{{}}}: {}", err.var_name, err.cause),
        })?;
        *theme = expanded.into_owned();
        Ok(())
    }

    /// Options for [`HighlightTransform::with_options`](fencelight_transform::HighlightTransform::with_options).
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions::default()
            .theme(self.highlight.theme.clone())
            .line_numbers(self.highlight.line_numbers.and_then(LineNumbersConfig::numbering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.highlight.theme, "github-light");
        assert_eq!(config.highlight.line_numbers, None);
        assert_eq!(config.transform_options(), TransformOptions::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.highlight.theme, "github-light");
    }

    #[test]
    fn test_parse_line_numbers_toggle() {
        let config: Config = toml::from_str("[highlight]\nline_numbers = true\n").unwrap();
        assert_eq!(
            config.transform_options().line_numbers,
            Some(LineNumbering::Enabled)
        );

        let config: Config = toml::from_str("[highlight]\nline_numbers = false\n").unwrap();
        assert_eq!(config.transform_options().line_numbers, None);
    }

    #[test]
    fn test_parse_line_numbers_start() {
        let config: Config =
            toml::from_str("[highlight]\ntheme = \"github-dark\"\nline_numbers = { start = 10 }\n")
                .unwrap();

        let options = config.transform_options();
        assert_eq!(options.theme, "github-dark");
        assert_eq!(options.line_numbers, Some(LineNumbering::StartAt(10)));
    }

    #[test]
    fn test_negative_start_rejected() {
        let result: Result<Config, _> =
            toml::from_str("[highlight]\nline_numbers = { start = -1 }\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_theme() {
        let config: Config = toml::from_str("[highlight]\ntheme = \" \"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("highlight.theme"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[highlight]\ntheme = \"github-dark\"\n");

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.highlight.theme, "github-dark");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[highlight\n");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_expand_env_theme() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("FENCELIGHT_CONFIG_THEME", "github-dark");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[highlight]\ntheme = \"${FENCELIGHT_CONFIG_THEME:-github-light}\"\n",
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.highlight.theme, "github-dark");
        unsafe {
            std::env::remove_var("FENCELIGHT_CONFIG_THEME");
        }
    }

    #[test]
    fn test_expand_env_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FENCELIGHT_CONFIG_MISSING");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[highlight]\ntheme = \"${FENCELIGHT_CONFIG_MISSING}\"\n");

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::EnvVar { .. })
        ));
    }

    #[test]
    fn test_expand_env_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FENCELIGHT_CONFIG_UNSET");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[highlight]\ntheme = \"${FENCELIGHT_CONFIG_UNSET:-github-light}\"\n",
        );

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.highlight.theme, "github-light");
    }

    #[test]
    fn test_expand_env_error_names_variable() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("FENCELIGHT_CONFIG_ABSENT");
        }
        let mut config = Config::default();
        config.highlight.theme = "${FENCELIGHT_CONFIG_ABSENT}".to_owned();

        let err = config.expand_env_vars().unwrap_err();

        assert!(err.to_string().contains("FENCELIGHT_CONFIG_ABSENT"));
        assert!(err.to_string().contains("highlight.theme"));
    }

    #[test]
    fn test_bare_dollar_theme_is_literal() {
        let mut config = Config::default();
        config.highlight.theme = "$THEME".to_owned();

        config.expand_env_vars().unwrap();

        assert_eq!(config.highlight.theme, "$THEME");
    }
}
