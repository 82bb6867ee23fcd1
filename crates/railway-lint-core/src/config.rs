//! Configuration types for railway-lint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Severity;

/// Default exclude globs applied when neither the builder nor the config
/// names any.
pub const DEFAULT_EXCLUDES: [&str; 2] = ["**/node_modules/**", "**/dist/**"];

/// Top-level configuration for railway-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (`"recommended"` or `"strict"`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for failure (default: "error").
    /// Violations at or above this severity fail `check` and `check!()`.
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Resolves `fail_on` to a severity, defaulting to [`Severity::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a severity name.
    pub fn fail_on_severity(&self) -> Result<Severity, ConfigError> {
        match self.fail_on.as_deref() {
            None => Ok(Severity::Error),
            Some(name) => Severity::from_name(name).ok_or_else(|| ConfigError::UnknownSeverity {
                value: name.to_string(),
            }),
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns, relative to the root, that files must match.
    /// Empty means the active preset's file set.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns, relative to the root, to exclude from analysis.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include: Vec::new(),
            exclude: default_excludes(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect()
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Deserializes every rule-specific option into a typed options struct.
    ///
    /// `rule` is only used to label the error.
    ///
    /// # Errors
    ///
    /// Returns an error if an option has the wrong shape, or if `T` rejects
    /// a key it does not know.
    pub fn parse_options<T: DeserializeOwned>(&self, rule: &str) -> Result<T, ConfigError> {
        let table: toml::Table = self
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::RuleOptions {
                rule: rule.to_string(),
                message: e.message().to_string(),
            })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Rule options that do not fit the rule's option shape.
    #[error("Invalid options for rule {rule}: {message}")]
    RuleOptions {
        /// Rule the options belong to.
        rule: String,
        /// Deserializer message.
        message: String,
    },

    /// Preset name that no preset answers to.
    #[error("Unknown preset: {name} (expected one of: {expected})")]
    UnknownPreset {
        /// Name given in the config.
        name: String,
        /// Comma-separated list of known presets.
        expected: String,
    },

    /// Severity name that is not `error`, `warning`, or `info`.
    #[error("Unknown severity: {value} (expected error, warning, or info)")]
    UnknownSeverity {
        /// Value given in the config.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    struct Options {
        #[serde(default)]
        exempt_functions: Option<Vec<String>>,
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.analyzer.include.is_empty());
        assert_eq!(
            config.analyzer.exclude,
            vec!["**/node_modules/**", "**/dist/**"]
        );
        assert!(config.rules.is_empty());
    }

    #[test]
    fn parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./web"
exclude = ["**/generated/**"]

[rules.require-result-return-type]
enabled = true
severity = "warning"
exemptFunctions = ["bootstrap"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.analyzer.root, PathBuf::from("./web"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert!(config.is_rule_enabled("require-result-return-type"));
        assert_eq!(
            config.rule_severity("require-result-return-type"),
            Some(Severity::Warning)
        );
        assert_eq!(config.fail_on_severity().ok(), Some(Severity::Warning));

        let rule_config = &config.rules["require-result-return-type"];
        assert_eq!(
            rule_config.options.get("exemptFunctions"),
            Some(&toml::Value::Array(vec!["bootstrap".into()]))
        );
    }

    #[test]
    fn disabled_rule() {
        let config = Config::parse("[rules.require-result-return-type]\nenabled = false\n")
            .expect("Failed to parse");
        assert!(!config.is_rule_enabled("require-result-return-type"));
        assert!(config.is_rule_enabled("some-other-rule"));
    }

    #[test]
    fn parse_options_into_struct() {
        let config = Config::parse(
            "[rules.r]\nseverity = \"info\"\nexemptFunctions = [\"main\", \"boot\"]\n",
        )
        .expect("Failed to parse");
        let options: Options = config.rules["r"].parse_options("r").expect("valid options");
        assert_eq!(
            options.exempt_functions,
            Some(vec!["main".to_string(), "boot".to_string()])
        );
    }

    #[test]
    fn parse_options_rejects_unknown_keys() {
        let config =
            Config::parse("[rules.r]\nexemptFunction = [\"main\"]\n").expect("Failed to parse");
        let err = config.rules["r"]
            .parse_options::<Options>("r")
            .expect_err("unknown key");
        assert!(matches!(err, ConfigError::RuleOptions { ref rule, .. } if rule == "r"));
        assert!(err.to_string().contains("exemptFunction"));
    }

    #[test]
    fn unknown_fail_on_is_an_error() {
        let config = Config::parse("fail_on = \"fatal\"\n").expect("Failed to parse");
        assert!(matches!(
            config.fail_on_severity(),
            Err(ConfigError::UnknownSeverity { .. })
        ));
    }
}
