//! Rule presets for common configurations.

use railway_lint_core::{Config, ConfigError, RuleBox};

use crate::require_result_return_type::{
    RequireResultReturnType, ResultReturnTypeOptions, NAME as REQUIRE_RESULT_RETURN_TYPE,
};

/// Files every preset lints, relative to the project root.
pub const PRESET_FILES: [&str; 2] = ["src/**/*.ts", "src/**/*.tsx"];

/// Files every preset skips.
pub const PRESET_IGNORES: [&str; 2] = ["src/**/*.spec.ts", "src/**/*.test.ts"];

const RECOMMENDED_ALLOWED: &[&str] = &["void", "Promise<void>", "never"];
const RECOMMENDED_EXEMPT_FUNCTIONS: &[&str] = &[
    "main",
    "setup",
    "teardown",
    "describe",
    "it",
    "expect",
    "beforeEach",
    "afterEach",
    "beforeAll",
    "afterAll",
    "console.log",
    "console.error",
    "console.warn",
    "console.info",
    "isOk",
    "isErr",
    "constructor",
    "anonymous",
    "ok",
    "err",
];
const RECOMMENDED_EXEMPT_PATTERNS: &[&str] =
    &["^test.*", "^spec.*", ".*Test$", ".*Spec$", "^mock.*", "^stub.*"];

const STRICT_ALLOWED: &[&str] = &["void", "never"];
const STRICT_EXEMPT_FUNCTIONS: &[&str] = &["isOk", "isErr", "constructor", "ok", "err"];
const STRICT_EXEMPT_PATTERNS: &[&str] = &["^test.*", "^spec.*"];

/// Preset configurations for railway-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Lenient: test lifecycle hooks, logging calls and test/mock helpers
    /// are exempt.
    Recommended,
    /// Only `void` and `never` pass, with the built-in exemptions.
    Strict,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::Strict];

    /// Name used in configuration files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
        }
    }

    /// Looks a preset up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Resolves the preset named by a config, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the config names an unknown preset.
    pub fn from_config(config: &Config) -> Result<Option<Self>, ConfigError> {
        config
            .preset
            .as_deref()
            .map(|name| {
                Self::from_name(name).ok_or_else(|| ConfigError::UnknownPreset {
                    name: name.to_string(),
                    expected: Self::ALL.map(Self::name).join(", "),
                })
            })
            .transpose()
    }

    /// Options this preset sets for `require-result-return-type`.
    #[must_use]
    pub fn options(self) -> ResultReturnTypeOptions {
        let (allowed, exempt, patterns) = match self {
            Self::Recommended => (
                RECOMMENDED_ALLOWED,
                RECOMMENDED_EXEMPT_FUNCTIONS,
                RECOMMENDED_EXEMPT_PATTERNS,
            ),
            Self::Strict => (STRICT_ALLOWED, STRICT_EXEMPT_FUNCTIONS, STRICT_EXEMPT_PATTERNS),
        };

        let owned = |items: &[&str]| -> Option<Vec<String>> {
            Some(items.iter().map(ToString::to_string).collect())
        };
        ResultReturnTypeOptions {
            allowed_return_types: owned(allowed),
            exempt_functions: owned(exempt),
            exempt_patterns: owned(patterns),
        }
    }

    /// Include globs of this preset.
    #[must_use]
    pub fn files(self) -> &'static [&'static str] {
        &PRESET_FILES
    }

    /// Exclude globs of this preset.
    #[must_use]
    pub fn ignores(self) -> &'static [&'static str] {
        &PRESET_IGNORES
    }

    /// Returns the rules for this preset, with no user overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset's options fail to compile.
    pub fn rules(self) -> Result<Vec<RuleBox>, ConfigError> {
        let config = Config {
            preset: Some(self.name().to_string()),
            ..Config::default()
        };
        configured_rules(&config)
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Effective options for `require-result-return-type` under `config`.
///
/// Rule defaults, then the config's preset, then the user's
/// `[rules.require-result-return-type]` table, each replacing whole lists.
///
/// # Errors
///
/// Returns an error for an unknown preset or malformed rule options.
pub fn effective_options(config: &Config) -> Result<ResultReturnTypeOptions, ConfigError> {
    let mut options = ResultReturnTypeOptions::defaults();

    if let Some(preset) = Preset::from_config(config)? {
        options = options.overridden_by(preset.options());
    }

    if let Some(rule_config) = config.rules.get(REQUIRE_RESULT_RETURN_TYPE) {
        let user: ResultReturnTypeOptions = rule_config.parse_options(REQUIRE_RESULT_RETURN_TYPE)?;
        options = options.overridden_by(user);
    }

    Ok(options)
}

/// Builds every rule with its options resolved from `config`.
///
/// # Errors
///
/// Returns an error for an unknown preset, malformed rule options, or an
/// invalid `exemptPatterns` regex.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let options = effective_options(config)?;
    let rule = RequireResultReturnType::with_options(&options).map_err(|e| {
        ConfigError::RuleOptions {
            rule: REQUIRE_RESULT_RETURN_TYPE.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(vec![Box::new(rule)])
}

/// Returns all available rules with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(RequireResultReturnType::new())]
}
