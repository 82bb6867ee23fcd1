//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `railway_lint::check!()`.

use railway_lint_core::{Analyzer, AnalyzerError, Config, ConfigError, LintResult, Severity};
use railway_lint_rules::{configured_rules, Preset};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["railway-lint.toml", ".railway-lint.toml"];

/// Arguments accepted by `check!()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Preset name, overriding the config's `preset`.
    pub preset: Option<&'static str>,
    /// Config path, absolute or relative to the project root.
    pub config: Option<&'static str>,
    /// Failure threshold, overriding the config's `fail_on`.
    pub fail_on: Option<&'static str>,
}

#[derive(Debug, Error)]
enum RunnerError {
    #[error("failed to read config from {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// Runs railway-lint analysis as part of `cargo test`.
///
/// # Panics
///
/// Panics if violations at or above the effective `fail_on` severity are
/// found, or if configuration or analysis fails.
pub fn run_check(options: &CheckOptions) {
    let root = find_project_root();
    let (result, fail_on) =
        evaluate(&root, options).unwrap_or_else(|e| panic!("railway-lint: {e}"));

    if result.has_violations_at(fail_on) {
        panic!("{}", result.format_test_report(fail_on));
    }
}

/// Loads the config under `root`, applies the macro arguments and analyzes.
fn evaluate(root: &Path, options: &CheckOptions) -> Result<(LintResult, Severity), RunnerError> {
    let mut config = load_config(root, options.config)?;
    if let Some(preset) = options.preset {
        config.preset = Some(preset.to_string());
    }
    if let Some(fail_on) = options.fail_on {
        config.fail_on = Some(fail_on.to_string());
    }

    let fail_on = config.fail_on_severity()?;
    let preset = Preset::from_config(&config)?;
    let rules = configured_rules(&config)?;

    let mut builder = Analyzer::builder()
        .root(root.join(&config.analyzer.root))
        .config(config);
    if let Some(preset) = preset {
        builder = builder.preset_files(preset.files(), preset.ignores());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let result = builder.build()?.analyze()?;
    Ok((result, fail_on))
}

/// Reads the explicit config, else the first candidate found, else defaults.
fn load_config(root: &Path, explicit_path: Option<&str>) -> Result<Config, RunnerError> {
    let path = match explicit_path {
        Some(path) => root.join(path),
        None => match CONFIG_CANDIDATES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.exists())
        {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|source| RunnerError::ReadConfig { path, source })?;
    Ok(Config::parse(&content)?)
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let manifest_path = PathBuf::from(manifest_dir);
        return manifest_path
            .ancestors()
            .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
            .map_or_else(|| manifest_path.clone(), Path::to_path_buf);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(config: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(
            dir.path().join("src/user.ts"),
            "export function load(): string {\n  return \"\";\n}\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("src/user.spec.ts"),
            "export function helper(): string {\n  return \"\";\n}\n",
        )
        .unwrap();
        if let Some(config) = config {
            fs::write(dir.path().join("railway-lint.toml"), config).unwrap();
        }
        dir
    }

    #[test]
    fn defaults_without_config() {
        let dir = project(None);
        let (result, fail_on) = evaluate(dir.path(), &CheckOptions::default()).unwrap();

        assert_eq!(fail_on, Severity::Error);
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert!(result.has_violations_at(fail_on));
    }

    #[test]
    fn macro_preset_selects_preset_files() {
        let dir = project(None);
        let options = CheckOptions {
            preset: Some("recommended"),
            ..CheckOptions::default()
        };
        let (result, _) = evaluate(dir.path(), &options).unwrap();

        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("src/user.ts"));
    }

    #[test]
    fn macro_arguments_override_config() {
        let dir = project(Some("preset = \"unknown\"\nfail_on = \"info\"\n"));
        let options = CheckOptions {
            preset: Some("strict"),
            fail_on: Some("error"),
            ..CheckOptions::default()
        };
        let (_, fail_on) = evaluate(dir.path(), &options).unwrap();
        assert_eq!(fail_on, Severity::Error);
    }

    #[test]
    fn config_severity_is_applied() {
        let dir = project(Some(
            "[rules.require-result-return-type]\nseverity = \"warning\"\n",
        ));
        let (result, fail_on) = evaluate(dir.path(), &CheckOptions::default()).unwrap();

        assert_eq!(result.violations[0].severity, Severity::Warning);
        assert!(!result.has_violations_at(fail_on));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let dir = project(None);
        let options = CheckOptions {
            preset: Some("minimal"),
            ..CheckOptions::default()
        };
        let err = evaluate(dir.path(), &options).unwrap_err();
        assert!(err.to_string().contains("Unknown preset: minimal"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = project(None);
        let options = CheckOptions {
            config: Some("missing.toml"),
            ..CheckOptions::default()
        };
        assert!(matches!(
            evaluate(dir.path(), &options),
            Err(RunnerError::ReadConfig { .. })
        ));
    }

    #[test]
    fn workspace_section_detection() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("Cargo.toml");
        fs::write(&manifest, "# [workspace]\n[package]\nname = \"x\"\n").unwrap();
        assert!(!has_workspace_section(&manifest));

        fs::write(&manifest, "[workspace]\nmembers = []\n").unwrap();
        assert!(has_workspace_section(&manifest));
    }
}
