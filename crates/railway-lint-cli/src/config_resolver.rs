//! Locates `railway-lint.toml` for a project.
//!
//! First match wins: `--config`, then `railway-lint.toml` or
//! `.railway-lint.toml` in the project directory, then
//! `config.toml` in the global directory, then built-in defaults.

use anyhow::{Context, Result};
use railway_lint_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["railway-lint.toml", ".railway-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config` or `RAILWAY_LINT_CONFIG`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the analyzed project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the file behind this source.
    pub fn load(&self) -> Result<Config> {
        match self.path() {
            None => {
                tracing::debug!("{self}");
                Ok(Config::default())
            }
            Some(path) => {
                tracing::debug!("Loading {self}");
                Config::from_file(path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))
            }
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "config {}", p.display()),
            Self::Project(p) => write!(f, "project config {}", p.display()),
            Self::Global(p) => write!(f, "global config {}", p.display()),
            Self::Default => f.write_str("no config file, using defaults"),
        }
    }
}

/// Resolves the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
    {
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// `$RAILWAY_LINT_CONFIG_DIR`, else `~/.railway-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("RAILWAY_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".railway-lint")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_source_in_priority_order_wins() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let resolve = |explicit: Option<&Path>| resolve_in(project.path(), explicit, Some(global.path()));

        assert_eq!(resolve(None), ConfigSource::Default);

        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(resolve(None), ConfigSource::Global(global.path().join("config.toml")));

        fs::write(project.path().join(".railway-lint.toml"), "").unwrap();
        assert_eq!(
            resolve(None),
            ConfigSource::Project(project.path().join(".railway-lint.toml"))
        );

        fs::write(project.path().join("railway-lint.toml"), "").unwrap();
        assert_eq!(
            resolve(None),
            ConfigSource::Project(project.path().join("railway-lint.toml"))
        );

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(resolve(Some(explicit)), ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn directory_named_like_a_config_is_skipped() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("railway-lint.toml")).unwrap();
        assert_eq!(resolve_in(project.path(), None, None), ConfigSource::Default);
    }

    #[test]
    fn load_parses_the_file_or_reports_its_path() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("railway-lint.toml"), "preset = \"strict\"\n").unwrap();

        let config = resolve_in(project.path(), None, None).load().unwrap();
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert!(ConfigSource::Default.load().unwrap().preset.is_none());

        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/railway-lint.toml"))
            .load()
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/railway-lint.toml"));
    }
}
