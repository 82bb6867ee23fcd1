//! Check command implementation.

use anyhow::{Context, Result};
use railway_lint_core::Analyzer;
use railway_lint_rules::{configured_rules, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    preset: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load()?;
    if preset.is_some() {
        config.preset = preset;
    }

    let fail_on = config.fail_on_severity().context("Invalid fail_on")?;
    let preset = Preset::from_config(&config)?;
    let rules = configured_rules(&config).context("Failed to configure rules")?;

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(exclude);
    if let Some(preset) = preset {
        tracing::debug!("Applying preset {preset}");
        builder = builder.preset_files(preset.files(), preset.ignores());
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rule(s)",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
