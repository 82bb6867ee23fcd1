//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use railway_lint_core::{LintResult, Severity, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analyzed directory; `rich` output reads sources from it.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Rich => {
            let handler = GraphicalReportHandler::new();
            print!("{}", render_rich(result, root, &handler)?);
        }
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

/// Renders each violation with its source snippet.
fn render_rich(result: &LintResult, root: &Path, handler: &GraphicalReportHandler) -> Result<String> {
    let mut out = String::new();

    for violation in &result.violations {
        let path = root.join(&violation.location.file);
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let diagnostic = ViolationDiagnostic::new(violation, source);
        handler
            .render_report(&mut out, &diagnostic)
            .context("Failed to render diagnostic")?;
        out.push('\n');
    }

    let (errors, warnings, infos) = result.count_by_severity();
    out.push_str(&format!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\n",
        result.files_checked
    ));
    Ok(out)
}
