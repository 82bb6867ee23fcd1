//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, DEFAULT_EXCLUDES};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::syntax::{Dialect, SourceFile};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a TypeScript source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    preset_include: Vec<String>,
    preset_exclude: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern, relative to the root.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern, relative to the root.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the file set of the active preset.
    ///
    /// Its include globs apply only when no explicit include is configured;
    /// its ignore globs then join the exclude list.
    #[must_use]
    pub fn preset_files(mut self, files: &[&str], ignores: &[&str]) -> Self {
        self.preset_include = files.iter().map(ToString::to_string).collect();
        self.preset_exclude = ignores.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether files with syntax errors abort the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut include = self.include_patterns;
        include.extend(config.analyzer.include.iter().cloned());

        let mut exclude = self.exclude_patterns;
        exclude.extend(config.analyzer.exclude.iter().cloned());
        if exclude.is_empty() {
            exclude.extend(DEFAULT_EXCLUDES.iter().map(ToString::to_string));
        }

        if include.is_empty() {
            include = self.preset_include;
            exclude.extend(self.preset_exclude);
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            include_patterns: compile_globs(&include)?,
            exclude_patterns: compile_globs(&exclude)?,
            respect_gitignore: config.analyzer.respect_gitignore,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<glob::Pattern>, glob::PatternError> {
    patterns.iter().map(|p| glob::Pattern::new(p)).collect()
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    include_patterns: Vec<glob::Pattern>,
    exclude_patterns: Vec<glob::Pattern>,
    respect_gitignore: bool,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file has
    /// syntax errors while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            result
                .violations
                .extend(self.check_source(file_path, &content)?);
            result.files_checked += 1;
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs every enabled rule over one in-memory source file.
    ///
    /// The dialect follows the file extension; unknown extensions are
    /// parsed as plain TypeScript.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded, or if the file has
    /// syntax errors while `fail_on_parse_error` is set.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let dialect = Dialect::from_path(path).unwrap_or(Dialect::TypeScript);
        let ast = SourceFile::parse(content, dialect).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if ast.has_errors() {
            warn!("Syntax errors in {}; checking recovered tree", path.display());
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
        }

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &ast);
            violations.extend(self.apply_severity_override(rule.name(), rule_violations));
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in violations.iter_mut().filter(|v| !v.pinned_severity) {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all TypeScript source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || Dialect::from_path(path).is_none() {
                continue;
            }

            if !self.is_selected(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Applies include and exclude globs to the root-relative path.
    fn is_selected(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        if self.exclude_patterns.iter().any(|p| p.matches_path(relative)) {
            return false;
        }

        self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};

    struct OnePerFunction;

    impl Rule for OnePerFunction {
        fn name(&self) -> &'static str {
            "one-per-function"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(&self, ctx: &FileContext, ast: &SourceFile) -> Vec<Violation> {
            ast.functions()
                .iter()
                .map(|f| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::from_span(ctx.relative_path.clone(), f.span()),
                        "function",
                    )
                })
                .collect()
        }
    }

    #[test]
    fn builder_resolves_relative_root() {
        let analyzer = Analyzer::builder()
            .root(".")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().is_absolute());
        assert!(analyzer.root().exists());
    }

    #[test]
    fn default_excludes_apply() {
        let analyzer = Analyzer::builder()
            .root("/p")
            .build()
            .expect("Failed to build analyzer");

        assert!(!analyzer.is_selected(Path::new("/p/node_modules/lib/index.ts")));
        assert!(!analyzer.is_selected(Path::new("/p/packages/a/dist/index.ts")));
        assert!(analyzer.is_selected(Path::new("/p/src/index.ts")));
    }

    #[test]
    fn preset_files_apply_without_explicit_include() {
        let analyzer = Analyzer::builder()
            .root("/p")
            .preset_files(&["src/**/*.ts"], &["src/**/*.spec.ts"])
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.is_selected(Path::new("/p/src/user.ts")));
        assert!(analyzer.is_selected(Path::new("/p/src/domain/user.ts")));
        assert!(!analyzer.is_selected(Path::new("/p/src/user.spec.ts")));
        assert!(!analyzer.is_selected(Path::new("/p/scripts/build.ts")));
    }

    #[test]
    fn explicit_include_replaces_preset_files() {
        let analyzer = Analyzer::builder()
            .root("/p")
            .include("lib/**/*.ts")
            .preset_files(&["src/**/*.ts"], &["src/**/*.spec.ts"])
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.is_selected(Path::new("/p/lib/a.ts")));
        assert!(!analyzer.is_selected(Path::new("/p/src/a.ts")));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let result = Analyzer::builder().root("/p").exclude("src/[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn check_source_applies_config() {
        let config = Config::parse("[rules.one-per-function]\nseverity = \"info\"\n")
            .expect("Failed to parse");
        let analyzer = Analyzer::builder()
            .root("/p")
            .config(config)
            .rule(OnePerFunction)
            .build()
            .expect("Failed to build analyzer");

        let violations = analyzer
            .check_source(Path::new("/p/src/a.ts"), "function a() {}\nconst b = () => 1;\n")
            .expect("checks");
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.severity == Severity::Info));
        assert_eq!(violations[1].location.line, 2);
    }

    struct PinnedNotice;

    impl Rule for PinnedNotice {
        fn name(&self) -> &'static str {
            "pinned-notice"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn check(&self, ctx: &FileContext, _ast: &SourceFile) -> Vec<Violation> {
            let at = Location::new(ctx.relative_path.clone(), 1, 1);
            vec![
                Violation::new(self.code(), self.name(), Severity::Error, at.clone(), "plain"),
                Violation::new(self.code(), self.name(), Severity::Warning, at, "pinned")
                    .with_pinned_severity(),
            ]
        }
    }

    #[test]
    fn severity_override_skips_pinned_violations() {
        let config = Config::parse("[rules.pinned-notice]
severity = \"info\"\n")
            .expect("Failed to parse");
        let analyzer = Analyzer::builder()
            .root("/p")
            .config(config)
            .rule(PinnedNotice)
            .build()
            .expect("Failed to build analyzer");

        let violations = analyzer
            .check_source(Path::new("/p/a.ts"), "")
            .expect("checks");
        let severities: Vec<Severity> = violations.iter().map(|v| v.severity).collect();
        assert_eq!(severities, vec![Severity::Info, Severity::Warning]);
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let config = Config::parse("[rules.one-per-function]\nenabled = false\n")
            .expect("Failed to parse");
        let analyzer = Analyzer::builder()
            .root("/p")
            .config(config)
            .rule(OnePerFunction)
            .build()
            .expect("Failed to build analyzer");

        let violations = analyzer
            .check_source(Path::new("/p/a.ts"), "function a() {}")
            .expect("checks");
        assert!(violations.is_empty());
    }

    #[test]
    fn syntax_errors_fail_only_when_requested() {
        let source = "function broken( {\n";
        let lenient = Analyzer::builder()
            .root("/p")
            .rule(OnePerFunction)
            .build()
            .expect("Failed to build analyzer");
        assert!(lenient.check_source(Path::new("/p/a.ts"), source).is_ok());

        let strict = Analyzer::builder()
            .root("/p")
            .rule(OnePerFunction)
            .fail_on_parse_error(true)
            .build()
            .expect("Failed to build analyzer");
        assert!(matches!(
            strict.check_source(Path::new("/p/a.ts"), source),
            Err(AnalyzerError::Parse { .. })
        ));
    }
}
