//! Integration test: file discovery and rule dispatch through `Analyzer`.
//!
//! Builds a small TypeScript project in a temporary directory and checks
//! which files reach the rules.

use railway_lint_core::syntax::{FunctionLike, SourceFile, Visit};
use railway_lint_core::{Analyzer, Config, FileContext, Location, Rule, Severity, Violation};
use std::fs;
use std::path::Path;

/// Reports every arrow function, so tests can see which files were visited.
struct ReportArrows;

struct ArrowCollector<'a> {
    ctx: &'a FileContext<'a>,
    violations: Vec<Violation>,
}

impl Visit for ArrowCollector<'_> {
    fn visit_arrow_function(&mut self, node: &FunctionLike) {
        self.violations.push(Violation::new(
            "TEST002",
            "report-arrows",
            Severity::Warning,
            Location::from_span(self.ctx.relative_path.clone(), node.span()),
            "arrow",
        ));
    }
}

impl Rule for ReportArrows {
    fn name(&self) -> &'static str {
        "report-arrows"
    }
    fn code(&self) -> &'static str {
        "TEST002"
    }
    fn check(&self, ctx: &FileContext, ast: &SourceFile) -> Vec<Violation> {
        let mut collector = ArrowCollector {
            ctx,
            violations: Vec::new(),
        };
        ast.accept(&mut collector);
        collector.violations
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("create fixture dir");
    fs::write(path, content).expect("write fixture file");
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path();
    write(root, "src/a.ts", "export const a = () => 1;\n");
    write(root, "src/ui/b.tsx", "export const B = () => <div />;\n");
    write(root, "src/a.spec.ts", "const t = () => 1;\n");
    write(root, "src/generated/g.ts", "const g = () => 1;\n");
    write(root, "node_modules/lib/index.ts", "const n = () => 1;\n");
    write(root, "scripts/build.mts", "const s = () => 1;\n");
    write(root, "README.md", "const r = () => 1;\n");
    write(root, ".gitignore", "src/generated/\n");
    dir
}

fn files_reported(analyzer: &Analyzer) -> Vec<String> {
    let result = analyzer.analyze().expect("analysis should succeed");
    result
        .violations
        .iter()
        .map(|v| v.location.file.to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn walks_typescript_files_respecting_gitignore_and_excludes() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .rule(ReportArrows)
        .build()
        .expect("analyzer should build");

    assert_eq!(
        files_reported(&analyzer),
        vec!["scripts/build.mts", "src/a.spec.ts", "src/a.ts", "src/ui/b.tsx"]
    );
}

#[test]
fn gitignore_can_be_disabled() {
    let dir = project();
    let config = Config::parse("[analyzer]\nrespect_gitignore = false\n").expect("config parses");
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .config(config)
        .rule(ReportArrows)
        .build()
        .expect("analyzer should build");

    assert!(files_reported(&analyzer).contains(&"src/generated/g.ts".to_string()));
}

#[test]
fn preset_file_set_limits_the_walk() {
    let dir = project();
    let analyzer = Analyzer::builder()
        .root(dir.path())
        .preset_files(&["src/**/*.ts", "src/**/*.tsx"], &["src/**/*.spec.ts"])
        .rule(ReportArrows)
        .build()
        .expect("analyzer should build");

    let result = analyzer.analyze().expect("analysis should succeed");
    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 2);
}
