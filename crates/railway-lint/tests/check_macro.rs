//! Integration tests for the `railway_lint::check!()` macro.
//!
//! The macro expands to a `#[test]` running the full pipeline against a
//! fixture project that returns `Result` everywhere.

railway_lint::check!(
    preset = "strict",
    config = "crates/railway-lint/tests/test-config.toml",
);
