//! # railway-lint
//!
//! Enforces `Result<T, E>` return types in TypeScript sources, for codebases
//! following Railway Oriented Programming.
//!
//! This is the main facade crate that re-exports core functionality and rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! railway-lint = "0.1"
//! ```
//!
//! ```rust,ignore
//! // tests/railway.rs
//! railway_lint::check!(preset = "recommended");
//! ```
//!
//! The generated test reads `railway-lint.toml` from the workspace root and
//! fails with a report when violations reach `fail_on`. The macro accepts
//! `preset`, `config` and `fail_on`, each overriding the config file.
//!
//! ## Suppression Comments
//!
//! ```typescript
//! // railway-lint: allow(require-result-return-type) reason="DOM callback"
//! export function onClick(event: MouseEvent): boolean {
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use railway_lint::rules::{configured_rules, Preset};
//! use railway_lint::{Analyzer, Config};
//!
//! let config = Config::from_file("railway-lint.toml".as_ref())?;
//! let mut builder = Analyzer::builder().root("./web");
//! for rule in configured_rules(&config)? {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder
//!     .preset_files(Preset::Recommended.files(), Preset::Recommended.ignores())
//!     .config(config)
//!     .build()?
//!     .analyze()?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use railway_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use railway_lint_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::{run_check, CheckOptions};
}

/// Generates a `#[test]` that lints the workspace.
///
/// Accepts `preset = "..."`, `config = "..."` and `fail_on = "..."`, all
/// optional. `config` is resolved against the workspace root.
///
/// ```rust,ignore
/// railway_lint::check!();
/// railway_lint::check!(preset = "strict", fail_on = "warning");
/// ```
#[macro_export]
macro_rules! check {
    ($($key:ident = $value:literal),* $(,)?) => {
        #[test]
        fn railway_lint_check() {
            $crate::__internal::run_check(&$crate::__internal::CheckOptions {
                $($key: ::core::option::Option::Some($value),)*
                ..::core::default::Default::default()
            });
        }
    };
}
