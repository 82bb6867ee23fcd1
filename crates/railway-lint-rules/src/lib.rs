//! # railway-lint-rules
//!
//! Built-in lint rules and presets for railway-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RW001 | `require-result-return-type` | Requires functions to declare a `Result<T, E>` return type |
//!
//! Rules are registered under the `railway` plugin namespace, so the
//! qualified id of RW001 is `railway/require-result-return-type`.
//!
//! ## Usage
//!
//! ```ignore
//! use railway_lint_core::Analyzer;
//! use railway_lint_rules::{Preset, RequireResultReturnType};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./web")
//!     .preset_files(Preset::Recommended.files(), Preset::Recommended.ignores())
//!     .rule(RequireResultReturnType::with_options(&Preset::Recommended.options())?)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod presets;
mod require_result_return_type;

pub use presets::{
    all_rules, configured_rules, effective_options, Preset, PRESET_FILES, PRESET_IGNORES,
};
pub use require_result_return_type::{
    is_eligible, is_result_type, normalize_type_text, options_schema, resolve_name, MessageId,
    OptionsError, RequireResultReturnType, ResultReturnTypeOptions, ResultTypeDiagnostic,
    ReturnTypePolicy, ANONYMOUS, BUILTIN_EXEMPT_FUNCTIONS,
};

/// Re-export core types for convenience.
pub use railway_lint_core::{Rule, Severity, Violation};

/// Namespace the rules are published under.
pub const PLUGIN_NAMESPACE: &str = "railway";

/// Static description of a built-in rule, for listings and tooling.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    /// Rule code.
    pub code: &'static str,
    /// Rule name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Message templates as `(id, template)` pairs.
    pub messages: &'static [(&'static str, &'static str)],
    /// JSON Schema of the options object.
    pub options_schema: fn() -> serde_json::Value,
}

impl RuleInfo {
    /// `namespace/name` form used by plugin hosts.
    #[must_use]
    pub fn qualified_id(&self) -> String {
        format!("{PLUGIN_NAMESPACE}/{}", self.name)
    }
}

const REQUIRE_RESULT_RETURN_TYPE_MESSAGES: [(&str, &str); 2] = [
    (
        MessageId::RequireResultType.as_str(),
        MessageId::RequireResultType.template(),
    ),
    (
        MessageId::MissingReturnType.as_str(),
        MessageId::MissingReturnType.template(),
    ),
];

/// Every built-in rule.
pub const RULES: &[RuleInfo] = &[RuleInfo {
    code: require_result_return_type::CODE,
    name: require_result_return_type::NAME,
    description: "Require functions to return Result type for Railway Oriented Programming",
    messages: &REQUIRE_RESULT_RETURN_TYPE_MESSAGES,
    options_schema,
}];
