//! Rule requiring functions to declare a `Result<T, E>` return type.
//!
//! # Rationale
//!
//! Railway-oriented code composes through explicit success/error values
//! instead of thrown exceptions. A function whose declared return type is not
//! a `Result` (or `Promise<Result>`) breaks the chain for its callers.
//!
//! The check is purely syntactic: the annotation's source text is matched
//! against four shapes (`Result<T, E>`, `Result<T>`, `Promise<Result<T, E>>`,
//! `Promise<Result<T>>`). Generic arguments are opaque, so nested generics
//! such as `Result<Array<T>, E>` do not conform.
//!
//! # Configuration
//!
//! - `allowedReturnTypes`: non-Result types that pass (default: `void`,
//!   `Promise<void>`, `never`). An entry passes any annotation equal to it
//!   or containing it.
//! - `exemptFunctions`: function names never checked (default: `main`,
//!   `setup`, `teardown`). `isOk`, `isErr`, `constructor`, `ok` and `err`
//!   are always exempt.
//! - `exemptPatterns`: regexes; a name matching any of them anywhere is
//!   exempt (default: none).
//!
//! Supplying a list replaces the default list for that key.
//!
//! # Suppression
//!
//! - `// railway-lint: allow(require-result-return-type) reason="..."` on the
//!   function's first line or the line above it
//! - files whose path contains `.spec.` or `.test.` are never checked

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use railway_lint_core::syntax::{
    FunctionLike, MethodKind, ParentBinding, SourceFile, Span, Visit,
};
use railway_lint_core::utils::allowance::check_allow_with_reason;
use railway_lint_core::utils::render_template;
use railway_lint_core::{FileContext, Location, Rule, Severity, Suggestion, Violation};
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Rule code for require-result-return-type.
pub const CODE: &str = "RW001";

/// Rule name for require-result-return-type.
pub const NAME: &str = "require-result-return-type";

/// Name reported for functions no binding names.
pub const ANONYMOUS: &str = "anonymous";

/// Names exempt regardless of configuration.
pub const BUILTIN_EXEMPT_FUNCTIONS: [&str; 5] = ["isOk", "isErr", "constructor", "ok", "err"];

/// Default `allowedReturnTypes`.
pub const DEFAULT_ALLOWED_RETURN_TYPES: [&str; 3] = ["void", "Promise<void>", "never"];

/// Default `exemptFunctions`.
pub const DEFAULT_EXEMPT_FUNCTIONS: [&str; 3] = ["main", "setup", "teardown"];

/// Path fragments marking test files.
const TEST_FILE_MARKERS: [&str; 2] = [".spec.", ".test."];

#[allow(clippy::expect_used)]
static RESULT_SHAPES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^Result<[^>]+,\s*[^>]+>$",
        r"^Result<[^>]+>$",
        r"^Promise<Result<[^>]+,\s*[^>]+>>$",
        r"^Promise<Result<[^>]+>>$",
    ])
    .expect("Result shape patterns are valid")
});

/// User-facing options, as written in `[rules.require-result-return-type]`.
///
/// `None` means "use the default for this key".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResultReturnTypeOptions {
    /// Non-Result return types that pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_return_types: Option<Vec<String>>,
    /// Function names never checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_functions: Option<Vec<String>>,
    /// Regexes exempting matching function names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_patterns: Option<Vec<String>>,
}

impl ResultReturnTypeOptions {
    /// The rule's own defaults, with every key set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            allowed_return_types: Some(to_strings(&DEFAULT_ALLOWED_RETURN_TYPES)),
            exempt_functions: Some(to_strings(&DEFAULT_EXEMPT_FUNCTIONS)),
            exempt_patterns: Some(Vec::new()),
        }
    }

    /// Overlays `other` on `self`, key by key.
    ///
    /// A list present in `other` replaces the whole list in `self`.
    #[must_use]
    pub fn overridden_by(self, other: Self) -> Self {
        Self {
            allowed_return_types: other.allowed_return_types.or(self.allowed_return_types),
            exempt_functions: other.exempt_functions.or(self.exempt_functions),
            exempt_patterns: other.exempt_patterns.or(self.exempt_patterns),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Errors compiling [`ResultReturnTypeOptions`].
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    /// An `exemptPatterns` entry is not a valid regex.
    #[error("invalid exemptPatterns entry {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Regex compile error.
        source: regex::Error,
    },
}

/// Which message template a diagnostic uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// An annotation is present but neither Result-shaped nor allowed.
    RequireResultType,
    /// No return-type annotation at all.
    MissingReturnType,
}

impl MessageId {
    /// All message ids, in declaration order.
    pub const ALL: [Self; 2] = [Self::RequireResultType, Self::MissingReturnType];

    /// Identifier of the template.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequireResultType => "requireResultType",
            Self::MissingReturnType => "missingReturnType",
        }
    }

    /// Message template with `{{placeholder}}` slots.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::RequireResultType => {
                "Function \"{{name}}\" must return Result<T, E> type. Current return type: {{currentType}}"
            }
            Self::MissingReturnType => {
                "Function \"{{name}}\" must have an explicit return type annotation that returns Result<T, E>"
            }
        }
    }
}

/// A finding produced by [`ReturnTypePolicy::examine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTypeDiagnostic {
    /// Template used.
    pub message_id: MessageId,
    /// Node the diagnostic points at: the whole function for a missing
    /// annotation, the annotation otherwise.
    pub anchor: Span,
    /// Resolved function name.
    pub name: String,
    /// Raw annotation text, for [`MessageId::RequireResultType`].
    pub current_type: Option<String>,
}

impl ResultTypeDiagnostic {
    /// Renders the message template.
    #[must_use]
    pub fn message(&self) -> String {
        let mut data = vec![("name", self.name.as_str())];
        if let Some(current) = &self.current_type {
            data.push(("currentType", current.as_str()));
        }
        render_template(self.message_id.template(), &data)
    }
}

/// An allow-list entry, normalized, with its escaped exact-match regex.
#[derive(Debug, Clone)]
struct AllowedType {
    normalized: String,
    exact: Option<Regex>,
}

impl AllowedType {
    fn new(entry: &str) -> Self {
        let normalized = normalize_type_text(entry);
        let exact = Regex::new(&format!("^{}$", regex::escape(&normalized))).ok();
        Self { normalized, exact }
    }

    fn admits(&self, type_text: &str) -> bool {
        type_text == self.normalized
            || type_text.contains(&self.normalized)
            || self.exact.as_ref().is_some_and(|re| re.is_match(type_text))
    }
}

/// Compiled, read-only form of the rule's options.
#[derive(Debug, Clone)]
pub struct ReturnTypePolicy {
    allowed: Vec<AllowedType>,
    exempt_functions: HashSet<String>,
    exempt_patterns: Vec<Regex>,
}

impl Default for ReturnTypePolicy {
    fn default() -> Self {
        Self::from_parts(
            &to_strings(&DEFAULT_ALLOWED_RETURN_TYPES),
            &to_strings(&DEFAULT_EXEMPT_FUNCTIONS),
            Vec::new(),
        )
    }
}

impl ReturnTypePolicy {
    /// Compiles options; keys left as `None` take the rule defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an `exemptPatterns` entry is not a valid regex.
    pub fn compile(options: &ResultReturnTypeOptions) -> Result<Self, OptionsError> {
        let options = ResultReturnTypeOptions::defaults().overridden_by(options.clone());

        let patterns = options
            .exempt_patterns
            .unwrap_or_default()
            .into_iter()
            .map(|pattern| {
                Regex::new(&pattern)
                    .map_err(|source| OptionsError::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_parts(
            &options.allowed_return_types.unwrap_or_default(),
            &options.exempt_functions.unwrap_or_default(),
            patterns,
        ))
    }

    fn from_parts(allowed: &[String], exempt: &[String], exempt_patterns: Vec<Regex>) -> Self {
        let exempt_functions = exempt
            .iter()
            .cloned()
            .chain(BUILTIN_EXEMPT_FUNCTIONS.iter().map(ToString::to_string))
            .collect();

        Self {
            allowed: allowed.iter().map(|a| AllowedType::new(a)).collect(),
            exempt_functions,
            exempt_patterns,
        }
    }

    /// Examines one function-like node of the file in `ctx`.
    ///
    /// Returns at most one diagnostic and holds no state between calls.
    #[must_use]
    pub fn examine(&self, node: &FunctionLike, ctx: &FileContext) -> Option<ResultTypeDiagnostic> {
        if !is_eligible(node) {
            trace!("skipping ineligible node at line {}", node.span().line);
            return None;
        }

        let name = resolve_name(node);
        if self.is_exempt(name, ctx.path) {
            debug!("{name} is exempt");
            return None;
        }

        let Some(return_type) = node.return_type() else {
            return Some(ResultTypeDiagnostic {
                message_id: MessageId::MissingReturnType,
                anchor: node.span(),
                name: name.to_string(),
                current_type: None,
            });
        };

        let raw = ctx.text(return_type.type_span);
        let normalized = normalize_type_text(raw);
        if is_result_type(&normalized) || self.is_allowed(&normalized) {
            return None;
        }

        Some(ResultTypeDiagnostic {
            message_id: MessageId::RequireResultType,
            anchor: return_type.span,
            name: name.to_string(),
            current_type: Some(raw.to_string()),
        })
    }

    /// Whether `name`, or the file it lives in, is exempt from the check.
    #[must_use]
    pub fn is_exempt(&self, name: &str, file_path: &Path) -> bool {
        if self.exempt_functions.contains(name) {
            return true;
        }

        if self.exempt_patterns.iter().any(|re| re.is_match(name)) {
            return true;
        }

        let path = file_path.to_string_lossy();
        TEST_FILE_MARKERS.iter().any(|marker| path.contains(marker))
    }

    /// Whether normalized annotation text passes the allow-list.
    #[must_use]
    pub fn is_allowed(&self, type_text: &str) -> bool {
        self.allowed.iter().any(|a| a.admits(type_text))
    }
}

/// Whether a node is checked at all.
///
/// Body-less signatures, constructors and accessors are skipped, as is a
/// function value directly wrapped by a method definition.
#[must_use]
pub fn is_eligible(node: &FunctionLike) -> bool {
    if !node.has_body() {
        return false;
    }

    if matches!(
        node.kind(),
        Some(MethodKind::Constructor | MethodKind::Get | MethodKind::Set)
    ) {
        return false;
    }

    if node.is_method() && node.key() == Some("constructor") {
        return false;
    }

    !matches!(node.parent(), ParentBinding::MethodDefinition)
}

type NameSource = fn(&FunctionLike) -> Option<&str>;

/// Name sources in priority order; the first hit wins.
const NAME_SOURCES: [NameSource; 5] = [
    FunctionLike::id,
    FunctionLike::key,
    declarator_name,
    property_key,
    assignment_target,
];

fn declarator_name(node: &FunctionLike) -> Option<&str> {
    match node.parent() {
        ParentBinding::VariableDeclarator { name } => name.as_deref(),
        _ => None,
    }
}

fn property_key(node: &FunctionLike) -> Option<&str> {
    match node.parent() {
        ParentBinding::Property { key } => key.as_deref(),
        _ => None,
    }
}

fn assignment_target(node: &FunctionLike) -> Option<&str> {
    match node.parent() {
        ParentBinding::Assignment { target } => target.as_deref(),
        _ => None,
    }
}

/// Display name of a function, or [`ANONYMOUS`].
#[must_use]
pub fn resolve_name(node: &FunctionLike) -> &str {
    NAME_SOURCES
        .iter()
        .find_map(|source| source(node))
        .unwrap_or(ANONYMOUS)
}

/// Collapses whitespace runs to single spaces and trims.
#[must_use]
pub fn normalize_type_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether normalized annotation text has one of the Result shapes.
#[must_use]
pub fn is_result_type(type_text: &str) -> bool {
    RESULT_SHAPES.is_match(type_text)
}

/// JSON Schema of the rule's options object.
#[must_use]
pub fn options_schema() -> serde_json::Value {
    let string_list = serde_json::json!({
        "type": "array",
        "items": { "type": "string" }
    });
    serde_json::json!({
        "type": "object",
        "properties": {
            "allowedReturnTypes": string_list,
            "exemptFunctions": string_list,
            "exemptPatterns": string_list,
        },
        "additionalProperties": false
    })
}

/// Requires functions to declare a Result-shaped return type.
#[derive(Debug, Clone)]
pub struct RequireResultReturnType {
    policy: ReturnTypePolicy,
    /// Severity of reported violations.
    pub severity: Severity,
}

impl Default for RequireResultReturnType {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireResultReturnType {
    /// Creates the rule with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::from_policy(ReturnTypePolicy::default())
    }

    /// Creates the rule from user options.
    ///
    /// # Errors
    ///
    /// Returns an error if an `exemptPatterns` entry is not a valid regex.
    pub fn with_options(options: &ResultReturnTypeOptions) -> Result<Self, OptionsError> {
        ReturnTypePolicy::compile(options).map(Self::from_policy)
    }

    /// Creates the rule from a compiled policy.
    #[must_use]
    pub fn from_policy(policy: ReturnTypePolicy) -> Self {
        Self {
            policy,
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The compiled policy.
    #[must_use]
    pub fn policy(&self) -> &ReturnTypePolicy {
        &self.policy
    }
}

impl Rule for RequireResultReturnType {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Require functions to return Result type for Railway Oriented Programming"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, ast: &SourceFile) -> Vec<Violation> {
        let mut visitor = ReturnTypeVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };
        ast.accept(&mut visitor);
        visitor.violations
    }
}

struct ReturnTypeVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a RequireResultReturnType,
    violations: Vec<Violation>,
}

impl ReturnTypeVisitor<'_> {
    fn inspect(&mut self, node: &FunctionLike) {
        let Some(diagnostic) = self.rule.policy.examine(node, self.ctx) else {
            return;
        };

        let line = node.span().line;
        let allow = check_allow_with_reason(self.ctx.content, line, NAME);
        if allow.is_allowed() {
            if self.rule.requires_allow_reason() && allow.reason().is_none() {
                self.violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        Location::from_span(self.ctx.relative_path.clone(), node.span()),
                        format!("Allow directive for '{NAME}' is missing required reason"),
                    )
                    .with_pinned_severity()
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this function may skip Result",
                    )),
                );
            }
            return;
        }

        let suggestion = match diagnostic.message_id {
            MessageId::MissingReturnType => {
                Suggestion::new("Annotate the return type, e.g. `: Result<T, E>`")
            }
            MessageId::RequireResultType => Suggestion::new(
                "Return Result<T, E> (or Promise<Result<T, E>>) instead of throwing",
            ),
        };

        self.violations.push(
            Violation::new(
                CODE,
                NAME,
                self.rule.severity,
                Location::from_span(self.ctx.relative_path.clone(), diagnostic.anchor),
                diagnostic.message(),
            )
            .with_message_id(diagnostic.message_id.as_str())
            .with_suggestion(suggestion),
        );
    }
}

impl Visit for ReturnTypeVisitor<'_> {
    fn visit_function_declaration(&mut self, node: &FunctionLike) {
        self.inspect(node);
    }

    fn visit_function_expression(&mut self, node: &FunctionLike) {
        self.inspect(node);
    }

    fn visit_arrow_function(&mut self, node: &FunctionLike) {
        self.inspect(node);
    }

    fn visit_method_definition(&mut self, node: &FunctionLike) {
        self.inspect(node);
    }
}
