//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SourceFile;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the lowered TypeScript syntax model.
///
/// Implement this trait to create rules that analyze individual source files.
/// Rules receive the parsed [`SourceFile`] and usually drive a
/// [`Visit`](crate::syntax::Visit) implementation over it.
///
/// # Example
///
/// ```ignore
/// use railway_lint_core::{FileContext, Rule, Violation};
/// use railway_lint_core::syntax::{FunctionLike, SourceFile, Visit};
///
/// pub struct NoAnonymousArrows;
///
/// impl Rule for NoAnonymousArrows {
///     fn name(&self) -> &'static str { "no-anonymous-arrows" }
///     fn code(&self) -> &'static str { "RW900" }
///
///     fn check(&self, ctx: &FileContext, ast: &SourceFile) -> Vec<Violation> {
///         let mut visitor = ArrowVisitor::new(ctx);
///         ast.accept(&mut visitor);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "require-result-return-type").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "RW001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, ast: &SourceFile) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
