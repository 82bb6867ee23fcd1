//! TypeScript syntax model consumed by rules.
//!
//! Function-like constructs are lowered from the tree-sitter tree into a
//! closed set of tagged variants ([`FunctionLike`]), one per syntactic
//! category. Every attribute a rule may look at is explicit and optional, so
//! rules match on shapes instead of probing loosely-typed nodes.

mod parser;
pub mod visit;

pub use parser::{Dialect, ParseError, SourceFile};
pub use visit::Visit;

/// Byte range of a syntax node, with the 1-indexed position of its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line of the start (1-indexed).
    pub line: usize,
    /// Column of the start in bytes (1-indexed).
    pub column: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declaration kind of a method definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodKind {
    /// Ordinary method.
    #[default]
    Method,
    /// `constructor() {}` in a class body.
    Constructor,
    /// `get value() {}`
    Get,
    /// `set value(v) {}`
    Set,
}

/// Syntactic context a function node sits in.
///
/// Names are only present when the binding is a plain identifier;
/// destructuring patterns, member targets, and literal or computed keys
/// carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParentBinding {
    /// Initializer of a variable declarator: `const name = () => {}`.
    VariableDeclarator {
        /// Bound identifier.
        name: Option<String>,
    },
    /// Value of an object property: `{ key: function () {} }`.
    Property {
        /// Property key identifier.
        key: Option<String>,
    },
    /// Right-hand side of an assignment: `target = () => {}`.
    Assignment {
        /// Assigned identifier.
        target: Option<String>,
    },
    /// Function value wrapped by a method definition.
    ///
    /// The tree-sitter front end never produces this: its `method_definition`
    /// carries the body itself. It exists for hand-built trees.
    MethodDefinition,
    /// Any other context.
    #[default]
    Other,
}

/// A declared return-type annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnType {
    /// Span of the whole annotation, colon included.
    pub span: Span,
    /// Span of the annotated type alone, without the leading colon.
    pub type_span: Span,
}

impl ReturnType {
    /// Creates a new return-type annotation.
    #[must_use]
    pub fn new(span: Span, type_span: Span) -> Self {
        Self { span, type_span }
    }
}

/// A function declaration, function expression, or arrow function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Function {
    /// Own identifier (`function name() {}`).
    pub id: Option<String>,
    /// Enclosing context.
    pub parent: ParentBinding,
    /// Declared return type, if annotated.
    pub return_type: Option<ReturnType>,
    /// Whether the node has an implementation body.
    pub has_body: bool,
    /// Span of the whole node.
    pub span: Span,
}

/// A class or object method definition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Method {
    /// Key identifier, without the `#` of private names.
    pub key: Option<String>,
    /// Declaration kind.
    pub kind: MethodKind,
    /// Enclosing context.
    pub parent: ParentBinding,
    /// Declared return type, if annotated.
    pub return_type: Option<ReturnType>,
    /// Whether the node has an implementation body.
    pub has_body: bool,
    /// Span of the whole node.
    pub span: Span,
}

/// A function-like syntax node, tagged by syntactic category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionLike {
    /// `function name() {}`, generator declarations, and overload signatures.
    Declaration(Function),
    /// `function () {}` used as an expression.
    Expression(Function),
    /// `() => {}`
    Arrow(Function),
    /// Class and object method definitions.
    Method(Method),
}

impl FunctionLike {
    /// Own identifier of declarations and named function expressions.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Declaration(f) | Self::Expression(f) | Self::Arrow(f) => f.id.as_deref(),
            Self::Method(_) => None,
        }
    }

    /// Key identifier of method definitions.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Method(m) => m.key.as_deref(),
            _ => None,
        }
    }

    /// Declaration kind; only method definitions carry one.
    #[must_use]
    pub fn kind(&self) -> Option<MethodKind> {
        match self {
            Self::Method(m) => Some(m.kind),
            _ => None,
        }
    }

    /// Enclosing context.
    #[must_use]
    pub fn parent(&self) -> &ParentBinding {
        match self {
            Self::Declaration(f) | Self::Expression(f) | Self::Arrow(f) => &f.parent,
            Self::Method(m) => &m.parent,
        }
    }

    /// Declared return type, if any.
    #[must_use]
    pub fn return_type(&self) -> Option<&ReturnType> {
        match self {
            Self::Declaration(f) | Self::Expression(f) | Self::Arrow(f) => f.return_type.as_ref(),
            Self::Method(m) => m.return_type.as_ref(),
        }
    }

    /// Whether the node has an implementation body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        match self {
            Self::Declaration(f) | Self::Expression(f) | Self::Arrow(f) => f.has_body,
            Self::Method(m) => m.has_body,
        }
    }

    /// Span of the whole node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Declaration(f) | Self::Expression(f) | Self::Arrow(f) => f.span,
            Self::Method(m) => m.span,
        }
    }

    /// Returns true for method definitions.
    #[must_use]
    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_through_variants() {
        let arrow = FunctionLike::Arrow(Function {
            parent: ParentBinding::VariableDeclarator {
                name: Some("load".into()),
            },
            has_body: true,
            ..Function::default()
        });
        assert_eq!(arrow.id(), None);
        assert_eq!(arrow.key(), None);
        assert_eq!(arrow.kind(), None);
        assert!(arrow.has_body());
        assert!(!arrow.is_method());

        let getter = FunctionLike::Method(Method {
            key: Some("value".into()),
            kind: MethodKind::Get,
            has_body: true,
            ..Method::default()
        });
        assert_eq!(getter.key(), Some("value"));
        assert_eq!(getter.kind(), Some(MethodKind::Get));
        assert_eq!(getter.parent(), &ParentBinding::Other);
    }

    #[test]
    fn span_length() {
        let span = Span::new(10, 25, 2, 3);
        assert_eq!(span.len(), 15);
        assert!(!span.is_empty());
        assert!(Span::default().is_empty());
    }
}
