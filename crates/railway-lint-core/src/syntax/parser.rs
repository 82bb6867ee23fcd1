//! Tree-sitter front end: parses TypeScript and lowers function-like nodes.

use std::fmt;
use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use super::visit::{visit_function_like, Visit};
use super::{Function, FunctionLike, Method, MethodKind, ParentBinding, ReturnType, Span};

/// Grammar used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`
    Tsx,
}

impl Dialect {
    /// Extensions handled by the analyzer, without the leading dot.
    pub const EXTENSIONS: &'static [&'static str] = &["ts", "tsx", "mts", "cts"];

    /// Picks the dialect from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::Tsx => write!(f, "tsx"),
        }
    }
}

/// Errors raised while setting up the parser.
///
/// Tree-sitter recovers from syntax errors, so malformed source does not
/// produce a `ParseError`; see [`SourceFile::has_errors`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {dialect} grammar: {source}")]
    Language {
        /// Dialect that failed to load.
        dialect: Dialect,
        /// Underlying tree-sitter error.
        source: tree_sitter::LanguageError,
    },

    /// The parser returned no tree.
    #[error("{dialect} parser produced no syntax tree")]
    NoTree {
        /// Dialect being parsed.
        dialect: Dialect,
    },
}

/// A parsed TypeScript file, reduced to its function-like nodes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    dialect: Dialect,
    has_errors: bool,
    functions: Vec<FunctionLike>,
}

impl SourceFile {
    /// Parses `source` with the given dialect.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is produced.
    pub fn parse(source: &str, dialect: Dialect) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|source| ParseError::Language { dialect, source })?;

        let src = source.as_bytes();
        let tree = parser
            .parse(src, None)
            .ok_or(ParseError::NoTree { dialect })?;
        let root = tree.root_node();

        Ok(Self {
            dialect,
            has_errors: root.has_error(),
            functions: collect_functions(root, src),
        })
    }

    /// Dialect this file was parsed with.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether tree-sitter had to recover from syntax errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Function-like nodes in depth-first pre-order.
    #[must_use]
    pub fn functions(&self) -> &[FunctionLike] {
        &self.functions
    }

    /// Drives `visitor` over every function-like node in pre-order.
    pub fn accept<V: Visit + ?Sized>(&self, visitor: &mut V) {
        for node in &self.functions {
            visit_function_like(visitor, node);
        }
    }
}

/// Walks the tree in pre-order and lowers each function-like node.
fn collect_functions(root: Node<'_>, src: &[u8]) -> Vec<FunctionLike> {
    let mut functions = Vec::new();
    let mut cursor = root.walk();

    loop {
        if let Some(lowered) = lower(cursor.node(), src) {
            functions.push(lowered);
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return functions;
            }
        }
    }
}

fn lower(node: Node<'_>, src: &[u8]) -> Option<FunctionLike> {
    // keyword tokens share kinds with named nodes (`function`)
    if !node.is_named() {
        return None;
    }

    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            Some(FunctionLike::Declaration(lower_function(node, src)))
        }
        "function_expression" | "function" | "generator_function" => {
            Some(FunctionLike::Expression(lower_function(node, src)))
        }
        "arrow_function" => Some(FunctionLike::Arrow(lower_function(node, src))),
        "method_definition" => Some(FunctionLike::Method(lower_method(node, src))),
        // Overload signatures inside a class body; interface members are types, not methods.
        "method_signature" if node.parent().is_some_and(|p| p.kind() == "class_body") => {
            Some(FunctionLike::Method(lower_method(node, src)))
        }
        _ => None,
    }
}

fn lower_function(node: Node<'_>, src: &[u8]) -> Function {
    Function {
        id: node
            .child_by_field_name("name")
            .filter(|n| n.kind() == "identifier")
            .map(|n| text(&n, src).to_owned()),
        parent: parent_binding(node, src),
        return_type: return_type(node, src),
        has_body: node.child_by_field_name("body").is_some(),
        span: span_of(&node),
    }
}

fn lower_method(node: Node<'_>, src: &[u8]) -> Method {
    let name = node.child_by_field_name("name");
    let key = name.and_then(|n| match n.kind() {
        "property_identifier" => Some(text(&n, src).to_owned()),
        "private_property_identifier" => Some(text(&n, src).trim_start_matches('#').to_owned()),
        _ => None,
    });

    // `'constructor'() {}` in a class body is still the constructor.
    let names_constructor = key.as_deref() == Some("constructor")
        || name.is_some_and(|n| {
            n.kind() == "string" && unquote(text(&n, src)) == "constructor"
        });

    let in_class = node.parent().is_some_and(|p| p.kind() == "class_body");
    let kind = accessor_kind(node, name).unwrap_or_else(|| {
        if in_class && names_constructor {
            MethodKind::Constructor
        } else {
            MethodKind::Method
        }
    });

    Method {
        key,
        kind,
        parent: parent_binding(node, src),
        return_type: return_type(node, src),
        has_body: node.child_by_field_name("body").is_some(),
        span: span_of(&node),
    }
}

fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix(['\'', '"'])
        .and_then(|rest| rest.strip_suffix(['\'', '"']))
        .unwrap_or(literal)
}

/// `get` / `set` keyword tokens preceding the method name.
fn accessor_kind(node: Node<'_>, name: Option<Node<'_>>) -> Option<MethodKind> {
    let name_start = name.map_or(usize::MAX, |n| n.start_byte());
    let mut cursor = node.walk();
    let kind = node
        .children(&mut cursor)
        .take_while(|c| c.start_byte() < name_start)
        .filter(|c| !c.is_named())
        .find_map(|c| match c.kind() {
            "get" => Some(MethodKind::Get),
            "set" => Some(MethodKind::Set),
            _ => None,
        });
    kind
}

/// Resolves the binding context, looking through parenthesized expressions.
fn parent_binding(node: Node<'_>, src: &[u8]) -> ParentBinding {
    let mut child = node;
    let mut parent = node.parent();
    while let Some(p) = parent {
        if p.kind() != "parenthesized_expression" {
            break;
        }
        child = p;
        parent = p.parent();
    }

    let Some(parent) = parent else {
        return ParentBinding::Other;
    };

    match parent.kind() {
        "variable_declarator" if is_field(parent, "value", child) => {
            ParentBinding::VariableDeclarator {
                name: field_identifier(parent, "name", &["identifier"], src),
            }
        }
        "pair" if is_field(parent, "value", child) => ParentBinding::Property {
            key: field_identifier(parent, "key", &["property_identifier", "identifier"], src),
        },
        "assignment_expression" | "augmented_assignment_expression"
            if is_field(parent, "right", child) =>
        {
            ParentBinding::Assignment {
                target: field_identifier(parent, "left", &["identifier"], src),
            }
        }
        _ => ParentBinding::Other,
    }
}

fn is_field(parent: Node<'_>, field: &str, child: Node<'_>) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == child.id())
}

/// Text of `field` when it is one of the accepted identifier kinds.
fn field_identifier(parent: Node<'_>, field: &str, kinds: &[&str], src: &[u8]) -> Option<String> {
    parent
        .child_by_field_name(field)
        .filter(|n| kinds.contains(&n.kind()))
        .map(|n| text(&n, src).to_owned())
}

fn return_type(node: Node<'_>, src: &[u8]) -> Option<ReturnType> {
    let annotation = node.child_by_field_name("return_type")?;
    let mut cursor = annotation.walk();
    let annotated = annotation.named_children(&mut cursor).next();
    let span = span_of(&annotation);
    let type_span = match annotated {
        Some(ty) => span_of(&ty),
        None => after_colon(span, text(&annotation, src)),
    };
    Some(ReturnType::new(span, type_span))
}

/// Narrows an annotation span to the text after its colon.
fn after_colon(span: Span, raw: &str) -> Span {
    let rest = raw.trim_start_matches(':').trim_start();
    let lead = raw.len() - rest.len();
    let end = span.start + lead + rest.trim_end().len();
    Span::new(span.start + lead, end, span.line, span.column + lead)
}

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn span_of(node: &Node<'_>) -> Span {
    let start = node.start_position();
    Span::new(
        node.start_byte(),
        node.end_byte(),
        start.row + 1,
        start.column + 1,
    )
}
