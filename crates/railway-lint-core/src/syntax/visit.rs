//! Visitor callbacks over the function-like nodes of a [`SourceFile`].
//!
//! [`SourceFile`]: super::SourceFile

use super::FunctionLike;

/// Callbacks invoked once per function-like node, in depth-first pre-order.
///
/// Every method defaults to a no-op so implementors register only the
/// categories they care about.
pub trait Visit {
    /// Called for `function name() {}` declarations.
    fn visit_function_declaration(&mut self, _node: &FunctionLike) {}

    /// Called for function expressions.
    fn visit_function_expression(&mut self, _node: &FunctionLike) {}

    /// Called for arrow functions.
    fn visit_arrow_function(&mut self, _node: &FunctionLike) {}

    /// Called for class and object method definitions.
    fn visit_method_definition(&mut self, _node: &FunctionLike) {}
}

/// Dispatches a node to the callback matching its category.
pub fn visit_function_like<V: Visit + ?Sized>(visitor: &mut V, node: &FunctionLike) {
    match node {
        FunctionLike::Declaration(_) => visitor.visit_function_declaration(node),
        FunctionLike::Expression(_) => visitor.visit_function_expression(node),
        FunctionLike::Arrow(_) => visitor.visit_arrow_function(node),
        FunctionLike::Method(_) => visitor.visit_method_definition(node),
    }
}
