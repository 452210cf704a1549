//! A parsed expression with a lazily computed deterministic form.

use std::cell::OnceCell;

use reckon_fmt::format_node;
use reckon_syntax::ast::Node;
use reckon_syntax::error::Result;
use reckon_syntax::Value;

use crate::interpreter::Interpreter;

/// Owns one expression tree.
///
/// The deterministic form is computed at most once, by the first call to
/// [`Expression::is_deterministic`] or [`Expression::deterministic_expression`],
/// against the interpreter passed to that call. Afterwards it is fixed.
#[derive(Debug, Clone)]
pub struct Expression {
    node: Node,
    /// `None` inside the cell: the expression is its own deterministic form
    deterministic: OnceCell<Option<Box<Expression>>>,
}

impl Expression {
    pub fn new(node: Node) -> Self {
        Self { node, deterministic: OnceCell::new() }
    }

    /// An expression already known to be deterministic.
    fn reduced(node: Node) -> Self {
        let deterministic = OnceCell::new();
        let _ = deterministic.set(None);
        Self { node, deterministic }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    /// Evaluates the tree; every call re-runs non-deterministic functions.
    pub fn evaluate(&self, interp: &mut Interpreter) -> Result<Value> {
        interp.evaluate(&self.node)
    }

    pub fn is_deterministic(&self, interp: &mut Interpreter) -> Result<bool> {
        Ok(self.reduced_form(interp)?.is_none())
    }

    /// This expression if reduction changes nothing, otherwise the reduced one.
    pub fn deterministic_expression(&self, interp: &mut Interpreter) -> Result<&Expression> {
        Ok(self.reduced_form(interp)?.unwrap_or(self))
    }

    pub fn format(&self) -> Result<String> {
        format_node(&self.node)
    }

    fn reduced_form(&self, interp: &mut Interpreter) -> Result<Option<&Expression>> {
        if self.deterministic.get().is_none() {
            let reduced = interp.reduce(&self.node)?;
            let state = if reduced == self.node {
                None
            } else {
                Some(Box::new(Expression::reduced(reduced)))
            };
            let _ = self.deterministic.set(state);
        }
        Ok(self.deterministic.get().and_then(|s| s.as_deref()))
    }
}
