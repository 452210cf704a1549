//! AST (abstract syntax tree) types for Reckon expressions.

use crate::decimal::Decimal;

/// Resolution channel for a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableModifier {
    /// Ordinary lookup: `name`.
    #[default]
    Plain,
    /// Host-supplied on demand when unset: `?name`.
    Prompt,
}

/// A node of an expression tree.
///
/// Every node exclusively owns its ordered children. Parent and sibling
/// relations are derived with [`Node::index_of_child`] and
/// [`Node::next_sibling_of`], never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Decimal literal.
    Number(Decimal),
    /// Hexadecimal literal as written, including its `0x` prefix.
    Hex(String),
    /// `true` / `false`; evaluates to 1 / 0.
    Bool(bool),
    /// String literal token as written. See [`unquote`].
    Str(String),
    /// Identifier on the left of an assignment.
    Assignee(String),
    Variable {
        name: String,
        modifier: VariableModifier,
    },
    Unary {
        op: String,
        operand: Box<Node>,
    },
    /// Infix operator over one or more operands (`a + b + c` is one node).
    Operator {
        op: String,
        operands: Vec<Node>,
    },
    Function {
        name: String,
        args: Vec<Node>,
    },
}

impl Node {
    pub fn number(value: impl Into<Decimal>) -> Node {
        Node::Number(value.into())
    }

    pub fn string(text: impl Into<String>) -> Node {
        Node::Str(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Node {
        Node::Variable {
            name: name.into(),
            modifier: VariableModifier::Plain,
        }
    }

    pub fn prompt_variable(name: impl Into<String>) -> Node {
        Node::Variable {
            name: name.into(),
            modifier: VariableModifier::Prompt,
        }
    }

    pub fn unary(op: impl Into<String>, operand: Node) -> Node {
        Node::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    pub fn operator(op: impl Into<String>, operands: Vec<Node>) -> Node {
        Node::Operator {
            op: op.into(),
            operands,
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Node>) -> Node {
        Node::Function {
            name: name.into(),
            args,
        }
    }

    /// `target = value`.
    pub fn assign(target: impl Into<String>, value: Node) -> Node {
        Node::operator("=", vec![Node::Assignee(target.into()), value])
    }

    /// Name used to look up the function for call-like nodes.
    pub fn callee(&self) -> Option<&str> {
        match self {
            Node::Unary { op, .. } | Node::Operator { op, .. } => Some(op),
            Node::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Ordered children; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Unary { operand, .. } => std::slice::from_ref(&**operand),
            Node::Operator { operands, .. } => operands,
            Node::Function { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty() && self.callee().is_none()
    }

    /// Position of `child` among this node's children, by identity.
    pub fn index_of_child(&self, child: &Node) -> Option<usize> {
        self.children().iter().position(|c| std::ptr::eq(c, child))
    }

    /// The child following `child`, derived from the child sequence.
    pub fn next_sibling_of(&self, child: &Node) -> Option<&Node> {
        let i = self.index_of_child(child)?;
        self.children().get(i + 1)
    }

    /// Total number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }

    /// Short human-readable description, used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Node::Number(d) => format!("number {}", d),
            Node::Hex(h) => format!("hex number {}", h),
            Node::Bool(b) => format!("boolean {}", b),
            Node::Str(s) => format!("string {}", s),
            Node::Assignee(n) => format!("assignee {}", n),
            Node::Variable { name, modifier } => format!("variable {} ({:?})", name, modifier),
            Node::Unary { op, .. } => format!("unary operator {}", op),
            Node::Operator { op, operands } => format!("operator {} with {} operands", op, operands.len()),
            Node::Function { name, args } => format!("function {} with {} arguments", name, args.len()),
        }
    }
}

/// Strips one pair of surrounding quotes from a string literal token.
///
/// Quotes are removed only when the first and last characters are the same
/// quote mark (`'` or `"`); anything else is returned exactly as written.
pub fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && (first == '\'' || first == '"') => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unquote_matching_quotes() {
        assert_eq!(unquote("'hello'"), "hello");
        assert_eq!(unquote("\"hello\""), "hello");
        assert_eq!(unquote("''"), "");
    }

    #[test]
    fn unquote_leaves_unbalanced_text() {
        assert_eq!(unquote("'it"), "'it");
        assert_eq!(unquote("\"mixed'"), "\"mixed'");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn siblings_are_derived_from_parent() {
        let tree = Node::operator("+", vec![Node::number(1), Node::number(2), Node::number(3)]);
        let children = tree.children();
        assert_eq!(tree.index_of_child(&children[1]), Some(1));
        assert_eq!(tree.next_sibling_of(&children[1]), Some(&children[2]));
        assert_eq!(tree.next_sibling_of(&children[2]), None);

        let stranger = Node::number(2);
        assert_eq!(tree.index_of_child(&stranger), None);
    }

    #[test]
    fn structural_equality_is_deep() {
        let a = Node::function("max", vec![Node::variable("x"), Node::number(2)]);
        let b = Node::function("max", vec![Node::variable("x"), Node::number(2)]);
        let c = Node::function("max", vec![Node::variable("y"), Node::number(2)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.size(), 3);
    }
}
