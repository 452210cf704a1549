//! Deterministic reduction: a partial evaluator that freezes variables and
//! non-deterministic calls into literals and keeps everything else symbolic.

use reckon_syntax::ast::Node;
use reckon_syntax::error::{Error, ErrorKind, Result};
use reckon_syntax::Value;

use crate::evaluator::{self, read_variable};
use crate::interpreter::Interpreter;

/// Builds the reduced counterpart of `node`.
///
/// Deterministic calls keep their node and have every child reduced. A
/// non-deterministic call is evaluated once, whole subtree included, and
/// replaced by its result.
pub fn reduce(interp: &mut Interpreter, node: &Node) -> Result<Node> {
    match node {
        Node::Number(_) | Node::Hex(_) | Node::Bool(_) | Node::Str(_) | Node::Assignee(_) => Ok(node.clone()),
        Node::Variable { name, modifier } => {
            let value = read_variable(interp, name, *modifier)?;
            Ok(freeze(interp, value))
        }
        Node::Unary { op: name, .. } | Node::Operator { op: name, .. } | Node::Function { name, .. } => {
            let function = interp
                .functions()
                .lookup(name)
                .ok_or_else(|| Error::new(ErrorKind::UndefinedFunction(name.to_string())))?;
            if !function.is_deterministic() {
                let value = evaluator::evaluate(interp, node)?;
                return Ok(freeze(interp, value));
            }
            reduce_children(interp, node)
        }
    }
}

fn reduce_children(interp: &mut Interpreter, node: &Node) -> Result<Node> {
    Ok(match node {
        Node::Unary { op, operand } => Node::Unary {
            op: op.clone(),
            operand: Box::new(reduce(interp, operand)?),
        },
        Node::Operator { op, operands } => Node::Operator {
            op: op.clone(),
            operands: reduce_all(interp, operands)?,
        },
        Node::Function { name, args } => Node::Function {
            name: name.clone(),
            args: reduce_all(interp, args)?,
        },
        leaf => leaf.clone(),
    })
}

fn reduce_all(interp: &mut Interpreter, nodes: &[Node]) -> Result<Vec<Node>> {
    nodes.iter().map(|n| reduce(interp, n)).collect()
}

fn freeze(interp: &mut Interpreter, value: Value) -> Node {
    interp.stats.frozen_nodes += 1;
    literal(value)
}

/// Literal node for a runtime value.
///
/// Strings are wrapped in a quote pair so that unquoting at evaluation gives
/// back exactly the frozen value. String text is raw, so a value holding both
/// quote marks (or ending in `\`) has no literal spelling the lexer accepts;
/// its frozen tree still evaluates correctly but its formatted text does not
/// parse.
pub fn literal(value: Value) -> Node {
    match value {
        Value::Number(d) => Node::Number(d),
        Value::Str(s) => {
            let quote = if s.contains('"') && !s.contains('\'') { '\'' } else { '"' };
            Node::Str(format!("{quote}{s}{quote}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_syntax::ast::unquote;

    #[test]
    fn frozen_strings_unquote_to_themselves() {
        for s in ["abc", "", "say \"hi\"", "'both\"", "it's"] {
            let Node::Str(text) = literal(Value::from(s)) else { panic!("expected string literal") };
            assert_eq!(unquote(&text), s);
        }
    }

    #[test]
    fn frozen_strings_format_back_to_the_same_value() {
        let mut interp = Interpreter::new();
        for s in ["abc", "say \"hi\"", "it's"] {
            let text = reckon_fmt::format_node(&literal(Value::from(s))).unwrap();
            assert_eq!(interp.eval_str(&text).unwrap(), Value::from(s));
        }
        let text = reckon_fmt::format_node(&literal(Value::from("'both\""))).unwrap();
        assert!(interp.eval_str(&text).is_err());
    }

    #[test]
    fn frozen_numbers_stay_numbers() {
        assert_eq!(literal(Value::from(5)), Node::number(5));
    }
}
