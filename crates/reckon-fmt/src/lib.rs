//! Inline formatter: renders an expression tree back to infix text with
//! minimal parentheses.
//!
//! A child operator is parenthesized only when its rank in the precedence
//! table is numerically greater than its parent's rank. Equal ranks are never
//! parenthesized, so output matches the parse shape of left-associative input
//! such as `1 - 2 - 3`.

use reckon_syntax::ast::{Node, VariableModifier};
use reckon_syntax::error::{error, ErrorKind, Result};

/// Rank of an infix operator symbol. `=` is 0, so assignment right-hand
/// sides that are operators print parenthesized (`x = (1 + 2)`).
pub fn precedence(op: &str) -> Option<u8> {
    Some(match op {
        "=" => 0,
        "^" => 2,
        "*" | "/" => 3,
        "+" | "-" => 4,
        "<" | "<=" | ">" | ">=" => 5,
        "==" | "!=" => 6,
        "&&" => 7,
        "||" => 8,
        _ => return None,
    })
}

fn rank(op: &str) -> Result<u8> {
    match precedence(op) {
        Some(r) => Ok(r),
        None => error(ErrorKind::UnknownOperator(op.to_string())),
    }
}

/// Formats `node` as a single line of infix text.
pub fn format_node(node: &Node) -> Result<String> {
    let mut out = String::new();
    write_node(node, &mut out)?;
    Ok(out)
}

fn write_node(node: &Node, out: &mut String) -> Result<()> {
    match node {
        Node::Number(d) => out.push_str(&d.to_string()),
        Node::Hex(text) | Node::Str(text) | Node::Assignee(text) => out.push_str(text),
        Node::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Node::Variable { name, modifier } => {
            if *modifier == VariableModifier::Prompt {
                out.push('?');
            }
            out.push_str(name);
        }
        Node::Unary { op, operand } => {
            if op != "+" {
                out.push_str(op);
            }
            write_node(operand, out)?;
        }
        Node::Operator { op, operands } => {
            let current = rank(op)?;
            for (i, child) in operands.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                    out.push_str(op);
                    out.push(' ');
                }
                let wrap = match child {
                    Node::Operator { op: child_op, .. } => current < rank(child_op)?,
                    _ => false,
                };
                if wrap {
                    out.push('(');
                }
                write_node(child, out)?;
                if wrap {
                    out.push(')');
                }
            }
        }
        Node::Function { name, args } => {
            out.push_str(name);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_node(arg, out)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_parser::parse_str;

    fn fmt(input: &str) -> String {
        format_node(&parse_str(input).expect("parse")).expect("format")
    }

    #[test]
    fn test_minimal_parentheses() {
        assert_eq!(fmt("1 + 2 * 3"), "1 + 2 * 3");
        assert_eq!(fmt("(1 + 2) * 3"), "(1 + 2) * 3");
        assert_eq!(fmt("((1)) + ((2))"), "1 + 2");
        assert_eq!(fmt("2 ^ (1 + 1)"), "2 ^ (1 + 1)");
    }

    #[test]
    fn test_equal_rank_is_never_wrapped() {
        assert_eq!(fmt("1 - 2 - 3"), "1 - 2 - 3");
        // The right-nested group has the same rank, so its parentheses are dropped.
        assert_eq!(fmt("1 - (2 - 3)"), "1 - 2 - 3");
        assert_eq!(fmt("8 / (4 * 2)"), "8 / 4 * 2");
    }

    #[test]
    fn test_assignment_wraps_operator_values() {
        assert_eq!(fmt("x = 1 + 2"), "x = (1 + 2)");
        assert_eq!(fmt("x = max(1, 2)"), "x = max(1, 2)");
    }

    #[test]
    fn test_unary_plus_is_elided() {
        assert_eq!(fmt("+5"), "5");
        assert_eq!(fmt("-x"), "-x");
        assert_eq!(fmt("!true"), "!true");
        assert_eq!(fmt("-(1 + 2)"), "-1 + 2");
    }

    #[test]
    fn test_literals_verbatim() {
        assert_eq!(fmt("\"it's\""), "\"it's\"");
        assert_eq!(fmt("'it'"), "'it'");
        assert_eq!(fmt("0x1F"), "0x1F");
        assert_eq!(fmt("1.50"), "1.50");
        assert_eq!(fmt("?bonus + hp"), "?bonus + hp");
        assert_eq!(fmt("false"), "false");
    }

    #[test]
    fn test_function_arguments() {
        assert_eq!(fmt("max(1,2,   x)"), "max(1, 2, x)");
        assert_eq!(fmt("random()"), "random()");
        assert_eq!(fmt("abs(1 + 2) * 3"), "abs(1 + 2) * 3");
    }

    #[test]
    fn test_comparison_ranks() {
        assert_eq!(fmt("a + 1 < b * 2"), "a + 1 < b * 2");
        assert_eq!(fmt("(a < b) + 1"), "(a < b) + 1");
        assert_eq!(fmt("a < b && c"), "a < b && c");
    }

    #[test]
    fn test_unknown_operator_is_an_error() {
        let node = Node::operator("@", vec![Node::number(1), Node::number(2)]);
        let err = format_node(&node).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperator("@".into()));
    }
}
