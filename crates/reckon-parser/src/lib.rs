pub mod parser;

pub use parser::Parser;

use reckon_lexer::Lexer;
use reckon_syntax::ast::Node;
use reckon_syntax::error::Result;

/// Lexes and parses `input` as a single expression.
pub fn parse_str(input: &str) -> Result<Node> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse_expression()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_syntax::ast::*;
    use reckon_syntax::error::ErrorKind;

    fn parse_expr_str(input: &str) -> Node {
        parse_str(input).expect("Parsing should succeed")
    }

    fn num(n: i64) -> Node {
        Node::number(n)
    }

    #[test]
    fn test_literal_expressions() {
        assert_eq!(parse_expr_str("42"), num(42));
        assert_eq!(parse_expr_str("0.5"), Node::Number("0.5".parse().unwrap()));
        assert_eq!(parse_expr_str("0xFF"), Node::Hex("0xFF".into()));
        assert_eq!(parse_expr_str("'hello'"), Node::Str("'hello'".into()));
        assert_eq!(parse_expr_str("true"), Node::Bool(true));
        assert_eq!(parse_expr_str("false"), Node::Bool(false));
    }

    #[test]
    fn test_variables() {
        assert_eq!(parse_expr_str("hp"), Node::variable("hp"));
        assert_eq!(parse_expr_str("?bonus"), Node::prompt_variable("bonus"));
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(
            parse_expr_str("1 + 2 * 3"),
            Node::operator("+", vec![num(1), Node::operator("*", vec![num(2), num(3)])])
        );
        assert_eq!(
            parse_expr_str("(1 + 2) * 3"),
            Node::operator("*", vec![Node::operator("+", vec![num(1), num(2)]), num(3)])
        );
    }

    #[test]
    fn test_same_operator_runs_flatten() {
        assert_eq!(
            parse_expr_str("1 + 2 + 3"),
            Node::operator("+", vec![num(1), num(2), num(3)])
        );
        assert_eq!(
            parse_expr_str("1 + 2 - 3"),
            Node::operator("-", vec![Node::operator("+", vec![num(1), num(2)]), num(3)])
        );
        assert_eq!(
            parse_expr_str("a < b < c"),
            Node::operator("<", vec![Node::variable("a"), Node::variable("b"), Node::variable("c")])
        );
    }

    #[test]
    fn test_parenthesized_group_is_not_merged() {
        assert_eq!(
            parse_expr_str("(a < b) < c"),
            Node::operator(
                "<",
                vec![
                    Node::operator("<", vec![Node::variable("a"), Node::variable("b")]),
                    Node::variable("c"),
                ]
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse_expr_str("2 ^ 3 ^ 2"),
            Node::operator("^", vec![num(2), Node::operator("^", vec![num(3), num(2)])])
        );
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(parse_expr_str("-x"), Node::unary("-", Node::variable("x")));
        assert_eq!(parse_expr_str("!true"), Node::unary("!", Node::Bool(true)));
        assert_eq!(
            parse_expr_str("-2 ^ 2"),
            Node::unary("-", Node::operator("^", vec![num(2), num(2)]))
        );
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            parse_expr_str("x = 1 + 2"),
            Node::assign("x", Node::operator("+", vec![num(1), num(2)]))
        );
        assert_eq!(
            parse_expr_str("x = y = 3"),
            Node::assign("x", Node::assign("y", num(3)))
        );
        // `==` is a comparison, not an assignment
        assert!(matches!(parse_expr_str("x == 3"), Node::Operator { op, .. } if op == "=="));
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(parse_expr_str("random()"), Node::function("random", vec![]));
        assert_eq!(
            parse_expr_str("max(1, x, 2 * 3)"),
            Node::function(
                "max",
                vec![num(1), Node::variable("x"), Node::operator("*", vec![num(2), num(3)])]
            )
        );
    }

    #[test]
    fn test_logical_levels() {
        let node = parse_expr_str("a || b && c == d");
        let Node::Operator { op, operands } = node else { panic!("expected operator") };
        assert_eq!(op, "||");
        assert!(matches!(&operands[1], Node::Operator { op, .. } if op == "&&"));
    }

    #[test]
    fn test_syntax_errors_are_located() {
        let err = parse_str("max(1, 2").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Syntax(_)));
        assert_eq!((err.line, err.col), (Some(1), Some(9)));

        assert!(parse_str("1 +").is_err());
        assert!(parse_str("(1").is_err());
        assert!(parse_str("1 2").is_err());
        assert!(parse_str("").is_err());
    }
}
