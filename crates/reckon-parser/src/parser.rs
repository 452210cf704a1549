//! Recursive-descent parser from tokens to expression trees.
//!
//! Precedence, loosest first: assignment, `||`, `&&`, equality, comparison,
//! additive, multiplicative, unary, `^`. Runs of the same infix operator are
//! collected into one n-ary node, so `1 + 2 + 3` becomes `+(1, 2, 3)` and
//! `a < b < c` becomes a chained comparison `<(a, b, c)`.

use reckon_syntax::ast::Node;
use reckon_syntax::error::{error_at, Error, ErrorKind, Result};
use reckon_syntax::token::{Token, TokenKind};
use reckon_syntax::Decimal;

const OR: &[TokenKind] = &[TokenKind::OrOr];
const AND: &[TokenKind] = &[TokenKind::AndAnd];
const EQUALITY: &[TokenKind] = &[TokenKind::EqEq, TokenKind::NotEq];
const COMPARISON: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEq,
    TokenKind::Greater,
    TokenKind::GreaterEq,
];
const ADDITIVE: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash];

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> &TokenKind {
        self.tokens.get(self.pos).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn peek_next(&self) -> &TokenKind {
        self.tokens.get(self.pos + 1).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn position(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.col))
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn unexpected<T>(&self, expected: &str) -> Result<T> {
        let (line, col) = self.position();
        error_at(
            line,
            col,
            ErrorKind::Syntax(format!("Expected {} but found {}", expected, self.peek().describe())),
        )
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if *self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            self.unexpected(what)
        }
    }

    /// Parses a complete expression; trailing tokens are an error.
    pub fn parse_expression(&mut self) -> Result<Node> {
        let node = self.parse_expr()?;
        if *self.peek() != TokenKind::Eof {
            return self.unexpected("end of input");
        }
        Ok(node)
    }

    /// Parses one expression starting at the current token.
    pub fn parse_expr(&mut self) -> Result<Node> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Node> {
        if let (TokenKind::Ident(name), TokenKind::Equal) = (self.peek(), self.peek_next()) {
            let name = name.clone();
            self.advance();
            self.advance();
            let value = self.parse_assignment()?;
            return Ok(Node::assign(name, value));
        }
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Node> {
        self.parse_infix(OR, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Node> {
        self.parse_infix(AND, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Node> {
        self.parse_infix(EQUALITY, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Node> {
        self.parse_infix(COMPARISON, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Node> {
        self.parse_infix(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Node> {
        self.parse_infix(MULTIPLICATIVE, Self::parse_unary)
    }

    /// Left-associative infix level; consecutive uses of the same operator
    /// extend one n-ary node.
    fn parse_infix(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> Result<Node>,
    ) -> Result<Node> {
        let mut node = next(self)?;
        let mut built_here = false;
        while ops.contains(self.peek()) {
            let op = self.advance().symbol().unwrap_or_default();
            let rhs = next(self)?;
            node = match node {
                Node::Operator { op: current, mut operands } if built_here && current == op => {
                    operands.push(rhs);
                    Node::Operator { op: current, operands }
                }
                lhs => Node::operator(op, vec![lhs, rhs]),
            };
            built_here = true;
        }
        Ok(node)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        match self.peek() {
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang => {
                let op = self.advance().symbol().unwrap_or_default();
                let operand = self.parse_unary()?;
                Ok(Node::unary(op, operand))
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Node> {
        let base = self.parse_primary()?;
        if *self.peek() == TokenKind::Caret {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(Node::operator("^", vec![base, exponent]));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let (line, col) = self.position();
        match self.peek().clone() {
            TokenKind::Number(text) => {
                self.advance();
                let value: Decimal = text
                    .parse()
                    .map_err(|e: Error| Error::with_span(e.kind, line, col))?;
                Ok(Node::Number(value))
            }
            TokenKind::HexNumber(text) => {
                self.advance();
                Ok(Node::Hex(text))
            }
            TokenKind::String(text) => {
                self.advance();
                Ok(Node::Str(text))
            }
            TokenKind::True => {
                self.advance();
                Ok(Node::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Node::Bool(false))
            }
            TokenKind::PromptIdent(name) => {
                self.advance();
                Ok(Node::prompt_variable(name))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if *self.peek() == TokenKind::LParen {
                    self.advance();
                    let args = self.parse_args()?;
                    Ok(Node::function(name, args))
                } else {
                    Ok(Node::variable(name))
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            _ => self.unexpected("an expression"),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Node>> {
        let mut args = Vec::new();
        if *self.peek() == TokenKind::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RParen => {
                    self.advance();
                    return Ok(args);
                }
                _ => return self.unexpected("',' or ')'"),
            }
        }
    }
}
