//! Token definitions for the Reckon expression lexer.
//!
//! Tokens are the smallest meaningful units of an expression: literals,
//! identifiers, operators and punctuation.
//!
//! # Token Categories
//!
//! - **Literals**: decimal numbers (`42`, `0.25`), hex numbers (`0x1F`),
//!   strings (`'text'`, `"text"`), `true` and `false`
//! - **Names**: identifiers (`hp`, `max`) and prompt variables (`?bonus`)
//! - **Operators**: `= + - * / ^ ! == != < <= > >= && ||`
//! - **Punctuation**: `(`, `)`, `,`
//! - **Special**: end-of-input marker
//!
//! # Examples
//!
//! ```rust
//! use reckon_syntax::{Token, TokenKind};
//!
//! let number = Token {
//!     kind: TokenKind::Number("1.5".to_string()),
//!     line: 1,
//!     col: 1,
//! };
//! assert_eq!(number.kind.describe(), "number '1.5'");
//! ```

/// Token types produced by the Reckon lexer.
///
/// Literal tokens keep their source text; numbers are converted to exact
/// decimals by the parser and string tokens keep their quotes until
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Literals ===

    /// A decimal literal, e.g. `42`, `3.14`
    Number(String),

    /// A hexadecimal literal including its prefix, e.g. `0xFF`
    HexNumber(String),

    /// A string literal including its surrounding quotes, e.g. `'hi'`
    String(String),

    /// The `true` keyword
    True,

    /// The `false` keyword
    False,

    // === Names ===

    /// An identifier (variable or function name)
    Ident(String),

    /// A `?name` prompt variable; holds the name without the sigil
    PromptIdent(String),

    // === Punctuation ===

    /// Comma separator `,`
    Comma,

    /// Left parenthesis `(`
    LParen,

    /// Right parenthesis `)`
    RParen,

    // === Operators ===

    /// Assignment `=`
    Equal,

    /// `+`
    Plus,

    /// `-`
    Minus,

    /// `*`
    Star,

    /// `/`
    Slash,

    /// Exponentiation `^`
    Caret,

    /// Logical not `!`
    Bang,

    /// `==`
    EqEq,

    /// `!=`
    NotEq,

    /// `<`
    Less,

    /// `<=`
    LessEq,

    /// `>`
    Greater,

    /// `>=`
    GreaterEq,

    /// `&&`
    AndAnd,

    /// `||`
    OrOr,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Operator symbol as it appears in the AST, for operator tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Equal => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::Bang => "!",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEq => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            _ => return None,
        })
    }

    /// Description used in parse error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(s) => format!("number '{}'", s),
            TokenKind::HexNumber(s) => format!("hex number '{}'", s),
            TokenKind::String(s) => format!("string {}", s),
            TokenKind::True => "'true'".to_string(),
            TokenKind::False => "'false'".to_string(),
            TokenKind::Ident(s) => format!("identifier '{}'", s),
            TokenKind::PromptIdent(s) => format!("prompt variable '?{}'", s),
            TokenKind::Comma => "','".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("'{}'", other.symbol().unwrap_or("?")),
        }
    }
}

/// A token with its source location.
///
/// `line` and `col` are 1-based and point at the first character of the
/// token, so the parser can report errors like:
///
/// ```text
/// Expected ')' but found end of input at 1:8
///   max(1, 2
///          ^
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type and semantic content of this token
    pub kind: TokenKind,

    /// Line number in the source text (1-based)
    pub line: usize,

    /// Column number in the source text (1-based)
    pub col: usize,
}
