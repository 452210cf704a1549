//! Reckon lexer: converts expression text into tokens.
use reckon_syntax::error::{error_at, ErrorKind, Result};
use reckon_syntax::token::{Token, TokenKind};

fn syntax(msg: impl Into<String>) -> ErrorKind {
    ErrorKind::Syntax(msg.into())
}

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, s: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if pred(c) {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x') | Some('X')) {
            s.push('0');
            self.advance();
            s.push(self.advance().unwrap_or('x'));
            let before = s.len();
            self.read_while(&mut s, |c| c.is_ascii_hexdigit());
            if s.len() == before {
                return error_at(line, col, syntax(format!("Invalid hex number '{}'", s)));
            }
            return Ok(TokenKind::HexNumber(s));
        }
        self.read_while(&mut s, |c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            s.push('.');
            self.advance();
            self.read_while(&mut s, |c| c.is_ascii_digit());
        }
        Ok(TokenKind::Number(s))
    }

    fn read_ident(&mut self) -> String {
        let mut s = String::new();
        self.read_while(&mut s, |c| c.is_alphanumeric() || c == '_' || c == '.');
        s
    }

    /// Reads a quoted string, keeping the quotes and any escapes as written.
    fn read_string(&mut self, quote: char, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        s.push(quote);
        self.advance();
        while let Some(c) = self.advance() {
            s.push(c);
            if c == '\\' {
                match self.advance() {
                    Some(n) => s.push(n),
                    None => break,
                }
            } else if c == quote {
                return Ok(TokenKind::String(s));
            }
        }
        error_at(line, col, syntax("Unterminated string"))
    }

    fn two_char(&mut self, next: char, double: TokenKind, single: TokenKind) -> TokenKind {
        self.advance();
        if self.peek() == Some(next) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let kind = match self.peek() {
                None => {
                    tokens.push(Token {
                        kind: TokenKind::Eof,
                        line,
                        col,
                    });
                    break;
                }
                Some(c) => match c {
                    '(' => {
                        self.advance();
                        TokenKind::LParen
                    }
                    ')' => {
                        self.advance();
                        TokenKind::RParen
                    }
                    ',' => {
                        self.advance();
                        TokenKind::Comma
                    }
                    '+' => {
                        self.advance();
                        TokenKind::Plus
                    }
                    '-' => {
                        self.advance();
                        TokenKind::Minus
                    }
                    '*' => {
                        self.advance();
                        TokenKind::Star
                    }
                    '/' => {
                        self.advance();
                        TokenKind::Slash
                    }
                    '^' => {
                        self.advance();
                        TokenKind::Caret
                    }
                    '=' => self.two_char('=', TokenKind::EqEq, TokenKind::Equal),
                    '!' => self.two_char('=', TokenKind::NotEq, TokenKind::Bang),
                    '<' => self.two_char('=', TokenKind::LessEq, TokenKind::Less),
                    '>' => self.two_char('=', TokenKind::GreaterEq, TokenKind::Greater),
                    '&' => {
                        if self.peek_next() != Some('&') {
                            return error_at(line, col, syntax("Unexpected '&' (did you mean '&&'?)"));
                        }
                        self.advance();
                        self.advance();
                        TokenKind::AndAnd
                    }
                    '|' => {
                        if self.peek_next() != Some('|') {
                            return error_at(line, col, syntax("Unexpected '|' (did you mean '||'?)"));
                        }
                        self.advance();
                        self.advance();
                        TokenKind::OrOr
                    }
                    '\'' | '"' => self.read_string(c, line, col)?,
                    '?' => {
                        self.advance();
                        match self.peek() {
                            Some(n) if n.is_alphabetic() || n == '_' => TokenKind::PromptIdent(self.read_ident()),
                            _ => return error_at(line, col, syntax("Expected variable name after '?'")),
                        }
                    }
                    c if c.is_ascii_digit() => self.read_number(line, col)?,
                    '.' if self.peek_next().map_or(false, |n| n.is_ascii_digit()) => {
                        let mut s = String::from("0");
                        self.advance();
                        s.push('.');
                        self.read_while(&mut s, |c| c.is_ascii_digit());
                        TokenKind::Number(s)
                    }
                    c if c.is_alphabetic() || c == '_' => {
                        let s = self.read_ident();
                        match s.as_str() {
                            "true" => TokenKind::True,
                            "false" => TokenKind::False,
                            _ => TokenKind::Ident(s),
                        }
                    }
                    other => {
                        return error_at(line, col, syntax(format!("Unexpected character '{}'", other)));
                    }
                },
            };
            tokens.push(Token { kind, line, col });
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .expect("lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.25 0x1F .5"),
            vec![
                TokenKind::Number("42".into()),
                TokenKind::Number("3.25".into()),
                TokenKind::HexNumber("0x1F".into()),
                TokenKind::Number("0.5".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_keep_quotes() {
        assert_eq!(
            kinds(r#"'hello' "it's""#),
            vec![
                TokenKind::String("'hello'".into()),
                TokenKind::String("\"it's\"".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds(r"'a\'b'")[0], TokenKind::String(r"'a\'b'".into()));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= == != ! < <= > >= && || + - * / ^"),
            vec![
                TokenKind::Equal,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Bang,
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Caret,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_and_prompts() {
        assert_eq!(
            kinds("hp ?bonus true false"),
            vec![
                TokenKind::Ident("hp".into()),
                TokenKind::PromptIdent("bonus".into()),
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("1 +\n  x").tokenize().unwrap();
        assert_eq!((tokens[1].line, tokens[1].col), (1, 3));
        assert_eq!((tokens[2].line, tokens[2].col), (2, 3));
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("'open").tokenize().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax("Unterminated string".into()));
        assert_eq!((err.line, err.col), (Some(1), Some(1)));

        assert!(Lexer::new("1 & 2").tokenize().is_err());
        assert!(Lexer::new("a # b").tokenize().is_err());
        assert!(Lexer::new("0x").tokenize().is_err());
        assert!(Lexer::new("? 1").tokenize().is_err());
    }
}
