use std::fmt;
use std::sync::Arc;

/// Resolves one axis of a node's size.
///
/// A specification is resolved against the *children extent*: the furthest
/// pixel any direct child reaches along that axis
/// (`child.position + child.resolved_size`, 0 with no children). Resolution
/// is re-run on every query; nothing is cached.
#[derive(Clone)]
pub enum SizeSpec {
    /// A concrete pixel size, independent of children.
    Fixed(u32),
    /// A caller-supplied function of the children extent.
    ///
    /// The engine treats the function as pure; it is invoked on every size
    /// query.
    Func(Arc<dyn Fn(u32) -> u32 + Send + Sync>),
    /// An arithmetic expression over the placeholder `children`, e.g.
    /// `"children + 10"` or `"(children * 2) / 3"`.
    ///
    /// Supported: integer and float literals, `+ - * /`, parentheses, unary
    /// minus. The result is truncated to an integer and clamped at 0. A
    /// malformed expression resolves to the raw children extent; it never
    /// errors.
    Expr(String),
}

impl SizeSpec {
    /// Shorthand for an expression spec.
    pub fn expr(src: impl Into<String>) -> Self {
        Self::Expr(src.into())
    }

    /// Shorthand for a function spec.
    pub fn func(f: impl Fn(u32) -> u32 + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// Resolve this spec against the current children extent.
    pub fn resolve(&self, children_extent: u32) -> u32 {
        match self {
            Self::Fixed(v) => *v,
            Self::Func(f) => f(children_extent),
            Self::Expr(src) => eval_expr(src, children_extent).unwrap_or(children_extent),
        }
    }
}

impl From<u32> for SizeSpec {
    fn from(v: u32) -> Self {
        Self::Fixed(v)
    }
}

impl fmt::Debug for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
            Self::Expr(src) => f.debug_tuple("Expr").field(src).finish(),
        }
    }
}

/// Evaluate an arithmetic size expression. `None` signals a malformed
/// expression; the caller falls back to the raw children extent.
fn eval_expr(src: &str, children_extent: u32) -> Option<u32> {
    let tokens = lex(src)?;
    let mut p = Parser { tokens, pos: 0 };
    let value = p.parse_term(children_extent)?;
    if !matches!(p.peek(), Token::Eof) {
        return None;
    }
    if !value.is_finite() {
        return None;
    }
    Some(value.max(0.0).trunc() as u32)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Children,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

fn lex(src: &str) -> Option<Vec<Token>> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
            }
            let text = &src[start..i];
            out.push(Token::Number(text.parse::<f64>().ok()?));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < bytes.len() && {
                let c = bytes[i] as char;
                c.is_ascii_alphanumeric() || c == '_'
            } {
                i += 1;
            }
            // `children` is the only identifier the grammar knows.
            match &src[start..i] {
                "children" => out.push(Token::Children),
                _ => return None,
            }
            continue;
        }

        let tok = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return None,
        };
        out.push(tok);
        i += 1;
    }

    out.push(Token::Eof);
    Some(out)
}

/// Recursive-descent evaluator over the token stream. Precedence levels:
/// term (`+ -`) over factor (`* /`) over unary/primary.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn consume(&mut self, tok: Token) -> bool {
        if *self.peek() == tok {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_term(&mut self, children: u32) -> Option<f64> {
        let mut value = self.parse_factor(children)?;
        loop {
            if self.consume(Token::Plus) {
                value += self.parse_factor(children)?;
            } else if self.consume(Token::Minus) {
                value -= self.parse_factor(children)?;
            } else {
                return Some(value);
            }
        }
    }

    fn parse_factor(&mut self, children: u32) -> Option<f64> {
        let mut value = self.parse_unary(children)?;
        loop {
            if self.consume(Token::Star) {
                value *= self.parse_unary(children)?;
            } else if self.consume(Token::Slash) {
                value /= self.parse_unary(children)?;
            } else {
                return Some(value);
            }
        }
    }

    fn parse_unary(&mut self, children: u32) -> Option<f64> {
        if self.consume(Token::Minus) {
            return Some(-self.parse_unary(children)?);
        }
        self.parse_primary(children)
    }

    fn parse_primary(&mut self, children: u32) -> Option<f64> {
        match self.bump() {
            Token::Number(v) => Some(v),
            Token::Children => Some(f64::from(children)),
            Token::LParen => {
                let value = self.parse_term(children)?;
                if self.consume(Token::RParen) {
                    Some(value)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/size.rs"]
mod tests;
