use crate::dbc::core::numbers;
use crate::dbc::core::records::Record;
use crate::dbc::types::errors::{ParseError, ParseErrorKind};

use std::fmt;
use std::str::FromStr;

/// Punctuation that separates tokens in DBC records.
const PUNCT: &[char] = &[':', ';', ',', '|', '@', '(', ')', '[', ']'];

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    /// Identifier, keyword or numeric literal.
    Word(String),
    /// Content of a quoted string, escapes resolved.
    Quoted(String),
    Punct(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::Quoted(q) => write!(f, "\"{}\"", q),
            Token::Punct(c) => write!(f, "{}", c),
        }
    }
}

/// Splits a record into tokens. On failure returns the kind of error and the
/// text where it starts.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, (ParseErrorKind, String)> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
        } else if ch == '"' {
            chars.next();
            let mut content = String::new();
            let mut closed = false;
            while let Some((_, c)) = chars.next() {
                match c {
                    '\\' => match chars.next() {
                        Some((_, esc @ ('"' | '\\'))) => content.push(esc),
                        Some((_, other)) => {
                            content.push('\\');
                            content.push(other);
                        }
                        None => content.push('\\'),
                    },
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => content.push(c),
                }
            }
            if !closed {
                let snippet: String = text[start..].chars().take(24).collect();
                return Err((ParseErrorKind::UnterminatedString, snippet));
            }
            tokens.push(Token::Quoted(content));
        } else if PUNCT.contains(&ch) {
            chars.next();
            tokens.push(Token::Punct(ch));
        } else {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() || c == '"' || PUNCT.contains(&c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            tokens.push(Token::Word(text[start..end].to_string()));
        }
    }

    Ok(tokens)
}

/// Sequential reader over the tokens of one record.
///
/// Every failure is reported as a [`ParseError`] located at the record's line.
pub(crate) struct Cursor<'a> {
    origin: &'a str,
    line: usize,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(origin: &'a str, record: &Record) -> Result<Self, ParseError> {
        let tokens = tokenize(&record.text).map_err(|(reason, token)| ParseError {
            origin: origin.to_string(),
            line: record.line,
            token,
            reason,
        })?;
        Ok(Cursor {
            origin,
            line: record.line,
            tokens,
            pos: 0,
        })
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Builds an error located at the current token.
    pub(crate) fn error(&self, reason: ParseErrorKind) -> ParseError {
        let token: String = self
            .tokens
            .get(self.pos)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "<end of record>".to_string());
        ParseError {
            origin: self.origin.to_string(),
            line: self.line,
            token,
            reason,
        }
    }

    /// Builds an error located at the previously consumed token.
    pub(crate) fn error_at_previous(&self, reason: ParseErrorKind) -> ParseError {
        let mut err = self.error(reason);
        if let Some(prev) = self.pos.checked_sub(1).and_then(|p| self.tokens.get(p)) {
            err.token = prev.to_string();
        }
        err
    }

    /// Builds an error naming a token consumed earlier (e.g. an unresolved identifier).
    pub(crate) fn error_for(&self, token: &str, reason: ParseErrorKind) -> ParseError {
        ParseError {
            origin: self.origin.to_string(),
            line: self.line,
            token: token.to_string(),
            reason,
        }
    }

    fn missing(&self, expected: &'static str) -> ParseError {
        if self.pos >= self.tokens.len() {
            self.error(ParseErrorKind::UnexpectedEnd { expected })
        } else {
            self.error(ParseErrorKind::UnexpectedToken { expected })
        }
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_word(&self) -> Option<&str> {
        match self.peek() {
            Some(Token::Word(w)) => Some(w.as_str()),
            _ => None,
        }
    }

    pub(crate) fn peek_is_punct(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Punct(p)) if *p == c)
    }

    /// Consumes the next token whatever it is.
    pub(crate) fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn word(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Word(w)) => {
                let w = w.clone();
                self.pos += 1;
                Ok(w)
            }
            _ => Err(self.missing(expected)),
        }
    }

    pub(crate) fn quoted(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Quoted(q)) => {
                let q = q.clone();
                self.pos += 1;
                Ok(q)
            }
            _ => Err(self.missing(expected)),
        }
    }

    pub(crate) fn punct(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.missing(expected))
        }
    }

    pub(crate) fn eat_punct(&mut self, c: char) -> bool {
        if self.peek_is_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Reads an integer word (`u16`, `u32`, `i64`, ...).
    pub(crate) fn integer<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        let w = self.word(expected)?;
        w.parse::<T>()
            .map_err(|_| self.error_at_previous(ParseErrorKind::MalformedNumber))
    }

    /// Reads a decimal/exponential literal.
    pub(crate) fn number(&mut self, expected: &'static str) -> Result<f64, ParseError> {
        let w = self.word(expected)?;
        numbers::parse_f64(&w).ok_or_else(|| self.error_at_previous(ParseErrorKind::MalformedNumber))
    }

    /// True when only an optional `;` is left.
    pub(crate) fn at_end(&self) -> bool {
        match &self.tokens[self.pos.min(self.tokens.len())..] {
            [] => true,
            [Token::Punct(';')] => true,
            _ => false,
        }
    }

    /// Consumes the optional terminating `;` and requires the record to end there.
    pub(crate) fn finish(&mut self) -> Result<(), ParseError> {
        self.eat_punct(';');
        if self.pos < self.tokens.len() {
            return Err(self.error(ParseErrorKind::UnexpectedToken {
                expected: "end of record",
            }));
        }
        Ok(())
    }
}
