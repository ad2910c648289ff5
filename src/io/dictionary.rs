//! Reader and writer for case dictionaries.
//!
//! Boundary conditions are configured from the `key value;` dictionary format
//! used by finite-volume case files:
//!
//! ```text
//! // Boundary conditions for the scalar field
//! inlet
//! {
//!     type            multiFreqScalar;
//!     refValue        1.0;
//!     amplitudes      2(0.5 1.0);
//!     frequencies     (10.0 5.0);
//!     phases          (0.0 1.0);   /* radians */
//! }
//! ```
//!
//! Supported syntax:
//! - `key value ...;` entries with whitespace separated tokens
//! - lists `( ... )`, optionally prefixed by their element count `N( ... )`
//! - sub-dictionaries `name { ... }`
//! - `//` line comments and `/* ... */` block comments
//! - quoted strings `"..."`
//!
//! Entry order is preserved, so a parsed dictionary writes back in the order
//! it was read. Scalars are written with the shortest representation that
//! parses back to the same `f64`.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::Path;

use thiserror::Error;

/// Error type for dictionary parsing and lookup.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Parse error with line number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Counted list whose element count disagrees with its prefix
    #[error("List at line {line} declares {expected} elements but contains {found}")]
    ListLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Required entry not present
    #[error("Missing required entry '{0}'")]
    MissingEntry(String),

    /// Entry present but of the wrong shape
    #[error("Invalid entry '{key}': {message}")]
    InvalidEntry { key: String, message: String },
}

/// A single value token of a primitive entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Numeric literal
    Scalar(f64),
    /// Bare word or quoted string
    ///
    /// Words that would not read back as the same single word (empty, or
    /// containing whitespace, delimiters or `/`, or parsing as a number) are
    /// written quoted. The format has no escape for `"`, so a word containing
    /// one cannot be written in a form that parses back.
    Word(String),
    /// Parenthesised list
    List(Vec<Value>),
}

impl Value {
    /// Numeric value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Word value, if this is a word.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Value::Word(w) => Some(w),
            _ => None,
        }
    }

    /// List of scalars from a list value.
    pub fn as_scalar_list(&self) -> Option<Vec<f64>> {
        match self {
            Value::List(items) => items.iter().map(Value::as_scalar).collect(),
            _ => None,
        }
    }

    /// Build a list value from scalars.
    pub fn scalar_list(values: &[f64]) -> Self {
        Value::List(values.iter().copied().map(Value::Scalar).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{x}"),
            Value::Word(w) => write!(f, "{}", quote_word(w)),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Word as it must be written to parse back as the same word.
fn quote_word(w: &str) -> Cow<'_, str> {
    let needs_quotes = w.is_empty()
        || w.parse::<f64>().is_ok()
        || w.chars().any(|c| c.is_whitespace() || "(){};\"/".contains(c));
    if needs_quotes {
        Cow::Owned(format!("\"{w}\""))
    } else {
        Cow::Borrowed(w)
    }
}

/// Right-hand side of a dictionary entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// `key token token ...;`
    Primitive(Vec<Value>),
    /// `key { ... }`
    Dict(Dictionary),
}

/// Ordered collection of keyed entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, Entry)>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Insert or replace an entry.
    ///
    /// Replacing keeps the original position of the key.
    pub fn set(&mut self, key: impl Into<String>, entry: Entry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Insert a single-token primitive entry.
    pub fn set_value(&mut self, key: impl Into<String>, value: Value) {
        self.set(key, Entry::Primitive(vec![value]));
    }

    /// Insert a scalar entry.
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f64) {
        self.set_value(key, Value::Scalar(value));
    }

    /// Insert a word entry.
    pub fn set_word(&mut self, key: impl Into<String>, word: impl Into<String>) {
        self.set_value(key, Value::Word(word.into()));
    }

    /// Insert a scalar list entry.
    pub fn set_scalar_list(&mut self, key: impl Into<String>, values: &[f64]) {
        self.set_value(key, Value::scalar_list(values));
    }

    /// Insert a sub-dictionary.
    pub fn set_dict(&mut self, key: impl Into<String>, dict: Dictionary) {
        self.set(key, Entry::Dict(dict));
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    fn primitive(&self, key: &str) -> Result<&[Value], DictionaryError> {
        match self.get(key) {
            Some(Entry::Primitive(values)) => Ok(values),
            Some(Entry::Dict(_)) => Err(invalid(key, "expected a value, found a sub-dictionary")),
            None => Err(DictionaryError::MissingEntry(key.to_string())),
        }
    }

    fn single(&self, key: &str) -> Result<&Value, DictionaryError> {
        match self.primitive(key)? {
            [value] => Ok(value),
            values => Err(invalid(
                key,
                &format!("expected a single value, found {} tokens", values.len()),
            )),
        }
    }

    /// Required scalar entry.
    pub fn scalar(&self, key: &str) -> Result<f64, DictionaryError> {
        self.single(key)?
            .as_scalar()
            .ok_or_else(|| invalid(key, "expected a scalar"))
    }

    /// Optional scalar entry with a default.
    pub fn scalar_or(&self, key: &str, default: f64) -> Result<f64, DictionaryError> {
        if self.contains(key) {
            self.scalar(key)
        } else {
            Ok(default)
        }
    }

    /// Required list-of-scalars entry.
    pub fn scalar_list(&self, key: &str) -> Result<Vec<f64>, DictionaryError> {
        self.single(key)?
            .as_scalar_list()
            .ok_or_else(|| invalid(key, "expected a list of scalars"))
    }

    /// Required word entry.
    pub fn word(&self, key: &str) -> Result<&str, DictionaryError> {
        self.single(key)?
            .as_word()
            .ok_or_else(|| invalid(key, "expected a word"))
    }

    /// Required sub-dictionary.
    pub fn sub_dict(&self, key: &str) -> Result<&Dictionary, DictionaryError> {
        match self.get(key) {
            Some(Entry::Dict(dict)) => Ok(dict),
            Some(Entry::Primitive(_)) => Err(invalid(key, "expected a sub-dictionary")),
            None => Err(DictionaryError::MissingEntry(key.to_string())),
        }
    }

    /// Spatially uniform scalar, written either `uniform x` or `x`.
    pub fn uniform_scalar(&self, key: &str) -> Result<f64, DictionaryError> {
        match self.primitive(key)? {
            [Value::Scalar(x)] => Ok(*x),
            [Value::Word(w), Value::Scalar(x)] if w == "uniform" => Ok(*x),
            _ => Err(invalid(key, "expected 'uniform <scalar>' or '<scalar>'")),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        for (key, entry) in &self.entries {
            let key = quote_word(key);
            match entry {
                Entry::Primitive(values) => {
                    // Keys are padded to 16 columns but always separated from the value
                    write!(f, "{indent}{key:<15} ")?;
                    for (i, value) in values.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{value}")?;
                    }
                    writeln!(f, ";")?;
                }
                Entry::Dict(dict) => {
                    writeln!(f, "{indent}{key}")?;
                    writeln!(f, "{indent}{{")?;
                    dict.write_indented(f, depth + 1)?;
                    writeln!(f, "{indent}}}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn invalid(key: &str, message: &str) -> DictionaryError {
    DictionaryError::InvalidEntry {
        key: key.to_string(),
        message: message.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    Word(String),
    Quoted(String),
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    line: usize,
    /// True when no whitespace separates this token from the previous one.
    attached: bool,
}

fn tokenize(content: &str) -> Result<Vec<Token>, DictionaryError> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();
    let mut line = 1;
    let mut attached = false;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                attached = false;
                chars.next();
            }
            c if c.is_whitespace() => {
                attached = false;
                chars.next();
            }
            '/' => {
                chars.next();
                match chars.peek() {
                    Some('/') => {
                        while let Some(&c) = chars.peek() {
                            if c == '\n' {
                                break;
                            }
                            chars.next();
                        }
                    }
                    Some('*') => {
                        let start = line;
                        chars.next();
                        let mut prev = '\0';
                        let mut closed = false;
                        for c in chars.by_ref() {
                            if c == '\n' {
                                line += 1;
                            }
                            if prev == '*' && c == '/' {
                                closed = true;
                                break;
                            }
                            prev = c;
                        }
                        if !closed {
                            return Err(DictionaryError::ParseError {
                                line: start,
                                message: "Unterminated block comment".into(),
                            });
                        }
                    }
                    _ => {
                        return Err(DictionaryError::ParseError {
                            line,
                            message: "Unexpected '/'".into(),
                        });
                    }
                }
                attached = false;
            }
            '"' => {
                let start = line;
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '"' {
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        line += 1;
                    }
                    text.push(c);
                }
                if !closed {
                    return Err(DictionaryError::ParseError {
                        line: start,
                        message: "Unterminated string".into(),
                    });
                }
                tokens.push(Token {
                    kind: TokenKind::Quoted(text),
                    line: start,
                    attached,
                });
                attached = true;
            }
            '(' | ')' | '{' | '}' | ';' => {
                let kind = match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    _ => TokenKind::Semicolon,
                };
                tokens.push(Token {
                    kind,
                    line,
                    attached,
                });
                chars.next();
                attached = true;
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || "(){};\"".contains(c) {
                        break;
                    }
                    if c == '/' {
                        let mut lookahead = chars.clone();
                        lookahead.next();
                        if matches!(lookahead.peek(), Some('/') | Some('*')) {
                            break;
                        }
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line,
                    attached,
                });
                attached = true;
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    fn parse_entries(&mut self, nested: bool) -> Result<Dictionary, DictionaryError> {
        let mut dict = Dictionary::new();

        loop {
            let Some(token) = self.advance() else {
                if nested {
                    return Err(DictionaryError::ParseError {
                        line: self.last_line(),
                        message: "Unexpected end of input, expected '}'".into(),
                    });
                }
                return Ok(dict);
            };

            let key = match token.kind {
                TokenKind::RBrace if nested => return Ok(dict),
                TokenKind::Word(key) | TokenKind::Quoted(key) => key,
                other => {
                    return Err(DictionaryError::ParseError {
                        line: token.line,
                        message: format!("Expected entry keyword, found {}", describe(&other)),
                    });
                }
            };

            let entry = if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LBrace)) {
                self.advance();
                Entry::Dict(self.parse_entries(true)?)
            } else {
                Entry::Primitive(self.parse_values(&key, token.line)?)
            };
            dict.set(key, entry);
        }
    }

    fn parse_values(&mut self, key: &str, key_line: usize) -> Result<Vec<Value>, DictionaryError> {
        let mut values = Vec::new();

        loop {
            let Some(token) = self.advance() else {
                return Err(DictionaryError::ParseError {
                    line: key_line,
                    message: format!("Entry '{key}' is missing a terminating ';'"),
                });
            };
            match token.kind {
                TokenKind::Semicolon => return Ok(values),
                TokenKind::LParen => values.push(self.parse_list(token.line, None)?),
                TokenKind::Word(word) => values.push(self.word_or_counted_list(word, token.line)?),
                TokenKind::Quoted(text) => values.push(Value::Word(text)),
                other => {
                    return Err(DictionaryError::ParseError {
                        line: token.line,
                        message: format!("Unexpected {} in entry '{key}'", describe(&other)),
                    });
                }
            }
        }
    }

    fn word_or_counted_list(&mut self, word: String, line: usize) -> Result<Value, DictionaryError> {
        let counted = match self.peek() {
            Some(next) if next.kind == TokenKind::LParen && next.attached => {
                word.parse::<usize>().ok()
            }
            _ => None,
        };
        if let Some(count) = counted {
            let open = self.advance().map(|t| t.line).unwrap_or(line);
            return self.parse_list(open, Some(count));
        }
        Ok(match word.parse::<f64>() {
            Ok(x) => Value::Scalar(x),
            Err(_) => Value::Word(word),
        })
    }

    fn parse_list(&mut self, open_line: usize, expected: Option<usize>) -> Result<Value, DictionaryError> {
        let mut items = Vec::new();

        loop {
            let Some(token) = self.advance() else {
                return Err(DictionaryError::ParseError {
                    line: open_line,
                    message: "Unterminated list".into(),
                });
            };
            match token.kind {
                TokenKind::RParen => break,
                TokenKind::LParen => items.push(self.parse_list(token.line, None)?),
                TokenKind::Word(word) => items.push(self.word_or_counted_list(word, token.line)?),
                TokenKind::Quoted(text) => items.push(Value::Word(text)),
                other => {
                    return Err(DictionaryError::ParseError {
                        line: token.line,
                        message: format!("Unexpected {} inside list", describe(&other)),
                    });
                }
            }
        }

        if let Some(expected) = expected {
            if expected != items.len() {
                return Err(DictionaryError::ListLength {
                    line: open_line,
                    expected,
                    found: items.len(),
                });
            }
        }
        Ok(Value::List(items))
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Word(w) => format!("'{w}'"),
        TokenKind::Quoted(s) => format!("\"{s}\""),
        TokenKind::LParen => "'('".into(),
        TokenKind::RParen => "')'".into(),
        TokenKind::LBrace => "'{'".into(),
        TokenKind::RBrace => "'}'".into(),
        TokenKind::Semicolon => "';'".into(),
    }
}

/// Parse a dictionary from a string.
///
/// Same format as the case files, useful for testing or embedded data.
pub fn parse_dictionary(content: &str) -> Result<Dictionary, DictionaryError> {
    let tokens = tokenize(content)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_entries(false)
}

/// Read a dictionary file.
///
/// # Example
///
/// ```ignore
/// use fvbc_rs::io::read_dictionary_file;
/// use std::path::Path;
///
/// let dict = read_dictionary_file(Path::new("0/T"))?;
/// let boundary = dict.sub_dict("boundaryField")?;
/// ```
pub fn read_dictionary_file(path: &Path) -> Result<Dictionary, DictionaryError> {
    let content = fs::read_to_string(path)?;
    parse_dictionary(&content)
}

/// Write a dictionary to a file.
pub fn write_dictionary_file(path: &Path, dict: &Dictionary) -> Result<(), DictionaryError> {
    fs::write(path, dict.to_string())?;
    Ok(())
}
