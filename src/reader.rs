// ABOUTME: Reader module turning source text into value trees

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::char,
    combinator::{map, value},
    multi::many0,
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

use crate::value::{MapKey, Num, Value};
use std::collections::HashMap;

/// Reader failures; converted into the unified raise mechanism at the
/// evaluator boundary and printed by the REPL like any other exception.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReaderError {
    #[error("unmatched {0}")]
    Unmatched(char),

    #[error("unbalanced {0}")]
    Unbalanced(char),

    #[error("unsupported escape character \\{0}")]
    BadEscape(char),

    #[error("hash-map keys must be strings or keywords")]
    InvalidMapKey,

    #[error("hash-map must be a set of key-value pairs")]
    OddMapEntries,

    #[error("unexpected end of input")]
    UnexpectedEof,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Quote,
    Quasiquote,
    Unquote,
    SpliceUnquote,
    Deref,
    Meta,
    Str(String), // escapes already resolved
    Atom(String),
}

/// Reads the first form of `input`. `None` when the input holds nothing
/// but whitespace and comments.
pub fn read_str(input: &str) -> Result<Option<Value>, ReaderError> {
    let tokens = tokenize(input)?;
    check_balance(&tokens)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    let mut reader = Reader::new(tokens);
    reader.read_form().map(Some)
}

/// Reads every top-level form of `input`; used by script and prelude loading.
pub fn read_many(input: &str) -> Result<Vec<Value>, ReaderError> {
    let tokens = tokenize(input)?;
    check_balance(&tokens)?;
    let mut reader = Reader::new(tokens);
    let mut forms = Vec::new();
    while reader.peek().is_some() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Comma counts as whitespace in this dialect
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Atoms are maximal runs of anything that is not whitespace, a comment
/// start, a bracket, a string quote, or a reader-macro sigil.
fn is_atom_char(c: char) -> bool {
    !is_blank(c)
        && !matches!(
            c,
            ';' | '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '`' | '~' | '@' | '^' | '"'
        )
}

fn skip_blank(input: &str) -> &str {
    let result: IResult<&str, ()> = value(
        (),
        many0(alt((
            value((), take_while1(is_blank)),
            value((), preceded(char(';'), take_while(|c| c != '\n'))),
        ))),
    )
    .parse(input);
    match result {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::SpliceUnquote, tag("~@")),
        value(Token::OpenParen, char('(')),
        value(Token::CloseParen, char(')')),
        value(Token::OpenBracket, char('[')),
        value(Token::CloseBracket, char(']')),
        value(Token::OpenBrace, char('{')),
        value(Token::CloseBrace, char('}')),
        value(Token::Quote, char('\'')),
        value(Token::Quasiquote, char('`')),
        value(Token::Unquote, char('~')),
        value(Token::Deref, char('@')),
        value(Token::Meta, char('^')),
        map(take_while1(is_atom_char), |s: &str| Token::Atom(s.to_string())),
    ))
    .parse(input)
}

/// Consumes a string literal starting at the opening `"`, resolving the
/// four supported escapes. Any other `\X` is an error, as is hitting end
/// of input before the closing quote.
fn lex_string(input: &str) -> Result<(&str, String), ReaderError> {
    let mut chars = input.char_indices();
    chars.next(); // opening quote
    let mut out = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&input[i + 1..], out)),
            '\\' => match chars.next() {
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => return Err(ReaderError::BadEscape(other)),
                None => return Err(ReaderError::Unbalanced('"')),
            },
            other => out.push(other),
        }
    }
    Err(ReaderError::Unbalanced('"'))
}

fn tokenize(input: &str) -> Result<Vec<Token>, ReaderError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        rest = skip_blank(rest);
        if rest.is_empty() {
            break;
        }
        if rest.starts_with('"') {
            let (after, content) = lex_string(rest)?;
            tokens.push(Token::Str(content));
            rest = after;
            continue;
        }
        match lex_token(rest) {
            Ok((after, token)) => {
                tokens.push(token);
                rest = after;
            }
            // Every character class is covered above; anything else would
            // have matched the atom rule.
            Err(_) => return Err(ReaderError::UnexpectedEof),
        }
    }
    Ok(tokens)
}

/// Validates bracket nesting over the whole token stream before parsing,
/// so errors name the exact offending delimiter.
fn check_balance(tokens: &[Token]) -> Result<(), ReaderError> {
    let mut stack: Vec<char> = Vec::new();
    for token in tokens {
        match token {
            Token::OpenParen => stack.push('('),
            Token::OpenBracket => stack.push('['),
            Token::OpenBrace => stack.push('{'),
            Token::CloseParen => {
                if stack.pop() != Some('(') {
                    return Err(ReaderError::Unmatched(')'));
                }
            }
            Token::CloseBracket => {
                if stack.pop() != Some('[') {
                    return Err(ReaderError::Unmatched(']'));
                }
            }
            Token::CloseBrace => {
                if stack.pop() != Some('{') {
                    return Err(ReaderError::Unmatched('}'));
                }
            }
            _ => {}
        }
    }
    match stack.pop() {
        Some(open) => Err(ReaderError::Unbalanced(open)),
        None => Ok(()),
    }
}

// ============================================================================
// Recursive descent over tokens
// ============================================================================

struct Reader {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reader {
    fn new(tokens: Vec<Token>) -> Self {
        Reader { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ReaderError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ReaderError::UnexpectedEof)?;
        self.pos += 1;
        Ok(token)
    }

    fn read_form(&mut self) -> Result<Value, ReaderError> {
        match self.next()? {
            Token::OpenParen => Ok(Value::list(self.read_seq(&Token::CloseParen, '(')?)),
            Token::OpenBracket => Ok(Value::vector(self.read_seq(&Token::CloseBracket, '[')?)),
            Token::OpenBrace => self.read_map(),
            // Balance is pre-checked; a stray closer here cannot happen
            Token::CloseParen => Err(ReaderError::Unmatched(')')),
            Token::CloseBracket => Err(ReaderError::Unmatched(']')),
            Token::CloseBrace => Err(ReaderError::Unmatched('}')),
            Token::Quote => self.wrap("quote"),
            Token::Quasiquote => self.wrap("quasiquote"),
            Token::Unquote => self.wrap("unquote"),
            Token::SpliceUnquote => self.wrap("splice-unquote"),
            Token::Deref => self.wrap("deref"),
            Token::Meta => {
                // ^M V reads the metadata first but applies it second
                let meta = self.read_form()?;
                let target = self.read_form()?;
                Ok(Value::list(vec![
                    Value::symbol("with-meta"),
                    target,
                    meta,
                ]))
            }
            Token::Str(content) => Ok(Value::Str(content)),
            Token::Atom(text) => Ok(read_atom(&text)),
        }
    }

    /// `'x` and friends rewrite into their canonical two-element list form
    fn wrap(&mut self, name: &str) -> Result<Value, ReaderError> {
        let form = self.read_form()?;
        Ok(Value::list(vec![Value::symbol(name), form]))
    }

    fn read_seq(&mut self, close: &Token, open: char) -> Result<Vec<Value>, ReaderError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ReaderError::Unbalanced(open)),
                Some(token) if token == close => {
                    self.next()?;
                    return Ok(items);
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }

    fn read_map(&mut self) -> Result<Value, ReaderError> {
        let mut entries = HashMap::new();
        loop {
            match self.peek() {
                None => return Err(ReaderError::Unbalanced('{')),
                Some(Token::CloseBrace) => {
                    self.next()?;
                    return Ok(Value::map(entries));
                }
                Some(_) => {
                    let key_form = self.read_form()?;
                    let key =
                        MapKey::from_value(&key_form).ok_or(ReaderError::InvalidMapKey)?;
                    match self.peek() {
                        None => return Err(ReaderError::Unbalanced('{')),
                        Some(Token::CloseBrace) => return Err(ReaderError::OddMapEntries),
                        Some(_) => {
                            let value = self.read_form()?;
                            entries.insert(key, value);
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Atom classification
// ============================================================================

fn read_atom(text: &str) -> Value {
    match text {
        "nil" => return Value::Nil,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(name) = text.strip_prefix(':') {
        return Value::keyword(name);
    }
    if looks_like_number(text) {
        if let Some(n) = parse_number(text) {
            return Value::Number(n);
        }
    }
    Value::symbol(text)
}

/// Number shape: optional leading sign, at most one decimal point, and at
/// least one digit. Everything else is a symbol. A comma never reaches
/// this point; the tokenizer consumes it as whitespace.
fn looks_like_number(text: &str) -> bool {
    let mut digits = false;
    let mut period = false;
    for (i, c) in text.chars().enumerate() {
        match c {
            '0'..='9' => digits = true,
            '.' if !period => period = true,
            '-' | '+' if i == 0 => {}
            _ => return false,
        }
    }
    digits
}

// Integer mode truncates at the decimal point
#[cfg(not(feature = "float"))]
fn parse_number(text: &str) -> Option<Num> {
    let integral = text.split('.').next()?;
    integral.parse().ok()
}

#[cfg(feature = "float")]
fn parse_number(text: &str) -> Option<Num> {
    text.parse().ok()
}
