//! Per-line lexical helpers for the header scanner.
//!
//! [`classify`] answers which block delimiters a line contains. [`lex_line`]
//! splits a line into words, bracketed ranges and punctuation for the
//! parameter and port extractors. [`lex_line`] drops a trailing `//` comment;
//! block comments and strings are not understood.

use chumsky::prelude::*;

use crate::{Error, Result};

/// Structural facts about one line of a module header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTokens {
    /// A `#(` occurs on the line.
    pub param_begin: bool,
    /// A `(` that is not part of `#(` occurs on the line.
    pub port_begin: bool,
    /// Number of `)` on the line.
    pub block_closes: usize,
    /// Number of `)` after the first bare `(`.
    pub closes_after_port_begin: usize,
    /// A `;` occurs on the line.
    pub declaration_ends: bool,
}

impl BlockTokens {
    /// Whether a line inside an already open port block ends it. Two closes
    /// mean a trailing parameter clause and the port list end together.
    pub fn ends_port_block(&self) -> bool {
        (self.block_closes >= 1 && !self.param_begin) || self.block_closes >= 2
    }

    /// Whether the line that opens the port block also closes it. Closes in
    /// front of the opening `(` belong to the parameter block.
    pub fn closes_opened_port_block(&self) -> bool {
        self.closes_after_port_begin >= 1
    }
}

/// Classify `line` by the block delimiters it contains.
///
/// Returns `None` when the line has no `#(`, `(`, `)` or `;` at all, which
/// callers treat as "nothing learned" rather than as all-false facts.
pub fn classify(line: &str) -> Option<BlockTokens> {
    let mut tokens = BlockTokens::default();
    let mut found = false;
    let mut previous = None;

    for c in line.chars() {
        match c {
            '(' if previous == Some('#') => {
                tokens.param_begin = true;
                found = true;
            }
            '(' => {
                tokens.port_begin = true;
                found = true;
            }
            ')' => {
                tokens.block_closes += 1;
                if tokens.port_begin {
                    tokens.closes_after_port_begin += 1;
                }
                found = true;
            }
            ';' => {
                tokens.declaration_ends = true;
                found = true;
            }
            _ => {}
        }
        previous = Some(c);
    }

    found.then_some(tokens)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Any run of characters that are neither whitespace nor delimiters.
    Word(String),
    /// A bracketed range with inner whitespace removed, e.g. `[WIDTH-1:0]`.
    Range(String),
    Hash,
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Equals,
    Other(char),
}

impl Token {
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    /// Source text of the token.
    pub fn text(&self) -> String {
        match self {
            Token::Word(word) => word.clone(),
            Token::Range(range) => range.clone(),
            Token::Hash => "#".to_string(),
            Token::OpenParen => "(".to_string(),
            Token::CloseParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Equals => "=".to_string(),
            Token::Other(c) => c.to_string(),
        }
    }
}

const DELIMITERS: &str = "#()[],;=";

fn line_lexer() -> impl Parser<char, Vec<Token>, Error = Simple<char>> {
    let range = just('[')
        .ignore_then(filter(|c: &char| *c != ']' && *c != '[').repeated())
        .then_ignore(just(']'))
        .map(|inner: Vec<char>| {
            let mut text = String::from("[");
            text.extend(inner.into_iter().filter(|c| !c.is_whitespace()));
            text.push(']');
            Token::Range(text)
        });

    let word = filter(|c: &char| !c.is_whitespace() && !DELIMITERS.contains(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(Token::Word);

    let punctuation = choice((
        just('#').to(Token::Hash),
        just('(').to(Token::OpenParen),
        just(')').to(Token::CloseParen),
        just(',').to(Token::Comma),
        just(';').to(Token::Semicolon),
        just('=').to(Token::Equals),
    ));

    // Unterminated `[` and stray `]`
    let other = any().map(Token::Other);

    let token = choice((range, word, punctuation, other));

    text::whitespace()
        .ignore_then(token.then_ignore(text::whitespace()).repeated())
        .then_ignore(end())
}

/// `line` up to the start of a `//` comment.
pub fn strip_line_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}

/// Split one source line into tokens, ignoring a trailing `//` comment.
pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    line_lexer().parse(strip_line_comment(line)).map_err(|errors| {
        let reason = errors
            .first()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unrecognized input".to_string());
        Error::invalid_spec(line.trim_end(), reason)
    })
}

fn module_header() -> impl Parser<char, String, Error = Simple<char>> {
    text::whitespace()
        .ignore_then(text::keyword("module"))
        .ignore_then(text::whitespace())
        .ignore_then(text::ident())
}

/// Name declared by a `module <name>` header line, if `line` is one.
pub fn module_name(line: &str) -> Option<String> {
    module_header().parse(line).ok()
}

fn timescale_directive() -> impl Parser<char, String, Error = Simple<char>> {
    let quantity = filter(|c: &char| c.is_ascii_alphanumeric() || *c == '.')
        .repeated()
        .at_least(1)
        .collect::<String>();

    text::whitespace()
        .ignore_then(just('`'))
        .ignore_then(text::keyword("timescale"))
        .ignore_then(quantity.clone().padded())
        .then_ignore(just('/'))
        .then(quantity.padded())
        .map(|(unit, precision)| format!("{}/{}", unit, precision))
}

/// `unit/precision` of a `` `timescale `` directive line, whitespace removed.
pub fn timescale(line: &str) -> Option<String> {
    timescale_directive().parse(line).ok()
}

/// Whether `word` is a plain (non-escaped) Verilog identifier.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
