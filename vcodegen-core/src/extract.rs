//! Parameter and port extraction from the tokens of header lines.
//!
//! Both extractors are fed one line at a time and keep the declaration they
//! are inside of across lines, so a comma-separated list may continue on the
//! next line of the same block.

use crate::tokens::{is_identifier, Token};
use crate::{Parameter, Port, PortDirection, Result, WidthDeclaration};

/// Net and variable keywords allowed between a direction and a port name.
const PORT_TYPE_KEYWORDS: [&str; 8] = [
    "reg", "wire", "logic", "signed", "unsigned", "var", "bit", "tri",
];

/// Whether the word at `index` is followed (after optional ranges) by another
/// identifier, making it a type rather than the declared name.
fn is_type_position(tokens: &[Token], index: usize) -> bool {
    tokens[index + 1..]
        .iter()
        .find(|token| !matches!(token, Token::Range(_)))
        .map_or(false, |token| matches!(token, Token::Word(word) if is_identifier(word)))
}

/// Concatenate a default value, spacing only between adjacent words.
fn join_value(tokens: &[Token]) -> String {
    let mut value = String::new();
    let mut previous_was_word = false;
    for token in tokens {
        if token.is_word() && previous_was_word {
            value.push(' ');
        }
        value.push_str(&token.text());
        previous_was_word = token.is_word();
    }
    value
}

#[derive(Debug, Default)]
pub struct ParameterExtractor {
    in_declaration: bool,
    expecting_name: bool,
}

impl ParameterExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every `parameter NAME [= default]` found in `tokens`.
    pub fn feed(&mut self, tokens: &[Token], parameters: &mut Vec<Parameter>) -> Result<()> {
        let mut index = 0;
        while index < tokens.len() {
            match &tokens[index] {
                Token::Word(word) if word == "parameter" => {
                    self.in_declaration = true;
                    self.expecting_name = true;
                }
                Token::Word(word) if word == "localparam" => {
                    self.in_declaration = false;
                    self.expecting_name = false;
                }
                Token::CloseParen | Token::Semicolon => {
                    self.in_declaration = false;
                    self.expecting_name = false;
                }
                Token::Comma if self.in_declaration => self.expecting_name = true,
                Token::Word(word) if self.in_declaration && self.expecting_name => {
                    if is_type_position(tokens, index) || !is_identifier(word) {
                        index += 1;
                        continue;
                    }

                    let (default_value, next) = if tokens.get(index + 1) == Some(&Token::Equals) {
                        let (value, end) = Self::default_value(tokens, index + 2);
                        (Some(value), end)
                    } else {
                        (None, index + 1)
                    };

                    parameters.push(Parameter::new(word, default_value.as_deref())?);
                    self.expecting_name = false;
                    index = next;
                    continue;
                }
                _ => {}
            }
            index += 1;
        }
        Ok(())
    }

    /// Collect the default value starting at `start` up to the next `,`, `;`
    /// or unbalanced `)`. Returns the value and the index of that delimiter.
    fn default_value(tokens: &[Token], start: usize) -> (String, usize) {
        let mut depth = 0usize;
        let mut end = start;
        while end < tokens.len() {
            match tokens[end] {
                Token::OpenParen => depth += 1,
                Token::CloseParen if depth > 0 => depth -= 1,
                Token::CloseParen | Token::Comma | Token::Semicolon if depth == 0 => break,
                _ => {}
            }
            end += 1;
        }
        (join_value(&tokens[start.min(end)..end]), end)
    }
}

#[derive(Debug, Default)]
pub struct PortExtractor {
    direction: Option<PortDirection>,
    width: Option<String>,
    expecting_name: bool,
}

impl PortExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every port declared in `tokens`. Names following a comma share
    /// the direction and width of the declaration before them.
    pub fn feed(&mut self, tokens: &[Token], ports: &mut Vec<Port>) -> Result<()> {
        for (index, token) in tokens.iter().enumerate() {
            match token {
                Token::Word(word) if PortDirection::from_keyword(word).is_some() => {
                    self.direction = PortDirection::from_keyword(word);
                    self.width = None;
                    self.expecting_name = true;
                }
                Token::CloseParen | Token::Semicolon => {
                    self.direction = None;
                    self.width = None;
                    self.expecting_name = false;
                }
                Token::Comma if self.direction.is_some() => self.expecting_name = true,
                Token::Equals => self.expecting_name = false,
                Token::Range(range) if self.direction.is_some() && self.expecting_name => {
                    self.width.get_or_insert_with(String::new).push_str(range);
                }
                Token::Word(word) if self.expecting_name => {
                    let Some(direction) = self.direction else {
                        continue;
                    };
                    if PORT_TYPE_KEYWORDS.contains(&word.as_str())
                        || is_type_position(tokens, index)
                        || !is_identifier(word)
                    {
                        continue;
                    }

                    let width = self.width.as_deref().map(WidthDeclaration::normalize);
                    ports.push(Port::new(direction, word, width)?);
                    self.expecting_name = false;
                }
                _ => {}
            }
        }
        Ok(())
    }
}
