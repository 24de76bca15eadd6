//! Recursive-descent Gravl parser.
//!
//! ```text
//! Document   := NodeBody
//! NodeBody   := Group*
//! Group      := ValueList ('=' ValueList)?
//! ValueList  := Value (',' Value)* ','?
//! Value      := '[' NodeBody ']' | Symbol | QuotedString
//! ```
//!
//! A group with `=` cross-joins its names with its values: `a, b = x, y`
//! produces `a = x`, `a = y`, `b = x`, `b = y`, in that order.
//!
//! The grammar functions share one [`Cursor`], passed down by `&mut`. A fresh
//! cursor is built for every [`Parser::parse`] call, so no scan state outlives
//! a parse.

use crate::cursor::{is_reserved, is_whitespace, Cursor};
use crate::error::{Fault, ParserError, EXTRANEOUS, INVALID_ESCAPE, UNCLOSED_NODE};
use crate::node::{Attribute, Metadata, Node, Position};
use crate::options::ParseConfig;

/// A reusable Gravl parser.
///
/// # Examples
///
/// ```rust
/// use gravl::{ParseConfig, Parser};
///
/// let parser = Parser::with_config(ParseConfig::new().with_max_depth(2));
/// assert!(parser.parse("[[ok]]").is_ok());
/// assert!(parser.parse("[[[too deep]]]").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParseConfig,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: ParseConfig) -> Self {
        Parser { config }
    }

    #[must_use]
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses a complete document into its root node.
    ///
    /// # Errors
    ///
    /// Returns the first fault found, with the line and column it was found at.
    pub fn parse(&self, input: &str) -> Result<Node, ParserError> {
        let mut cursor = Cursor::new(input);
        match self.read_document(&mut cursor) {
            Ok(node) => {
                tracing::trace!(attributes = node.len(), "parsed gravl document");
                Ok(node)
            }
            Err(err) => {
                tracing::debug!(line = err.line, col = err.col, fault = %err.fault, "gravl parse failed");
                Err(err)
            }
        }
    }

    fn read_document(&self, cursor: &mut Cursor<'_>) -> Result<Node, ParserError> {
        let attributes = self.read_body(cursor, 0)?;

        if let Some(ch) = cursor.peek_glyph() {
            let position = cursor.glyph_position();
            return Err(ParserError::new(
                position,
                Fault::unexpected_char(ch, EXTRANEOUS),
            ));
        }

        Ok(Node::composite(attributes).with_metadata(Metadata {
            position: Some(Position::start()),
            ..Metadata::default()
        }))
    }

    fn read_body(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Vec<Attribute>, ParserError> {
        let mut attributes = Vec::new();
        let mut local_index = 0;
        let mut attribute_index = 0;

        loop {
            let mut values = self.read_values(cursor, depth)?;
            if values.is_empty() {
                break;
            }

            let mut names: Vec<Option<String>> = Vec::new();

            if cursor.peek_glyph() == Some('=') {
                cursor.read_glyph()?;
                let after_equals = cursor.position();

                for node in &values {
                    let flat = node.flat_values();
                    if flat.is_empty() {
                        let position = node.position().unwrap_or(after_equals);
                        return Err(ParserError::new(position, Fault::IllegalAttribute));
                    }
                    names.extend(flat.into_iter().map(|name| Some(name.to_string())));
                }

                values = self.read_values(cursor, depth)?;

                if values.is_empty() {
                    return Err(match cursor.peek_glyph() {
                        Some(_) => ParserError::new(after_equals, Fault::IllegalValue),
                        None => ParserError::new(cursor.glyph_position(), Fault::UnexpectedEof),
                    });
                }
            } else {
                names.push(None);
            }

            // cross-join: names outer, values inner
            let last = names.len() - 1;
            for (i, name) in names.into_iter().enumerate() {
                if i == last {
                    for mut value in values.drain(..) {
                        value.set_indices(local_index, attribute_index);
                        attributes.push(Attribute {
                            name: name.clone(),
                            value,
                        });
                        local_index += 1;
                    }
                } else {
                    for value in &values {
                        let mut value = value.clone();
                        value.set_indices(local_index, attribute_index);
                        attributes.push(Attribute {
                            name: name.clone(),
                            value,
                        });
                        local_index += 1;
                    }
                }
                attribute_index += 1;
            }
        }

        Ok(attributes)
    }

    /// Reads values joined by `,`.
    fn read_values(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Vec<Node>, ParserError> {
        let mut nodes = Vec::new();

        while let Some(node) = self.read_value(cursor, depth)? {
            nodes.push(node);

            if cursor.peek_glyph() == Some(',') {
                cursor.read_glyph()?;
            } else {
                break;
            }
        }

        Ok(nodes)
    }

    /// Reads one bracketed node, symbol or quoted string. `None` means there
    /// is no value at this point.
    fn read_value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Option<Node>, ParserError> {
        let Some(glyph) = cursor.peek_glyph() else {
            return Ok(None);
        };
        let position = cursor.glyph_position();
        let metadata = Metadata {
            position: Some(position),
            ..Metadata::default()
        };

        if glyph == '[' {
            if depth >= self.config.max_depth {
                return Err(ParserError::new(
                    position,
                    Fault::NestingTooDeep {
                        limit: self.config.max_depth,
                    },
                ));
            }
            cursor.read_glyph()?;

            let attributes = self.read_body(cursor, depth + 1)?;

            let close = cursor.glyph_position();
            match cursor.peek_glyph() {
                Some(']') => {
                    cursor.read_glyph()?;
                }
                Some(ch) => {
                    return Err(ParserError::new(
                        close,
                        Fault::unexpected_char(ch, UNCLOSED_NODE),
                    ))
                }
                None => return Err(ParserError::new(close, Fault::UnexpectedEof)),
            }

            return Ok(Some(Node::composite(attributes).with_metadata(metadata)));
        }

        // quotes allow an explicit empty value
        let quoted = glyph == '"';
        let symbol = read_symbol(cursor)?;

        if symbol.is_empty() && !quoted {
            return Ok(None);
        }

        Ok(Some(Node::leaf(symbol).with_metadata(metadata)))
    }
}

fn read_symbol(cursor: &mut Cursor<'_>) -> Result<String, ParserError> {
    if cursor.peek_glyph() == Some('"') {
        return read_quoted(cursor);
    }

    cursor.advance_to_glyph()?;

    let mut symbol = String::new();
    while let Some(ch) = cursor.peek_char() {
        if ch == '\\' {
            symbol.push(read_escape(cursor)?);
        } else if is_reserved(ch) || is_whitespace(ch) {
            break;
        } else {
            symbol.push(cursor.read_char()?);
        }
    }

    Ok(symbol)
}

fn read_quoted(cursor: &mut Cursor<'_>) -> Result<String, ParserError> {
    cursor.read_glyph()?; // opening "

    let mut string = String::new();
    loop {
        match cursor.peek_char() {
            Some('"') => break,
            Some('\\') => string.push(read_escape(cursor)?),
            // read_char reports end of input
            _ => string.push(cursor.read_char()?),
        }
    }
    cursor.read_char()?; // closing "

    Ok(string)
}

fn read_escape(cursor: &mut Cursor<'_>) -> Result<char, ParserError> {
    cursor.read_char()?; // the backslash

    let position = cursor.position();
    let ch = cursor.read_char()?;
    match ch {
        '\\' => Ok('\\'),
        ' ' => Ok(' '),
        'n' => Ok('\n'),
        't' => Ok('\t'),
        ch if is_reserved(ch) => Ok(ch),
        ch => Err(ParserError::new(
            position,
            Fault::unexpected_char(ch, INVALID_ESCAPE),
        )),
    }
}
