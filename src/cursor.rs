//! Character cursor with one-glyph lookahead.
//!
//! A *glyph* is the next significant character: whitespace and `//` line
//! comments are skipped when looking for it. The cursor memoizes the glyph's
//! index, so grammar rules can peek as often as they like without rescanning
//! comments, while the real character cursor only moves through
//! [`Cursor::read_char`] and line/column bookkeeping stays exact.

use crate::error::{Fault, ParserError};
use crate::node::Position;

pub(crate) const RESERVED_CHARS: &str = "[]\"=,";
pub(crate) const WHITESPACE_CHARS: &str = " \t\n\r";

#[inline]
pub(crate) fn is_reserved(ch: char) -> bool {
    RESERVED_CHARS.contains(ch)
}

#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    WHITESPACE_CHARS.contains(ch)
}

#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    index: usize,
    // byte index of the next glyph; `Some(input.len())` once end of input is located
    glyph: Option<usize>,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Cursor {
            input,
            index: 0,
            glyph: None,
            position: Position::start(),
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    /// An error at the cursor's current position.
    pub(crate) fn fault(&self, fault: Fault) -> ParserError {
        ParserError::new(self.position, fault)
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.input[self.index..].chars().next()
    }

    pub(crate) fn read_char(&mut self) -> Result<char, ParserError> {
        if self.glyph == Some(self.index) {
            self.glyph = None;
        }

        let ch = self
            .peek_char()
            .ok_or_else(|| self.fault(Fault::UnexpectedEof))?;

        if ch == '\n' {
            self.position.line += 1;
            self.position.col = 0;
        } else {
            self.position.col += 1;
        }
        self.index += ch.len_utf8();

        Ok(ch)
    }

    pub(crate) fn peek_glyph(&mut self) -> Option<char> {
        let glyph = match self.glyph {
            Some(glyph) => glyph,
            None => {
                let located = self.locate_glyph();
                self.glyph = Some(located);
                located
            }
        };
        self.input[glyph..].chars().next()
    }

    fn locate_glyph(&self) -> usize {
        let mut chars = self.input[self.index..].char_indices().peekable();
        let mut in_comment = false;

        while let Some((offset, ch)) = chars.next() {
            if in_comment {
                in_comment = ch != '\n';
                continue;
            }
            if ch == '/' && matches!(chars.peek(), Some((_, '/'))) {
                chars.next();
                in_comment = true;
                continue;
            }
            if !is_whitespace(ch) {
                return self.index + offset;
            }
        }

        self.input.len()
    }

    pub(crate) fn read_glyph(&mut self) -> Result<char, ParserError> {
        let Some(glyph) = self.peek_glyph() else {
            let end = self.glyph_position();
            return Err(ParserError::new(end, Fault::UnexpectedEof));
        };

        // walk every skipped character so line/col stay accurate
        while self.glyph.is_some() {
            self.read_char()?;
        }

        Ok(glyph)
    }

    /// Consumes whitespace and comments up to, but not including, the glyph.
    pub(crate) fn advance_to_glyph(&mut self) -> Result<(), ParserError> {
        self.peek_glyph();
        while let Some(glyph) = self.glyph {
            if self.index == glyph || self.index >= self.input.len() {
                break;
            }
            self.read_char()?;
        }
        Ok(())
    }

    /// Position of the next glyph (or of end of input), without moving.
    pub(crate) fn glyph_position(&mut self) -> Position {
        self.peek_glyph();
        let target = self.glyph.unwrap_or(self.index);

        let mut position = self.position;
        for ch in self.input[self.index..target].chars() {
            if ch == '\n' {
                position.line += 1;
                position.col = 0;
            } else {
                position.col += 1;
            }
        }
        position
    }
}
