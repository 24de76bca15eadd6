//! Gravl Syntax Reference
//!
//! This module documents the Gravl notation as read and written by this
//! library.
//!
//! # Overview
//!
//! Gravl describes a tree of nodes. A node is either a **leaf** holding one
//! string, or a **composite** holding an ordered list of attributes. An
//! attribute pairs an optional name with a node. Attributes without a name are
//! *default values*.
//!
//! A document is the body of the root node: its attributes, written without
//! surrounding brackets.
//!
//! ```text
//! title = "Gravl Demo"
//! size  = [w = 640  h = 480]
//!
//! // default values need no name
//! [red green blue]
//! ```
//!
//! # Grammar
//!
//! ```text
//! Document   := NodeBody
//! NodeBody   := Group*
//! Group      := ValueList ('=' ValueList)?
//! ValueList  := Value (',' Value)* ','?
//! Value      := '[' NodeBody ']' | Symbol | QuotedString
//! ```
//!
//! | Characters | Role |
//! |------------|------|
//! | `[` `]` | open and close a composite |
//! | `=` | separates names from values |
//! | `,` | joins values into a list |
//! | `"` | delimits a quoted string |
//! | space, tab, `\n`, `\r` | separate symbols |
//! | `//` | starts a comment running to the end of the line |
//!
//! The five reserved characters `[ ] " = ,` never appear unescaped in a symbol.
//! A comment only starts where a new token could start, so `a//b` is one
//! symbol.
//!
//! # Symbols and Strings
//!
//! A symbol is a run of characters up to the next reserved character or
//! whitespace. A quoted string runs to the next unescaped `"` and may contain
//! whitespace, reserved characters and line breaks. `""` is the only way to
//! write an empty value.
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\\` | backslash |
//! | `\ ` | space |
//! | `\n` | line feed |
//! | `\t` | tab |
//! | `\[` `\]` `\"` `\=` `\,` | the reserved character itself |
//!
//! Any other character after a backslash is an error.
//!
//! # Cross-Join
//!
//! A group with `=` pairs every name with every value, names in the outer
//! loop:
//!
//! ```text
//! a, b = x, y      // a = x, a = y, b = x, b = y
//! ```
//!
//! A name may itself be a bracketed node. It contributes the flat values of
//! that node, so `[a [b]], c = v` names three attributes. A name node with no
//! flat values is an illegal attribute, and an `=` with nothing after it is an
//! illegal value.
//!
//! # Values of a Node
//!
//! - **value**: a leaf's literal, or the value of a composite's first attribute
//!   when that attribute is unnamed.
//! - **flat values**: the unnamed values of a node resolved down to leaves, in
//!   order, with nested default lists spliced in.
//!
//! ```text
//! [hello, world]   // value: hello, flat values: hello, world
//! ```
//!
//! # Positions
//!
//! Lines count from 1 and columns from 0. Every parsed node records where it
//! starts: a leaf at its first character (the opening quote for a quoted
//! string) and a composite at its `[`. The root sits at `(1, 0)`.
//!
//! # Serialized Forms
//!
//! The serializer emits one named attribute per line, aligns the `=` of
//! single-line attributes, and puts a content separator (a blank line by
//! default) between runs of unnamed and named attributes. A node whose body
//! fits on one line stays on one line:
//!
//! ```text
//! [a
//!   b
//! ]
//! point = [x = 1]
//! label = "two words"
//! ```
//!
//! The minified form drops all layout and only keeps a space where two symbols
//! would otherwise run together:
//!
//! ```text
//! [a b]point=[x=1]label="two words"
//! ```
//!
//! A symbol is quoted when it is empty, contains a reserved character,
//! whitespace or a backslash, or starts with `//`.
//!
//! # Limitations
//!
//! - **No numbers or booleans**: every leaf is a string; typed reads happen in
//!   the serde bridge
//! - **Comments**: dropped by the parser and never written back
//! - **Layout**: whitespace and comments in the input are not preserved

// This module contains only documentation; no implementation code
