//! # gravl
//!
//! A parser and serializer for Gravl, a compact text notation for attributed
//! trees.
//!
//! ## What is Gravl?
//!
//! A Gravl document describes a tree. Every node is either a leaf holding one
//! string or a composite holding an ordered list of attributes, each an
//! optional name paired with a child node. Unnamed attributes are *default
//! values*.
//!
//! ```text
//! // a window description
//! title  = "Main Window"
//! size   = [w = 800  h = 600]
//! flags  = resizable, focused
//! ```
//!
//! ## Key Features
//!
//! - **Cross-Join**: `a, b = x, y` writes four attributes in one group
//! - **Positions**: every parsed node records its line and column, and every
//!   parse error names the exact spot
//! - **Lossless Round-Trip**: serialized text parses back to an equal tree
//!   under every layout option, minified included
//! - **Styled Output**: serialized text can be handed out as styled spans for
//!   syntax highlighting
//! - **Serde Bridge**: read and write Rust types through `#[derive(Serialize, Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use gravl::{parse, to_string};
//!
//! let doc = parse("[hello, world] greeting = hi").unwrap();
//!
//! assert_eq!(doc.value(), Some("hello"));
//! assert_eq!(doc.flat_values(), vec!["hello", "world"]);
//! assert_eq!(doc.get("greeting").and_then(|n| n.value()), Some("hi"));
//!
//! // serialized text parses back to the same tree
//! assert_eq!(parse(&to_string(&doc)).unwrap(), doc);
//! ```
//!
//! ### Error Reporting
//!
//! ```rust
//! use gravl::{parse, Fault};
//!
//! let err = parse("size = [w = 800\n  h = ]").unwrap_err();
//! assert_eq!(err.fault, Fault::IllegalValue);
//! assert_eq!((err.line, err.col), (2, 5));
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use gravl::{from_str, to_node, to_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Size {
//!     w: u32,
//!     h: u32,
//! }
//!
//! let text = to_string(&to_node(&Size { w: 800, h: 600 }).unwrap());
//! assert_eq!(text, "w = 800\nh = 600");
//!
//! let size: Size = from_str(&text).unwrap();
//! assert_eq!(size, Size { w: 800, h: 600 });
//! ```
//!
//! ### Building Trees with gravl!
//!
//! ```rust
//! use gravl::{gravl, to_string_minified};
//!
//! let node = gravl!(["size" = ["w" = 800, "h" = 600], "visible"]);
//! assert_eq!(to_string_minified(&node), "size=[w=800 h=600]visible");
//! ```
//!
//! ## Logging
//!
//! Parsing emits `tracing` events: `debug` when a parse fails and `trace`
//! when one succeeds. The crate never installs a subscriber.
//!
//! ## Format Reference
//!
//! The full notation is described in [`syntax`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse, inspect and serialize a document
//! - **`styled_output.rs`** - highlighted output from styled spans
//! - **`typed_config.rs`** - a configuration file read into Rust types
//! - **`error_reporting.rs`** - rendering parse errors with their location
//!
//! Run any demo with: `cargo run --example <name>`

mod cursor;
pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod ser;
pub mod syntax;

pub use de::NodeDeserializer;
pub use error::{Error, Fault, ParserError, Result};
pub use map::AttributeGroups;
pub use node::{Attribute, Metadata, Node, NodeKind, Position, Values};
pub use options::{ParseConfig, Palette, SerializationOptions, Style};
pub use parser::Parser;
pub use ser::{NodeSerializer, Serializer, StyledText, StyledToken};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;

/// Parses a Gravl document into its root node.
///
/// The root is always a composite holding the top-level attributes.
///
/// # Examples
///
/// ```rust
/// use gravl::parse;
///
/// let doc = parse("a, b = x").unwrap();
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.get("b").and_then(|n| n.value()), Some("x"));
/// ```
///
/// # Errors
///
/// Returns the first fault found, with its line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> std::result::Result<Node, ParserError> {
    Parser::new().parse(input)
}

/// Parses a Gravl document with custom parser limits.
///
/// # Errors
///
/// Returns the first fault found, with its line and column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_config(input: &str, config: ParseConfig) -> std::result::Result<Node, ParserError> {
    Parser::with_config(config).parse(input)
}

/// Serializes a node as a document with the default layout.
///
/// # Examples
///
/// ```rust
/// use gravl::{parse, to_string};
///
/// let doc = parse("b = 2 abc = 1").unwrap();
/// assert_eq!(to_string(&doc), "b   = 2\nabc = 1");
/// ```
#[must_use]
pub fn to_string(node: &Node) -> String {
    to_string_with_options(node, SerializationOptions::default())
}

/// Serializes a node as a document with custom options.
///
/// When the options carry a [`Palette`], every token is wrapped in its style
/// code.
///
/// # Examples
///
/// ```rust
/// use gravl::{parse, to_string_with_options, SerializationOptions};
///
/// let doc = parse("k = v").unwrap();
/// let options = SerializationOptions::new().with_equals_spacing("", "");
/// assert_eq!(to_string_with_options(&doc, options), "k=v");
/// ```
#[must_use]
pub fn to_string_with_options(node: &Node, options: SerializationOptions) -> String {
    let palette = options.palette.clone();
    let styled = Serializer::new(options).document(node);
    match palette {
        Some(palette) => styled.paint(&palette),
        None => styled.plain(),
    }
}

/// Serializes a node in the smallest form that parses back to it.
#[must_use]
pub fn to_string_minified(node: &Node) -> String {
    to_string_with_options(node, SerializationOptions::minified())
}

/// Serializes a node as a document of styled spans.
///
/// The palette of `options`, if any, is ignored: the caller decides how to
/// render each [`Style`].
#[must_use]
pub fn to_styled(node: &Node, options: SerializationOptions) -> StyledText {
    Serializer::new(options).document(node)
}

/// Serializes a node as a document into a writer.
///
/// # Examples
///
/// ```rust
/// use gravl::{gravl, to_writer, SerializationOptions};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &gravl!(["k" = "v"]), SerializationOptions::new()).unwrap();
/// assert_eq!(buffer, b"k = v");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, node: &Node, options: SerializationOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(node, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Reads a whole Gravl document from an I/O stream and parses it.
///
/// # Examples
///
/// ```rust
/// use gravl::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"x = 1")).unwrap();
/// assert_eq!(doc.get("x").and_then(|n| n.value()), Some("1"));
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid Gravl.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Node>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(parse(&string)?)
}

/// Parses a Gravl document from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid Gravl.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Node> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    Ok(parse(s)?)
}

/// Deserializes an instance of type `T` from Gravl text.
///
/// # Examples
///
/// ```rust
/// use gravl::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1  y = -2").unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid Gravl or its tree does not fit
/// type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let node = parse(s)?;
    from_node(&node)
}

/// Deserializes an instance of type `T` from a node.
///
/// # Errors
///
/// Returns an error if the tree does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<'de, T>(node: &'de Node) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(NodeDeserializer::new(node))
}

/// Converts any `T: Serialize` into a node.
///
/// # Examples
///
/// ```rust
/// use gravl::{gravl, to_node};
///
/// assert_eq!(to_node(&vec![1, 2]).unwrap(), gravl!(["1", "2"]));
/// ```
///
/// # Errors
///
/// Returns an error if the value has no Gravl form, such as a map with
/// composite keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: ?Sized + Serialize,
{
    value.serialize(NodeSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice Smith".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&to_node(&point).unwrap());
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&to_node(&user()).unwrap());
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_minified_user() {
        let text = to_string_minified(&to_node(&user()).unwrap());
        assert_eq!(text, "id=123 name=\"Alice Smith\"active=true tags=[admin user]");
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&to_node(&numbers).unwrap());
        assert_eq!(text, "1\n2\n3\n4\n5");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_overview_document() {
        let doc = parse(
            "// a window description\ntitle  = \"Main Window\"\nsize   = [w = 800  h = 600]\nflags  = resizable, focused",
        )
        .unwrap();
        assert_eq!(doc.get("title").and_then(Node::value), Some("Main Window"));
        let size = doc.get("size").unwrap();
        assert_eq!(size.get("h").and_then(Node::value), Some("600"));
        let flags: Vec<_> = doc.values(Some("flags")).filter_map(Node::value).collect();
        assert_eq!(flags, vec!["resizable", "focused"]);
    }

    #[test]
    fn test_palette_output() {
        let palette = Palette::default()
            .with_code(Style::AttributeName, "<")
            .with_reset(">");
        let doc = parse("k = v").unwrap();
        let text = to_string_with_options(&doc, SerializationOptions::new().with_palette(palette));
        assert_eq!(text, "<k> = v");
    }

    #[test]
    fn test_io_helpers() {
        let doc = parse("a = [b c]").unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc, SerializationOptions::minified()).unwrap();
        assert_eq!(from_slice(&buffer).unwrap(), doc);
        assert_eq!(from_reader(buffer.as_slice()).unwrap(), doc);

        assert!(matches!(from_slice(&[0xff, 0xfe]), Err(Error::Custom(_))));
        assert!(matches!(from_slice(b"[a"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_with_config() {
        let shallow = ParseConfig::new().with_max_depth(1);
        assert!(parse_with_config("[a]", shallow).is_ok());
        let err = parse_with_config("[[a]]", shallow).unwrap_err();
        assert_eq!(err.fault, Fault::NestingTooDeep { limit: 1 });
    }
}
