//! Gravl serialization.
//!
//! [`Serializer`] renders a [`Node`] into [`StyledText`]: the output text split
//! into spans tagged with a [`Style`]. Callers that only want the text use
//! [`StyledText::plain`] (or the crate-level `to_string*` functions); callers
//! that want highlighting either walk the spans themselves or flatten them
//! through a [`Palette`].
//!
//! Whatever the options, the output parses back to a tree equal to the input.
//!
//! ## Layout
//!
//! ```rust
//! use gravl::{parse, to_string};
//!
//! let doc = parse("[a b] key = [x = 1, 2]").unwrap();
//! assert_eq!(to_string(&doc), "[a\n  b\n]\nkey = \n  [\n    x = 1\n    x = 2\n  ]");
//! ```
//!
//! ## Styled Spans
//!
//! ```rust
//! use gravl::{parse, Serializer, SerializationOptions, Style};
//!
//! let doc = parse("k = \"v w\"").unwrap();
//! let styled = Serializer::new(SerializationOptions::new()).document(&doc);
//! let quoted: Vec<_> = styled
//!     .tokens()
//!     .iter()
//!     .filter(|t| t.style == Style::Quote)
//!     .map(|t| t.text.as_str())
//!     .collect();
//! assert_eq!(quoted, vec!["\"v w\""]);
//! ```
//!
//! The second half of this module is [`NodeSerializer`], a serde serializer
//! that converts any `T: Serialize` into a [`Node`].

use crate::cursor::{is_reserved, is_whitespace};
use crate::node::{Attribute, Node, NodeKind};
use crate::options::{Palette, SerializationOptions, Style};
use crate::{Error, Result};
use serde::{ser, Serialize};
use std::borrow::Cow;
use std::fmt;

/// One span of serialized output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledToken {
    pub style: Style,
    pub text: String,
}

/// Serialized output as a sequence of styled spans.
///
/// Adjacent spans of the same style are merged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyledText {
    tokens: Vec<StyledToken>,
}

impl StyledText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tokens(&self) -> &[StyledToken] {
        &self.tokens
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<StyledToken> {
        self.tokens
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends a span, merging it into the last one when the styles match.
    pub fn push(&mut self, style: Style, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.tokens.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.tokens.push(StyledToken {
            style,
            text: text.to_string(),
        });
    }

    pub fn append(&mut self, other: StyledText) {
        for token in other.tokens {
            self.push(token.style, &token.text);
        }
    }

    /// The text without any styling.
    #[must_use]
    pub fn plain(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// The text with every span wrapped in its palette code and the reset code.
    ///
    /// ```rust
    /// use gravl::{parse, Palette, Serializer, SerializationOptions, Style};
    ///
    /// let palette = Palette::default()
    ///     .with_code(Style::Equals, "<")
    ///     .with_reset(">");
    /// let doc = parse("a = b").unwrap();
    /// let styled = Serializer::new(SerializationOptions::new()).document(&doc);
    /// assert_eq!(styled.paint(&palette), "a <=> b");
    /// ```
    #[must_use]
    pub fn paint(&self, palette: &Palette) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let code = palette.code(token.style);
            if code.is_empty() {
                out.push_str(&token.text);
            } else {
                out.push_str(code);
                out.push_str(&token.text);
                out.push_str(&palette.reset);
            }
        }
        out
    }

    fn first_char(&self) -> Option<char> {
        self.tokens.first().and_then(|t| t.text.chars().next())
    }

    fn last_char(&self) -> Option<char> {
        self.tokens.last().and_then(|t| t.text.chars().next_back())
    }

    fn width(&self) -> usize {
        self.tokens.iter().map(|t| t.text.chars().count()).sum()
    }

    fn is_multiline(&self) -> bool {
        self.tokens.iter().any(|t| t.text.contains('\n'))
    }

    /// Strips Gravl whitespace from both ends.
    fn trim(mut self) -> Self {
        while let Some(first) = self.tokens.first_mut() {
            let cut = first.text.len() - first.text.trim_start_matches(is_whitespace).len();
            if cut == first.text.len() {
                self.tokens.remove(0);
            } else {
                first.text.drain(..cut);
                break;
            }
        }
        while let Some(last) = self.tokens.last_mut() {
            let keep = last.text.trim_end_matches(is_whitespace).len();
            if keep == 0 {
                self.tokens.pop();
            } else {
                last.text.truncate(keep);
                break;
            }
        }
        self
    }

    fn lines(&self) -> Vec<StyledText> {
        let mut lines = vec![StyledText::new()];
        for token in &self.tokens {
            for (i, part) in token.text.split('\n').enumerate() {
                if i > 0 {
                    lines.push(StyledText::new());
                }
                if let Some(line) = lines.last_mut() {
                    line.push(token.style, part);
                }
            }
        }
        lines
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// Renders nodes as Gravl text.
///
/// [`Serializer::document`] renders a root node as a document: the attributes
/// of the root without surrounding brackets, which is the form [`crate::parse`]
/// reads back. [`Serializer::node`] renders the bracketed form of any node.
#[derive(Clone, Debug, Default)]
pub struct Serializer {
    options: SerializationOptions,
}

impl Serializer {
    #[must_use]
    pub fn new(options: SerializationOptions) -> Self {
        Serializer { options }
    }

    #[must_use]
    pub fn options(&self) -> &SerializationOptions {
        &self.options
    }

    /// Renders `node` as a document.
    #[must_use]
    pub fn document(&self, node: &Node) -> StyledText {
        match node.kind() {
            NodeKind::Leaf(literal) => self.symbol(literal, Style::DefaultValue),
            NodeKind::Composite(attributes) if self.options.minified => {
                self.minified_body(attributes)
            }
            NodeKind::Composite(attributes) => self.body(attributes, "").trim(),
        }
    }

    /// Renders `node` in bracketed form.
    ///
    /// ```rust
    /// use gravl::{gravl, Serializer, SerializationOptions};
    ///
    /// let serializer = Serializer::new(SerializationOptions::new());
    /// assert_eq!(serializer.node(&gravl!(["x"])).plain(), "[x]");
    /// ```
    #[must_use]
    pub fn node(&self, node: &Node) -> StyledText {
        self.value(node, Style::DefaultValue)
    }

    fn value(&self, node: &Node, context: Style) -> StyledText {
        match node.kind() {
            NodeKind::Leaf(literal) => self.symbol(literal, context),
            NodeKind::Composite(attributes) => {
                if self.options.minified {
                    let mut out = StyledText::new();
                    out.push(Style::Bracket, "[");
                    out.append(self.minified_body(attributes));
                    out.push(Style::Bracket, "]");
                    out
                } else {
                    self.bracketed(attributes)
                }
            }
        }
    }

    fn bracketed(&self, attributes: &[Attribute]) -> StyledText {
        let body = self.body(attributes, &self.options.indentation);
        let trimmed = body.clone().trim();

        let mut out = StyledText::new();
        out.push(Style::Bracket, "[");
        if trimmed.is_multiline() {
            out.append(body);
            out.push(Style::Whitespace, "\n");
        } else {
            out.append(trimmed);
        }
        out.push(Style::Bracket, "]");
        out
    }

    /// Lays out attributes one per line, each line starting with `inset`.
    fn body(&self, attributes: &[Attribute], inset: &str) -> StyledText {
        let options = &self.options;
        let nested_inset = format!("{inset}{}", options.indentation);
        let line_break = format!("\n{inset}");

        let max_len = if options.align_values {
            attributes
                .iter()
                .filter_map(Attribute::name)
                .map(|name| serialize_symbol(name).chars().count())
                .max()
                .unwrap_or(0)
        } else {
            0
        };

        let mut out = StyledText::new();
        let mut first = true;
        let mut last_explicit: Option<bool> = None;

        for attribute in attributes {
            let explicit = attribute.is_named();

            if last_explicit.map_or(false, |last| last != explicit) {
                out.push(Style::Whitespace, &options.content_separator);
            }

            let context = if explicit {
                Style::Value
            } else {
                Style::DefaultValue
            };
            let value = self.value(&attribute.value, context);
            let multiline = value.is_multiline();

            if let Some(name) = attribute.name() {
                out.push(Style::Whitespace, &line_break);
                let symbol = self.symbol(name, Style::AttributeName);
                let width = symbol.width();
                out.append(symbol);
                if options.align_values && !multiline && width < max_len {
                    out.push(Style::Whitespace, &" ".repeat(max_len - width));
                }
                out.push(Style::Whitespace, &options.before_equals);
                out.push(Style::Equals, "=");
                out.push(Style::Whitespace, &options.after_equals);
            }

            if multiline {
                let line_inset = if explicit { &nested_inset } else { inset };
                for line in value.lines() {
                    out.push(Style::Whitespace, &format!("\n{line_inset}"));
                    out.append(line);
                }
            } else {
                if !first && !explicit {
                    out.push(Style::Whitespace, &line_break);
                }
                out.append(value.trim());
            }

            last_explicit = if first && !explicit {
                None
            } else {
                Some(explicit)
            };
            first = false;
        }

        out
    }

    fn minified_body(&self, attributes: &[Attribute]) -> StyledText {
        let mut out = StyledText::new();

        for attribute in attributes {
            let mut row = StyledText::new();
            match attribute.name() {
                Some(name) => {
                    row.append(self.symbol(name, Style::AttributeName));
                    row.push(Style::Equals, "=");
                    row.append(self.value(&attribute.value, Style::Value));
                }
                None => row.append(self.value(&attribute.value, Style::DefaultValue)),
            }

            // a space is only needed where two symbols would otherwise fuse
            if let (Some(last), Some(next)) = (out.last_char(), row.first_char()) {
                if !is_reserved(last) && !is_reserved(next) {
                    out.push(Style::Whitespace, " ");
                }
            }
            out.append(row);
        }

        out
    }

    fn symbol(&self, literal: &str, context: Style) -> StyledText {
        let mut out = StyledText::new();
        if needs_quotes(literal) {
            out.push(Style::Quote, &serialize_symbol(literal));
        } else {
            out.push(context, literal);
        }
        out
    }
}

/// `true` if `literal` must be quoted to read back as one symbol.
#[must_use]
pub fn needs_quotes(literal: &str) -> bool {
    literal.is_empty()
        || literal.starts_with("//")
        || literal
            .chars()
            .any(|ch| is_reserved(ch) || is_whitespace(ch) || ch == '\\')
}

/// Serializes a literal as a symbol, quoting and escaping it when needed.
///
/// ```rust
/// use gravl::ser::serialize_symbol;
///
/// assert_eq!(serialize_symbol("plain"), "plain");
/// assert_eq!(serialize_symbol(""), "\"\"");
/// assert_eq!(serialize_symbol("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
#[must_use]
pub fn serialize_symbol(literal: &str) -> Cow<'_, str> {
    if !needs_quotes(literal) {
        return Cow::Borrowed(literal);
    }

    let mut out = String::with_capacity(literal.len() + 2);
    out.push('"');
    for ch in literal.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

/// Serde serializer producing a [`Node`] from any `T: Serialize`.
///
/// Scalars become leaves holding their `Display` text, sequences and tuples
/// become unnamed attributes, maps and structs become named attributes, and
/// `None` and unit become `[]`. Enum variants with content become a node with
/// a single attribute named after the variant.
///
/// # Examples
///
/// ```rust
/// use gravl::{gravl, to_node};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let node = to_node(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(node, gravl!(["x" = "1", "y" = "2"]));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSerializer;

fn to_node_value<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    value.serialize(NodeSerializer)
}

fn leaf<T: fmt::Display>(value: T) -> Result<Node> {
    Ok(Node::leaf(value.to_string()))
}

fn variant_node(variant: &str, value: Node) -> Node {
    Node::composite(vec![Attribute::named(variant, value)])
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = Error;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = VariantBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = StructBuilder;
    type SerializeStructVariant = VariantBuilder;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        leaf(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        leaf(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        leaf(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        leaf(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        leaf(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Node> {
        leaf(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        leaf(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        leaf(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        leaf(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        leaf(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Node> {
        leaf(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        leaf(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        leaf(v)
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        leaf(v)
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::leaf(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(v
            .iter()
            .map(|byte| Attribute::unnamed(Node::leaf(byte.to_string())))
            .collect())
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::empty())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::empty())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        Ok(Node::empty())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::leaf(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        Ok(variant_node(variant, to_node_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder> {
        Ok(SeqBuilder::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqBuilder> {
        Ok(SeqBuilder::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantBuilder> {
        Ok(VariantBuilder {
            variant,
            attributes: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapBuilder> {
        Ok(MapBuilder {
            attributes: Vec::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<StructBuilder> {
        Ok(StructBuilder {
            attributes: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantBuilder> {
        Ok(VariantBuilder {
            variant,
            attributes: Vec::with_capacity(len),
        })
    }
}

#[doc(hidden)]
pub struct SeqBuilder {
    attributes: Vec<Attribute>,
}

impl SeqBuilder {
    fn with_capacity(capacity: usize) -> Self {
        SeqBuilder {
            attributes: Vec::with_capacity(capacity),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.attributes
            .push(Attribute::unnamed(to_node_value(value)?));
        Ok(())
    }
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::composite(self.attributes))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::composite(self.attributes))
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(Node::composite(self.attributes))
    }
}

#[doc(hidden)]
pub struct VariantBuilder {
    variant: &'static str,
    attributes: Vec<Attribute>,
}

impl ser::SerializeTupleVariant for VariantBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.attributes
            .push(Attribute::unnamed(to_node_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(variant_node(self.variant, Node::composite(self.attributes)))
    }
}

impl ser::SerializeStructVariant for VariantBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.attributes
            .push(Attribute::named(key, to_node_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(variant_node(self.variant, Node::composite(self.attributes)))
    }
}

#[doc(hidden)]
pub struct MapBuilder {
    attributes: Vec<Attribute>,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = to_node_value(key)?;
        match key.as_leaf() {
            Some(name) => {
                self.next_key = Some(name.to_string());
                Ok(())
            }
            None => Err(Error::unsupported_type("map keys must serialize to scalars")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let name = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.attributes
            .push(Attribute::named(name, to_node_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::composite(self.attributes))
    }
}

#[doc(hidden)]
pub struct StructBuilder {
    attributes: Vec<Attribute>,
}

impl ser::SerializeStruct for StructBuilder {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.attributes
            .push(Attribute::named(key, to_node_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(Node::composite(self.attributes))
    }
}
