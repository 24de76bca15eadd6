//! Typed deserialization from Gravl trees.
//!
//! [`NodeDeserializer`] walks a parsed [`Node`] and drives any
//! `T: Deserialize`. Most users go through [`crate::from_str`] or
//! [`crate::from_node`].
//!
//! ## Mapping
//!
//! - **Leaves** are strings. Scalars (`bool`, integers, floats, `char`) parse
//!   from the literal.
//! - **Composites with named attributes** are maps and structs. Values sharing
//!   a name are gathered into a sequence, so `tag = a, b` reads as
//!   `tag: vec!["a", "b"]`. Unnamed attributes are skipped.
//! - **Composites without names** are sequences. A single leaf also reads as a
//!   one-element sequence.
//! - **`[]`** is unit and `None`.
//! - **Enums** are a leaf naming a unit variant, or a node holding one
//!   attribute named after the variant.
//!
//! A scalar requested from a node holding exactly one unnamed value reads that
//! value, so a document `5` deserializes as `5u32`.
//!
//! ```rust
//! use gravl::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let server: Server = from_str("host = example.org  port = 8080  tags = a, b").unwrap();
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.tags, vec!["a", "b"]);
//! ```

use crate::node::{Attribute, Node, NodeKind};
use crate::{Error, Result};
use serde::de::value::BorrowedStrDeserializer;
use serde::{de, forward_to_deserialize_any};
use std::str::FromStr;

fn describe(node: &Node) -> &'static str {
    match node.kind() {
        NodeKind::Leaf(_) => "leaf",
        NodeKind::Composite(attributes) if attributes.is_empty() => "empty node",
        NodeKind::Composite(_) => "node",
    }
}

/// Descends through nodes that hold exactly one unnamed value.
fn single_value(node: &Node) -> &Node {
    match node.attributes() {
        [Attribute { name: None, value }] => single_value(value),
        _ => node,
    }
}

fn parse_scalar<T: FromStr>(literal: &str, expected: &str) -> Result<T> {
    literal
        .parse()
        .map_err(|_| Error::invalid_literal(expected, literal))
}

macro_rules! deserialize_scalars {
    ($($method:ident => $visit:ident($ty:ty, $expected:literal);)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(parse_scalar::<$ty>(self.literal($expected)?, $expected)?)
            }
        )*
    };
}

/// A serde deserializer over a borrowed [`Node`].
pub struct NodeDeserializer<'de> {
    node: &'de Node,
}

impl<'de> NodeDeserializer<'de> {
    #[must_use]
    pub fn new(node: &'de Node) -> Self {
        NodeDeserializer { node }
    }

    fn literal(&self, expected: &str) -> Result<&'de str> {
        let node = single_value(self.node);
        node.as_leaf()
            .ok_or_else(|| Error::type_mismatch(expected, describe(node)))
    }
}

impl<'de> de::Deserializer<'de> for NodeDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node.kind() {
            NodeKind::Leaf(literal) => visitor.visit_borrowed_str(literal),
            NodeKind::Composite(attributes) if attributes.is_empty() => visitor.visit_unit(),
            NodeKind::Composite(attributes) if attributes.iter().any(Attribute::is_named) => {
                self.deserialize_map(visitor)
            }
            NodeKind::Composite(_) => self.deserialize_seq(visitor),
        }
    }

    deserialize_scalars! {
        deserialize_bool => visit_bool(bool, "boolean");
        deserialize_i8 => visit_i8(i8, "i8");
        deserialize_i16 => visit_i16(i16, "i16");
        deserialize_i32 => visit_i32(i32, "i32");
        deserialize_i64 => visit_i64(i64, "i64");
        deserialize_i128 => visit_i128(i128, "i128");
        deserialize_u8 => visit_u8(u8, "u8");
        deserialize_u16 => visit_u16(u16, "u16");
        deserialize_u32 => visit_u32(u32, "u32");
        deserialize_u64 => visit_u64(u64, "u64");
        deserialize_u128 => visit_u128(u128, "u128");
        deserialize_f32 => visit_f32(f32, "f32");
        deserialize_f64 => visit_f64(f64, "f64");
        deserialize_char => visit_char(char, "char");
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.literal("string")?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node.kind() {
            NodeKind::Leaf(literal) => visitor.visit_borrowed_bytes(literal.as_bytes()),
            NodeKind::Composite(_) => self.deserialize_seq(visitor),
        }
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_composite() && self.node.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.node.is_composite() && self.node.is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::type_mismatch("empty node", describe(self.node)))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let nodes = match self.node.kind() {
            NodeKind::Leaf(_) => vec![self.node],
            NodeKind::Composite(_) => self.node.values(None).collect(),
        };
        visitor.visit_seq(SeqDeserializer::new(nodes))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node.kind() {
            NodeKind::Composite(_) => visitor.visit_map(MapDeserializer::new(self.node)),
            NodeKind::Leaf(_) => Err(Error::type_mismatch("map", "leaf")),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let node = single_value(self.node);
        match node.kind() {
            NodeKind::Leaf(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                content: None,
            }),
            NodeKind::Composite(attributes) => match attributes.as_slice() {
                [Attribute {
                    name: Some(variant),
                    value,
                }] => visitor.visit_enum(EnumDeserializer {
                    variant,
                    content: Some(value),
                }),
                _ => Err(Error::type_mismatch("enum variant", describe(node))),
            },
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

/// All values sharing one attribute name, read as a sequence.
struct GroupDeserializer<'de> {
    nodes: Vec<&'de Node>,
}

impl<'de> de::Deserializer<'de> for GroupDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(SeqDeserializer::new(self.nodes))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}

/// A map key. Keys are leaf literals, so scalar keys parse like leaves.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl<'de> KeyDeserializer<'de> {
    fn literal(&self, _expected: &str) -> Result<&'de str> {
        Ok(self.key)
    }
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_scalars! {
        deserialize_bool => visit_bool(bool, "boolean");
        deserialize_i8 => visit_i8(i8, "i8");
        deserialize_i16 => visit_i16(i16, "i16");
        deserialize_i32 => visit_i32(i32, "i32");
        deserialize_i64 => visit_i64(i64, "i64");
        deserialize_i128 => visit_i128(i128, "i128");
        deserialize_u8 => visit_u8(u8, "u8");
        deserialize_u16 => visit_u16(u16, "u16");
        deserialize_u32 => visit_u32(u32, "u32");
        deserialize_u64 => visit_u64(u64, "u64");
        deserialize_u128 => visit_u128(u128, "u128");
        deserialize_f32 => visit_f32(f32, "f32");
        deserialize_f64 => visit_f64(f64, "f64");
        deserialize_char => visit_char(char, "char");
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(EnumDeserializer {
            variant: self.key,
            content: None,
        })
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer<'de> {
    iter: std::vec::IntoIter<&'de Node>,
}

impl<'de> SeqDeserializer<'de> {
    fn new(nodes: Vec<&'de Node>) -> Self {
        SeqDeserializer {
            iter: nodes.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'de> {
    iter: indexmap::map::IntoIter<Option<&'de str>, Vec<&'de Node>>,
    value: Option<Vec<&'de Node>>,
}

impl<'de> MapDeserializer<'de> {
    fn new(node: &'de Node) -> Self {
        MapDeserializer {
            iter: node.groups().into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        for (name, nodes) in self.iter.by_ref() {
            // unnamed values have no key to land on
            if let Some(key) = name {
                self.value = Some(nodes);
                return seed.deserialize(KeyDeserializer { key }).map(Some);
            }
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(nodes) if nodes.len() == 1 => seed.deserialize(NodeDeserializer::new(nodes[0])),
            Some(nodes) => seed.deserialize(GroupDeserializer { nodes }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }
}

struct EnumDeserializer<'de> {
    variant: &'de str,
    content: Option<&'de Node>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((
            variant,
            VariantDeserializer {
                content: self.content,
            },
        ))
    }
}

struct VariantDeserializer<'de> {
    content: Option<&'de Node>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.content {
            None => Ok(()),
            Some(node) if node.is_composite() && node.is_empty() => Ok(()),
            Some(node) => Err(Error::type_mismatch("unit variant", describe(node))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.content {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.content {
            Some(node) => de::Deserializer::deserialize_seq(NodeDeserializer::new(node), visitor),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.content {
            Some(node) => de::Deserializer::deserialize_map(NodeDeserializer::new(node), visitor),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}
