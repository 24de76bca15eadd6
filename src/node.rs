//! The Gravl tree: [`Node`], [`Attribute`] and parse [`Metadata`].
//!
//! A node is either a leaf holding one literal string, or a composite holding
//! an ordered list of attributes. Each attribute pairs an optional name with a
//! value node. Attribute order is significant and never changes once a node is
//! built.
//!
//! ## Reading Values
//!
//! ```rust
//! use gravl::parse;
//!
//! let doc = parse("[hello, world] size = 10, 12").unwrap();
//!
//! // the first unnamed value, resolved down to a string
//! assert_eq!(doc.value(), Some("hello"));
//! // all unnamed values, flattened
//! assert_eq!(doc.flat_values(), vec!["hello", "world"]);
//!
//! let sizes: Vec<_> = doc.values(Some("size")).filter_map(|n| n.value()).collect();
//! assert_eq!(sizes, vec!["10", "12"]);
//! ```
//!
//! ## Building Trees
//!
//! ```rust
//! use gravl::{gravl, Attribute, Node};
//!
//! let built = Node::composite(vec![
//!     Attribute::named("name", Node::leaf("Alice")),
//!     Attribute::unnamed(Node::leaf("admin")),
//! ]);
//! assert_eq!(built, gravl!(["name" = "Alice", "admin"]));
//! ```
//!
//! Equality compares the tree shape, names and literals. Parse metadata is
//! ignored, so a parsed tree equals the same tree built by hand.

use crate::map::AttributeGroups;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A position in the source text: 1-based line, 0-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// The position of the first character of a document.
    #[must_use]
    pub const fn start() -> Self {
        Position { line: 1, col: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Where a node came from, as recorded by the parser.
///
/// Nodes that were built by hand carry the default (all fields `None`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Position of the node's first significant character.
    pub position: Option<Position>,
    /// Ordinal of this value among every value of the enclosing node body.
    pub local_index: Option<usize>,
    /// Ordinal of the name group that produced this value. Values joined with
    /// `,` share an attribute index but not a local index.
    pub attribute_index: Option<usize>,
}

/// The two shapes a node can take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(String),
    Composite(Vec<Attribute>),
}

/// A `(name, value)` pair of a composite node. Unnamed attributes are the
/// node's default values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: Option<String>,
    pub value: Node,
}

impl Attribute {
    pub fn named(name: impl Into<String>, value: Node) -> Self {
        Attribute {
            name: Some(name.into()),
            value,
        }
    }

    pub fn unnamed(value: Node) -> Self {
        Attribute { name: None, value }
    }

    #[inline]
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// The name as a `&str`, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A Gravl node: a leaf literal or an ordered list of attributes.
///
/// # Examples
///
/// ```rust
/// use gravl::Node;
///
/// let leaf = Node::leaf("x");
/// assert!(leaf.is_leaf());
/// assert_eq!(leaf.value(), Some("x"));
/// assert!(leaf.attributes().is_empty());
///
/// let empty = Node::empty();
/// assert!(empty.is_composite());
/// assert_eq!(empty.value(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    metadata: Metadata,
}

/// Iterator over the values sharing one name, returned by [`Node::values`].
#[derive(Clone, Debug)]
pub struct Values<'a, 'n> {
    attributes: std::slice::Iter<'a, Attribute>,
    name: Option<&'n str>,
}

impl<'a> Iterator for Values<'a, '_> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let name = self.name;
        self.attributes
            .find(|attribute| attribute.name.as_deref() == name)
            .map(|attribute| &attribute.value)
    }
}

impl Node {
    /// Creates a leaf holding `literal`.
    pub fn leaf(literal: impl Into<String>) -> Self {
        Node {
            kind: NodeKind::Leaf(literal.into()),
            metadata: Metadata::default(),
        }
    }

    /// Creates a composite node from attributes, keeping their order.
    pub fn composite(attributes: Vec<Attribute>) -> Self {
        Node {
            kind: NodeKind::Composite(attributes),
            metadata: Metadata::default(),
        }
    }

    /// Creates a composite node with no attributes (`[]`).
    #[must_use]
    pub fn empty() -> Self {
        Self::composite(Vec::new())
    }

    /// Returns this node with its metadata replaced.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub(crate) fn set_indices(&mut self, local_index: usize, attribute_index: usize) {
        self.metadata.local_index = Some(local_index);
        self.metadata.attribute_index = Some(attribute_index);
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Shorthand for `metadata().position`.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.metadata.position
    }

    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite(_))
    }

    /// The literal of a leaf; `None` for composites.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(literal) => Some(literal),
            NodeKind::Composite(_) => None,
        }
    }

    /// The attributes of a composite; empty for leaves.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Composite(attributes) => attributes,
        }
    }

    /// Consumes the node, returning its attributes (empty for leaves).
    #[must_use]
    pub fn into_attributes(self) -> Vec<Attribute> {
        match self.kind {
            NodeKind::Leaf(_) => Vec::new(),
            NodeKind::Composite(attributes) => attributes,
        }
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes().len()
    }

    /// `true` for leaves and for `[]`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes().is_empty()
    }

    /// The string value of this node.
    ///
    /// For a leaf this is its literal. For a composite it is the value of the
    /// first attribute, resolved recursively, but only when that attribute is
    /// unnamed.
    ///
    /// ```rust
    /// use gravl::parse;
    ///
    /// assert_eq!(parse("[[a] b]").unwrap().value(), Some("a"));
    /// assert_eq!(parse("x = 1").unwrap().value(), None);
    /// ```
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(literal) => Some(literal),
            NodeKind::Composite(attributes) => match attributes.first() {
                Some(Attribute { name: None, value }) => value.value(),
                _ => None,
            },
        }
    }

    /// Values of every attribute named `name`, in order. `None` selects the
    /// unnamed attributes.
    pub fn values<'n>(&self, name: Option<&'n str>) -> Values<'_, 'n> {
        Values {
            attributes: self.attributes().iter(),
            name,
        }
    }

    /// The first value named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.attributes()
            .iter()
            .find(|attribute| attribute.name() == Some(name))
            .map(|attribute| &attribute.value)
    }

    /// Unnamed values resolved down to leaf strings, nested default groups
    /// flattened into one sequence.
    ///
    /// ```rust
    /// use gravl::parse;
    ///
    /// let doc = parse("a [b [c d] e = f] g").unwrap();
    /// assert_eq!(doc.flat_values(), vec!["a", "b", "c", "d", "g"]);
    /// ```
    #[must_use]
    pub fn flat_values(&self) -> Vec<&str> {
        let mut flat = Vec::new();
        self.collect_flat(&mut flat);
        flat
    }

    fn collect_flat<'a>(&'a self, flat: &mut Vec<&'a str>) {
        match &self.kind {
            NodeKind::Leaf(literal) => flat.push(literal),
            NodeKind::Composite(_) => {
                for value in self.values(None) {
                    value.collect_flat(flat);
                }
            }
        }
    }

    /// Values grouped by attribute name, in first-occurrence order.
    #[must_use]
    pub fn groups(&self) -> AttributeGroups<'_> {
        AttributeGroups::from_attributes(self.attributes())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Node {}

impl Default for Node {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::leaf(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::leaf(value)
    }
}

impl From<Vec<Attribute>> for Node {
    fn from(attributes: Vec<Attribute>) -> Self {
        Node::composite(attributes)
    }
}

impl FromIterator<Attribute> for Node {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Node::composite(iter.into_iter().collect())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

// Structural encoding: a leaf is a string, a composite is a sequence of
// `[name-or-null, value]` pairs.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.kind {
            NodeKind::Leaf(literal) => serializer.serialize_str(literal),
            NodeKind::Composite(attributes) => {
                let mut seq = serializer.serialize_seq(Some(attributes.len()))?;
                for attribute in attributes {
                    seq.serialize_element(&(&attribute.name, &attribute.value))?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a sequence of [name, value] pairs")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Node::leaf(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Node::leaf(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut attributes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some((name, value)) = seq.next_element::<(Option<String>, Node)>()? {
                    attributes.push(Attribute { name, value });
                }
                Ok(Node::composite(attributes))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::composite(vec![
            Attribute::unnamed(Node::composite(vec![
                Attribute::unnamed(Node::leaf("a")),
                Attribute::named("skip", Node::leaf("x")),
                Attribute::unnamed(Node::leaf("b")),
            ])),
            Attribute::named("k", Node::leaf("1")),
            Attribute::unnamed(Node::leaf("c")),
            Attribute::named("k", Node::leaf("2")),
        ])
    }

    #[test]
    fn test_value_is_recursive() {
        assert_eq!(sample().value(), Some("a"));
    }

    #[test]
    fn test_value_absent_when_first_is_named() {
        let node = Node::composite(vec![
            Attribute::named("k", Node::leaf("v")),
            Attribute::unnamed(Node::leaf("later")),
        ]);
        assert_eq!(node.value(), None);
        assert_eq!(Node::empty().value(), None);
    }

    #[test]
    fn test_values_by_name() {
        let node = sample();
        let ks: Vec<_> = node.values(Some("k")).filter_map(Node::as_leaf).collect();
        assert_eq!(ks, vec!["1", "2"]);
        assert_eq!(node.values(None).count(), 2);
        assert_eq!(node.values(Some("missing")).count(), 0);
        assert_eq!(node.get("k").and_then(Node::as_leaf), Some("1"));
    }

    #[test]
    fn test_lookup_name_outlived_by_result() {
        let node = sample();
        let found = {
            let name = String::from("k");
            let first = node.get(&name);
            let all: Vec<&Node> = node.values(Some(name.as_str())).collect();
            assert_eq!(all.len(), 2);
            first
        };
        assert_eq!(found.and_then(Node::as_leaf), Some("1"));
    }

    #[test]
    fn test_flat_values_skip_named() {
        assert_eq!(sample().flat_values(), vec!["a", "b", "c"]);
        assert_eq!(Node::leaf("solo").flat_values(), vec!["solo"]);
        assert!(Node::empty().flat_values().is_empty());
    }

    #[test]
    fn test_equality_ignores_metadata() {
        let positioned = Node::leaf("x").with_metadata(Metadata {
            position: Some(Position { line: 4, col: 2 }),
            local_index: Some(3),
            attribute_index: Some(1),
        });
        assert_eq!(positioned, Node::leaf("x"));
        assert_ne!(Node::leaf("x"), Node::leaf("y"));
        assert_ne!(
            Node::composite(vec![Attribute::named("a", Node::leaf("x"))]),
            Node::composite(vec![Attribute::unnamed(Node::leaf("x"))])
        );
    }

    #[test]
    fn test_leaf_has_no_attributes() {
        let leaf = Node::leaf("x");
        assert!(leaf.attributes().is_empty());
        assert!(leaf.into_attributes().is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let node: Node = ["a", "b"]
            .iter()
            .map(|s| Attribute::unnamed(Node::from(*s)))
            .collect();
        assert_eq!(node.flat_values(), vec!["a", "b"]);
    }
}
