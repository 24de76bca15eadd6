//! Grouped view over a node's attributes.
//!
//! [`AttributeGroups`] collects the values of a composite node by name, keeping
//! names in the order they first appear. Unnamed values are grouped under
//! `None`. The view borrows the node and never reorders it.
//!
//! ## Examples
//!
//! ```rust
//! use gravl::parse;
//!
//! let doc = parse("tag = a, b  title = x  tag = c").unwrap();
//! let groups = doc.groups();
//!
//! let names: Vec<_> = groups.names().collect();
//! assert_eq!(names, vec![Some("tag"), Some("title")]);
//! assert_eq!(groups.get(Some("tag")).map(|v| v.len()), Some(3));
//! ```

use crate::node::{Attribute, Node};
use indexmap::{Equivalent, IndexMap};
use std::hash::{Hash, Hasher};

/// Lookup key that borrows for less than the view.
struct Name<'b>(Option<&'b str>);

impl Hash for Name<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<'a> Equivalent<Option<&'a str>> for Name<'_> {
    fn equivalent(&self, key: &Option<&'a str>) -> bool {
        self.0 == *key
    }
}

/// Attribute values keyed by name, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeGroups<'a>(IndexMap<Option<&'a str>, Vec<&'a Node>>);

impl<'a> AttributeGroups<'a> {
    pub(crate) fn from_attributes(attributes: &'a [Attribute]) -> Self {
        let mut groups: IndexMap<Option<&'a str>, Vec<&'a Node>> = IndexMap::new();
        for attribute in attributes {
            groups
                .entry(attribute.name.as_deref())
                .or_default()
                .push(&attribute.value);
        }
        AttributeGroups(groups)
    }

    /// Values for `name` (`None` for the unnamed group).
    #[must_use]
    pub fn get(&self, name: Option<&str>) -> Option<&[&'a Node]> {
        self.0.get(&Name(name)).map(Vec::as_slice)
    }

    /// Distinct names, in first-occurrence order.
    pub fn names(&self) -> impl Iterator<Item = Option<&'a str>> + '_ {
        self.0.keys().copied()
    }

    /// Number of distinct names, counting the unnamed group once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` if any attribute carries a name.
    #[must_use]
    pub fn has_named(&self) -> bool {
        self.0.keys().any(Option::is_some)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Option<&'a str>, Vec<&'a Node>> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for AttributeGroups<'a> {
    type Item = (Option<&'a str>, Vec<&'a Node>);
    type IntoIter = indexmap::map::IntoIter<Option<&'a str>, Vec<&'a Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Attribute, Node};

    #[test]
    fn test_groups_keep_first_occurrence_order() {
        let node = Node::composite(vec![
            Attribute::named("b", Node::leaf("1")),
            Attribute::unnamed(Node::leaf("x")),
            Attribute::named("a", Node::leaf("2")),
            Attribute::named("b", Node::leaf("3")),
        ]);
        let groups = node.groups();
        let names: Vec<_> = groups.names().collect();
        assert_eq!(names, vec![Some("b"), None, Some("a")]);

        let bs: Vec<_> = groups
            .get(Some("b"))
            .unwrap()
            .iter()
            .filter_map(|n| n.as_leaf())
            .collect();
        assert_eq!(bs, vec!["1", "3"]);
        assert!(groups.has_named());
    }

    #[test]
    fn test_groups_of_leaf_are_empty() {
        let leaf = Node::leaf("x");
        assert!(leaf.groups().is_empty());
        assert_eq!(leaf.groups().len(), 0);
    }
}
