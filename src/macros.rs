/// Builds a [`Node`](crate::Node) from Gravl-like syntax.
///
/// A bracketed list builds a composite. Its comma-separated items are either
/// `value` (an unnamed attribute) or `"name" = value`. Values are nested
/// brackets or any expression implementing `Display`, which becomes a leaf.
///
/// ```rust
/// use gravl::{gravl, parse};
///
/// let node = gravl!([
///     "title" = "Gravl",
///     "size" = ["w" = 3, "h" = 4],
///     ["a", "b"],
///     true,
/// ]);
/// assert_eq!(node, parse("title = Gravl size = [w = 3 h = 4] [a b] true").unwrap());
/// ```
#[macro_export]
macro_rules! gravl {
    ([]) => {
        $crate::Node::empty()
    };

    ([ $($body:tt)+ ]) => {{
        let mut attributes = ::std::vec::Vec::new();
        $crate::gravl!(@body attributes; $($body)+);
        $crate::Node::composite(attributes)
    }};

    (@body $attributes:ident;) => {};

    (@body $attributes:ident; $name:literal = $value:tt $(, $($rest:tt)*)?) => {
        $attributes.push($crate::Attribute::named($name.to_string(), $crate::gravl!($value)));
        $crate::gravl!(@body $attributes; $($($rest)*)?);
    };

    (@body $attributes:ident; $value:tt $(, $($rest:tt)*)?) => {
        $attributes.push($crate::Attribute::unnamed($crate::gravl!($value)));
        $crate::gravl!(@body $attributes; $($($rest)*)?);
    };

    ($leaf:expr) => {
        $crate::Node::leaf($leaf.to_string())
    };
}

#[cfg(test)]
mod tests {
    use crate::{Attribute, Node};

    #[test]
    fn test_gravl_macro_leaves() {
        assert_eq!(gravl!("hello"), Node::leaf("hello"));
        assert_eq!(gravl!(42), Node::leaf("42"));
        assert_eq!(gravl!(false), Node::leaf("false"));
        assert_eq!(gravl!(""), Node::leaf(""));
    }

    #[test]
    fn test_gravl_macro_composites() {
        assert_eq!(gravl!([]), Node::empty());
        assert_eq!(
            gravl!(["a", "k" = "v",]),
            Node::composite(vec![
                Attribute::unnamed(Node::leaf("a")),
                Attribute::named("k", Node::leaf("v")),
            ])
        );
        assert_eq!(
            gravl!([[], ["x"]]),
            Node::composite(vec![
                Attribute::unnamed(Node::empty()),
                Attribute::unnamed(Node::composite(vec![Attribute::unnamed(Node::leaf("x"))])),
            ])
        );
    }
}
