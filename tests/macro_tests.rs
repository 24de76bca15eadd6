use gravl::{gravl, parse, to_string, Attribute, Node};

#[test]
fn test_gravl_macro_leaves() {
    assert_eq!(gravl!("hello world"), Node::leaf("hello world"));
    assert_eq!(gravl!(""), Node::leaf(""));
    assert_eq!(gravl!(42), Node::leaf("42"));
    assert_eq!(gravl!(-7), Node::leaf("-7"));
    assert_eq!(gravl!(true), Node::leaf("true"));
}

#[test]
fn test_gravl_macro_expressions() {
    let name = "dynamic";
    let count = 3;
    assert_eq!(gravl!(name), Node::leaf("dynamic"));
    assert_eq!(gravl!(count * 2), Node::leaf("6"));
}

#[test]
fn test_gravl_macro_empty() {
    let empty = gravl!([]);
    assert!(empty.is_composite());
    assert!(empty.is_empty());
}

#[test]
fn test_gravl_macro_default_values() {
    let node = gravl!(["a", "b", "c"]);
    assert_eq!(node.flat_values(), vec!["a", "b", "c"]);
    assert_eq!(node.value(), Some("a"));
}

#[test]
fn test_gravl_macro_named_values() {
    let node = gravl!(["name" = "Alice", "age" = 30, "name" = "Bob"]);
    let names: Vec<_> = node.values(Some("name")).filter_map(Node::value).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
    assert_eq!(node.get("age").and_then(Node::value), Some("30"));
}

#[test]
fn test_gravl_macro_nested() {
    let node = gravl!([
        "window" = [
            "size" = ["w" = 640, "h" = 480],
            "flags" = ["resizable", "focused"],
        ],
        ["loose", []],
    ]);

    let expected = Node::composite(vec![
        Attribute::named(
            "window",
            Node::composite(vec![
                Attribute::named(
                    "size",
                    Node::composite(vec![
                        Attribute::named("w", Node::leaf("640")),
                        Attribute::named("h", Node::leaf("480")),
                    ]),
                ),
                Attribute::named(
                    "flags",
                    Node::composite(vec![
                        Attribute::unnamed(Node::leaf("resizable")),
                        Attribute::unnamed(Node::leaf("focused")),
                    ]),
                ),
            ]),
        ),
        Attribute::unnamed(Node::composite(vec![
            Attribute::unnamed(Node::leaf("loose")),
            Attribute::unnamed(Node::empty()),
        ])),
    ]);
    assert_eq!(node, expected);
}

#[test]
fn test_gravl_macro_matches_parser() {
    let built = gravl!(["title" = "two words", ["x", "y"], "k" = []]);
    let parsed = parse("title = \"two words\" [x y] k = []").unwrap();
    assert_eq!(built, parsed);
    assert_eq!(parse(&to_string(&built)).unwrap(), built);
}
