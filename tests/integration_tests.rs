use gravl::{
    from_node, from_str, parse, to_node, to_string, to_string_minified, to_string_with_options,
    to_styled, Attribute, Node, SerializationOptions, Style,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Pending,
    Shipped { carrier: String },
    Split(u8, u8),
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string(), "early adopter".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-[X]".to_string(),
                price: 5.0,
                quantity: 1,
            },
        ],
        note: None,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&to_node(&user).unwrap());
    println!("User Gravl: {}", text);

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = order();
    let text = to_string(&to_node(&order).unwrap());
    println!("Order Gravl:\n{}", text);

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_nested_struct_minified() {
    let order = order();
    let text = to_string_minified(&to_node(&order).unwrap());
    assert!(!text.contains('\n'));

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_enum_variants() {
    let statuses = vec![
        Status::Pending,
        Status::Shipped {
            carrier: "Post Co".to_string(),
        },
        Status::Split(1, 2),
    ];

    let text = to_string(&to_node(&statuses).unwrap());
    let back: Vec<Status> = from_str(&text).unwrap();
    assert_eq!(statuses, back);
}

#[test]
fn test_map_round_trip() {
    let mut map = BTreeMap::new();
    map.insert("alpha".to_string(), vec![1u16, 2]);
    map.insert("with space".to_string(), vec![]);

    let node = to_node(&map).unwrap();
    assert_eq!(to_string(&node), "alpha = \n  [1\n    2\n  ]\n\"with space\" = []");

    let back: BTreeMap<String, Vec<u16>> = from_node(&node).unwrap();
    assert_eq!(map, back);
}

#[test]
fn test_hand_written_config() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Server {
        host: String,
        ports: Vec<u16>,
        tls: Option<bool>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Config {
        server: Vec<Server>,
        debug: bool,
    }

    let config: Config = from_str(
        r#"
        // two servers share the same shape
        server = [host = alpha   ports = 80, 443   tls = true]
        server = [host = "beta box"   ports = 8080]
        debug = false
        "#,
    )
    .unwrap();

    assert_eq!(config.server.len(), 2);
    assert_eq!(config.server[0].ports, vec![80, 443]);
    assert_eq!(config.server[0].tls, Some(true));
    assert_eq!(config.server[1].host, "beta box");
    assert_eq!(config.server[1].ports, vec![8080]);
    assert_eq!(config.server[1].tls, None);
    assert!(!config.debug);
}

#[test]
fn test_document_layout() {
    let doc = parse(
        "[red green blue]
         width = 640  height = 480
         caption = \"Hello, world\"",
    )
    .unwrap();

    assert_eq!(
        to_string(&doc),
        "[red\n  green\n  blue\n]\nwidth   = 640\nheight  = 480\ncaption = \"Hello, world\""
    );
    assert_eq!(
        to_string_minified(&doc),
        "[red green blue]width=640 height=480 caption=\"Hello, world\""
    );

    let custom = SerializationOptions::new()
        .with_indentation("\t")
        .with_equals_spacing("", " ")
        .with_alignment(false);
    assert_eq!(
        to_string_with_options(&doc, custom),
        "[red\n\tgreen\n\tblue\n]\nwidth= 640\nheight= 480\ncaption= \"Hello, world\""
    );
}

#[test]
fn test_styled_spans_reassemble() {
    let doc = parse("k = \"a b\" [x] y").unwrap();
    let styled = to_styled(&doc, SerializationOptions::new());

    let text: String = styled.tokens().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(text, to_string(&doc));

    let brackets = styled
        .tokens()
        .iter()
        .filter(|t| t.style == Style::Bracket)
        .count();
    assert_eq!(brackets, 2);
    assert!(styled
        .tokens()
        .iter()
        .any(|t| t.style == Style::Quote && t.text == "\"a b\""));
}

#[test]
fn test_display_matches_to_string() {
    let doc = parse("a = [b c]").unwrap();
    assert_eq!(doc.to_string(), to_string(&doc));
}

#[test]
fn test_groups_view() {
    let doc = parse("tag = a, b  title = t  tag = c  loose").unwrap();
    let groups = doc.groups();
    assert_eq!(groups.len(), 3);
    assert!(groups.has_named());

    let tags: Vec<_> = groups
        .get(Some("tag"))
        .unwrap()
        .iter()
        .filter_map(|n| n.value())
        .collect();
    assert_eq!(tags, vec!["a", "b", "c"]);
    assert_eq!(groups.get(None).map(<[_]>::len), Some(1));
}

#[test]
fn test_structural_json_encoding() {
    let doc = parse("k = v  [x]").unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    assert_eq!(json, r#"[["k","v"],[null,[[null,"x"]]]]"#);

    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_built_tree_round_trip() {
    let tree = Node::composite(vec![
        Attribute::named("", Node::leaf("empty name")),
        Attribute::unnamed(Node::empty()),
        Attribute::named("nested", Node::composite(vec![Attribute::unnamed(Node::empty())])),
        Attribute::unnamed(Node::leaf("//not a comment")),
    ]);

    for options in [
        SerializationOptions::new(),
        SerializationOptions::compact(),
        SerializationOptions::minified(),
    ] {
        let text = to_string_with_options(&tree, options);
        assert_eq!(parse(&text).unwrap(), tree, "failed on {text:?}");
    }
}
