//! Parse a Gravl document, inspect it and write it back out.
//!
//! Run with: cargo run --example simple

use gravl::{parse, to_string, to_string_minified};
use std::error::Error;

const DOCUMENT: &str = r#"
// a small scene description
[camera light]

camera = [position = 0, 4, -10   fov = 60]
light, fill = [color = "warm white"   intensity = 0.8]
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(DOCUMENT)?;

    println!("Default values: {:?}", doc.flat_values());

    if let Some(camera) = doc.get("camera") {
        let position: Vec<_> = camera.values(Some("position")).filter_map(|n| n.value()).collect();
        println!("Camera position: {:?}", position);
    }

    // `light, fill = [...]` wrote the same node under both names
    for name in ["light", "fill"] {
        let color = doc
            .get(name)
            .and_then(|n| n.get("color"))
            .and_then(|n| n.value());
        println!("{} color: {:?}", name, color);
    }

    let text = to_string(&doc);
    println!("\nSerialized:\n{}\n", text);
    println!("Minified:\n{}\n", to_string_minified(&doc));

    assert_eq!(parse(&text)?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
