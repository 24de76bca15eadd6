//! A configuration file read into Rust types and written back.
//!
//! Run with: cargo run --example typed_config

use gravl::{from_str, to_node, to_string};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
enum Mode {
    Development,
    Production { replicas: u8 },
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Listener {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    mode: Mode,
    listener: Vec<Listener>,
    allowed: Vec<String>,
    timeout: Option<f64>,
}

const CONFIG: &str = r#"
name = "edge proxy"
mode = [Production = [replicas = 3]]

// repeated names collect into a list
listener = [host = 0.0.0.0   port = 80]
listener = [host = 0.0.0.0   port = 443]

allowed = alice, bob, carol
timeout = 2.5
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Config = from_str(CONFIG)?;
    println!("{:#?}\n", config);

    let text = to_string(&to_node(&config)?);
    println!("Written back:\n{}\n", text);

    let back: Config = from_str(&text)?;
    assert_eq!(config, back);
    println!("✓ Round-trip successful");

    Ok(())
}
