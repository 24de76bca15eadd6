//! Rendering parse errors with the offending line.
//!
//! Run with: cargo run --example error_reporting

use gravl::{parse, ParserError};

const BROKEN: &[&str] = &[
    "size = [w = 800\n  h = ]",
    "title = \"unterminated",
    "[a [] = b]",
    "path = C:\\temp",
    "list = [a b]]",
];

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    for input in BROKEN {
        match parse(input) {
            Ok(_) => println!("parsed: {:?}", input),
            Err(err) => println!("{}\n", render(input, &err)),
        }
    }
}

/// Prints the line the error sits on with a caret under its column.
fn render(input: &str, err: &ParserError) -> String {
    let line = input.lines().nth(err.line - 1).unwrap_or("");
    format!(
        "error: {}\n{:>4} | {}\n     | {}^",
        err.fault,
        err.line,
        line,
        " ".repeat(err.col)
    )
}
