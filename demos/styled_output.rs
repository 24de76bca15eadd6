//! Syntax-highlighted output from styled spans.
//!
//! Run with: cargo run --example styled_output

use gravl::{parse, to_string_with_options, to_styled, Palette, SerializationOptions, Style};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(r#"title = "Gravl Demo"  tags = red, green  [unnamed value]"#)?;

    // Terminal colors through the built-in ANSI palette
    let options = SerializationOptions::new().with_palette(Palette::ansi());
    println!("ANSI:\n{}\n", to_string_with_options(&doc, options));

    // Custom markup from the raw spans
    let styled = to_styled(&doc, SerializationOptions::new());
    let mut html = String::new();
    for token in styled.tokens() {
        let class = match token.style {
            Style::Whitespace => {
                html.push_str(&token.text);
                continue;
            }
            Style::Bracket => "bracket",
            Style::AttributeName => "name",
            Style::Equals => "equals",
            Style::Quote => "string",
            Style::Value => "value",
            Style::DefaultValue => "default",
        };
        html.push_str(&format!("<span class=\"{}\">{}</span>", class, escape_html(&token.text)));
    }
    println!("HTML:\n<pre>{}</pre>", html);

    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
