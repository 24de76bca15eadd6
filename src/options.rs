//! Configuration for serializing and parsing Gravl.
//!
//! - [`SerializationOptions`]: layout of the serialized text
//! - [`Style`] and [`Palette`]: token categories and optional style codes
//! - [`ParseConfig`]: parser resource limits
//!
//! ## Examples
//!
//! ```rust
//! use gravl::{parse, to_string_with_options, SerializationOptions};
//!
//! let doc = parse("name = Alice  id = 7").unwrap();
//!
//! let aligned = to_string_with_options(&doc, SerializationOptions::new());
//! assert_eq!(aligned, "name = Alice\nid   = 7");
//!
//! let minified = to_string_with_options(&doc, SerializationOptions::minified());
//! assert_eq!(minified, "name=Alice id=7");
//! ```

/// Token categories of serialized output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Whitespace,
    Bracket,
    AttributeName,
    Equals,
    /// Any quoted symbol, whether it is a name or a value.
    Quote,
    /// Unquoted value of a named attribute.
    Value,
    /// Unquoted value of an unnamed attribute.
    DefaultValue,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Whitespace,
        Style::Bracket,
        Style::AttributeName,
        Style::Equals,
        Style::Quote,
        Style::Value,
        Style::DefaultValue,
    ];
}

/// Style codes written around tokens when serialized text is flattened.
///
/// Each non-empty code is written before a token of its style and followed by
/// `reset`. Empty codes leave tokens untouched.
///
/// # Examples
///
/// ```rust
/// use gravl::{Palette, Style};
///
/// let palette = Palette::ansi();
/// assert_eq!(palette.code(Style::Equals), "\u{1b}[90m");
/// assert!(Palette::default().code(Style::Bracket).is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    pub whitespace: String,
    pub bracket: String,
    pub attribute_name: String,
    pub equals: String,
    pub quote: String,
    pub value: String,
    pub default_value: String,
    pub reset: String,
}

impl Palette {
    /// A terminal palette using ANSI SGR sequences.
    #[must_use]
    pub fn ansi() -> Self {
        Palette {
            whitespace: String::new(),
            bracket: "\u{1b}[1m".to_string(),
            attribute_name: "\u{1b}[36m".to_string(),
            equals: "\u{1b}[90m".to_string(),
            quote: "\u{1b}[33m".to_string(),
            value: "\u{1b}[32m".to_string(),
            default_value: "\u{1b}[35m".to_string(),
            reset: "\u{1b}[0m".to_string(),
        }
    }

    /// The code for a token category.
    #[must_use]
    pub fn code(&self, style: Style) -> &str {
        match style {
            Style::Whitespace => &self.whitespace,
            Style::Bracket => &self.bracket,
            Style::AttributeName => &self.attribute_name,
            Style::Equals => &self.equals,
            Style::Quote => &self.quote,
            Style::Value => &self.value,
            Style::DefaultValue => &self.default_value,
        }
    }

    #[must_use]
    pub fn with_code(mut self, style: Style, code: impl Into<String>) -> Self {
        let code = code.into();
        match style {
            Style::Whitespace => self.whitespace = code,
            Style::Bracket => self.bracket = code,
            Style::AttributeName => self.attribute_name = code,
            Style::Equals => self.equals = code,
            Style::Quote => self.quote = code,
            Style::Value => self.value = code,
            Style::DefaultValue => self.default_value = code,
        }
        self
    }

    #[must_use]
    pub fn with_reset(mut self, reset: impl Into<String>) -> Self {
        self.reset = reset.into();
        self
    }
}

/// Layout options for serialized Gravl.
///
/// The default output puts every named attribute on its own line, aligns the
/// `=` signs of a node, and separates runs of unnamed and named attributes with
/// a blank line.
///
/// # Examples
///
/// ```rust
/// use gravl::SerializationOptions;
///
/// let options = SerializationOptions::new()
///     .with_indentation("    ")
///     .with_equals_spacing("", " ")
///     .with_alignment(false);
/// assert_eq!(options.indentation, "    ");
/// assert!(!options.align_values);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializationOptions {
    pub indentation: String,
    pub before_equals: String,
    pub after_equals: String,
    /// Written between a run of unnamed attributes and a run of named ones.
    pub content_separator: String,
    /// Pad names so the `=` of single-line attributes line up.
    pub align_values: bool,
    /// Smallest output that keeps the meaning; layout fields are ignored.
    pub minified: bool,
    pub palette: Option<Palette>,
}

impl Default for SerializationOptions {
    fn default() -> Self {
        SerializationOptions {
            indentation: "  ".to_string(),
            before_equals: " ".to_string(),
            after_equals: " ".to_string(),
            content_separator: "\n".to_string(),
            align_values: true,
            minified: false,
            palette: None,
        }
    }
}

impl SerializationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the smallest serialized form.
    ///
    /// ```rust
    /// use gravl::SerializationOptions;
    ///
    /// let options = SerializationOptions::minified();
    /// assert!(options.minified);
    /// assert!(options.indentation.is_empty());
    /// ```
    #[must_use]
    pub fn minified() -> Self {
        SerializationOptions {
            indentation: String::new(),
            before_equals: String::new(),
            after_equals: String::new(),
            content_separator: String::new(),
            align_values: false,
            minified: true,
            palette: None,
        }
    }

    /// Default layout without name alignment.
    #[must_use]
    pub fn compact() -> Self {
        SerializationOptions {
            align_values: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indentation(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = indentation.into();
        self
    }

    /// Sets the text written before and after every `=`.
    #[must_use]
    pub fn with_equals_spacing(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.before_equals = before.into();
        self.after_equals = after.into();
        self
    }

    #[must_use]
    pub fn with_content_separator(mut self, separator: impl Into<String>) -> Self {
        self.content_separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, align: bool) -> Self {
        self.align_values = align;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }
}

/// Parser resource limits.
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_depth` | 128 |
///
/// Each `[` nests one level deeper. Input nested past `max_depth` fails with
/// [`Fault::NestingTooDeep`](crate::Fault::NestingTooDeep) instead of growing
/// the stack without bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    pub max_depth: usize,
}

impl ParseConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    #[must_use]
    pub const fn new() -> Self {
        ParseConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SerializationOptions::default();
        assert_eq!(options.indentation, "  ");
        assert_eq!(options.before_equals, " ");
        assert_eq!(options.after_equals, " ");
        assert_eq!(options.content_separator, "\n");
        assert!(options.align_values);
        assert!(!options.minified);
        assert!(options.palette.is_none());
        assert_eq!(ParseConfig::default().max_depth, 128);
    }

    #[test]
    fn test_palette_codes() {
        let palette = Palette::default()
            .with_code(Style::Quote, "<q>")
            .with_reset("</>");
        assert_eq!(palette.code(Style::Quote), "<q>");
        assert_eq!(palette.reset, "</>");
        for style in Style::ALL {
            if style != Style::Quote {
                assert!(palette.code(style).is_empty());
            }
        }
    }

    #[test]
    fn test_compact_keeps_layout() {
        let compact = SerializationOptions::compact();
        assert!(!compact.align_values);
        assert_eq!(compact.indentation, "  ");
    }
}
