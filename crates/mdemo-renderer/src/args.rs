//! Demo container header parsing.
//!
//! Parses the header of a `:::demo` container:
//!
//! ```text
//! :::demo Counter button {#counter .wide js-lib="https://a.js https://b.js"}
//! ```
//!
//! Everything before the optional `{…}` block is the demo title. Inside
//! the braces, `#id` sets the demo id, `.class` adds display classes, and
//! `js-lib` / `css-lib` carry whitespace-separated extra library URLs.

use mdemo_config::DemoOverrides;

/// Parsed `:::demo` header.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DemoArgs {
    /// Demo title (empty if the header had none).
    pub title: String,
    /// Explicit id from `{#id}`.
    pub id: Option<String>,
    /// Extra classes from `{.class}`.
    pub classes: Vec<String>,
    /// Library overrides from `js-lib` / `css-lib` attributes.
    pub overrides: DemoOverrides,
    /// Attribute keys that were not recognized.
    pub unknown_attrs: Vec<String>,
}

impl DemoArgs {
    /// Parse the text following `:::demo` on the container's opening line.
    #[must_use]
    pub fn parse(header: &str) -> Self {
        let header = header.trim();
        let (title, attrs) = split_attr_block(header);

        let mut args = Self {
            title: title.trim().to_owned(),
            ..Self::default()
        };

        for token in AttrTokens::new(attrs) {
            match token {
                AttrToken::Id(id) => args.id = Some(id),
                AttrToken::Class(class) => args.classes.push(class),
                AttrToken::Pair { key, value } => match key.as_str() {
                    "js-lib" => args.overrides.js_lib.extend(split_urls(&value)),
                    "css-lib" => args.overrides.css_lib.extend(split_urls(&value)),
                    _ => args.unknown_attrs.push(key),
                },
            }
        }

        args
    }
}

/// Split a header into title text and the contents of a trailing `{…}`.
fn split_attr_block(header: &str) -> (&str, &str) {
    if let Some(open) = header.rfind('{')
        && header.ends_with('}')
    {
        (&header[..open], &header[open + 1..header.len() - 1])
    } else {
        (header, "")
    }
}

fn split_urls(value: &str) -> impl Iterator<Item = String> {
    value.split_whitespace().map(str::to_owned)
}

/// One attribute token inside the brace block.
#[derive(Debug, PartialEq, Eq)]
enum AttrToken {
    Id(String),
    Class(String),
    Pair { key: String, value: String },
}

/// Tokenizer over the brace-block contents.
///
/// Quoted values may contain whitespace; everything else splits on it.
struct AttrTokens<'a> {
    rest: &'a str,
}

impl<'a> AttrTokens<'a> {
    fn new(attrs: &'a str) -> Self {
        Self { rest: attrs }
    }
}

impl Iterator for AttrTokens<'_> {
    type Item = AttrToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.rest = self.rest.trim_start();
            if self.rest.is_empty() {
                return None;
            }

            if let Some(stripped) = self.rest.strip_prefix('#') {
                let end = word_end(stripped);
                let (id, rest) = stripped.split_at(end);
                self.rest = rest;
                if !id.is_empty() {
                    return Some(AttrToken::Id(id.to_owned()));
                }
            } else if let Some(stripped) = self.rest.strip_prefix('.') {
                let end = word_end(stripped);
                let (class, rest) = stripped.split_at(end);
                self.rest = rest;
                if !class.is_empty() {
                    return Some(AttrToken::Class(class.to_owned()));
                }
            } else {
                let word_len = self
                    .rest
                    .find(char::is_whitespace)
                    .unwrap_or(self.rest.len());
                match self.rest[..word_len].find('=') {
                    Some(eq) => {
                        let key = self.rest[..eq].trim().to_owned();
                        let (value, rest) = take_value(&self.rest[eq + 1..]);
                        self.rest = rest;
                        if !key.is_empty() {
                            return Some(AttrToken::Pair { key, value });
                        }
                    }
                    // Bare word with no `=`: skip it.
                    None => self.rest = &self.rest[word_len..],
                }
            }
        }
    }
}

/// End of a `#id`/`.class` word: whitespace or the next marker.
fn word_end(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c == '.' || c == '#')
        .unwrap_or(s.len())
}

/// Consume an attribute value, honoring single or double quotes.
fn take_value(s: &str) -> (String, &str) {
    for quote in ['"', '\''] {
        if let Some(stripped) = s.strip_prefix(quote) {
            return match stripped.find(quote) {
                Some(end) => (stripped[..end].to_owned(), &stripped[end + 1..]),
                // Unterminated quote: take the rest of the block.
                None => (stripped.to_owned(), ""),
            };
        }
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (s[..end].to_owned(), &s[end..])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_header() {
        let args = DemoArgs::parse("");
        assert_eq!(args, DemoArgs::default());
    }

    #[test]
    fn test_title_only() {
        let args = DemoArgs::parse("A counter button");
        assert_eq!(args.title, "A counter button");
        assert_eq!(args.id, None);
    }

    #[test]
    fn test_id_and_classes() {
        let args = DemoArgs::parse("Counter {#counter .wide .dark}");
        assert_eq!(args.title, "Counter");
        assert_eq!(args.id, Some("counter".to_owned()));
        assert_eq!(args.classes, vec!["wide", "dark"]);
    }

    #[test]
    fn test_compact_id_and_class() {
        let args = DemoArgs::parse("{#a.b}");
        assert_eq!(args.id, Some("a".to_owned()));
        assert_eq!(args.classes, vec!["b"]);
    }

    #[test]
    fn test_lib_overrides_split_on_whitespace() {
        let args = DemoArgs::parse(r#"{js-lib="https://a.js https://b.js" css-lib="https://c.css"}"#);
        assert_eq!(
            args.overrides.js_lib,
            vec!["https://a.js".to_owned(), "https://b.js".to_owned()]
        );
        assert_eq!(args.overrides.css_lib, vec!["https://c.css".to_owned()]);
    }

    #[test]
    fn test_single_quoted_value() {
        let args = DemoArgs::parse("{js-lib='https://a.js'}");
        assert_eq!(args.overrides.js_lib, vec!["https://a.js".to_owned()]);
    }

    #[test]
    fn test_unquoted_value() {
        let args = DemoArgs::parse("{js-lib=https://a.js}");
        assert_eq!(args.overrides.js_lib, vec!["https://a.js".to_owned()]);
    }

    #[test]
    fn test_bare_word_before_pair_is_skipped() {
        let args = DemoArgs::parse("{wide js-lib=https://a.js}");
        assert_eq!(args.overrides.js_lib, vec!["https://a.js".to_owned()]);
        assert!(args.unknown_attrs.is_empty());
    }

    #[test]
    fn test_unknown_attr_recorded() {
        let args = DemoArgs::parse(r#"{height="300"}"#);
        assert_eq!(args.unknown_attrs, vec!["height".to_owned()]);
        assert!(args.overrides.js_lib.is_empty());
    }

    #[test]
    fn test_braces_in_title_are_not_attrs() {
        // No trailing `}` means the brace is title text.
        let args = DemoArgs::parse("Weird {title");
        assert_eq!(args.title, "Weird {title");
        assert_eq!(args.id, None);
    }

    #[test]
    fn test_unterminated_quote_takes_rest_of_block() {
        let args = DemoArgs::parse(r#"{js-lib="https://a.js}"#);
        assert_eq!(args.overrides.js_lib, vec!["https://a.js".to_owned()]);
    }
}
