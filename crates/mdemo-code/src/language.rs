//! Fragment kinds and preprocessor classification.
//!
//! Maps author-facing language tags (code fence info strings) to the
//! canonical identifier a compiler or highlighter backend expects.

/// The three fragment categories of a code demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Markup fragment (HTML and HTML-producing template languages).
    Markup,
    /// Script fragment (JavaScript and compile-to-JS languages).
    Script,
    /// Style fragment (CSS and CSS preprocessor languages).
    Style,
}

impl FragmentKind {
    /// All kinds, in routing order.
    pub const ALL: [Self; 3] = [Self::Markup, Self::Script, Self::Style];

    /// Language tags recognized for this kind.
    #[must_use]
    pub fn recognized(self) -> &'static [&'static str] {
        match self {
            Self::Markup => &["html", "slim", "haml", "md", "markdown", "vue"],
            Self::Script => &[
                "js",
                "javascript",
                "coffee",
                "coffeescript",
                "ts",
                "typescript",
                "ls",
                "livescript",
            ],
            Self::Style => &["css", "less", "sass", "scss", "stylus", "styl"],
        }
    }

    /// Whether this kind recognizes the given language tag.
    #[must_use]
    pub fn recognizes(self, tag: &str) -> bool {
        self.recognized().contains(&tag)
    }

    /// Find the kind that recognizes a language tag.
    ///
    /// Returns `None` for tags no kind recognizes. Used to route code
    /// fences into the matching sample slot.
    #[must_use]
    pub fn for_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.recognizes(tag))
    }

    /// Alias table entry for a tag, if one exists.
    ///
    /// Bare tags (`html`, `js`, `css`) map to `"none"` since they need no
    /// preprocessing; shorthand tags map to the full preprocessor name.
    fn alias(self, tag: &str) -> Option<&'static str> {
        match (self, tag) {
            (Self::Markup, "html" | "vue") => Some("none"),
            (Self::Markup, "md") => Some("markdown"),
            (Self::Script, "js" | "javascript") => Some("none"),
            (Self::Script, "coffee") => Some("coffeescript"),
            (Self::Script, "ls") => Some("livescript"),
            (Self::Script, "ts") => Some("typescript"),
            (Self::Style, "css") => Some("none"),
            (Self::Style, "styl") => Some("stylus"),
            _ => None,
        }
    }
}

/// Resolve a language tag to the preprocessor identifier for a fragment kind.
///
/// Alias table hit → mapped identifier. Anything else — recognized tags
/// without an alias (`markdown`, `scss`, `typescript`) and unknown tags
/// alike — passes through unchanged; the backend decides what to do with
/// identifiers it does not support.
///
/// Pure function of its two inputs.
#[must_use]
pub fn preprocessor_for(kind: FragmentKind, tag: &str) -> &str {
    kind.alias(tag).unwrap_or(tag)
}
