//! Code sample assembly.
//!
//! A [`CodeSample`] holds up to one fragment per [`FragmentKind`], routed
//! from the code fences found inside a demo container. Samples are
//! immutable once assembled and passed by reference into the renderer.

use sha2::{Digest, Sha256};

use crate::language::FragmentKind;

/// One fragment of a code demo: a language tag plus its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Author-supplied language tag from the fence info string.
    pub lang: String,
    /// Fragment source text.
    pub text: String,
}

/// Warning produced while routing fences into a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleWarning {
    /// A fence used a language tag no fragment kind recognizes.
    UnknownLanguage { lang: String },
    /// A second fence arrived for an already-filled fragment kind.
    DuplicateFragment { kind: FragmentKind, lang: String },
}

impl std::fmt::Display for SampleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLanguage { lang } => {
                write!(f, "fence language '{lang}' matches no demo fragment kind, skipped")
            }
            Self::DuplicateFragment { kind, lang } => {
                write!(f, "duplicate {kind:?} fragment ('{lang}') ignored, first one wins")
            }
        }
    }
}

/// An assembled code demo sample.
///
/// Up to three optional fragments, one per kind. Construct with
/// [`from_fences`](Self::from_fences); there are no mutating operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSample {
    markup: Option<Fragment>,
    script: Option<Fragment>,
    style: Option<Fragment>,
}

impl CodeSample {
    /// Route a list of `(language, source)` fences into a sample.
    ///
    /// Each fence goes to the kind that recognizes its language tag. The
    /// first fence per kind wins; later ones and fences with unrecognized
    /// tags are skipped with a warning. Nothing here is an error — a demo
    /// with missing or odd fragments still renders whatever it has.
    #[must_use]
    pub fn from_fences<I, L, T>(fences: I) -> (Self, Vec<SampleWarning>)
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        let mut sample = Self::default();
        let mut warnings = Vec::new();

        for (lang, text) in fences {
            let lang = lang.into();
            let Some(kind) = FragmentKind::for_tag(&lang) else {
                warnings.push(SampleWarning::UnknownLanguage { lang });
                continue;
            };

            let slot = match kind {
                FragmentKind::Markup => &mut sample.markup,
                FragmentKind::Script => &mut sample.script,
                FragmentKind::Style => &mut sample.style,
            };
            if slot.is_some() {
                warnings.push(SampleWarning::DuplicateFragment { kind, lang });
            } else {
                *slot = Some(Fragment {
                    lang,
                    text: text.into(),
                });
            }
        }

        (sample, warnings)
    }

    /// The fragment stored for a kind, if any.
    #[must_use]
    pub fn fragment(&self, kind: FragmentKind) -> Option<&Fragment> {
        match kind {
            FragmentKind::Markup => self.markup.as_ref(),
            FragmentKind::Script => self.script.as_ref(),
            FragmentKind::Style => self.style.as_ref(),
        }
    }

    /// Script source text, if a script fragment is present.
    ///
    /// The renderer obtains script content exclusively through this
    /// accessor rather than reading the fragment directly.
    #[must_use]
    pub fn script_text(&self) -> Option<&str> {
        self.script.as_ref().map(|f| f.text.as_str())
    }

    /// Style source text, if a style fragment is present.
    #[must_use]
    pub fn style_text(&self) -> Option<&str> {
        self.style.as_ref().map(|f| f.text.as_str())
    }

    /// Whether no fragment is present at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markup.is_none() && self.script.is_none() && self.style.is_none()
    }

    /// Fragments present in this sample, in kind order.
    pub fn fragments(&self) -> impl Iterator<Item = (FragmentKind, &Fragment)> {
        FragmentKind::ALL
            .into_iter()
            .filter_map(|kind| self.fragment(kind).map(|f| (kind, f)))
    }
}

/// Stable identifier for a sample's content.
///
/// SHA-256 over the fragments (kind-tagged so moving text between kinds
/// changes the id), truncated to a 12-hex-char prefix. Used when a demo
/// declares no explicit id, so anchors survive re-renders of unchanged
/// content.
#[must_use]
pub fn content_id(sample: &CodeSample) -> String {
    let mut hasher = Sha256::new();
    for (kind, fragment) in sample.fragments() {
        hasher.update(format!("{kind:?}").as_bytes());
        hasher.update(b":");
        hasher.update(fragment.text.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();
    format!("demo-{}", hex::encode(&digest[..6]))
}
