//! Code sample model and language classification for mdemo.
//!
//! This crate provides the data types shared by the demo renderer:
//! - [`FragmentKind`]: the three fragment categories of a code demo
//!   (markup, script, style)
//! - [`preprocessor_for`]: classification of an author-facing language tag
//!   into the identifier a compiler backend expects
//! - [`CodeSample`]: an assembled demo sample with up to one fragment per
//!   kind
//!
//! Classification is permissive: tags outside the alias tables pass through
//! unchanged, leaving rejection to the downstream compiler.

mod language;
mod sample;

pub use language::{FragmentKind, preprocessor_for};
pub use sample::{CodeSample, Fragment, SampleWarning, content_id};
