//! De-duplicating external library loader.
//!
//! A [`LoaderSession`] ensures each external script URL is loaded at most
//! once per rendering session: the first request creates a `<script src>`
//! element and performs the fetch, later requests for the same URL get the
//! identical [`LoadHandle`] back with no new element and no new fetch.
//!
//! The cache entry is inserted *before* the fetch runs, so a request that
//! arrives while another for the same URL is being served observes the
//! shared handle rather than starting a second fetch. Entries are never
//! evicted; a session spans one rendering run.
//!
//! Fetch failures settle the shared handle as [`LoadState::Failed`] with
//! the error preserved. The entry stays cached — a failed library is not
//! retried within the session.

mod fetcher;
mod session;

pub use fetcher::{HttpFetcher, NullFetcher, ScriptFetcher};
pub use session::{LoadError, LoadHandle, LoadState, LoaderSession};
