//! Load session state and shared load signals.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use mdemo_dom::{Element, Node};

use crate::fetcher::{HttpFetcher, NullFetcher, ScriptFetcher};

/// Error while loading an external script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Network or protocol failure (includes timeouts).
    #[error("failed to load {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying error description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("failed to load {url}: HTTP status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },
}

/// Observable state of a load signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The fetch has not settled yet.
    Pending,
    /// The resource loaded successfully.
    Loaded,
    /// The fetch failed; the error is preserved.
    Failed(LoadError),
}

/// Shared settle-once signal for one script URL.
///
/// All requests for the same URL within a session receive clones of the
/// same handle; [`same_signal`](Self::same_signal) makes that identity
/// observable. The state transitions exactly once, from `Pending` to
/// either `Loaded` or `Failed`.
#[derive(Debug, Clone, Default)]
pub struct LoadHandle {
    cell: Arc<OnceLock<Result<(), LoadError>>>,
}

impl LoadHandle {
    /// Create a pending handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the signal.
    #[must_use]
    pub fn state(&self) -> LoadState {
        match self.cell.get() {
            None => LoadState::Pending,
            Some(Ok(())) => LoadState::Loaded,
            Some(Err(e)) => LoadState::Failed(e.clone()),
        }
    }

    /// Whether the resource finished loading successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state(), LoadState::Loaded)
    }

    /// Whether `other` is the same underlying signal (not just equal state).
    #[must_use]
    pub fn same_signal(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }

    /// Settle the signal. Later calls are ignored.
    fn settle(&self, result: Result<(), LoadError>) {
        let _ = self.cell.set(result);
    }
}

/// Session-scoped script loader.
///
/// Owns the URL → [`LoadHandle`] cache explicitly; callers pass the
/// session (and the page body receiving `<script>` elements) by reference
/// into every call. Dropping the session drops the cache, which is the
/// only way entries go away.
pub struct LoaderSession {
    cache: HashMap<String, LoadHandle>,
    fetcher: Box<dyn ScriptFetcher>,
}

impl LoaderSession {
    /// Create a session with a custom fetcher.
    #[must_use]
    pub fn new(fetcher: Box<dyn ScriptFetcher>) -> Self {
        Self {
            cache: HashMap::new(),
            fetcher,
        }
    }

    /// Create a session that fetches over HTTP with the given timeout.
    #[must_use]
    pub fn with_http(timeout: Duration) -> Self {
        Self::new(Box::new(HttpFetcher::new(timeout)))
    }

    /// Create an offline session that emits elements without fetching.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Box::new(NullFetcher))
    }

    /// Ensure `url` is loaded into the page at most once.
    ///
    /// On a cache hit the existing handle is returned unchanged: no new
    /// script element, no new fetch. Otherwise the handle is inserted into
    /// the cache *before* the fetch, one `<script src>` element is appended
    /// to `body`, the fetch runs, and the settled handle is returned.
    pub fn ensure_script(&mut self, body: &mut Vec<Node>, url: &str) -> LoadHandle {
        if let Some(handle) = self.cache.get(url) {
            tracing::debug!(url, "script already requested this session");
            return handle.clone();
        }

        let handle = LoadHandle::new();
        // Cache before fetching: a second request for the same URL made
        // while this one is in flight must observe this entry.
        self.cache.insert(url.to_owned(), handle.clone());

        body.push(Element::script_src(url).into());

        match self.fetcher.fetch(url) {
            Ok(()) => {
                tracing::debug!(url, "script loaded");
                handle.settle(Ok(()));
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "script load failed");
                handle.settle(Err(e));
            }
        }

        handle
    }

    /// Handle for a URL already requested this session, if any.
    #[must_use]
    pub fn handle(&self, url: &str) -> Option<&LoadHandle> {
        self.cache.get(url)
    }

    /// Number of distinct URLs requested this session.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.cache.len()
    }
}
