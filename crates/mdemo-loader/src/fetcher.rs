//! Script fetching seam.

use std::time::Duration;

use ureq::Agent;

use crate::session::LoadError;

/// Fetches an external script resource.
///
/// The loader only needs to know whether the resource is reachable; the
/// body is discarded. Implementations decide what "fetch" means:
/// [`HttpFetcher`] performs a real HTTP GET, [`NullFetcher`] succeeds
/// without touching the network (offline rendering).
pub trait ScriptFetcher {
    /// Fetch `url`, returning `Ok(())` once the resource loaded.
    fn fetch(&self, url: &str) -> Result<(), LoadError>;
}

/// HTTP-backed fetcher with a global request timeout.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Create a fetcher whose requests abort after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl ScriptFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<(), LoadError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| LoadError::Transport {
                url: url.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(LoadError::Status {
                url: url.to_owned(),
                status,
            });
        }

        // Drain the body so the connection can be reused.
        response
            .into_body()
            .read_to_vec()
            .map_err(|e| LoadError::Transport {
                url: url.to_owned(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Fetcher that never touches the network.
///
/// Every fetch succeeds immediately. Used for offline rendering, where
/// script elements should still be emitted but nothing should be
/// verified remotely.
pub struct NullFetcher;

impl ScriptFetcher for NullFetcher {
    fn fetch(&self, _url: &str) -> Result<(), LoadError> {
        Ok(())
    }
}
