//! Remote solution sources.

use std::time::Duration;

use ureq::Agent;

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Solution fetch failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error message.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Fetches solution sources referenced by exercise descriptors.
pub trait SolutionFetcher: Send + Sync {
    /// Fetch the file at `path`, relative to the fetcher's base.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the source can't be retrieved.
    fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// [`SolutionFetcher`] over HTTP.
///
/// Blocking; call from a blocking-friendly thread.
pub struct HttpFetcher {
    agent: Agent,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher resolving paths against `base_url`.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self::with_agent(base_url, agent)
    }

    fn with_agent(base_url: &str, agent: Agent) -> Self {
        Self {
            agent,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL for `path`.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl SolutionFetcher for HttpFetcher {
    fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);

        tracing::debug!(url = %url, "Fetching solution source");
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|err| transport_error(&url, &err))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            tracing::warn!(url = %url, status, "Solution source request failed");
            return Err(FetchError::Status { url, status });
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|err| transport_error(&url, &err))
    }
}

fn transport_error(url: &str, err: &ureq::Error) -> FetchError {
    FetchError::Transport {
        url: url.to_owned(),
        message: err.to_string(),
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
