use std::io::Read;
use std::time::Duration;

use crate::constants::sources::HTTP_TIMEOUT_SECS;
use crate::errors::LexiconError;
use crate::transport::{Fetch, FetchOptions, FetchResponse};

/// Blocking HTTP transport backed by `ureq`.
///
/// Non-2xx replies come back as `ok = false` responses rather than errors so
/// the loader can report the status; only transport failures are `Err`.
#[derive(Debug)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl HttpFetcher {
    /// Fetcher with the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, source: &str, options: &FetchOptions) -> Result<FetchResponse, LexiconError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let mut request = agent.get(source);
        if options.bypass_cache {
            request = request.set("Cache-Control", "no-store");
        }
        match request.call() {
            Ok(response) => {
                let status = response.status();
                let mut body = Vec::new();
                response
                    .into_reader()
                    .read_to_end(&mut body)
                    .map_err(|err| LexiconError::SourceBody {
                        source_id: source.to_string(),
                        reason: err.to_string(),
                    })?;
                Ok(FetchResponse::with_status(status, body))
            }
            Err(ureq::Error::Status(code, _response)) => {
                Ok(FetchResponse::with_status(code, Vec::new()))
            }
            Err(ureq::Error::Transport(transport)) => Err(LexiconError::SourceFetch {
                source_id: source.to_string(),
                reason: transport.to_string(),
            }),
        }
    }
}
