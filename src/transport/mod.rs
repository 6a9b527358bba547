//! Fetch capability consumed by the dictionary loader.
//!
//! Ownership model:
//! - `Fetch` is the loader-facing interface; it is called once per source
//!   from a scoped worker thread and must be `Send + Sync`.
//! - `FetchResponse` mirrors a transport reply: an `ok` flag, an optional
//!   status code, and a raw body decoded lazily by `text()` or
//!   `text_lossy()`.
//! - `DefaultTransport` routes sources by scheme to the built-in transports.

use std::borrow::Cow;
use std::str::Utf8Error;

use crate::errors::LexiconError;

/// Filesystem transport.
pub mod fs;
/// Blocking HTTP transport.
#[cfg(feature = "http")]
pub mod http;

pub use fs::FileFetcher;
#[cfg(feature = "http")]
pub use http::HttpFetcher;

/// Per-request options passed to every fetch.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Ask intermediaries not to serve or store cached copies.
    pub bypass_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { bypass_cache: true }
    }
}

/// Transport reply for a single source.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    /// True when the transport considers the request successful.
    pub ok: bool,
    /// Transport status code, when the transport has one.
    pub status: Option<u16>,
    body: Vec<u8>,
}

impl FetchResponse {
    /// Successful reply carrying `text`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            ok: true,
            status: None,
            body: text.into().into_bytes(),
        }
    }

    /// Reply with an explicit status; `ok` is set for 2xx codes.
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status: Some(status),
            body: body.into(),
        }
    }

    /// Successful reply with raw bytes that may not be valid text.
    pub fn from_bytes(body: impl Into<Vec<u8>>) -> Self {
        Self {
            ok: true,
            status: None,
            body: body.into(),
        }
    }

    /// Decode the body as UTF-8.
    pub fn text(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Decode the body as UTF-8, replacing invalid sequences with U+FFFD.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body length in bytes.
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

/// Capability to retrieve the document behind a source identifier.
///
/// Implementations own their timeouts; the loader waits for every call to
/// return. Any `Err` marks only that source as skipped.
pub trait Fetch: Send + Sync {
    /// Retrieve `source`.
    fn fetch(&self, source: &str, options: &FetchOptions) -> Result<FetchResponse, LexiconError>;
}

impl<F> Fetch for F
where
    F: Fn(&str, &FetchOptions) -> Result<FetchResponse, LexiconError> + Send + Sync,
{
    fn fetch(&self, source: &str, options: &FetchOptions) -> Result<FetchResponse, LexiconError> {
        self(source, options)
    }
}

/// Routes `http(s)://` sources to the HTTP transport and everything else to
/// the filesystem transport.
#[derive(Debug, Default)]
pub struct DefaultTransport {
    files: FileFetcher,
    #[cfg(feature = "http")]
    web: HttpFetcher,
}

impl DefaultTransport {
    /// Transport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative file sources against `root`.
    pub fn with_file_root(mut self, root: impl Into<std::path::PathBuf>) -> Self {
        self.files = FileFetcher::new().with_root(root);
        self
    }
}

/// True for `http://` and `https://` sources.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

impl DefaultTransport {
    #[cfg(feature = "http")]
    fn fetch_remote(
        &self,
        source: &str,
        options: &FetchOptions,
    ) -> Result<FetchResponse, LexiconError> {
        self.web.fetch(source, options)
    }

    #[cfg(not(feature = "http"))]
    fn fetch_remote(
        &self,
        source: &str,
        _options: &FetchOptions,
    ) -> Result<FetchResponse, LexiconError> {
        Err(LexiconError::SourceFetch {
            source_id: source.to_string(),
            reason: "remote sources require the `http` feature".into(),
        })
    }
}

impl Fetch for DefaultTransport {
    fn fetch(&self, source: &str, options: &FetchOptions) -> Result<FetchResponse, LexiconError> {
        if is_remote(source) {
            self.fetch_remote(source, options)
        } else {
            self.files.fetch(source, options)
        }
    }
}
