use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::sources::FILE_SCHEME;
use crate::errors::LexiconError;
use crate::transport::{Fetch, FetchOptions, FetchResponse};

/// Filesystem transport that treats a source id as a path.
///
/// `file://` prefixes are stripped. Relative paths resolve against the
/// configured root, or the working directory when none is set.
#[derive(Clone, Debug, Default)]
pub struct FileFetcher {
    root: Option<PathBuf>,
}

impl FileFetcher {
    /// Fetcher resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Path a source id maps to.
    pub fn resolve(&self, source: &str) -> PathBuf {
        let raw = source.strip_prefix(FILE_SCHEME).unwrap_or(source);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Fetch for FileFetcher {
    fn fetch(&self, source: &str, _options: &FetchOptions) -> Result<FetchResponse, LexiconError> {
        let path = self.resolve(source);
        let body = fs::read(&path).map_err(|err| LexiconError::SourceFetch {
            source_id: source.to_string(),
            reason: format!("{}: {err}", path.display()),
        })?;
        Ok(FetchResponse::from_bytes(body))
    }
}
