use std::io;

use thiserror::Error;

use crate::types::{LanguageCode, SourceId};

/// Error type for lexicon configuration, source retrieval, and sampling failures.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("source '{source_id}' is unavailable: {reason}")]
    SourceFetch { source_id: SourceId, reason: String },
    #[error("source '{source_id}' body could not be read: {reason}")]
    SourceBody { source_id: SourceId, reason: String },
    #[error("unable to load any dictionary data for '{language}' ({skipped} source(s) skipped)")]
    EmptyResult { language: LanguageCode, skipped: usize },
    #[error("cannot build sampler: {0}")]
    SamplerConstruction(String),
    #[error("sampler has no words to return")]
    SamplerExhausted,
    #[error(transparent)]
    Io(#[from] io::Error),
}
