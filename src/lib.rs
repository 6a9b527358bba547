#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Bounded batches on top of a word source.
pub mod batch;
/// Sampler and loader configuration types.
pub mod config;
/// Centralized constants used across normalization, strata, and sampling.
pub mod constants;
/// Lexicon entry and stratum types.
pub mod data;
/// Reusable demo runners shared by the bundled demos.
pub mod example_apps;
/// Concurrent fetch, merge, and ranking of wordlist sources.
pub mod ingestion;
/// Draw-distribution helpers for sampled word sequences.
pub mod metrics;
/// Token validation and normalization.
pub mod normalize;
/// Newline-delimited preset lexicons.
pub mod preset;
/// Seeded xorshift engine.
pub mod rng;
/// Stratified anti-repeat word sampler.
pub mod sampler;
/// Supported languages and default wordlist sources.
pub mod source;
/// Rank-percentile stratification.
pub mod strata;
/// Fetch capability and built-in transports.
pub mod transport;
/// Shared type aliases.
pub mod types;

mod errors;

pub use batch::BatchSampler;
pub use config::{LoaderOptions, SamplerConfig};
pub use data::{DictionaryEntry, SamplerEntry, Stratum};
pub use errors::LexiconError;
pub use ingestion::{DictionaryLoader, LoadedDictionary, SkipKind, SourceSkip, load_dictionary};
pub use normalize::normalize_word;
pub use rng::Xorshift32;
pub use sampler::{WordSampler, WordSource};
pub use source::{DEFAULT_SOURCES, Language};
pub use strata::assign_strata;
pub use transport::{DefaultTransport, Fetch, FetchOptions, FetchResponse, FileFetcher};
#[cfg(feature = "http")]
pub use transport::HttpFetcher;
pub use types::{LanguageCode, LogMessage, SourceId, Word};
