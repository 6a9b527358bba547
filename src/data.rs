use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::sampler::DEFAULT_SOURCE_KEY;
use crate::errors::LexiconError;

pub use crate::types::{SourceId, Word};

/// Frequency band assigned from a word's rank percentile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stratum {
    /// Most frequent ranks.
    Head,
    /// Ranks between the head and tail bands.
    Mid,
    /// Everything past the mid band.
    Tail,
}

impl Stratum {
    /// Lowercase label used in logs and serialized entries.
    pub fn as_str(self) -> &'static str {
        match self {
            Stratum::Head => "head",
            Stratum::Mid => "mid",
            Stratum::Tail => "tail",
        }
    }

    /// Strata visited after this one is chosen: itself first, then the rest.
    pub fn fallback_order(self) -> [Stratum; 3] {
        match self {
            Stratum::Head => [Stratum::Head, Stratum::Mid, Stratum::Tail],
            Stratum::Mid => [Stratum::Mid, Stratum::Head, Stratum::Tail],
            Stratum::Tail => [Stratum::Tail, Stratum::Head, Stratum::Mid],
        }
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stratum {
    type Err = LexiconError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "head" => Ok(Stratum::Head),
            "mid" => Ok(Stratum::Mid),
            "tail" => Ok(Stratum::Tail),
            other => Err(LexiconError::Configuration(format!(
                "unknown stratum '{other}'"
            ))),
        }
    }
}

/// One canonical word in a language's merged lexicon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Normalized token.
    pub word: Word,
    /// Best observed frequency across sources (0 when unknown).
    pub frequency: f64,
    /// Source that won deduplication for this word.
    pub source: SourceId,
    /// Position of `source` in the merge's source list.
    pub source_index: usize,
    /// Global ingestion sequence number; breaks exact frequency ties.
    pub order: u64,
    /// Dense zero-based position after the frequency sort.
    pub rank: usize,
    /// Band derived from `rank`.
    pub stratum: Stratum,
}

/// Input row for [`crate::WordSampler`].
///
/// Everything except `word` is optional so callers can feed hand-built
/// lists; the sampler fills gaps and re-stratifies when needed.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerEntry {
    pub word: Word,
    pub frequency: f64,
    pub rank: Option<usize>,
    pub source: Option<SourceId>,
    pub stratum: Option<Stratum>,
}

impl SamplerEntry {
    /// Bare word with unknown frequency, rank, source and stratum.
    pub fn new(word: impl Into<Word>) -> Self {
        Self {
            word: word.into(),
            frequency: 0.0,
            rank: None,
            source: None,
            stratum: None,
        }
    }

    /// Set the observed frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the rank used to break frequency ties.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Set the originating source.
    pub fn with_source(mut self, source: impl Into<SourceId>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set a precomputed stratum.
    pub fn with_stratum(mut self, stratum: Stratum) -> Self {
        self.stratum = Some(stratum);
        self
    }

    pub(crate) fn source_key(&self) -> &str {
        match self.source.as_deref() {
            Some(source) if !source.is_empty() => source,
            _ => DEFAULT_SOURCE_KEY,
        }
    }
}

impl From<DictionaryEntry> for SamplerEntry {
    fn from(entry: DictionaryEntry) -> Self {
        Self {
            word: entry.word,
            frequency: entry.frequency,
            rank: Some(entry.rank),
            source: Some(entry.source),
            stratum: Some(entry.stratum),
        }
    }
}

impl From<&DictionaryEntry> for SamplerEntry {
    fn from(entry: &DictionaryEntry) -> Self {
        entry.clone().into()
    }
}

/// Map non-finite values and negative zero to `0.0`.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}
