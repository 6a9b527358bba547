use std::borrow::Cow;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info, warn};

use crate::data::{DictionaryEntry, Stratum};
use crate::errors::LexiconError;
use crate::normalize::normalize_word;
use crate::source::{DEFAULT_SOURCES, Language, resolve_sources};
use crate::strata::assign_strata;
use crate::transport::{Fetch, FetchOptions};
use crate::types::{LogMessage, SourceId, Word};

/// Loader behavior switches.
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    /// Prepend the built-in sources for the requested language.
    pub include_defaults: bool,
    /// Options forwarded to every fetch.
    pub fetch: FetchOptions,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            include_defaults: true,
            fetch: FetchOptions::default(),
        }
    }
}

/// Why a source contributed nothing to a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipKind {
    /// The fetch itself failed (or its worker panicked).
    Request,
    /// The transport answered with a non-success status.
    Status,
    /// The transport connected but could not read the body.
    ///
    /// Invalid UTF-8 is not a skip: bodies are decoded lossily and only the
    /// affected lines fail normalization.
    Body,
}

impl SkipKind {
    fn as_str(self) -> &'static str {
        match self {
            SkipKind::Request => "request",
            SkipKind::Status => "status",
            SkipKind::Body => "body",
        }
    }
}

/// Diagnostic record for a source skipped during a merge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSkip {
    pub source_id: SourceId,
    pub source_index: usize,
    pub kind: SkipKind,
    pub reason: LogMessage,
}

impl fmt::Display for SourceSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source #{} '{}' skipped ({}): {}",
            self.source_index,
            self.source_id,
            self.kind.as_str(),
            self.reason
        )
    }
}

/// Result of a successful merge.
#[derive(Clone, Debug)]
pub struct LoadedDictionary {
    /// Language the lexicon was built for.
    pub language: Language,
    /// Sources consulted, in merge order; `source_index` points into this list.
    pub sources: Vec<SourceId>,
    /// Ranked, stratified, de-duplicated entries.
    pub entries: Vec<DictionaryEntry>,
    /// Sources that contributed nothing, with the reason.
    pub skipped: Vec<SourceSkip>,
    /// Non-blank lines read across all documents.
    pub lines_read: usize,
    /// Lines whose token failed normalization.
    pub lines_rejected: usize,
}

impl LoadedDictionary {
    /// Number of entries in `stratum`.
    pub fn stratum_len(&self, stratum: Stratum) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.stratum == stratum)
            .count()
    }
}

/// Fetches, merges, ranks, and stratifies wordlists for one language.
pub struct DictionaryLoader<F: Fetch> {
    fetcher: F,
    extra_sources: Vec<SourceId>,
    options: LoaderOptions,
}

impl<F: Fetch> DictionaryLoader<F> {
    /// Loader using `fetcher` for every source.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            extra_sources: Vec::new(),
            options: LoaderOptions::default(),
        }
    }

    /// Append caller-supplied sources after the defaults.
    pub fn with_extra_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceId>,
    {
        self.extra_sources
            .extend(sources.into_iter().map(Into::into));
        self
    }

    /// Replace the loader options.
    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Use only the extra sources.
    pub fn without_default_sources(mut self) -> Self {
        self.options.include_defaults = false;
        self
    }

    /// Build the lexicon for a language code (`ru` or `uk`).
    pub fn load(&self, language: &str) -> Result<LoadedDictionary, LexiconError> {
        self.load_language(language.parse()?)
    }

    /// Build the lexicon for `language`.
    pub fn load_language(&self, language: Language) -> Result<LoadedDictionary, LexiconError> {
        let defaults: &[&str] = if self.options.include_defaults {
            DEFAULT_SOURCES.sources_for(language)
        } else {
            &[]
        };
        let sources = resolve_sources(language, defaults, &self.extra_sources)?;
        let outcomes = fetch_all(&self.fetcher, &sources, &self.options.fetch);

        let mut accumulator = MergeAccumulator::default();
        let mut skipped = Vec::new();
        let mut seen_any = false;
        for (source_index, (source_id, outcome)) in sources.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(text) => {
                    seen_any = true;
                    accumulator.ingest_document(&text, source_id, source_index);
                }
                Err((kind, reason)) => {
                    warn!(
                        source_id = %source_id,
                        source_index,
                        kind = kind.as_str(),
                        reason = %reason,
                        "dictionary source skipped"
                    );
                    skipped.push(SourceSkip {
                        source_id: source_id.clone(),
                        source_index,
                        kind,
                        reason,
                    });
                }
            }
        }

        if !seen_any || accumulator.is_empty() {
            return Err(LexiconError::EmptyResult {
                language: language.code().to_string(),
                skipped: skipped.len(),
            });
        }

        let lines_read = accumulator.lines_read;
        let lines_rejected = accumulator.lines_rejected;
        let entries = accumulator.finish();
        info!(
            language = language.code(),
            entries = entries.len(),
            skipped = skipped.len(),
            lines_read,
            lines_rejected,
            "dictionary merge completed"
        );
        Ok(LoadedDictionary {
            language,
            sources,
            entries,
            skipped,
            lines_read,
            lines_rejected,
        })
    }
}

/// Merge the default sources for `language` plus `extra` into ranked entries.
pub fn load_dictionary<F, S>(
    language: &str,
    extra: &[S],
    fetcher: F,
) -> Result<Vec<DictionaryEntry>, LexiconError>
where
    F: Fetch,
    S: AsRef<str>,
{
    DictionaryLoader::new(fetcher)
        .with_extra_sources(extra.iter().map(|source| source.as_ref().to_string()))
        .load(language)
        .map(|loaded| loaded.entries)
}

type SourceOutcome = Result<String, (SkipKind, LogMessage)>;

/// Fetch every source on its own scoped thread and wait for all of them.
fn fetch_all<F: Fetch>(fetcher: &F, sources: &[SourceId], options: &FetchOptions) -> Vec<SourceOutcome> {
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || retrieve(fetcher, source, options)))
            .collect();
        handles
            .into_iter()
            .zip(sources)
            .map(|(handle, source)| match handle.join() {
                Ok((outcome, elapsed, bytes)) => {
                    debug!(
                        source_id = %source,
                        fetch_ms = elapsed.as_millis(),
                        bytes,
                        ok = outcome.is_ok(),
                        "dictionary fetch settled"
                    );
                    outcome
                }
                Err(_) => Err((SkipKind::Request, "fetch thread panicked".to_string())),
            })
            .collect()
    })
}

fn retrieve<F: Fetch>(
    fetcher: &F,
    source: &str,
    options: &FetchOptions,
) -> (SourceOutcome, Duration, usize) {
    let start = Instant::now();
    let mut bytes = 0;
    let outcome = match fetcher.fetch(source, options) {
        Err(err @ LexiconError::SourceBody { .. }) => Err((SkipKind::Body, err.to_string())),
        Err(err) => Err((SkipKind::Request, err.to_string())),
        Ok(response) if !response.ok => {
            let reason = match response.status {
                Some(status) => format!("response not ok (status {status})"),
                None => "response not ok".to_string(),
            };
            Err((SkipKind::Status, reason))
        }
        Ok(response) => {
            bytes = response.body_len();
            let text = response.text_lossy();
            if let Cow::Owned(_) = text {
                warn!(source_id = %source, "invalid UTF-8 in body replaced");
            }
            Ok(text.into_owned())
        }
    };
    (outcome, start.elapsed(), bytes)
}

/// Parse the frequency column: last field when at least two fields exist.
fn parse_frequency(fields: &[&str]) -> f64 {
    if fields.len() < 2 {
        return 0.0;
    }
    match fields[fields.len() - 1].parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Best observation of a word seen so far in one merge.
struct Observation {
    frequency: f64,
    source: SourceId,
    source_index: usize,
    order: u64,
}

/// Merge state threaded through every document of one load call.
#[derive(Default)]
struct MergeAccumulator {
    next_order: u64,
    best: IndexMap<Word, Observation>,
    lines_read: usize,
    lines_rejected: usize,
}

impl MergeAccumulator {
    fn ingest_document(&mut self, text: &str, source: &str, source_index: usize) {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.lines_read += 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let Some(word) = normalize_word(fields[0]) else {
                self.lines_rejected += 1;
                continue;
            };
            let frequency = parse_frequency(&fields);
            self.observe(word, frequency, source, source_index);
        }
    }

    fn observe(&mut self, word: Word, frequency: f64, source: &str, source_index: usize) {
        let order = self.next_order;
        self.next_order += 1;
        let candidate = Observation {
            frequency,
            source: source.to_string(),
            source_index,
            order,
        };
        match self.best.entry(word) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get();
                if frequency > current.frequency
                    || (frequency == current.frequency && order < current.order)
                {
                    slot.insert(candidate);
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    fn finish(self) -> Vec<DictionaryEntry> {
        let mut entries: Vec<DictionaryEntry> = self
            .best
            .into_iter()
            .map(|(word, observation)| DictionaryEntry {
                word,
                frequency: observation.frequency,
                source: observation.source,
                source_index: observation.source_index,
                order: observation.order,
                rank: 0,
                stratum: Stratum::Tail,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.frequency
                .total_cmp(&a.frequency)
                .then_with(|| a.order.cmp(&b.order))
        });
        for (rank, entry) in entries.iter_mut().enumerate() {
            entry.rank = rank;
        }
        assign_strata(entries)
    }
}
