use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use tracing::debug;

use crate::config::SamplerConfig;
use crate::constants::sampler::{MIN_DRAW_ATTEMPTS, STRATUM_PRIORITY, STRATUM_WEIGHTS};
use crate::data::{SamplerEntry, Stratum, finite_or_zero};
use crate::errors::LexiconError;
use crate::rng::Xorshift32;
use crate::strata::StratumBounds;
use crate::types::{SourceId, Word};

/// Anything that yields one word per call.
///
/// Implemented by [`WordSampler`] and by any `FnMut() -> Result<Word, _>`
/// closure, so batch wrappers can sit on top of either.
pub trait WordSource {
    /// Produce the next word.
    fn next_word(&mut self) -> Result<Word, LexiconError>;
}

impl<F> WordSource for F
where
    F: FnMut() -> Result<Word, LexiconError>,
{
    fn next_word(&mut self) -> Result<Word, LexiconError> {
        self()
    }
}

/// Per-stratum word pools grouped by source and visited round-robin.
#[derive(Debug)]
pub(crate) struct StratumPool {
    /// Words per source, shuffled once at build time.
    groups: IndexMap<SourceId, Vec<Word>>,
    /// Visiting order over `groups` indices.
    cycle: Vec<usize>,
    /// Next position in `cycle`.
    cursor: usize,
    /// Total words across all groups.
    size: usize,
}

impl StratumPool {
    pub(crate) fn build<'a, I>(entries: I, rng: &mut Xorshift32) -> Self
    where
        I: IntoIterator<Item = &'a SamplerEntry>,
    {
        let mut groups: IndexMap<SourceId, Vec<Word>> = IndexMap::new();
        let mut size = 0;
        for entry in entries {
            groups
                .entry(entry.source_key().to_string())
                .or_default()
                .push(entry.word.clone());
            size += 1;
        }
        for words in groups.values_mut() {
            rng.shuffle(words);
        }
        let mut cycle: Vec<usize> = (0..groups.len()).collect();
        if cycle.len() > 1 {
            rng.shuffle(&mut cycle);
        }
        Self {
            groups,
            cycle,
            cursor: 0,
            size,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.size
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Advance the source cycle and pick a uniform word from that source.
    ///
    /// Reshuffles the cycle on every wraparound. Gives up after one full
    /// cycle of empty sources.
    pub(crate) fn draw(&mut self, rng: &mut Xorshift32) -> Option<Word> {
        let attempts = self.cycle.len();
        for _ in 0..attempts {
            if self.cursor >= self.cycle.len() {
                self.cursor = 0;
                if self.cycle.len() > 1 {
                    rng.shuffle(&mut self.cycle);
                }
            }
            let group = self.cycle[self.cursor];
            self.cursor += 1;
            let Some((_, words)) = self.groups.get_index(group) else {
                continue;
            };
            if words.is_empty() {
                continue;
            }
            return Some(words[rng.index(words.len())].clone());
        }
        None
    }
}

/// Stateful, seeded word generator over a stratified lexicon.
///
/// Each call rolls a stratum by weight (head 0.6, mid 0.3, tail 0.1), draws
/// from that stratum's source round-robin, and rejects words still inside
/// the anti-repeat window. Not meant for concurrent use; wrap in a `Mutex`
/// to share.
#[derive(Debug)]
pub struct WordSampler {
    rng: Xorshift32,
    seed: u64,
    window_size: usize,
    /// Pools indexed by `pool_slot`.
    pools: [StratumPool; 3],
    /// Distinct words across all pools.
    vocabulary: usize,
    history: VecDeque<Word>,
    recent: HashSet<Word>,
}

fn pool_slot(stratum: Stratum) -> usize {
    match stratum {
        Stratum::Head => 0,
        Stratum::Mid => 1,
        Stratum::Tail => 2,
    }
}

impl WordSampler {
    /// Build a sampler over `entries`.
    ///
    /// Entries are re-sorted by frequency (rank breaks ties) and re-stratified
    /// when any stratum is missing or strata are out of rank order.
    pub fn new<I, E>(entries: I, config: SamplerConfig) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = E>,
        E: Into<SamplerEntry>,
    {
        let mut prepared: Vec<SamplerEntry> = Vec::new();
        let mut provided = 0usize;
        for (idx, entry) in entries.into_iter().enumerate() {
            provided += 1;
            let mut entry: SamplerEntry = entry.into();
            if entry.word.trim().is_empty() {
                continue;
            }
            entry.frequency = finite_or_zero(entry.frequency);
            entry.rank = Some(entry.rank.unwrap_or(idx));
            prepared.push(entry);
        }
        if provided == 0 {
            return Err(LexiconError::SamplerConstruction(
                "word list must be non-empty".into(),
            ));
        }
        if prepared.is_empty() {
            return Err(LexiconError::SamplerConstruction(
                "no usable words provided".into(),
            ));
        }

        prepared.sort_by(|a, b| {
            b.frequency
                .total_cmp(&a.frequency)
                .then_with(|| a.rank.cmp(&b.rank))
        });
        if needs_restratify(&prepared) {
            let bounds = StratumBounds::for_len(prepared.len());
            for (position, entry) in prepared.iter_mut().enumerate() {
                entry.stratum = Some(bounds.stratum_at(position));
            }
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let window_size = config.effective_window_size();
        let mut rng = Xorshift32::new(seed as u32);
        let pools = [Stratum::Head, Stratum::Mid, Stratum::Tail].map(|stratum| {
            StratumPool::build(
                prepared
                    .iter()
                    .filter(|entry| entry.stratum == Some(stratum)),
                &mut rng,
            )
        });
        let vocabulary = prepared
            .iter()
            .map(|entry| entry.word.as_str())
            .collect::<HashSet<_>>()
            .len();

        debug!(
            seed,
            window_size,
            vocabulary,
            head = pools[0].len(),
            mid = pools[1].len(),
            tail = pools[2].len(),
            "word sampler ready"
        );
        Ok(Self {
            rng,
            seed,
            window_size,
            pools,
            vocabulary,
            history: VecDeque::with_capacity(window_size + 1),
            recent: HashSet::with_capacity(window_size + 1),
        })
    }

    /// Seed in effect (useful when the config left it unset).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Anti-repeat window after clamping.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Distinct words the sampler can emit.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary
    }

    /// Number of entries assigned to `stratum`.
    pub fn stratum_len(&self, stratum: Stratum) -> usize {
        self.pools[pool_slot(stratum)].len()
    }

    /// Recently emitted words, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Draw the next word.
    ///
    /// Falls back to an unconditional draw when no admissible word turns up
    /// within `max(10, window_size)` attempts.
    pub fn next_word(&mut self) -> Result<Word, LexiconError> {
        if self.pools.iter().all(StratumPool::is_empty) {
            return Err(LexiconError::SamplerExhausted);
        }
        let attempts = self.window_size.max(MIN_DRAW_ATTEMPTS);
        for _ in 0..attempts {
            let Some(first) = self.choose_stratum() else {
                break;
            };
            for stratum in first.fallback_order() {
                let pool = &mut self.pools[pool_slot(stratum)];
                if pool.is_empty() {
                    continue;
                }
                let Some(candidate) = pool.draw(&mut self.rng) else {
                    continue;
                };
                if self.admits(&candidate) {
                    self.record(candidate.clone());
                    return Ok(candidate);
                }
            }
        }

        debug!(
            window_size = self.window_size,
            attempts, "no unseen word found; drawing without the repeat filter"
        );
        for stratum in STRATUM_PRIORITY {
            let pool = &mut self.pools[pool_slot(stratum)];
            if pool.is_empty() {
                continue;
            }
            if let Some(candidate) = pool.draw(&mut self.rng) {
                self.record(candidate.clone());
                return Ok(candidate);
            }
        }
        Err(LexiconError::SamplerExhausted)
    }

    /// Weighted roll; a stratum with no words passes the roll on to the next.
    fn choose_stratum(&mut self) -> Option<Stratum> {
        let roll = self.rng.draw();
        let mut cumulative = 0.0;
        for (stratum, weight) in STRATUM_WEIGHTS {
            cumulative += weight;
            if roll < cumulative && !self.pools[pool_slot(stratum)].is_empty() {
                return Some(stratum);
            }
        }
        STRATUM_PRIORITY
            .into_iter()
            .find(|stratum| !self.pools[pool_slot(*stratum)].is_empty())
    }

    fn admits(&self, word: &str) -> bool {
        !self.recent.contains(word) || self.recent.len() >= self.vocabulary
    }

    fn record(&mut self, word: Word) {
        self.recent.insert(word.clone());
        self.history.push_back(word);
        if self.history.len() > self.window_size {
            if let Some(evicted) = self.history.pop_front() {
                self.recent.remove(&evicted);
            }
        }
    }
}

impl WordSource for WordSampler {
    fn next_word(&mut self) -> Result<Word, LexiconError> {
        WordSampler::next_word(self)
    }
}

/// Endless word stream; ends only if the sampler reports exhaustion.
impl Iterator for WordSampler {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        self.next_word().ok()
    }
}

/// True when strata are missing or not monotone along the sorted order.
fn needs_restratify(sorted: &[SamplerEntry]) -> bool {
    let mut previous = Stratum::Head;
    for entry in sorted {
        match entry.stratum {
            None => return true,
            Some(stratum) if stratum < previous => return true,
            Some(stratum) => previous = stratum,
        }
    }
    false
}
