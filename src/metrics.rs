use std::collections::HashMap;

use crate::data::{DictionaryEntry, Stratum};
use crate::types::SourceId;

/// Draw counts per stratum for a sampled word sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StratumShares {
    pub head: usize,
    pub mid: usize,
    pub tail: usize,
    /// Draws whose word is not in the lexicon.
    pub unknown: usize,
}

impl StratumShares {
    /// All counted draws, unknown included.
    pub fn total(&self) -> usize {
        self.head + self.mid + self.tail + self.unknown
    }

    /// Draw count for `stratum`.
    pub fn count(&self, stratum: Stratum) -> usize {
        match stratum {
            Stratum::Head => self.head,
            Stratum::Mid => self.mid,
            Stratum::Tail => self.tail,
        }
    }

    /// Fraction of all draws that landed in `stratum`.
    pub fn share(&self, stratum: Stratum) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(stratum) as f64 / total as f64
        }
    }
}

/// Tally sampled `words` by the stratum their lexicon entry carries.
pub fn stratum_shares<W: AsRef<str>>(words: &[W], entries: &[DictionaryEntry]) -> StratumShares {
    let lookup: HashMap<&str, Stratum> = entries
        .iter()
        .map(|entry| (entry.word.as_str(), entry.stratum))
        .collect();
    let mut shares = StratumShares::default();
    for word in words {
        match lookup.get(word.as_ref()) {
            Some(Stratum::Head) => shares.head += 1,
            Some(Stratum::Mid) => shares.mid += 1,
            Some(Stratum::Tail) => shares.tail += 1,
            None => shares.unknown += 1,
        }
    }
    shares
}

/// Count sampled `words` per winning source.
pub fn source_counts<W: AsRef<str>>(
    words: &[W],
    entries: &[DictionaryEntry],
) -> HashMap<SourceId, usize> {
    let lookup: HashMap<&str, &str> = entries
        .iter()
        .map(|entry| (entry.word.as_str(), entry.source.as_str()))
        .collect();
    let mut counts = HashMap::new();
    for word in words {
        if let Some(source) = lookup.get(word.as_ref()) {
            *counts.entry((*source).to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Aggregate skew metrics for per-source draw counts.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceSkew {
    pub total: usize,
    pub sources: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub max_share: f64,
    pub ratio: f64,
    pub per_source: Vec<SourceShare>,
}

/// One source's share of the draws.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceShare {
    pub source: SourceId,
    pub count: usize,
    pub share: f64,
}

/// Compute skew metrics from per-source counts; `None` when there are none.
pub fn source_skew(counts: &HashMap<SourceId, usize>) -> Option<SourceSkew> {
    let min = *counts.values().min()?;
    let max = *counts.values().max()?;
    let total: usize = counts.values().sum();
    let sources = counts.len();
    let share_of = |count: usize| {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    };
    let ratio = if min == 0 {
        f64::INFINITY
    } else {
        max as f64 / min as f64
    };
    let mut per_source: Vec<SourceShare> = counts
        .iter()
        .map(|(source, count)| SourceShare {
            source: source.clone(),
            count: *count,
            share: share_of(*count),
        })
        .collect();
    per_source.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    Some(SourceSkew {
        total,
        sources,
        min,
        max,
        mean: total as f64 / sources as f64,
        max_share: share_of(max),
        ratio,
        per_source,
    })
}
