use crate::constants::strata::{HEAD_FRACTION, MID_FRACTION};
use crate::data::{DictionaryEntry, Stratum};

/// Rank boundaries for a lexicon of a given size.
///
/// Positions `0..head_end` are head, `head_end..mid_end` are mid, the rest tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StratumBounds {
    pub head_end: usize,
    pub mid_end: usize,
    pub len: usize,
}

impl StratumBounds {
    /// Compute boundaries for `len` ranked entries.
    pub fn for_len(len: usize) -> Self {
        if len == 0 {
            return Self {
                head_end: 0,
                mid_end: 0,
                len,
            };
        }
        let head_end = ((len as f64 * HEAD_FRACTION).floor() as usize).max(1);
        let mid_end = ((len as f64 * MID_FRACTION).floor() as usize).max(head_end);
        Self {
            head_end,
            mid_end,
            len,
        }
    }

    /// Stratum for the entry at sorted position `position`.
    pub fn stratum_at(&self, position: usize) -> Stratum {
        if position < self.head_end {
            Stratum::Head
        } else if position < self.mid_end {
            Stratum::Mid
        } else {
            Stratum::Tail
        }
    }
}

/// Annotate a rank-sorted list with strata. Empty input is returned unchanged.
pub fn assign_strata(mut entries: Vec<DictionaryEntry>) -> Vec<DictionaryEntry> {
    let bounds = StratumBounds::for_len(entries.len());
    for (position, entry) in entries.iter_mut().enumerate() {
        entry.stratum = bounds.stratum_at(position);
    }
    entries
}
