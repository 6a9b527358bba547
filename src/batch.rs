use crate::constants::batch::MAX_BATCH_SIZE;
use crate::errors::LexiconError;
use crate::sampler::WordSource;
use crate::types::Word;

/// Pulls small, bounded batches from a [`WordSource`].
pub struct BatchSampler<S: WordSource> {
    source: S,
}

impl<S: WordSource> BatchSampler<S> {
    /// Wrap `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Draw `requested` words, clamped to `1..=3` (zero means one).
    ///
    /// Words come back in draw order; the first source error aborts the batch.
    pub fn next_batch(&mut self, requested: usize) -> Result<Vec<Word>, LexiconError> {
        let size = requested.clamp(1, MAX_BATCH_SIZE);
        let mut batch = Vec::with_capacity(size);
        for _ in 0..size {
            batch.push(self.source.next_word()?);
        }
        Ok(batch)
    }

    /// Borrow the wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unwrap into the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_source() -> impl FnMut() -> Result<Word, LexiconError> {
        let mut counter = 0;
        move || {
            let word = format!("w{counter}");
            counter += 1;
            Ok(word)
        }
    }

    #[test]
    fn batches_are_clamped_and_ordered() {
        let mut batches = BatchSampler::new(counting_source());
        assert_eq!(batches.next_batch(2).unwrap(), vec!["w0", "w1"]);
        assert_eq!(batches.next_batch(5).unwrap(), vec!["w2", "w3", "w4"]);
        assert_eq!(batches.next_batch(0).unwrap(), vec!["w5"]);
        assert_eq!(batches.next_batch(1).unwrap(), vec!["w6"]);
    }

    #[test]
    fn batch_size_stays_within_bounds() {
        let mut batches = BatchSampler::new(counting_source());
        for requested in [0usize, 1, 2, 3, 4, 17, usize::MAX] {
            let len = batches.next_batch(requested).unwrap().len();
            assert!((1..=3).contains(&len), "requested {requested} got {len}");
        }
    }

    #[test]
    fn source_errors_propagate() {
        let mut calls = 0;
        let mut batches = BatchSampler::new(move || -> Result<Word, LexiconError> {
            calls += 1;
            if calls == 2 {
                Err(LexiconError::SamplerExhausted)
            } else {
                Ok("слово".to_string())
            }
        });
        assert!(matches!(
            batches.next_batch(3),
            Err(LexiconError::SamplerExhausted)
        ));
    }
}
