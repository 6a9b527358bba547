use std::collections::HashSet;

use wordflux::metrics::{source_counts, stratum_shares};
use wordflux::{
    BatchSampler, DictionaryEntry, LexiconError, SamplerConfig, SamplerEntry, Stratum,
    WordSampler, Word, assign_strata,
};

fn banded_entries() -> Vec<SamplerEntry> {
    let bands = [
        (Stratum::Head, "head", 60, 1000.0),
        (Stratum::Mid, "mid", 30, 500.0),
        (Stratum::Tail, "tail", 10, 100.0),
    ];
    let mut entries = Vec::new();
    for (stratum, prefix, count, top) in bands {
        for i in 0..count {
            let rank = entries.len();
            entries.push(
                SamplerEntry::new(format!("{prefix}-{i}"))
                    .with_frequency(top - i as f64)
                    .with_rank(rank)
                    .with_source(if i % 2 == 0 { "A" } else { "B" })
                    .with_stratum(stratum),
            );
        }
    }
    entries
}

fn ranked_lexicon(len: usize) -> Vec<DictionaryEntry> {
    let entries = (0..len)
        .map(|i| DictionaryEntry {
            word: format!("w{i}"),
            frequency: (len - i) as f64,
            source: "list".into(),
            source_index: 0,
            order: i as u64,
            rank: i,
            stratum: Stratum::Tail,
        })
        .collect();
    assign_strata(entries)
}

fn assert_no_repeats(words: &[Word], window: usize) {
    for (start, slice) in words.windows(window).enumerate() {
        let unique: HashSet<&Word> = slice.iter().collect();
        assert_eq!(unique.len(), window, "repeat inside window starting at {start}");
    }
}

#[test]
fn banded_lexicon_keeps_weights_and_window() {
    let config = SamplerConfig::seeded(12345).with_window_size(40);
    let mut sampler = WordSampler::new(banded_entries(), config).unwrap();
    let words: Vec<Word> = (0..1200).map(|_| sampler.next_word().unwrap()).collect();
    assert_no_repeats(&words, 40);

    let count = |prefix: &str| {
        words.iter().filter(|w| w.starts_with(prefix)).count() as f64 / words.len() as f64
    };
    let (head, mid, tail) = (count("head-"), count("mid-"), count("tail-"));
    assert!(head > 0.5 && head < 0.7, "head share {head}");
    assert!(mid > 0.2 && mid < 0.4, "mid share {mid}");
    assert!(tail > 0.05 && tail < 0.2, "tail share {tail}");
    assert!(head > mid && mid > tail);
}

#[test]
fn both_sources_are_visited_in_every_stratum() {
    let entries = banded_entries();
    let lexicon: Vec<DictionaryEntry> = entries
        .iter()
        .map(|entry| DictionaryEntry {
            word: entry.word.clone(),
            frequency: entry.frequency,
            source: entry.source.clone().unwrap_or_default(),
            source_index: 0,
            order: entry.rank.unwrap_or_default() as u64,
            rank: entry.rank.unwrap_or_default(),
            stratum: entry.stratum.unwrap_or(Stratum::Tail),
        })
        .collect();
    let sampler = WordSampler::new(entries, SamplerConfig::seeded(3).with_window_size(40)).unwrap();
    let words: Vec<Word> = sampler.take(900).collect();

    let counts = source_counts(&words, &lexicon);
    let (a, b) = (counts["A"] as f64, counts["B"] as f64);
    assert!(a / (a + b) > 0.35 && a / (a + b) < 0.65, "source split {a}/{b}");
    let shares = stratum_shares(&words, &lexicon);
    assert_eq!(shares.unknown, 0);
    assert!(shares.tail > 0);
}

#[test]
fn identical_seeds_replay_identical_streams() {
    let lexicon = ranked_lexicon(300);
    let config = SamplerConfig::seeded(2024).with_window_size(25);
    let first: Vec<Word> = WordSampler::new(&lexicon, config.clone()).unwrap().take(500).collect();
    let second: Vec<Word> = WordSampler::new(&lexicon, config).unwrap().take(500).collect();
    assert_eq!(first, second);

    let other: Vec<Word> = WordSampler::new(&lexicon, SamplerConfig::seeded(2025).with_window_size(25))
        .unwrap()
        .take(500)
        .collect();
    assert_ne!(first, other);
}

#[test]
fn all_tail_lexicon_only_returns_tail_words() {
    let entries: Vec<SamplerEntry> = (0..100)
        .map(|i| {
            SamplerEntry::new(format!("t{i}"))
                .with_frequency(1.0)
                .with_rank(i)
                .with_stratum(Stratum::Tail)
        })
        .collect();
    let mut sampler = WordSampler::new(entries, SamplerConfig::seeded(5)).unwrap();
    assert_eq!(sampler.stratum_len(Stratum::Tail), 100);
    assert_eq!(sampler.stratum_len(Stratum::Head), 0);
    for _ in 0..500 {
        let word = sampler.next_word().unwrap();
        assert!(word.starts_with('t'));
    }
}

#[test]
fn window_holds_while_vocabulary_is_large_enough() {
    let entries: Vec<SamplerEntry> = (0..50)
        .map(|i| SamplerEntry::new(format!("w{i}")).with_frequency(100.0 - i as f64))
        .collect();
    for seed in [1, 5, 12345] {
        let config = SamplerConfig::seeded(seed).with_window_size(20);
        let mut sampler = WordSampler::new(entries.clone(), config).unwrap();
        let words: Vec<Word> = (0..1000).map(|_| sampler.next_word().unwrap()).collect();
        assert_no_repeats(&words, 21);
    }
}

#[test]
fn small_vocabulary_allows_repeats_once_exhausted() {
    let entries: Vec<SamplerEntry> = ["один", "два", "три", "четыре", "пять"]
        .into_iter()
        .map(SamplerEntry::new)
        .collect();
    let mut sampler = WordSampler::new(entries, SamplerConfig::seeded(3).with_window_size(40)).unwrap();
    let words: Vec<Word> = (0..12).map(|_| sampler.next_word().unwrap()).collect();
    let first_five: HashSet<&Word> = words[..5].iter().collect();
    assert_eq!(first_five.len(), 5);
    assert_eq!(sampler.vocabulary_len(), 5);
    assert!(sampler.history().count() <= 40);
}

#[test]
fn batches_are_bounded_and_ordered() {
    let mut counter = 0;
    let source = move || -> Result<Word, LexiconError> {
        let word = format!("w{counter}");
        counter += 1;
        Ok(word)
    };
    let mut batches = BatchSampler::new(source);
    assert_eq!(batches.next_batch(2).unwrap(), vec!["w0", "w1"]);
    assert_eq!(batches.next_batch(5).unwrap(), vec!["w2", "w3", "w4"]);
    assert_eq!(batches.next_batch(0).unwrap(), vec!["w5"]);

    let sampler = WordSampler::new(&ranked_lexicon(40), SamplerConfig::seeded(9)).unwrap();
    let mut batches = BatchSampler::new(sampler);
    for requested in 0..10 {
        let batch = batches.next_batch(requested).unwrap();
        assert!((1..=3).contains(&batch.len()));
    }
}

#[test]
fn empty_or_blank_input_is_rejected() {
    let none: Vec<SamplerEntry> = Vec::new();
    assert!(matches!(
        WordSampler::new(none, SamplerConfig::default()),
        Err(LexiconError::SamplerConstruction(_))
    ));
    let blank = vec![SamplerEntry::new("  "), SamplerEntry::new("")];
    assert!(matches!(
        WordSampler::new(blank, SamplerConfig::default()),
        Err(LexiconError::SamplerConstruction(_))
    ));
}

#[test]
fn exhausted_search_falls_back_to_an_unconditional_draw() {
    let entries: Vec<SamplerEntry> = (0..21)
        .map(|i| SamplerEntry::new(format!("w{i}")).with_frequency(100.0 - i as f64))
        .collect();
    let vocabulary: HashSet<String> = entries.iter().map(|e| e.word.clone()).collect();
    for seed in [1, 2, 3, 7, 42] {
        let config = SamplerConfig::seeded(seed).with_window_size(20);
        let mut sampler = WordSampler::new(entries.clone(), config).unwrap();
        let mut words = Vec::new();
        for _ in 0..400 {
            let word = sampler.next_word().unwrap();
            assert!(vocabulary.contains(&word));
            assert!(sampler.history().count() <= 20);
            words.push(word);
        }
        // A window one larger than the history can only repeat through the
        // unconditional draw, since 20 recent words never cover all 21.
        let repeated = words
            .windows(21)
            .filter(|slice| slice.iter().collect::<HashSet<_>>().len() < 21)
            .count();
        assert!(repeated > 0, "seed {seed} never fell back");
    }
}
