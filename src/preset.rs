//! Preset lexicons: plain newline-delimited word lists.
//!
//! A preset holds one normalized word per line with no header and no
//! frequency column. Line order stands in for frequency rank.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::data::{DictionaryEntry, Stratum};
use crate::errors::LexiconError;
use crate::normalize::normalize_word;
use crate::strata::assign_strata;
use crate::types::SourceId;

/// Quality summary of a preset file's contents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetReport {
    /// Non-blank lines.
    pub words: usize,
    /// Lines repeating an earlier line case-insensitively.
    pub duplicates: usize,
    /// Lines containing an ASCII digit.
    pub with_digits: usize,
    /// Lines that fail normalization.
    pub rejected: usize,
}

impl PresetReport {
    /// True for a pre-filtered list: no duplicates, digits, or rejects.
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0 && self.with_digits == 0 && self.rejected == 0
    }
}

/// Count problems in a preset without building entries.
pub fn inspect_preset(text: &str) -> PresetReport {
    let mut report = PresetReport::default();
    let mut seen = HashSet::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        report.words += 1;
        if !seen.insert(line.to_lowercase()) {
            report.duplicates += 1;
        }
        if line.chars().any(|ch| ch.is_ascii_digit()) {
            report.with_digits += 1;
        }
        if normalize_word(line).is_none() {
            report.rejected += 1;
        }
    }
    report
}

/// Build ranked, stratified entries from preset text.
///
/// Rejected lines are skipped and repeated words keep their first position.
pub fn parse_preset(text: &str, source_id: &str) -> Result<Vec<DictionaryEntry>, LexiconError> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    for word in text.lines().filter_map(normalize_word) {
        if !seen.insert(word.clone()) {
            continue;
        }
        let position = entries.len();
        entries.push(DictionaryEntry {
            word,
            frequency: 0.0,
            source: SourceId::from(source_id),
            source_index: 0,
            order: position as u64,
            rank: position,
            stratum: Stratum::Tail,
        });
    }
    if entries.is_empty() {
        return Err(LexiconError::EmptyResult {
            language: source_id.to_string(),
            skipped: 0,
        });
    }
    Ok(assign_strata(entries))
}

/// Read and parse a preset file; the path becomes the entries' source.
pub fn load_preset_file(path: impl AsRef<Path>) -> Result<Vec<DictionaryEntry>, LexiconError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    parse_preset(&text, &path.display().to_string())
}
