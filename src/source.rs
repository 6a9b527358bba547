//! Supported languages and the built-in wordlist table.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;

use crate::constants::sources::{RU_DEFAULT_SOURCE, UK_DEFAULT_SOURCE};
use crate::errors::LexiconError;
use crate::types::SourceId;

/// Languages the loader can build a lexicon for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    /// `ru`
    Russian,
    /// `uk`
    Ukrainian,
}

impl Language {
    /// All supported languages, in table order.
    pub const ALL: [Language; 2] = [Language::Russian, Language::Ukrainian];

    /// Two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::Ukrainian => "uk",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LexiconError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .ok_or_else(|| LexiconError::Configuration(format!("unsupported language \"{code}\"")))
    }
}

/// Read-only mapping from language to its default wordlist sources.
#[derive(Debug)]
pub struct SourceTable {
    entries: &'static [(Language, &'static [&'static str])],
}

/// Built-in default sources.
pub static DEFAULT_SOURCES: SourceTable = SourceTable {
    entries: &[
        (Language::Russian, &[RU_DEFAULT_SOURCE]),
        (Language::Ukrainian, &[UK_DEFAULT_SOURCE]),
    ],
};

impl SourceTable {
    /// Default sources for `language` (empty if the table has none).
    pub fn sources_for(&self, language: Language) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == language)
            .map(|(_, sources)| *sources)
            .unwrap_or(&[])
    }
}

/// Union of `defaults` and `extra`, de-duplicated, defaults first.
///
/// Blank extra sources are ignored. Fails when the result is empty.
pub fn resolve_sources<S: AsRef<str>>(
    language: Language,
    defaults: &[&str],
    extra: &[S],
) -> Result<Vec<SourceId>, LexiconError> {
    let mut unique: IndexSet<&str> = IndexSet::new();
    unique.extend(defaults.iter().copied());
    unique.extend(
        extra
            .iter()
            .map(AsRef::as_ref)
            .filter(|source| !source.is_empty()),
    );
    if unique.is_empty() {
        return Err(LexiconError::Configuration(format!(
            "no dictionary sources provided for {language}"
        )));
    }
    Ok(unique.into_iter().map(str::to_string).collect())
}
