/// Normalized lexicon word.
/// Examples: `слово`, `п'ять`, `будь-який`
pub type Word = String;
/// Identifier for a wordlist source (URL, path, or opaque key).
/// Examples: `https://example.org/ru_50k.txt`, `lists/extra.txt`, `default`
pub type SourceId = String;
/// Two-letter language code as accepted by the loader.
/// Examples: `ru`, `uk`
pub type LanguageCode = String;
/// Warning/log message text.
/// Examples: `response not ok (status 404)`, `body is not valid UTF-8`
pub type LogMessage = String;
