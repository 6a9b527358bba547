/// Constants used by token normalization.
pub mod normalize {
    /// Maximum accepted token length, in characters.
    pub const MAX_WORD_CHARS: usize = 24;
    /// Separators allowed between two letter runs of a token.
    pub const WORD_SEPARATORS: [char; 4] = ['\'', '\u{2019}', '\u{02BC}', '-'];
}

/// Constants used by rank-percentile stratification.
pub mod strata {
    /// Fraction of ranks assigned to the head stratum (at least one rank).
    pub const HEAD_FRACTION: f64 = 0.05;
    /// Cumulative fraction of ranks covered by head and mid together.
    pub const MID_FRACTION: f64 = 0.40;
}

/// Constants used by the word sampler.
pub mod sampler {
    use crate::data::Stratum;

    /// Default anti-repeat window when none is configured.
    pub const DEFAULT_WINDOW_SIZE: usize = 200;
    /// Upper clamp for the anti-repeat window.
    pub const MAX_WINDOW_SIZE: usize = 2000;
    /// Lower bound on admissible-draw attempts per call.
    pub const MIN_DRAW_ATTEMPTS: usize = 10;
    /// Replacement for a zero xorshift seed (the all-zero state is a fixed point).
    pub const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;
    /// Source key used when an entry carries no source.
    pub const DEFAULT_SOURCE_KEY: &str = "default";
    /// Stratum weights walked in order when rolling for a stratum.
    pub const STRATUM_WEIGHTS: [(Stratum, f64); 3] = [
        (Stratum::Head, 0.6),
        (Stratum::Mid, 0.3),
        (Stratum::Tail, 0.1),
    ];
    /// Priority used for the weighted-roll fallback and the unconditional draw.
    pub const STRATUM_PRIORITY: [Stratum; 3] = [Stratum::Head, Stratum::Mid, Stratum::Tail];
}

/// Constants used by the batch wrapper.
pub mod batch {
    /// Largest batch returned by a single `next_batch` call.
    pub const MAX_BATCH_SIZE: usize = 3;
}

/// Constants used by source resolution and transports.
pub mod sources {
    /// Default Russian frequency list.
    pub const RU_DEFAULT_SOURCE: &str =
        "https://raw.githubusercontent.com/hermitdave/FrequencyWords/master/content/2016/ru/ru_50k.txt";
    /// Default Ukrainian frequency list.
    pub const UK_DEFAULT_SOURCE: &str =
        "https://raw.githubusercontent.com/hermitdave/FrequencyWords/master/content/2016/uk/uk_50k.txt";
    /// Prefix stripped from file sources.
    pub const FILE_SCHEME: &str = "file://";
    /// Default HTTP transport timeout in seconds.
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}
