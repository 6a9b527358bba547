use crate::constants::sampler::{DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE};

pub use crate::ingestion::LoaderOptions;
pub use crate::transport::FetchOptions;

/// Word sampler configuration.
#[derive(Clone, Debug, Default)]
pub struct SamplerConfig {
    /// RNG seed that controls the draw sequence; `None` picks a random seed.
    ///
    /// Only the low 32 bits feed the xorshift engine.
    pub seed: Option<u64>,
    /// Anti-repeat window; clamped to `1..=2000`, `None` means 200.
    pub window_size: Option<usize>,
}

impl SamplerConfig {
    /// Config with a fixed seed and the default window.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            window_size: None,
        }
    }

    /// Set the anti-repeat window.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = Some(window_size);
        self
    }

    /// Effective window after defaulting and clamping.
    pub fn effective_window_size(&self) -> usize {
        self.window_size
            .unwrap_or(DEFAULT_WINDOW_SIZE)
            .clamp(1, MAX_WINDOW_SIZE)
    }
}
