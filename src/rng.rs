use crate::constants::sampler::ZERO_SEED_REPLACEMENT;

/// 32-bit xorshift generator driving every randomized sampler decision.
///
/// Identical seeds and call sequences reproduce identical output, which is
/// what makes seeded word streams replayable in tests.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator; a zero seed is replaced with a fixed non-zero constant.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    fn step(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value in `[0, 1)`.
    pub fn draw(&mut self) -> f64 {
        f64::from(self.step()) / 4_294_967_296.0
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() called with empty range");
        ((self.draw() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }

    /// In-place Fisher–Yates shuffle on the same draw stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl rand::RngCore for Xorshift32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.step());
        let low = u64::from(self.step());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn first_outputs_match_reference_xorshift() {
        let mut rng = Xorshift32::new(1);
        assert_eq!(rng.next_u32(), 270_369);
        assert_eq!(rng.next_u32(), 67_634_689);
        assert_eq!(rng.next_u32(), 2_647_435_461);
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut zero = Xorshift32::new(0);
        let mut replaced = Xorshift32::new(ZERO_SEED_REPLACEMENT);
        for _ in 0..16 {
            let value = zero.draw();
            assert_eq!(value, replaced.draw());
        }
        assert_ne!(Xorshift32::new(0).next_u32(), 0);
    }

    #[test]
    fn draws_stay_in_unit_interval_and_repeat_per_seed() {
        let mut a = Xorshift32::new(987_654);
        let mut b = Xorshift32::new(987_654);
        for _ in 0..10_000 {
            let value = a.draw();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, b.draw());
        }
    }

    #[test]
    fn shuffle_is_a_deterministic_permutation() {
        let mut items: Vec<usize> = (0..50).collect();
        let mut copy = items.clone();
        Xorshift32::new(42).shuffle(&mut items);
        Xorshift32::new(42).shuffle(&mut copy);
        assert_eq!(items, copy);
        assert_ne!(items, (0..50).collect::<Vec<_>>());
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_short_slices() {
        let mut rng = Xorshift32::new(7);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut single = [9];
        rng.shuffle(&mut single);
        assert_eq!(single, [9]);
    }

    #[test]
    fn fill_bytes_is_stable() {
        let mut bytes_a = [0u8; 13];
        let mut bytes_b = [0u8; 13];
        Xorshift32::new(999).fill_bytes(&mut bytes_a);
        Xorshift32::new(999).fill_bytes(&mut bytes_b);
        assert_eq!(bytes_a, bytes_b);
        assert!(bytes_a.iter().any(|b| *b != 0));
    }
}
