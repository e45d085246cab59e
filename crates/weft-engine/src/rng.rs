use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random stream behind the `random`, `randomseed` and `choose`
/// builtins.
///
/// Injectable so embedders and tests control the sequence. The default
/// implementation is a ChaCha stream seeded from entropy at construction;
/// `randomseed` makes the stream deterministic from that point on.
pub trait RandomSource {
    /// Reset the stream from a seed.
    fn seed(&mut self, seed: u64);

    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`. Callers ensure `lo <= hi`.
    fn next_range(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform index in `0..len`. Callers ensure `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Default [`RandomSource`] over a ChaCha stream.
pub struct ChaChaSource(ChaCha8Rng);

impl Default for ChaChaSource {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RandomSource for ChaChaSource {
    fn seed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }

    fn next_f64(&mut self) -> f64 {
        self.0.gen()
    }

    fn next_range(&mut self, lo: i64, hi: i64) -> i64 {
        self.0.gen_range(lo..=hi)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_makes_the_stream_deterministic() {
        let mut a = ChaChaSource::default();
        let mut b = ChaChaSource::default();
        a.seed(7);
        b.seed(7);
        for _ in 0..8 {
            assert_eq!(a.next_range(1, 100), b.next_range(1, 100));
        }
        let f = a.next_f64();
        assert!((0.0..1.0).contains(&f));
    }
}
