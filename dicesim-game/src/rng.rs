//! Random streams for trials.
//!
//! Every trial draws from its own ChaCha stream keyed by the run seed and the
//! trial index, so a trial's dice never depend on which worker ran it.
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic stream for `trial_index` within a run seeded by `seed`.
#[must_use]
pub fn trial_rng(seed: u64, trial_index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial_index);
    rng
}

/// Fresh run seed from the thread-local entropy source.
#[must_use]
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl<R: rand::RngCore> CountingRng<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}
