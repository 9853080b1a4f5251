use rand_chacha::rand_core::{RngCore, SeedableRng};

/// Deterministic tiny RNG for repeatable tests
pub struct TestRng {
    rng: rand_chacha::ChaCha8Rng,
}

impl TestRng {
    pub fn new() -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(0xdead_beef);
        Self { rng }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn gen_usize(&mut self, upper: usize) -> usize {
        (self.next_u64() as usize) % upper
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}
