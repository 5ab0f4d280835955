use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

pub fn rng_from_seed(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn repeat_seed(seed: u64, i: usize) -> u64 {
    seed.wrapping_add(i as u64)
}
