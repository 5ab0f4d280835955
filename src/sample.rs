use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::error::AssignError;

pub const LEGACY_PASSES: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    #[default]
    Shuffle,
    LegacyPasses(u32),
}

pub fn sample<T, R>(
    items: &[T],
    k: usize,
    mode: SampleMode,
    rng: &mut R,
) -> Result<Vec<T>, AssignError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if k > items.len() {
        return Err(AssignError::invalid(format!(
            "cannot sample {} of {} items",
            k,
            items.len()
        )));
    }
    if k == 0 {
        return Ok(Vec::new());
    }

    let mut work = items.to_vec();
    match mode {
        SampleMode::Shuffle => {
            let (picked, _) = work.partial_shuffle(rng, k);
            Ok(picked.to_vec())
        }
        SampleMode::LegacyPasses(passes) => {
            swap_passes(&mut work, passes, rng);
            work.truncate(k);
            Ok(work)
        }
    }
}

pub fn scramble<T, R>(items: &mut [T], mode: SampleMode, rng: &mut R)
where
    R: Rng + ?Sized,
{
    match mode {
        SampleMode::Shuffle => items.shuffle(rng),
        SampleMode::LegacyPasses(passes) => swap_passes(items, passes, rng),
    }
}

pub fn pick_one<T, R>(items: &[T], rng: &mut R) -> Result<T, AssignError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    items
        .choose(rng)
        .cloned()
        .ok_or_else(|| AssignError::invalid("cannot pick from an empty collection"))
}

// Biased swap sweeps; output for a given seed must not change.
fn swap_passes<T, R>(items: &mut [T], passes: u32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    for _ in 0..passes {
        for i in 0..len {
            let j = rng.random_range(0..len);
            items.swap(i, j);
        }
    }
}
