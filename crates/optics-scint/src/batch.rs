// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Parallel Step Batches
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Rayon driver for many transport steps sharing one parameter table.
//!
//! Each step draws from its own `StdRng`, seeded from the batch seed and the
//! step index, so output depends only on `(seed, steps)` and not on how
//! rayon schedules work across threads.

use crate::params::PrecomputedScintParams;
use crate::step::{scintillate, TransportStep};
use ndarray::Array2;
use optics_types::config::EmissionTerm;
use optics_types::error::OpticsResult;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// SplitMix64 finalizer over `seed + index * golden gamma`.
fn step_seed(seed: u64, index: usize) -> u64 {
    let gamma = (index as u64).wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let mut z = seed.wrapping_add(gamma);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Random stream used for step `index` of a batch seeded with `seed`.
pub fn step_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(step_seed(seed, index))
}

/// Generate photons for every step in parallel.
///
/// Returns one `(n_i, 4)` batch per step, in step order. Step `i` yields the
/// same rows as calling [`scintillate`] with [`step_rng`]`(seed, i)`.
pub fn scintillate_steps(
    params: &PrecomputedScintParams,
    steps: &[TransportStep],
    seed: u64,
    emission_term: EmissionTerm,
) -> OpticsResult<Vec<Array2<f64>>> {
    steps
        .par_iter()
        .enumerate()
        .map(|(i, step)| {
            let mut rng = step_rng(seed, i);
            scintillate(params, step, &mut rng, emission_term)
        })
        .collect()
}

/// Total number of photons across step batches.
pub fn total_photons(batches: &[Array2<f64>]) -> usize {
    batches.iter().map(|b| b.nrows()).sum()
}
