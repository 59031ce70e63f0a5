// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Photon Sampling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Local part of scintillation: photon count and emission time offsets.
//!
//! Follows the Geant4 scintillation yield formula. Inputs on this path are
//! not validated; callers guarantee finite, non-negative energy deposits.

use crate::params::{ParticleIndex, PrecomputedScintParams, MAX_CHANNELS};
use ndarray::{s, Array1, ArrayView1, ArrayViewMut1};
use optics_types::config::EmissionTerm;
use optics_types::error::OpticsResult;
use rand::distributions::Open01;
use rand::Rng;
use rand_distr::{Distribution, Poisson, StandardNormal};

/// Mean photon count above which the Gaussian approximation is used.
const GAUSSIAN_MEAN_THRESHOLD: f64 = 10.0;

fn draw_photon_count<R: Rng + ?Sized>(
    mean: f64,
    fano_factor: f64,
    emission_term: EmissionTerm,
    rng: &mut R,
) -> usize {
    if mean > GAUSSIAN_MEAN_THRESHOLD && emission_term != EmissionTerm::Poisson {
        let sigma = (fano_factor * mean).sqrt();
        let z: f64 = rng.sample(StandardNormal);
        let n = (mean + sigma * z + 0.5).floor();
        return if n > 0.0 { n as usize } else { 0 };
    }
    // Poisson::new rejects a zero (or NaN) mean, which yields no photons.
    match Poisson::new(mean) {
        Ok(poisson) => {
            let n: f64 = poisson.sample(rng);
            n as usize
        }
        Err(_) => 0,
    }
}

/// Draw the number of photons emitted for `edep_kev` deposited by `particle`.
///
/// The mean is `flat_top * yield_factor * edep_kev`. Above a mean of 10 the
/// count is `round(N(mean, sqrt(fano * mean)))` unless `emission_term` forces
/// Poisson; otherwise it is drawn from `Poisson(mean)`. Negative draws clamp
/// to zero.
pub fn sample_photon_count<R: Rng + ?Sized>(
    params: &PrecomputedScintParams,
    particle: ParticleIndex,
    edep_kev: f64,
    rng: &mut R,
    emission_term: EmissionTerm,
) -> OpticsResult<usize> {
    let row = params.row(particle)?;
    let mean = params.flat_top_per_kev() * row[0] * edep_kev;
    Ok(draw_photon_count(mean, params.fano_factor(), emission_term, rng))
}

/// Split `num_photons` across decay channels by `fractions`.
///
/// Every channel but the last receives `floor(num_photons * fraction)`; the
/// last one takes the remainder, so the counts always sum to `num_photons`.
/// Entries beyond `fractions.len()` (at most [`MAX_CHANNELS`]) stay zero.
pub fn partition_photons(
    num_photons: usize,
    fractions: ArrayView1<'_, f64>,
) -> [usize; MAX_CHANNELS] {
    let mut counts = [0usize; MAX_CHANNELS];
    let n_channels = fractions.len().min(MAX_CHANNELS);
    if n_channels == 0 {
        return counts;
    }
    let mut assigned = 0usize;
    for (count, &fraction) in counts[..n_channels - 1].iter_mut().zip(fractions.iter()) {
        *count = (num_photons as f64 * fraction) as usize;
        assigned += *count;
    }
    counts[n_channels - 1] = num_photons.saturating_sub(assigned);
    counts
}

/// Draw `num_photons` emission time offsets (ns) for `particle`.
///
/// The result is channel-major: all offsets of channel 0 first, then
/// channel 1. It is not sorted by time.
pub fn sample_emission_times<R: Rng + ?Sized>(
    params: &PrecomputedScintParams,
    particle: ParticleIndex,
    num_photons: usize,
    rng: &mut R,
) -> OpticsResult<Array1<f64>> {
    let mut times = Array1::<f64>::zeros(num_photons);
    sample_emission_times_into(params, particle, times.view_mut(), rng)?;
    Ok(times)
}

/// Fill `out` with `out.len()` emission time offsets (ns), channel-major.
///
/// Same draws as [`sample_emission_times`], written into a caller-owned
/// view such as a column of an output batch.
pub fn sample_emission_times_into<R: Rng + ?Sized>(
    params: &PrecomputedScintParams,
    particle: ParticleIndex,
    mut out: ArrayViewMut1<'_, f64>,
    rng: &mut R,
) -> OpticsResult<()> {
    let row = params.row(particle)?;
    let num_photons = out.len();
    if num_photons == 0 {
        return Ok(());
    }
    let counts = partition_photons(num_photons, row.slice(s![1..]));

    let mut start = 0usize;
    for (&count, &tau) in counts.iter().zip(params.time_constants_ns().iter()) {
        for t in out.slice_mut(s![start..start + count]).iter_mut() {
            let u: f64 = rng.sample(Open01);
            *t = -tau * u.ln();
        }
        start += count;
    }
    Ok(())
}

/// Count and time offsets in one call: the local part of scintillation.
///
/// Returns emission time offsets in ns relative to the deposition.
pub fn scintillate_local<R: Rng + ?Sized>(
    params: &PrecomputedScintParams,
    particle: ParticleIndex,
    edep_kev: f64,
    rng: &mut R,
    emission_term: EmissionTerm,
) -> OpticsResult<Array1<f64>> {
    let num_photons = sample_photon_count(params, particle, edep_kev, rng, emission_term)?;
    sample_emission_times(params, particle, num_photons, rng)
}
