// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Optics Scint
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scintillation light emission per transport step.
//!
//! A material's [`ScintConfig`](optics_types::config::ScintConfig) is
//! compiled once by [`params::precompute_scintillation_params`]; the result
//! is shared read-only by every subsequent count, time and step draw. All
//! randomness comes from the caller's RNG, one stream per worker.

pub mod batch;
pub mod params;
pub mod sampling;
pub mod step;

pub use params::{
    particle_to_index, precompute_scintillation_params, ParticleIndex, PrecomputedScintParams,
};
pub use sampling::{
    sample_emission_times, sample_emission_times_into, sample_photon_count, scintillate_local,
};
pub use step::{scintillate, StepGeometry, TransportStep};
