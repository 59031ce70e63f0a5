// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Liquid Argon
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Liquid argon scintillation.
//!
//! Singlet and triplet excimer decay with particle-dependent excitation
//! ratios. References: Doke et al. (1976, 2002) for yield and Fano factor,
//! Hitachi et al. (1983) for the singlet lifetime, LEGEND-200 LLAMA
//! measurements for the triplet lifetime.

use optics_types::config::{ScintConfig, ScintParticle, Species};
use optics_types::units::{LightYield, TimeConstant};

/// Reference flat-top yield, 1 / (32 eV). Deliberately below Doke (2002).
pub const LAR_FLAT_TOP_YIELD: LightYield = LightYield::per_mev(31250.0);

/// Singlet lifetime [ns]. Hitachi (1983).
const SINGLET_LIFETIME_NS: f64 = 5.95;

/// Triplet lifetime measured by LLAMA in LEGEND-200 [µs].
const TRIPLET_LIFETIME_LLAMA_US: f64 = 1.16;

/// Statistical yield fluctuation relative to Poisson. Doke (1976).
pub fn lar_fano_factor() -> f64 {
    0.11
}

/// Source of the triplet lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TripletLifetime {
    /// LEGEND-200 LLAMA in-situ value, 1.16 µs.
    #[default]
    Legend200Llama,
    /// Caller-provided lifetime [µs], e.g. for degraded argon purity.
    Custom(f64),
}

/// Singlet and triplet lifetimes of liquid argon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArScintLifetimes {
    pub singlet: TimeConstant,
    pub triplet: TimeConstant,
}

impl ArScintLifetimes {
    /// Time constants in channel order (singlet, triplet).
    pub fn as_array(&self) -> [TimeConstant; 2] {
        [self.singlet, self.triplet]
    }
}

pub fn lar_lifetimes(triplet: TripletLifetime) -> ArScintLifetimes {
    let triplet_us = match triplet {
        TripletLifetime::Legend200Llama => TRIPLET_LIFETIME_LLAMA_US,
        TripletLifetime::Custom(us) => us,
    };
    ArScintLifetimes {
        singlet: TimeConstant::ns(SINGLET_LIFETIME_NS),
        triplet: TimeConstant::us(triplet_us),
    }
}

/// Scintillation yield configuration of liquid argon at zero field.
///
/// Relative to flat-top particles: electrons 0.8, alphas 0.7, nuclear
/// recoils ("ion") 0.3 and protons 0.8. Excitation ratios are 0.23 for
/// electrons (WArP), 1.0 for alphas and 0.75 for recoils. The proton ratio
/// is not measured; the electron value is used.
pub fn lar_scintillation_params(flat_top: LightYield) -> ScintConfig {
    ScintConfig {
        flat_top,
        fano_factor: Some(lar_fano_factor()),
        particles: vec![
            ScintParticle::new(Species::Electron, 0.8, Some(0.23)),
            ScintParticle::new(Species::Alpha, 0.7, Some(1.0)),
            ScintParticle::new(Species::Ion, 0.3, Some(0.75)),
            ScintParticle::new(Species::Proton, 0.8, Some(0.23)),
        ],
    }
}
