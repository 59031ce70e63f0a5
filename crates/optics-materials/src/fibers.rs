// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Scintillating Fibers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scintillating fiber cores.
//!
//! Only electron deposits are configured; every other species falls back
//! to the electron response.

use optics_types::config::{ScintConfig, ScintParticle, Species};
use optics_types::units::{LightYield, TimeConstant};

/// Decay time of the fiber core emission (Saint-Gobain data sheet).
pub fn fiber_wls_timeconstant() -> TimeConstant {
    TimeConstant::ns(12.0)
}

pub fn fiber_core_scint_light_yield() -> LightYield {
    LightYield::per_mev(8000.0)
}

pub fn fiber_core_scintillation_params() -> ScintConfig {
    ScintConfig {
        flat_top: fiber_core_scint_light_yield(),
        fano_factor: None,
        particles: vec![ScintParticle::new(Species::Electron, 1.0, None)],
    }
}
