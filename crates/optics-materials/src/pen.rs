// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — PEN
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Polyethylene naphthalate (PEN) plastic scintillator.

use optics_types::config::{ScintConfig, ScintParticle, Species};
use optics_types::units::{LightYield, TimeConstant};

/// Single-exponential scintillation decay time.
pub fn pen_scint_timeconstant() -> TimeConstant {
    TimeConstant::ns(25.3)
}

/// Electron light yield. Manzanillas et al. (2022).
pub fn pen_scint_light_yield() -> LightYield {
    LightYield::per_mev(5440.0)
}

/// Scintillation configuration of PEN.
///
/// The electron yield is measured. Proton, alpha and ion factors are rough
/// estimates from the Birks constant of Hackett et al. (2024) at typical LET;
/// the quenching is not energy dependent here.
pub fn pen_scintillation_params() -> ScintConfig {
    ScintConfig {
        flat_top: pen_scint_light_yield(),
        fano_factor: None,
        particles: vec![
            ScintParticle::new(Species::Electron, 1.0, None),
            ScintParticle::new(Species::Proton, 0.5, None),
            ScintParticle::new(Species::Alpha, 0.1, None),
            ScintParticle::new(Species::Ion, 0.05, None),
        ],
    }
}
