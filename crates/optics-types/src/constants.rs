// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Power-of-ten unit factors.
//!
//! Internal units of the scintillation core are keV for energy, ns for
//! time and m for length. All factors below are exact decimal scalings.

/// eV per keV.
pub const EV_PER_KEV: f64 = 1e3;

/// keV per MeV.
pub const KEV_PER_MEV: f64 = 1e3;

/// ns per µs.
pub const NS_PER_US: f64 = 1e3;

/// ns per ms.
pub const NS_PER_MS: f64 = 1e6;

/// ns per s.
pub const NS_PER_S: f64 = 1e9;
