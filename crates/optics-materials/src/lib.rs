// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Optics Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scintillation presets for detector materials.
//!
//! Liquid argon, PEN and scintillating fiber cores, plus a store that lets
//! callers swap a material's implementation at runtime.

pub mod fibers;
pub mod lar;
pub mod pen;
pub mod store;
