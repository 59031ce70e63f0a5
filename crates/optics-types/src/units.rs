// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Units
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unit-bearing quantities used at configuration time.
//!
//! Material layers author yields and time constants in whatever unit the
//! literature uses; precomputation normalizes them to photons/keV and ns.

use crate::constants::{EV_PER_KEV, KEV_PER_MEV, NS_PER_MS, NS_PER_S, NS_PER_US};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyUnit {
    Ev,
    Kev,
    Mev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Ns,
    Us,
    Ms,
    S,
}

/// Photon yield per unit deposited energy, e.g. 31250 / MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightYield {
    pub value: f64,
    pub per: EnergyUnit,
}

impl LightYield {
    pub const fn per_ev(value: f64) -> Self {
        Self {
            value,
            per: EnergyUnit::Ev,
        }
    }

    pub const fn per_kev(value: f64) -> Self {
        Self {
            value,
            per: EnergyUnit::Kev,
        }
    }

    pub const fn per_mev(value: f64) -> Self {
        Self {
            value,
            per: EnergyUnit::Mev,
        }
    }

    /// Photons per keV.
    pub fn to_per_kev(&self) -> f64 {
        match self.per {
            EnergyUnit::Ev => self.value * EV_PER_KEV,
            EnergyUnit::Kev => self.value,
            EnergyUnit::Mev => self.value / KEV_PER_MEV,
        }
    }
}

/// Characteristic decay time of one emission channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeConstant {
    pub value: f64,
    pub unit: TimeUnit,
}

impl TimeConstant {
    pub const fn ns(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Ns,
        }
    }

    pub const fn us(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Us,
        }
    }

    /// Value in nanoseconds.
    pub fn to_ns(&self) -> f64 {
        match self.unit {
            TimeUnit::Ns => self.value,
            TimeUnit::Us => self.value * NS_PER_US,
            TimeUnit::Ms => self.value * NS_PER_MS,
            TimeUnit::S => self.value * NS_PER_S,
        }
    }
}
