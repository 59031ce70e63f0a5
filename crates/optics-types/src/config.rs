// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{OpticsError, OpticsResult};
use crate::units::LightYield;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Particle species distinguished by scintillation-by-particle-type.
///
/// The discriminant is the dense row index used by precomputed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Species {
    Electron = 0,
    Alpha = 1,
    Ion = 2,
    Deuteron = 3,
    Triton = 4,
    Proton = 5,
}

impl Species {
    /// Number of species, i.e. rows of a precomputed table.
    pub const COUNT: usize = 6;

    /// All species in index order.
    pub const ALL: [Species; Species::COUNT] = [
        Species::Electron,
        Species::Alpha,
        Species::Ion,
        Species::Deuteron,
        Species::Triton,
        Species::Proton,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Species::Electron => "electron",
            Species::Alpha => "alpha",
            Species::Ion => "ion",
            Species::Deuteron => "deuteron",
            Species::Triton => "triton",
            Species::Proton => "proton",
        }
    }

    /// Case-insensitive check against the recognized species names.
    pub fn is_valid_name(name: &str) -> bool {
        name.parse::<Species>().is_ok()
    }
}

impl FromStr for Species {
    type Err = OpticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|species| species.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpticsError::UnknownSpecies(s.to_string()))
    }
}

impl TryFrom<String> for Species {
    type Error = OpticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.name().to_string()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scintillation response of one species relative to the flat-top yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScintParticle {
    #[serde(rename = "name")]
    pub species: Species,
    /// Yield relative to the flat-top yield (dimensionless).
    pub yield_factor: f64,
    /// Fraction of photons in the fast channel, when two channels are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exc_ratio: Option<f64>,
}

impl ScintParticle {
    pub const fn new(species: Species, yield_factor: f64, exc_ratio: Option<f64>) -> Self {
        Self {
            species,
            yield_factor,
            exc_ratio,
        }
    }

    /// Build from a species name, rejecting unrecognized names.
    pub fn from_name(name: &str, yield_factor: f64, exc_ratio: Option<f64>) -> OpticsResult<Self> {
        Ok(Self::new(name.parse()?, yield_factor, exc_ratio))
    }
}

/// Scintillation yield parameters of one material, per particle type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScintConfig {
    pub flat_top: LightYield,
    /// Variance/mean ratio of the photon count. Treated as 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fano_factor: Option<f64>,
    pub particles: Vec<ScintParticle>,
}

impl ScintConfig {
    /// Case-insensitive lookup by species name.
    ///
    /// Returns `None` for names that are not configured, including names
    /// that are not a recognized species at all.
    pub fn get_particle(&self, name: &str) -> Option<&ScintParticle> {
        let species = name.parse::<Species>().ok()?;
        self.particle(species)
    }

    pub fn particle(&self, species: Species) -> Option<&ScintParticle> {
        self.particles.iter().find(|p| p.species == species)
    }

    pub fn fano_factor_or_default(&self) -> f64 {
        self.fano_factor.unwrap_or(1.0)
    }

    /// Parse a JSON document into a config.
    pub fn from_json_str(json: &str) -> OpticsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

/// Statistical model for the per-step photon count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionTerm {
    /// Always draw from a Poisson distribution.
    Poisson,
    /// Gaussian with variance `fano_factor * mean` above 10 photons, Poisson below.
    #[default]
    NormalFano,
}
