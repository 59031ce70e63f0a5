// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Scintillation Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Compilation of a [`ScintConfig`] into a dense per-species table.
//!
//! The table has one row per [`Species`] and the columns
//! `[yield_factor, fraction_0, ..]`, with one fraction per decay channel.
//! Species missing from the config reuse the electron row.

use ndarray::{Array1, Array2, ArrayView1};
use optics_types::config::{ScintConfig, Species};
use optics_types::error::{OpticsError, OpticsResult};
use optics_types::units::TimeConstant;
use tracing::debug;

/// Upper bound on decay channels (singlet/triplet style split).
pub const MAX_CHANNELS: usize = 2;

/// Dense row index into a [`PrecomputedScintParams`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleIndex(pub usize);

impl From<Species> for ParticleIndex {
    fn from(species: Species) -> Self {
        ParticleIndex(species.index())
    }
}

/// Convert a species name (case-insensitive) to its table index.
pub fn particle_to_index(name: &str) -> OpticsResult<ParticleIndex> {
    Ok(name.parse::<Species>()?.into())
}

/// Immutable scintillation table, built once per material.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedScintParams {
    flat_top_per_kev: f64,
    fano_factor: f64,
    time_constants_ns: Array1<f64>,
    particles: Array2<f64>,
}

impl PrecomputedScintParams {
    /// Flat-top yield in photons per keV.
    pub fn flat_top_per_kev(&self) -> f64 {
        self.flat_top_per_kev
    }

    pub fn fano_factor(&self) -> f64 {
        self.fano_factor
    }

    /// Decay time constants in ns, in channel order.
    pub fn time_constants_ns(&self) -> ArrayView1<'_, f64> {
        self.time_constants_ns.view()
    }

    pub fn n_channels(&self) -> usize {
        self.time_constants_ns.len()
    }

    /// Full table, shape `(Species::COUNT, 1 + n_channels)`.
    pub fn table(&self) -> &Array2<f64> {
        &self.particles
    }

    /// Table row of `particle`, or `UnknownSpecies` if out of range.
    #[inline]
    pub fn row(&self, particle: ParticleIndex) -> OpticsResult<ArrayView1<'_, f64>> {
        if particle.0 >= self.particles.nrows() {
            return Err(OpticsError::UnknownSpecies(format!(
                "particle index {} outside table of {} species",
                particle.0,
                self.particles.nrows()
            )));
        }
        Ok(self.particles.row(particle.0))
    }
}

fn validate_config(config: &ScintConfig) -> OpticsResult<()> {
    let flat_top = config.flat_top.value;
    if !flat_top.is_finite() || flat_top < 0.0 {
        return Err(OpticsError::ConfigError(format!(
            "flat_top yield must be finite and >= 0, got {flat_top}"
        )));
    }
    if let Some(fano) = config.fano_factor {
        if !fano.is_finite() || fano <= 0.0 {
            return Err(OpticsError::ConfigError(format!(
                "fano_factor must be finite and > 0, got {fano}"
            )));
        }
    }
    for p in &config.particles {
        if !p.yield_factor.is_finite() || p.yield_factor < 0.0 {
            return Err(OpticsError::ConfigError(format!(
                "{}.yield_factor must be finite and >= 0, got {}",
                p.species, p.yield_factor
            )));
        }
        if let Some(ratio) = p.exc_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(OpticsError::ConfigError(format!(
                    "{}.exc_ratio must lie in [0, 1], got {ratio}",
                    p.species
                )));
            }
        }
    }
    Ok(())
}

/// Validate `config` and compile it together with its decay time constants.
///
/// Exactly one time constant is required when no particle defines an
/// excitation ratio, and exactly two when all of them do. Mixed presence,
/// a wrong number of time constants or a missing electron entry are
/// configuration errors.
pub fn precompute_scintillation_params(
    config: &ScintConfig,
    time_components: &[TimeConstant],
) -> OpticsResult<PrecomputedScintParams> {
    let with_ratio = config
        .particles
        .iter()
        .filter(|p| p.exc_ratio.is_some())
        .count();
    if with_ratio != 0 && with_ratio != config.particles.len() {
        return Err(OpticsError::ConfigError(format!(
            "Not all particles have exc_ratio defined ({with_ratio} of {})",
            config.particles.len()
        )));
    }
    let split = with_ratio > 0;
    let n_channels = if split { 2 } else { 1 };
    if time_components.len() != n_channels {
        return Err(OpticsError::ConfigError(format!(
            "Expected {n_channels} time component(s), got {}",
            time_components.len()
        )));
    }

    let electron = config.particle(Species::Electron).ok_or_else(|| {
        OpticsError::ConfigError(
            "missing electron scintillation particle (used as fallback for all others)"
                .to_string(),
        )
    })?;
    validate_config(config)?;

    let time_constants_ns: Array1<f64> = time_components.iter().map(|t| t.to_ns()).collect();
    if let Some(bad) = time_constants_ns.iter().find(|t| !t.is_finite() || **t <= 0.0) {
        return Err(OpticsError::ConfigError(format!(
            "time constants must be finite and > 0, got {bad} ns"
        )));
    }

    let mut particles = Array2::zeros((Species::COUNT, 1 + n_channels));
    for species in Species::ALL {
        let p = config.particle(species).unwrap_or(electron);
        let mut row = particles.row_mut(species.index());
        row[0] = p.yield_factor;
        match (split, p.exc_ratio) {
            (true, Some(ratio)) => {
                row[1] = ratio;
                row[2] = 1.0 - ratio;
            }
            _ => row[1] = 1.0,
        }
    }

    let params = PrecomputedScintParams {
        flat_top_per_kev: config.flat_top.to_per_kev(),
        fano_factor: config.fano_factor_or_default(),
        time_constants_ns,
        particles,
    };
    debug!(
        flat_top_per_kev = params.flat_top_per_kev,
        fano_factor = params.fano_factor,
        n_channels,
        configured = config.particles.len(),
        "precomputed scintillation parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use optics_types::config::ScintParticle;
    use optics_types::units::LightYield;

    fn split_config() -> ScintConfig {
        ScintConfig {
            flat_top: LightYield::per_mev(1000.0),
            fano_factor: Some(0.1),
            particles: vec![
                ScintParticle::new(Species::Electron, 1.0, Some(0.3)),
                ScintParticle::new(Species::Alpha, 0.7, Some(1.0)),
            ],
        }
    }

    fn two_times() -> [TimeConstant; 2] {
        [TimeConstant::ns(5.0), TimeConstant::ns(50.0)]
    }

    fn expect_config_error(result: OpticsResult<PrecomputedScintParams>, needle: &str) {
        match result {
            Err(OpticsError::ConfigError(msg)) => {
                assert!(msg.contains(needle), "unexpected message: {msg}")
            }
            other => panic!("Expected ConfigError containing '{needle}', got {other:?}"),
        }
    }

    #[test]
    fn test_two_channel_table_layout() {
        let params = precompute_scintillation_params(&split_config(), &two_times()).unwrap();
        assert_eq!(params.table().dim(), (Species::COUNT, 3));
        assert_eq!(params.n_channels(), 2);
        assert_eq!(params.flat_top_per_kev(), 1.0);
        assert_eq!(params.fano_factor(), 0.1);
        assert_eq!(params.time_constants_ns().to_vec(), vec![5.0, 50.0]);

        let e = params.row(Species::Electron.into()).unwrap();
        assert_eq!(e[0], 1.0);
        assert!((e[1] - 0.3).abs() < 1e-15);
        assert!((e[2] - 0.7).abs() < 1e-15);

        let a = params.row(Species::Alpha.into()).unwrap();
        assert_eq!(a.to_vec(), vec![0.7, 1.0, 0.0]);
    }

    #[test]
    fn test_unconfigured_species_fall_back_to_electron() {
        let params = precompute_scintillation_params(&split_config(), &two_times()).unwrap();
        let electron = params.row(Species::Electron.into()).unwrap().to_vec();
        for species in [Species::Ion, Species::Deuteron, Species::Triton, Species::Proton] {
            assert_eq!(params.row(species.into()).unwrap().to_vec(), electron);
        }
    }

    #[test]
    fn test_single_channel_table_layout() {
        let cfg = ScintConfig {
            flat_top: LightYield::per_mev(5440.0),
            fano_factor: None,
            particles: vec![
                ScintParticle::new(Species::Electron, 1.0, None),
                ScintParticle::new(Species::Proton, 0.5, None),
            ],
        };
        let params = precompute_scintillation_params(&cfg, &[TimeConstant::ns(25.3)]).unwrap();
        assert_eq!(params.table().dim(), (Species::COUNT, 2));
        assert_eq!(params.fano_factor(), 1.0);
        assert!((params.flat_top_per_kev() - 5.44).abs() < 1e-12);
        assert_eq!(params.row(Species::Proton.into()).unwrap().to_vec(), vec![0.5, 1.0]);
        assert_eq!(params.row(Species::Ion.into()).unwrap().to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_time_constants_normalized_to_ns() {
        let times = [TimeConstant::ns(5.95), TimeConstant::us(1.16)];
        let params = precompute_scintillation_params(&split_config(), &times).unwrap();
        let tau = params.time_constants_ns();
        assert_eq!(tau[0], 5.95);
        assert!((tau[1] - 1160.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_exc_ratio_rejected() {
        let mut cfg = split_config();
        cfg.particles.push(ScintParticle::new(Species::Ion, 0.3, None));
        expect_config_error(
            precompute_scintillation_params(&cfg, &two_times()),
            "Not all particles have exc_ratio",
        );
    }

    #[test]
    fn test_wrong_time_component_count_rejected() {
        expect_config_error(
            precompute_scintillation_params(&split_config(), &[TimeConstant::ns(5.0)]),
            "Expected 2 time component(s), got 1",
        );

        let cfg = ScintConfig {
            flat_top: LightYield::per_mev(1000.0),
            fano_factor: None,
            particles: vec![ScintParticle::new(Species::Electron, 1.0, None)],
        };
        expect_config_error(
            precompute_scintillation_params(&cfg, &two_times()),
            "Expected 1 time component(s), got 2",
        );
        expect_config_error(precompute_scintillation_params(&cfg, &[]), "got 0");
    }

    #[test]
    fn test_missing_electron_rejected() {
        let cfg = ScintConfig {
            flat_top: LightYield::per_mev(1000.0),
            fano_factor: None,
            particles: vec![ScintParticle::new(Species::Alpha, 0.7, None)],
        };
        expect_config_error(
            precompute_scintillation_params(&cfg, &[TimeConstant::ns(10.0)]),
            "missing electron",
        );

        let empty = ScintConfig {
            particles: Vec::new(),
            ..cfg
        };
        expect_config_error(
            precompute_scintillation_params(&empty, &[TimeConstant::ns(10.0)]),
            "missing electron",
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut cfg = split_config();
        cfg.particles[1].exc_ratio = Some(1.5);
        expect_config_error(precompute_scintillation_params(&cfg, &two_times()), "exc_ratio");

        let mut cfg = split_config();
        cfg.fano_factor = Some(0.0);
        expect_config_error(precompute_scintillation_params(&cfg, &two_times()), "fano_factor");

        let mut cfg = split_config();
        cfg.particles[0].yield_factor = f64::NAN;
        expect_config_error(precompute_scintillation_params(&cfg, &two_times()), "yield_factor");

        let times = [TimeConstant::ns(5.0), TimeConstant::ns(-1.0)];
        expect_config_error(precompute_scintillation_params(&split_config(), &times), "time constants");
    }

    #[test]
    fn test_particle_index_lookup() {
        assert_eq!(particle_to_index("electron").unwrap(), ParticleIndex(0));
        assert_eq!(particle_to_index("ION").unwrap(), ParticleIndex(2));
        assert_eq!(particle_to_index("proton").unwrap(), ParticleIndex(5));
        assert!(matches!(
            particle_to_index("neutron"),
            Err(OpticsError::UnknownSpecies(_))
        ));

        let params = precompute_scintillation_params(&split_config(), &two_times()).unwrap();
        assert!(matches!(
            params.row(ParticleIndex(Species::COUNT)),
            Err(OpticsError::UnknownSpecies(_))
        ));
    }
}
