// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Transport Step Emission
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-step scintillation generator.
//!
//! Combines the local photon count/time draw with placement of each photon
//! along the transport step, in the global time and coordinate frame of the
//! transport engine. Units: m, ns, m/ns, keV.

use crate::params::{ParticleIndex, PrecomputedScintParams};
use crate::sampling::{sample_emission_times_into, sample_photon_count};
use ndarray::Array2;
use optics_types::config::EmissionTerm;
use optics_types::error::OpticsResult;
use rand::Rng;

/// Column of the global emission time in generated rows.
pub const COL_T: usize = 0;
/// Columns of the emission position in generated rows.
pub const COL_X: usize = 1;
pub const COL_Y: usize = 2;
pub const COL_Z: usize = 3;

/// Spatial extent of a transport step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepGeometry {
    /// All photons originate at `start_m`; no time of flight is added.
    Point { start_m: [f64; 3] },
    /// Photons are spread along the segment from `start_m` to `end_m`,
    /// with velocity varying linearly from `v_start_m_ns` to `v_end_m_ns`.
    Segment {
        start_m: [f64; 3],
        end_m: [f64; 3],
        v_start_m_ns: f64,
        v_end_m_ns: f64,
    },
}

impl StepGeometry {
    pub fn start_m(&self) -> [f64; 3] {
        match *self {
            StepGeometry::Point { start_m } | StepGeometry::Segment { start_m, .. } => start_m,
        }
    }
}

/// Kinematics of one transport step, as reported by the transport engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportStep {
    pub geometry: StepGeometry,
    /// Global time of the step start [ns].
    pub t0_ns: f64,
    pub particle: ParticleIndex,
    /// Charge in units of the elementary charge.
    pub charge: i32,
    /// Deposited energy [keV].
    pub edep_kev: f64,
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn norm(a: [f64; 3]) -> f64 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}

/// Generate scintillation photons for one transport step.
///
/// Returns an `(n, 4)` array of `[t, x, y, z]` rows, one per photon, where
/// `n` is the sampled photon count. Rows are in emission-channel order, not
/// sorted by time.
///
/// In segment mode, charged particles emit at a uniformly drawn fraction
/// `λ ∈ [0, 1)` of the track; neutral particles deposit at the step end
/// (`λ = 1`). The time of flight to the emission point is
/// `|end - start| / (v0 + λ (v1 - v0) / 2)`.
pub fn scintillate<R: Rng + ?Sized>(
    params: &PrecomputedScintParams,
    step: &TransportStep,
    rng: &mut R,
    emission_term: EmissionTerm,
) -> OpticsResult<Array2<f64>> {
    let num_photons =
        sample_photon_count(params, step.particle, step.edep_kev, rng, emission_term)?;
    let mut out = Array2::<f64>::zeros((num_photons, 4));
    sample_emission_times_into(params, step.particle, out.column_mut(COL_T), rng)?;

    match step.geometry {
        StepGeometry::Point { start_m } => {
            for mut row in out.rows_mut() {
                row[COL_T] += step.t0_ns;
                row[COL_X] = start_m[0];
                row[COL_Y] = start_m[1];
                row[COL_Z] = start_m[2];
            }
        }
        StepGeometry::Segment {
            start_m,
            end_m,
            v_start_m_ns,
            v_end_m_ns,
        } => {
            let delta = sub(end_m, start_m);
            let length_m = norm(delta);
            let dv = v_end_m_ns - v_start_m_ns;
            if step.charge == 0 {
                // start + (end - start) need not round to end; write it as given.
                let tof_ns = length_m / (v_start_m_ns + dv / 2.0);
                for mut row in out.rows_mut() {
                    row[COL_T] += step.t0_ns + tof_ns;
                    row[COL_X] = end_m[0];
                    row[COL_Y] = end_m[1];
                    row[COL_Z] = end_m[2];
                }
            } else {
                for mut row in out.rows_mut() {
                    let lambda: f64 = rng.gen();
                    let tof_ns = length_m / (v_start_m_ns + lambda * dv / 2.0);
                    row[COL_T] += step.t0_ns + tof_ns;
                    row[COL_X] = start_m[0] + lambda * delta[0];
                    row[COL_Y] = start_m[1] + lambda * delta[1];
                    row[COL_Z] = start_m[2] + lambda * delta[2];
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::precompute_scintillation_params;
    use crate::sampling::scintillate_local;
    use optics_types::config::{ScintConfig, ScintParticle, Species};
    use optics_types::units::{LightYield, TimeConstant};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lar_like_params() -> PrecomputedScintParams {
        let cfg = ScintConfig {
            flat_top: LightYield::per_mev(31250.0),
            fano_factor: Some(0.11),
            particles: vec![
                ScintParticle::new(Species::Electron, 0.8, Some(0.23)),
                ScintParticle::new(Species::Alpha, 0.7, Some(1.0)),
                ScintParticle::new(Species::Ion, 0.3, Some(0.75)),
            ],
        };
        precompute_scintillation_params(&cfg, &[TimeConstant::ns(5.95), TimeConstant::us(1.16)])
            .unwrap()
    }

    fn segment() -> StepGeometry {
        StepGeometry::Segment {
            start_m: [0.0, -1.0, 2.0],
            end_m: [0.5, 1.0, 2.0],
            v_start_m_ns: 0.1,
            v_end_m_ns: 0.09,
        }
    }

    fn step(geometry: StepGeometry, charge: i32) -> TransportStep {
        TransportStep {
            geometry,
            t0_ns: 1234.5,
            particle: Species::Electron.into(),
            charge,
            edep_kev: 10.0,
        }
    }

    #[test]
    fn test_point_mode_positions_and_times() {
        let params = lar_like_params();
        let start = [0.1, 0.2, 0.3];
        let s = step(StepGeometry::Point { start_m: start }, -1);

        let mut rng = StdRng::seed_from_u64(4);
        let rows = scintillate(&params, &s, &mut rng, EmissionTerm::NormalFano).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let dt = scintillate_local(
            &params,
            s.particle,
            s.edep_kev,
            &mut rng,
            EmissionTerm::NormalFano,
        )
        .unwrap();

        assert!(rows.nrows() > 0);
        assert_eq!(rows.nrows(), dt.len());
        for (row, offset) in rows.rows().into_iter().zip(dt.iter()) {
            assert_eq!(row[COL_T], s.t0_ns + offset);
            assert_eq!([row[COL_X], row[COL_Y], row[COL_Z]], start);
        }
    }

    #[test]
    fn test_segment_positions_within_bounds() {
        let params = lar_like_params();
        let s = step(segment(), -1);
        let mut rng = StdRng::seed_from_u64(11);
        let rows = scintillate(&params, &s, &mut rng, EmissionTerm::NormalFano).unwrap();
        assert!(rows.nrows() > 0);
        for row in rows.rows() {
            assert!((0.0..=0.5).contains(&row[COL_X]));
            assert!((-1.0..=1.0).contains(&row[COL_Y]));
            assert_eq!(row[COL_Z], 2.0);
            // Earliest possible emission is at the track start with zero decay time.
            assert!(row[COL_T] >= s.t0_ns);
        }
    }

    #[test]
    fn test_neutral_particle_emits_at_step_end() {
        let params = lar_like_params();
        let s = step(segment(), 0);
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..5 {
            let rows = scintillate(&params, &s, &mut rng, EmissionTerm::NormalFano).unwrap();
            assert!(rows.nrows() > 0);
            for row in rows.rows() {
                assert_eq!([row[COL_X], row[COL_Y], row[COL_Z]], [0.5, 1.0, 2.0]);
            }
        }
    }

    #[test]
    fn test_neutral_end_position_is_exact() {
        // -7.07.. + (4.43.. - -7.07..) rounds to 4.4373428174895055.
        let params = lar_like_params();
        let end = [4.437342817489506, 1.0, 2.0];
        let s = TransportStep {
            geometry: StepGeometry::Segment {
                start_m: [-7.074863082399303, 0.0, 0.0],
                end_m: end,
                v_start_m_ns: 0.1,
                v_end_m_ns: 0.09,
            },
            edep_kev: 100.0,
            ..step(segment(), 0)
        };
        let mut rng = StdRng::seed_from_u64(21);
        let rows = scintillate(&params, &s, &mut rng, EmissionTerm::NormalFano).unwrap();
        assert!(rows.nrows() > 0);
        for row in rows.rows() {
            assert_eq!([row[COL_X], row[COL_Y], row[COL_Z]], end);
        }
    }

    #[test]
    fn test_neutral_time_of_flight_uses_mean_velocity() {
        let params = lar_like_params();
        let s = step(segment(), 0);

        let mut rng = StdRng::seed_from_u64(13);
        let rows = scintillate(&params, &s, &mut rng, EmissionTerm::NormalFano).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let dt = scintillate_local(
            &params,
            s.particle,
            s.edep_kev,
            &mut rng,
            EmissionTerm::NormalFano,
        )
        .unwrap();

        let length = (0.5f64 * 0.5 + 2.0 * 2.0).sqrt();
        let tof = length / (0.1 + (0.09 - 0.1) / 2.0);
        for (row, offset) in rows.rows().into_iter().zip(dt.iter()) {
            assert!((row[COL_T] - (s.t0_ns + tof + offset)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_deposit_gives_empty_batch() {
        let params = lar_like_params();
        let mut s = step(segment(), 2);
        s.edep_kev = 0.0;
        let mut rng = StdRng::seed_from_u64(0);
        let rows = scintillate(&params, &s, &mut rng, EmissionTerm::Poisson).unwrap();
        assert_eq!(rows.dim(), (0, 4));
    }

    #[test]
    fn test_reproducible_with_fixed_seed() {
        let params = lar_like_params();
        let s = TransportStep {
            particle: Species::Ion.into(),
            edep_kev: 1000.0,
            ..step(segment(), 1)
        };
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = scintillate(&params, &s, &mut rng_a, EmissionTerm::NormalFano).unwrap();
        let b = scintillate(&params, &s, &mut rng_b, EmissionTerm::NormalFano).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_accessor() {
        assert_eq!(segment().start_m(), [0.0, -1.0, 2.0]);
        let p = StepGeometry::Point {
            start_m: [1.0, 2.0, 3.0],
        };
        assert_eq!(p.start_m(), [1.0, 2.0, 3.0]);
    }
}
