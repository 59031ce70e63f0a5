// ─────────────────────────────────────────────────────────────────────
// SCPN Optics — Property Store
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Runtime-swappable scintillation property implementations.
//!
//! Each material registers an original [`ScintillationSource`] under a name.
//! Callers may replace it with their own implementation, query which names
//! are replaced, and reset individual entries or the whole store.

use crate::fibers::{fiber_core_scintillation_params, fiber_wls_timeconstant};
use crate::lar::{lar_lifetimes, lar_scintillation_params, TripletLifetime, LAR_FLAT_TOP_YIELD};
use crate::pen::{pen_scint_timeconstant, pen_scintillation_params};
use optics_scint::{precompute_scintillation_params, PrecomputedScintParams};
use optics_types::config::ScintConfig;
use optics_types::error::{OpticsError, OpticsResult};
use optics_types::units::{LightYield, TimeConstant};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Store name of the liquid argon source.
pub const LAR: &str = "lar";
/// Store name of the PEN source.
pub const PEN: &str = "pen";
/// Store name of the fiber core source.
pub const FIBER_CORE: &str = "fiber_core";

/// Scintillation properties of one material.
pub trait ScintillationSource: Send + Sync {
    fn scintillation_params(&self) -> ScintConfig;

    /// Decay time constants, one per emission channel.
    fn time_constants(&self) -> Vec<TimeConstant>;

    fn precompute(&self) -> OpticsResult<PrecomputedScintParams> {
        precompute_scintillation_params(&self.scintillation_params(), &self.time_constants())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LarScintillation {
    pub flat_top: LightYield,
    pub triplet: TripletLifetime,
}

impl Default for LarScintillation {
    fn default() -> Self {
        Self {
            flat_top: LAR_FLAT_TOP_YIELD,
            triplet: TripletLifetime::default(),
        }
    }
}

impl ScintillationSource for LarScintillation {
    fn scintillation_params(&self) -> ScintConfig {
        lar_scintillation_params(self.flat_top)
    }

    fn time_constants(&self) -> Vec<TimeConstant> {
        lar_lifetimes(self.triplet).as_array().to_vec()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PenScintillation;

impl ScintillationSource for PenScintillation {
    fn scintillation_params(&self) -> ScintConfig {
        pen_scintillation_params()
    }

    fn time_constants(&self) -> Vec<TimeConstant> {
        vec![pen_scint_timeconstant()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FiberCoreScintillation;

impl ScintillationSource for FiberCoreScintillation {
    fn scintillation_params(&self) -> ScintConfig {
        fiber_core_scintillation_params()
    }

    fn time_constants(&self) -> Vec<TimeConstant> {
        vec![fiber_wls_timeconstant()]
    }
}

struct StoreEntry {
    original: Arc<dyn ScintillationSource>,
    replacement: Option<Arc<dyn ScintillationSource>>,
}

impl StoreEntry {
    fn active(&self) -> &Arc<dyn ScintillationSource> {
        self.replacement.as_ref().unwrap_or(&self.original)
    }
}

/// Name → (original, active) table of scintillation sources.
#[derive(Default)]
pub struct PropertyStore {
    entries: BTreeMap<String, StoreEntry>,
}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(name, entry)| (name, entry.replacement.is_some())),
            )
            .finish()
    }
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the built-in liquid argon, PEN and fiber core sources.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        let defaults: [(&str, Arc<dyn ScintillationSource>); 3] = [
            (LAR, Arc::new(LarScintillation::default())),
            (PEN, Arc::new(PenScintillation)),
            (FIBER_CORE, Arc::new(FiberCoreScintillation)),
        ];
        for (name, source) in defaults {
            store.entries.insert(
                name.to_string(),
                StoreEntry {
                    original: source,
                    replacement: None,
                },
            );
        }
        store
    }

    /// Register `source` as the unreplaced entry for `name`.
    pub fn register(
        &mut self,
        name: &str,
        source: Arc<dyn ScintillationSource>,
    ) -> OpticsResult<()> {
        if self.entries.contains_key(name) {
            return Err(OpticsError::ConfigError(format!(
                "scintillation source '{name}' is already registered"
            )));
        }
        self.entries.insert(
            name.to_string(),
            StoreEntry {
                original: source,
                replacement: None,
            },
        );
        debug!(name, "registered scintillation source");
        Ok(())
    }

    fn entry(&self, name: &str) -> OpticsResult<&StoreEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| OpticsError::UnknownProperty(name.to_string()))
    }

    fn entry_mut(&mut self, name: &str) -> OpticsResult<&mut StoreEntry> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| OpticsError::UnknownProperty(name.to_string()))
    }

    /// Active implementation: the replacement if set, else the original.
    pub fn get(&self, name: &str) -> OpticsResult<Arc<dyn ScintillationSource>> {
        Ok(Arc::clone(self.entry(name)?.active()))
    }

    pub fn original(&self, name: &str) -> OpticsResult<Arc<dyn ScintillationSource>> {
        Ok(Arc::clone(&self.entry(name)?.original))
    }

    /// Precompute the active implementation of `name`.
    pub fn precompute(&self, name: &str) -> OpticsResult<PrecomputedScintParams> {
        self.entry(name)?.active().precompute()
    }

    pub fn replace_implementation(
        &mut self,
        name: &str,
        source: Arc<dyn ScintillationSource>,
    ) -> OpticsResult<()> {
        self.entry_mut(name)?.replacement = Some(source);
        info!(name, "replaced scintillation source implementation");
        Ok(())
    }

    pub fn reset_implementation(&mut self, name: &str) -> OpticsResult<()> {
        self.entry_mut(name)?.replacement = None;
        debug!(name, "reset scintillation source to original");
        Ok(())
    }

    pub fn is_original(&self, name: &str) -> OpticsResult<bool> {
        Ok(self.entry(name)?.replacement.is_none())
    }

    pub fn reset_all_to_original(&mut self) {
        for entry in self.entries.values_mut() {
            entry.replacement = None;
        }
    }

    pub fn is_all_original(&self) -> bool {
        self.entries.values().all(|e| e.replacement.is_none())
    }

    /// Names of all replaced entries, sorted.
    pub fn get_replaced(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.replacement.is_some())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
