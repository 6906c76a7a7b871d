//! Mix reconciliation
//!
//! [`MixReconciler`] owns the active mix and the saved-mix library. Every
//! mutation runs synchronously to completion. While variant randomization is
//! enabled, the active mix holds at most one instance per comparison key;
//! while it is disabled, at most one instance per file path.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

pub mod active;
pub mod instance;
pub mod saved;

pub use active::ActiveMix;
pub use instance::{comparison_key, SoundInstance};
pub use saved::{Mix, MixLibrary};

use crate::store::KeyValueStore;
use crate::Result;

/// Result of an add request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended under this instance id
    Added { instance_id: String },
    /// An equivalent instance is already present; the mix is unchanged
    AlreadyInMix { key: String },
}

/// Active mix plus saved mixes, backed by an injected store
#[derive(Debug)]
pub struct MixReconciler<S> {
    active: ActiveMix,
    library: MixLibrary<S>,
    randomize: bool,
}

impl<S: KeyValueStore> MixReconciler<S> {
    /// Create a reconciler with randomization enabled, reading saved mixes
    /// from `store`
    pub fn new(store: S) -> Self {
        Self {
            active: ActiveMix::new(),
            library: MixLibrary::open(store),
            randomize: true,
        }
    }

    pub fn active(&self) -> &ActiveMix {
        &self.active
    }

    pub fn saved_mixes(&self) -> &[Mix] {
        self.library.mixes()
    }

    pub fn library(&self) -> &MixLibrary<S> {
        &self.library
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    /// Switch variant randomization; turning it on reduces the active mix
    /// to one instance per comparison key
    pub fn set_randomize(&mut self, enabled: bool) {
        self.randomize = enabled;
        self.reconcile();
    }

    /// Add a definition or instance using the thread-local RNG
    pub fn add(&mut self, candidate: impl Into<SoundInstance>) -> AddOutcome {
        self.add_with_rng(candidate, &mut rand::thread_rng())
    }

    /// Add a definition or instance, choosing variants with `rng`
    ///
    /// With randomization on, a multi-variant candidate is bound to one
    /// uniformly chosen variant under a fresh instance id.
    pub fn add_with_rng<R>(&mut self, candidate: impl Into<SoundInstance>, rng: &mut R) -> AddOutcome
    where
        R: Rng + ?Sized,
    {
        let mut instance = candidate.into();

        if self.randomize {
            let key = instance.comparison_key();
            if self.active.contains_key(&key) {
                info!("Sound \"{}\" is already in your mix", key);
                return AddOutcome::AlreadyInMix { key };
            }
            if instance.variants.len() > 1 {
                if let Some(path) = instance.variants.choose(rng) {
                    instance.path = path.clone();
                }
                instance.id = format!("{}-{}", instance.sound_id, uuid::Uuid::new_v4());
            }
        } else if self.active.contains_path(&instance.path) {
            info!("Sound \"{}\" is already in your mix", instance.name);
            return AddOutcome::AlreadyInMix { key: instance.path };
        }

        // Expanded variant ids can coincide with another definition's id
        if self.active.get(&instance.id).is_some() {
            instance.id = format!("{}-{}", instance.sound_id, uuid::Uuid::new_v4());
        }

        let instance_id = instance.id.clone();
        self.active.push(instance);
        self.reconcile();
        AddOutcome::Added { instance_id }
    }

    /// Remove an instance; unknown ids are ignored
    pub fn remove(&mut self, instance_id: &str) {
        if self.active.remove(instance_id) {
            self.reconcile();
        }
    }

    /// Replace one instance's volume; unknown ids are ignored
    ///
    /// Range enforcement (0.0–1.0) belongs to the caller.
    pub fn update_volume(&mut self, instance_id: &str, volume: f32) {
        if self.active.set_volume(instance_id, volume) {
            self.reconcile();
        }
    }

    /// Snapshot the active mix under `name`, see [`MixLibrary::save`]
    pub fn save_mix(&mut self, name: &str, existing_id: Option<&str>) -> Result<Option<String>> {
        self.library.save(name, existing_id, self.active.sounds())
    }

    pub fn delete_mix(&mut self, mix_id: &str) -> Result<bool> {
        self.library.delete(mix_id)
    }

    /// Replace the active mix with a copy of a saved snapshot
    ///
    /// Returns false, leaving the active mix untouched, for unknown ids.
    pub fn load_mix(&mut self, mix_id: &str) -> bool {
        let Some(mix) = self.library.get(mix_id) else {
            return false;
        };

        info!("Loading mix \"{}\" ({} sounds)", mix.name, mix.sounds.len());
        self.active.replace(mix.sounds.clone());
        self.reconcile();
        true
    }

    fn reconcile(&mut self) {
        if !self.randomize || self.active.is_empty() {
            return;
        }

        let before = self.active.len();
        if self.active.retain_first_per_key() > 0 {
            info!("Reducing from {} to {} sounds", before, self.active.len());
        }
    }
}
