//! Named mix snapshots and their persisted collection

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::instance::SoundInstance;
use crate::store::{KeyValueStore, MIXES_KEY};
use crate::Result;

/// A named snapshot of an active mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mix {
    /// Millisecond timestamp at creation, as decimal text
    pub id: String,
    pub name: String,
    pub sounds: Vec<SoundInstance>,
}

/// Saved mixes, mirrored to the injected store under [`MIXES_KEY`]
#[derive(Debug)]
pub struct MixLibrary<S> {
    store: S,
    mixes: Vec<Mix>,
}

impl<S: KeyValueStore> MixLibrary<S> {
    /// Read the saved collection from the store
    ///
    /// A missing key, an unreadable store or corrupt JSON all start from an
    /// empty collection; the latter two are logged.
    pub fn open(store: S) -> Self {
        let mixes = match store.get(MIXES_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Mix>>(&text) {
                Ok(mixes) => mixes,
                Err(e) => {
                    error!("Failed to parse saved mixes: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Failed to read saved mixes: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} saved mixes", mixes.len());
        Self { store, mixes }
    }

    pub fn mixes(&self) -> &[Mix] {
        &self.mixes
    }

    pub fn get(&self, mix_id: &str) -> Option<&Mix> {
        self.mixes.iter().find(|m| m.id == mix_id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save a snapshot under `name`
    ///
    /// The name is trimmed; an empty name is ignored and `Ok(None)` returned.
    /// With an `existing_id` naming a stored mix, that mix is overwritten in
    /// place; otherwise a new mix is appended. Returns the saved mix id.
    pub fn save(
        &mut self,
        name: &str,
        existing_id: Option<&str>,
        sounds: &[SoundInstance],
    ) -> Result<Option<String>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring save with empty mix name");
            return Ok(None);
        }

        let slot = existing_id.and_then(|id| self.mixes.iter().position(|m| m.id == id));
        let id = match slot {
            Some(slot) => {
                let mix = &mut self.mixes[slot];
                mix.name = name.to_string();
                mix.sounds = sounds.to_vec();
                info!("Updated mix \"{}\" ({} sounds)", name, sounds.len());
                mix.id.clone()
            }
            None => {
                let id = self.next_id();
                self.mixes.push(Mix {
                    id: id.clone(),
                    name: name.to_string(),
                    sounds: sounds.to_vec(),
                });
                info!("Saved new mix \"{}\" ({} sounds)", name, sounds.len());
                id
            }
        };

        self.persist()?;
        Ok(Some(id))
    }

    /// Delete a mix; returns whether one was removed
    pub fn delete(&mut self, mix_id: &str) -> Result<bool> {
        let before = self.mixes.len();
        self.mixes.retain(|m| m.id != mix_id);
        let removed = self.mixes.len() != before;

        if removed {
            info!("Deleted mix {}", mix_id);
        }
        self.persist()?;
        Ok(removed)
    }

    fn persist(&mut self) -> Result<()> {
        let text = serde_json::to_string(&self.mixes)?;
        self.store.set(MIXES_KEY, &text)
    }

    /// Timestamp-derived id, bumped past any id already in use
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.mixes.iter().any(|m| m.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}
