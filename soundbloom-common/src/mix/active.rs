//! The in-session ordered collection of sound instances

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::instance::SoundInstance;

/// Ordered set of sound instances eligible for playback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveMix {
    sounds: Vec<SoundInstance>,
}

impl ActiveMix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds(&self) -> &[SoundInstance] {
        &self.sounds
    }

    pub fn iter(&self) -> impl Iterator<Item = &SoundInstance> {
        self.sounds.iter()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn get(&self, instance_id: &str) -> Option<&SoundInstance> {
        self.sounds.iter().find(|s| s.id == instance_id)
    }

    /// Any entry reducing to the same comparison key
    pub fn contains_key(&self, key: &str) -> bool {
        self.sounds.iter().any(|s| s.comparison_key() == key)
    }

    /// Any entry bound to exactly this file path
    pub fn contains_path(&self, path: &str) -> bool {
        self.sounds.iter().any(|s| s.path == path)
    }

    pub(crate) fn push(&mut self, instance: SoundInstance) {
        self.sounds.push(instance);
    }

    /// Remove by instance id; returns false when absent
    pub(crate) fn remove(&mut self, instance_id: &str) -> bool {
        let before = self.sounds.len();
        self.sounds.retain(|s| s.id != instance_id);
        self.sounds.len() != before
    }

    /// Replace one instance's volume; returns false when absent
    pub(crate) fn set_volume(&mut self, instance_id: &str, volume: f32) -> bool {
        match self.sounds.iter_mut().find(|s| s.id == instance_id) {
            Some(sound) => {
                sound.volume = volume;
                true
            }
            None => false,
        }
    }

    pub(crate) fn replace(&mut self, sounds: Vec<SoundInstance>) {
        self.sounds = sounds;
    }

    /// Keep the first instance of each comparison-key group
    ///
    /// Returns the number of instances discarded.
    pub(crate) fn retain_first_per_key(&mut self) -> usize {
        let before = self.sounds.len();
        let mut seen = HashSet::new();
        self.sounds.retain(|s| seen.insert(s.comparison_key()));
        before - self.sounds.len()
    }
}

impl<'a> IntoIterator for &'a ActiveMix {
    type Item = &'a SoundInstance;
    type IntoIter = std::slice::Iter<'a, SoundInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.sounds.iter()
    }
}
