//! Transport state and playback reconciliation
//!
//! The media primitive itself lives outside this crate behind
//! [`PlaybackSink`]. [`PlaybackDriver::sync`] compares the active mix and
//! transport against what the sink was last told and issues only the
//! differences.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::mix::{ActiveMix, SoundInstance};

/// Master volume and global play/pause, plus per-instance local pause flags
#[derive(Debug, Clone)]
pub struct Transport {
    master_volume: f32,
    playing: bool,
    locally_paused: HashSet<String>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            playing: true,
            locally_paused: HashSet::new(),
        }
    }
}

/// What one instance should currently be doing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceState {
    pub playing: bool,
    /// Instance volume scaled by master volume
    pub volume: f32,
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip the global transport; local pause flags survive
    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Local play flag, independent of the global transport
    pub fn is_locally_playing(&self, instance_id: &str) -> bool {
        !self.locally_paused.contains(instance_id)
    }

    /// Flip one instance's local flag
    ///
    /// Ignored while the global transport is paused. Returns the resulting
    /// local flag.
    pub fn toggle_instance(&mut self, instance_id: &str) -> bool {
        if !self.playing {
            return self.is_locally_playing(instance_id);
        }
        if !self.locally_paused.remove(instance_id) {
            self.locally_paused.insert(instance_id.to_string());
        }
        self.is_locally_playing(instance_id)
    }

    /// Drop local flags for instances no longer in the mix
    pub fn retain(&mut self, mix: &ActiveMix) {
        self.locally_paused.retain(|id| mix.get(id).is_some());
    }

    pub fn voice_state(&self, instance: &SoundInstance) -> VoiceState {
        VoiceState {
            playing: self.playing && self.is_locally_playing(&instance.id),
            volume: instance.volume * self.master_volume,
        }
    }
}

/// Looping media primitive, one voice per instance id
pub trait PlaybackSink {
    /// Load `path` for a new voice, looping, at `volume`
    fn load(&mut self, instance_id: &str, path: &str, volume: f32, looping: bool);

    fn set_volume(&mut self, instance_id: &str, volume: f32);

    fn play(&mut self, instance_id: &str);

    fn pause(&mut self, instance_id: &str);

    /// Stop and release a voice
    fn stop(&mut self, instance_id: &str);
}

#[derive(Debug, Clone, PartialEq)]
struct LoadedVoice {
    path: String,
    state: VoiceState,
}

/// Keeps a [`PlaybackSink`] in step with the active mix
#[derive(Debug)]
pub struct PlaybackDriver<K> {
    sink: K,
    voices: HashMap<String, LoadedVoice>,
}

impl<K: PlaybackSink> PlaybackDriver<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            voices: HashMap::new(),
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Start, update or stop voices so the sink mirrors `mix` under `transport`
    pub fn sync(&mut self, mix: &ActiveMix, transport: &Transport) {
        let stale: Vec<String> = self
            .voices
            .keys()
            .filter(|id| mix.get(id).is_none())
            .cloned()
            .collect();
        for id in stale {
            debug!("Stopping voice {}", id);
            self.sink.stop(&id);
            self.voices.remove(&id);
        }

        for instance in mix {
            let target = transport.voice_state(instance);

            let loaded_path = self.voices.get(&instance.id).map(|v| v.path.clone());
            match loaded_path {
                Some(path) if path == instance.path => {
                    if let Some(voice) = self.voices.get_mut(&instance.id) {
                        if (voice.state.volume - target.volume).abs() > f32::EPSILON {
                            self.sink.set_volume(&instance.id, target.volume);
                        }
                        if voice.state.playing != target.playing {
                            set_playing(&mut self.sink, &instance.id, target.playing);
                        }
                        voice.state = target;
                    }
                }
                previous => {
                    if previous.is_some() {
                        self.sink.stop(&instance.id);
                    }
                    debug!("Loading voice {} from {}", instance.id, instance.path);
                    self.sink.load(&instance.id, &instance.path, target.volume, true);
                    set_playing(&mut self.sink, &instance.id, target.playing);
                    self.voices.insert(
                        instance.id.clone(),
                        LoadedVoice {
                            path: instance.path.clone(),
                            state: target,
                        },
                    );
                }
            }
        }
    }
}

fn set_playing<K: PlaybackSink>(sink: &mut K, instance_id: &str, playing: bool) {
    if playing {
        sink.play(instance_id);
    } else {
        sink.pause(instance_id);
    }
}
