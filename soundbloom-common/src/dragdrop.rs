//! Drag-and-drop transfer of library entries into the active mix

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::catalog::SoundDefinition;
use crate::mix::{AddOutcome, MixReconciler, SoundInstance};
use crate::store::KeyValueStore;
use crate::Result;

/// Data-transfer key the payload travels under
pub const TRANSFER_KEY: &str = "sound";

/// Anything the library lets the user drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DragPayload {
    Instance(SoundInstance),
    Definition(SoundDefinition),
}

impl From<DragPayload> for SoundInstance {
    fn from(payload: DragPayload) -> Self {
        match payload {
            DragPayload::Instance(instance) => instance,
            DragPayload::Definition(def) => SoundInstance::from(def),
        }
    }
}

/// Serialize a library entry for the transfer
pub fn encode(payload: &DragPayload) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}

/// Parse transfer text; malformed or empty payloads yield `None`
pub fn decode(text: &str) -> Option<DragPayload> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(payload) => Some(payload),
        Err(e) => {
            error!("Error handling drop: {}", e);
            None
        }
    }
}

impl<S: KeyValueStore> MixReconciler<S> {
    /// Add whatever was dropped; bad payloads are logged and ignored
    pub fn handle_drop(&mut self, text: &str) -> Option<AddOutcome> {
        decode(text).map(|payload| self.add(payload))
    }
}
