//! # SoundBloom Common Library
//!
//! Shared code for the SoundBloom ambient mixer:
//! - Sound catalog scanning and normalization
//! - Active mix reconciliation and saved mixes
//! - Injected key-value persistence
//! - Transport and playback reconciliation
//! - Theme state with explicit observers
//! - Drag-and-drop payloads
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod dragdrop;
pub mod error;
pub mod library;
pub mod mix;
pub mod playback;
pub mod store;
pub mod theme;

pub use catalog::{build_catalog, load_catalog, SoundDefinition};
pub use error::{Error, Result};
pub use mix::{AddOutcome, Mix, MixReconciler, SoundInstance};
pub use store::{KeyValueStore, MemoryStore};
