//! Sound catalog
//!
//! Turns the flat `(category, file name)` enumeration of the sounds
//! directory into a deduplicated list of [`SoundDefinition`]s. Numbered
//! copies of one recording become variants of a single definition.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub mod naming;
pub mod scanner;

pub use scanner::{ScanError, SoundFile, SoundScanner, AUDIO_EXTENSIONS};

use crate::Result;

/// Volume assigned to every catalog entry
pub const DEFAULT_VOLUME: f32 = 0.7;

/// URL prefix under which the sounds directory is served
pub const SOUNDS_URL_PREFIX: &str = "/sounds";

/// Catalog-level logical sound, possibly backed by several recorded variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundDefinition {
    /// `<category>-<base name>`
    pub id: String,
    /// Title-cased display name
    pub name: String,
    pub category: String,
    /// Path of the first variant encountered
    pub primary_path: String,
    /// Every variant path, primary included, in enumeration order
    pub variants: Vec<String>,
    pub default_volume: f32,
}

impl SoundDefinition {
    pub fn has_variants(&self) -> bool {
        self.variants.len() > 1
    }
}

/// One-pass grouping of enumerated files into definitions
///
/// Keeps first-encounter order: definitions are stored in a `Vec` and
/// located through an identity index.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    definitions: Vec<SoundDefinition>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one enumerated file, grouping it with earlier variants
    pub fn push(&mut self, category: &str, file_name: &str) {
        let parsed = naming::parse_file_name(file_name);
        let id = naming::sound_id(category, &parsed.base_name);
        let path = format!("{}/{}/{}", SOUNDS_URL_PREFIX, category, file_name);

        match self.index.get(&id) {
            Some(&slot) => self.definitions[slot].variants.push(path),
            None => {
                self.index.insert(id.clone(), self.definitions.len());
                self.definitions.push(SoundDefinition {
                    id,
                    name: parsed.display_name,
                    category: category.to_string(),
                    primary_path: path.clone(),
                    variants: vec![path],
                    default_volume: DEFAULT_VOLUME,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn finish(self) -> Vec<SoundDefinition> {
        self.definitions
    }
}

/// Build a catalog from `(category, file name)` pairs
pub fn build_catalog<I, C, F>(files: I) -> Vec<SoundDefinition>
where
    I: IntoIterator<Item = (C, F)>,
    C: AsRef<str>,
    F: AsRef<str>,
{
    let mut builder = CatalogBuilder::new();
    for (category, file_name) in files {
        builder.push(category.as_ref(), file_name.as_ref());
    }
    builder.finish()
}

/// Scan a sounds root and build its catalog
///
/// Any enumeration failure is returned as a single error; a partially
/// scanned directory never yields a catalog.
pub fn load_catalog(sounds_root: &Path) -> Result<Vec<SoundDefinition>> {
    let files = SoundScanner::new(sounds_root).scan()?;
    let file_count = files.len();
    let catalog = build_catalog(files.into_iter().map(|f| (f.category, f.file_name)));

    info!(
        "Catalog built from {}: {} sounds ({} files)",
        sounds_root.display(),
        catalog.len(),
        file_count
    );

    Ok(catalog)
}
