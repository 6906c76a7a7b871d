//! Sound instances and the comparison key used for uniqueness

use serde::{Deserialize, Serialize};

use crate::catalog::SoundDefinition;

/// A playable occurrence of a sound in the active mix
///
/// Bound to one concrete variant path with its own volume. The instance
/// `id` is independent of the catalog `sound_id`, so one logical sound can
/// appear with different variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundInstance {
    pub id: String,
    /// Catalog identity this instance was created from
    pub sound_id: String,
    pub name: String,
    pub category: String,
    /// Concrete variant being played
    pub path: String,
    #[serde(default)]
    pub variants: Vec<String>,
    /// 0.0–1.0
    pub volume: f32,
    /// Set for entries produced by expanding a multi-variant definition
    #[serde(default)]
    pub is_variant: bool,
}

impl SoundInstance {
    pub fn comparison_key(&self) -> String {
        comparison_key(&self.name)
    }
}

impl From<&SoundDefinition> for SoundInstance {
    fn from(def: &SoundDefinition) -> Self {
        Self {
            id: def.id.clone(),
            sound_id: def.id.clone(),
            name: def.name.clone(),
            category: def.category.clone(),
            path: def.primary_path.clone(),
            variants: def.variants.clone(),
            volume: def.default_volume,
            is_variant: false,
        }
    }
}

impl From<SoundDefinition> for SoundInstance {
    fn from(def: SoundDefinition) -> Self {
        Self::from(&def)
    }
}

/// Normalized display name for "same logical sound" checks
///
/// Drops every whitespace token containing `#`, then a trailing token made
/// only of ASCII digits. `"Rain 2"` and `"Rain #1"` both reduce to `"Rain"`.
/// A name such as `"Zone 51"` reduces to `"Zone"` as well.
pub fn comparison_key(name: &str) -> String {
    let mut tokens: Vec<&str> = name
        .split_whitespace()
        .filter(|token| !token.contains('#'))
        .collect();

    if tokens
        .last()
        .is_some_and(|token| token.chars().all(|c| c.is_ascii_digit()))
    {
        tokens.pop();
    }

    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    #[test]
    fn test_comparison_key_strips_trailing_number() {
        assert_eq!(comparison_key("Rain 1"), "Rain");
        assert_eq!(comparison_key("Rain 2"), "Rain");
        assert_eq!(comparison_key("Rain"), "Rain");
    }

    #[test]
    fn test_comparison_key_strips_hash_tokens() {
        assert_eq!(comparison_key("Ocean Wave #3"), "Ocean Wave");
        assert_eq!(comparison_key("Ocean #a Wave"), "Ocean Wave");
    }

    #[test]
    fn test_comparison_key_keeps_inner_numbers() {
        assert_eq!(comparison_key("Track 9 Loop"), "Track 9 Loop");
    }

    #[test]
    fn test_comparison_key_conflates_numeric_names() {
        assert_eq!(comparison_key("Zone 51"), comparison_key("Zone 7"));
    }

    #[test]
    fn test_instance_from_definition() {
        let catalog = build_catalog([("nature", "rain.mp3"), ("nature", "rain (1).mp3")]);
        let instance = SoundInstance::from(&catalog[0]);

        assert_eq!(instance.id, "nature-rain");
        assert_eq!(instance.sound_id, "nature-rain");
        assert_eq!(instance.path, "/sounds/nature/rain.mp3");
        assert_eq!(instance.variants.len(), 2);
        assert!(!instance.is_variant);
        assert!((instance.volume - 0.7).abs() < f32::EPSILON);
    }
}
