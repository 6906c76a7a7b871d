//! Library browsing helpers
//!
//! Catalog-consumer logic: category pills, variant expansion when
//! randomization is off, search filtering, the "already added" marker and
//! instance labels.

use std::collections::HashSet;

use crate::catalog::naming::capitalize_first;
use crate::catalog::SoundDefinition;
use crate::mix::{ActiveMix, SoundInstance};

/// Pseudo-category matching every sound
pub const ALL_CATEGORIES: &str = "all";

/// `"all"` followed by each distinct normalized category, first-seen order
pub fn categories(catalog: &[SoundDefinition]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for sound in catalog {
        let norm = normalize_category(&sound.category);
        if !norm.is_empty() && seen.insert(norm.clone()) {
            out.push(norm);
        }
    }
    out
}

/// `"all"` → `"All"`, `"nature"` → `"Nature"`
pub fn display_category(category: &str) -> String {
    if category == ALL_CATEGORIES {
        "All".to_string()
    } else {
        capitalize_first(category)
    }
}

/// Selectable library entries
///
/// With randomization on every definition is one entry. With it off, a
/// multi-variant definition becomes one numbered entry per variant.
pub fn entries(catalog: &[SoundDefinition], randomize: bool) -> Vec<SoundInstance> {
    let mut out = Vec::with_capacity(catalog.len());
    for def in catalog {
        if randomize || !def.has_variants() {
            out.push(SoundInstance::from(def));
            continue;
        }
        for (j, variant) in def.variants.iter().enumerate() {
            let number = j + 1;
            out.push(SoundInstance {
                id: format!("{}-{}", def.id, number),
                sound_id: def.id.clone(),
                name: format!("{} {}", def.name, number),
                category: def.category.clone(),
                path: variant.clone(),
                variants: vec![variant.clone()],
                volume: def.default_volume,
                is_variant: true,
            });
        }
    }
    out
}

/// Entries in `category` whose name contains `query`, case-insensitively
pub fn filter<'a>(
    entries: &'a [SoundInstance],
    category: &str,
    query: &str,
) -> Vec<&'a SoundInstance> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|s| category == ALL_CATEGORIES || normalize_category(&s.category) == category)
        .filter(|s| s.name.to_lowercase().contains(&query))
        .collect()
}

/// Whether a library entry is already represented in the active mix
pub fn is_in_mix(entry: &SoundInstance, mix: &ActiveMix, randomize: bool) -> bool {
    if !randomize {
        return mix.contains_path(&entry.path);
    }
    let base = strip_trailing_number(&entry.name, true).to_lowercase();
    mix.iter()
        .any(|s| strip_trailing_number(&s.name, true).to_lowercase() == base)
}

/// Label shown for an instance in the active mix
///
/// Randomized: the bare name. Otherwise the name, with the `(N)` number
/// from the file path appended when the name does not already carry it.
pub fn instance_label(instance: &SoundInstance, randomize: bool) -> String {
    let base = strip_trailing_number(&instance.name, false);
    if randomize {
        return base.to_string();
    }

    let number = trailing_number(&instance.name).or_else(|| path_variant_number(&instance.path));
    match number {
        Some(n) if !instance.name.contains(n) => format!("{} {}", base, n),
        _ => instance.name.clone(),
    }
}

fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Digits of a whitespace-separated trailing number token
fn trailing_number(name: &str) -> Option<&str> {
    let trimmed = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.len() == name.len() || !trimmed.ends_with(char::is_whitespace) {
        return None;
    }
    Some(&name[trimmed.len()..])
}

/// Remove a trailing ` N` (or ` #N` when `allow_hash`) token
fn strip_trailing_number(name: &str, allow_hash: bool) -> &str {
    let digits_start = name.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits_start == name.len() {
        return name;
    }

    let mut head = &name[..digits_start];
    if allow_hash {
        head = head.strip_suffix('#').unwrap_or(head);
    }
    if !head.ends_with(char::is_whitespace) {
        return name;
    }
    head.trim_end()
}

/// The `N` from the first `(N)` in a file path
fn path_variant_number(path: &str) -> Option<&str> {
    path.match_indices('(').find_map(|(open, _)| {
        let rest = &path[open + 1..];
        let close = rest.find(')')?;
        let digits = &rest[..close];
        (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_catalog;

    fn sample_catalog() -> Vec<SoundDefinition> {
        build_catalog([
            ("nature", "rain.mp3"),
            ("nature", "rain (1).mp3"),
            ("Urban ", "cafe.mp3"),
            ("nature", "wind.mp3"),
        ])
    }

    #[test]
    fn test_categories_normalized_and_deduplicated() {
        assert_eq!(categories(&sample_catalog()), vec!["all", "nature", "urban"]);
        assert_eq!(display_category("all"), "All");
        assert_eq!(display_category("urban"), "Urban");
    }

    #[test]
    fn test_randomized_entries_are_definitions() {
        let entries = entries(&sample_catalog(), true);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].variants.len(), 2);
        assert!(!entries[0].is_variant);
    }

    #[test]
    fn test_expanded_entries_number_each_variant() {
        let entries = entries(&sample_catalog(), false);
        let names: Vec<&str> = entries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rain 1", "Rain 2", "Cafe", "Wind"]);

        assert_eq!(entries[1].id, "nature-rain-2");
        assert_eq!(entries[1].path, "/sounds/nature/rain (1).mp3");
        assert_eq!(entries[1].variants, vec!["/sounds/nature/rain (1).mp3".to_string()]);
        assert!(entries[1].is_variant);
        assert!(!entries[2].is_variant);
    }

    #[test]
    fn test_filter_by_category_and_query() {
        let entries = entries(&sample_catalog(), true);

        let nature: Vec<&str> = filter(&entries, "nature", "")
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(nature, vec!["Rain", "Wind"]);

        let found = filter(&entries, ALL_CATEGORIES, "CAF");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cafe");
    }

    #[test]
    fn test_in_mix_by_name_when_randomized() {
        let catalog = sample_catalog();
        let mut mix = crate::mix::MixReconciler::new(crate::store::MemoryStore::new());
        mix.set_randomize(false);
        mix.add(entries(&catalog, false)[1].clone());
        mix.set_randomize(true);

        let randomized = entries(&catalog, true);
        assert!(is_in_mix(&randomized[0], mix.active(), true));
        assert!(!is_in_mix(&randomized[2], mix.active(), true));
    }

    #[test]
    fn test_in_mix_by_path_when_expanded() {
        let catalog = sample_catalog();
        let expanded = entries(&catalog, false);
        let mut mix = crate::mix::MixReconciler::new(crate::store::MemoryStore::new());
        mix.set_randomize(false);
        mix.add(expanded[0].clone());

        assert!(is_in_mix(&expanded[0], mix.active(), false));
        assert!(!is_in_mix(&expanded[1], mix.active(), false));
    }

    #[test]
    fn test_strip_trailing_number() {
        assert_eq!(strip_trailing_number("Rain 2", false), "Rain");
        assert_eq!(strip_trailing_number("Rain #2", true), "Rain");
        assert_eq!(strip_trailing_number("Rain #2", false), "Rain #2");
        assert_eq!(strip_trailing_number("Area51", false), "Area51");
        assert_eq!(strip_trailing_number("Wind", false), "Wind");
    }

    #[test]
    fn test_instance_label() {
        let catalog = sample_catalog();
        let mut random = SoundInstance::from(&catalog[0]);
        random.path = "/sounds/nature/rain (1).mp3".to_string();

        assert_eq!(instance_label(&random, true), "Rain");
        assert_eq!(instance_label(&random, false), "Rain 1");

        let expanded = entries(&catalog, false);
        assert_eq!(instance_label(&expanded[1], false), "Rain 2");
        assert_eq!(instance_label(&expanded[1], true), "Rain");
    }

    #[test]
    fn test_path_variant_number_skips_non_numeric_groups() {
        assert_eq!(path_variant_number("/sounds/nature/birds (morning) (2).mp3"), Some("2"));
        assert_eq!(path_variant_number("/sounds/nature/rain (1).mp3"), Some("1"));
        assert_eq!(path_variant_number("/sounds/nature/birds (morning).mp3"), None);
        assert_eq!(path_variant_number("/sounds/nature/rain.mp3"), None);
    }
}
