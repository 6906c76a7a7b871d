//! End-to-end tests: scan a sounds tree, build the catalog, mix, save and
//! reload through a file-backed store.

use soundbloom_common::catalog::load_catalog;
use soundbloom_common::library;
use soundbloom_common::mix::{AddOutcome, Mix, MixReconciler, SoundInstance};
use soundbloom_common::store::{JsonFileStore, KeyValueStore, MemoryStore, MIXES_KEY};
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

fn sounds_tree(root: &Path) {
    for (category, files) in [
        ("nature", vec!["ocean-wave.wav", "ocean-wave (1).wav", "rain.mp3", "wind.ogg"]),
        ("urban", vec!["city-traffic-noise.mp3", "cafe.flac", "readme.txt"]),
    ] {
        let dir = root.join(category);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"").unwrap();
        }
    }
}

fn instance(id: &str, name: &str, category: &str, volume: f32) -> SoundInstance {
    SoundInstance {
        id: id.to_string(),
        sound_id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        path: format!("/sounds/{}/{}.mp3", category, id),
        variants: Vec::new(),
        volume,
        is_variant: false,
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_catalog_from_directory_tree() {
    let dir = tempfile::tempdir().unwrap();
    sounds_tree(dir.path());

    let catalog = load_catalog(dir.path()).unwrap();
    let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "nature-ocean-wave",
            "nature-rain",
            "nature-wind",
            "urban-cafe",
            "urban-city-traffic-noise",
        ]
    );

    let ocean = &catalog[0];
    assert_eq!(ocean.name, "Ocean Wave");
    assert_eq!(ocean.variants.len(), 2);

    let traffic = &catalog[4];
    assert_eq!(traffic.name, "City Traffic Noise");
}

#[test]
fn test_rescan_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    sounds_tree(dir.path());

    assert_eq!(load_catalog(dir.path()).unwrap(), load_catalog(dir.path()).unwrap());
}

// =============================================================================
// Active mix
// =============================================================================

#[test]
fn test_duplicate_family_rejected_while_randomized() {
    let mut mix = MixReconciler::new(MemoryStore::new());
    mix.add(instance("rain-1", "Rain 1", "nature", 0.7));

    let outcome = mix.add(instance("rain-2", "Rain 2", "nature", 0.7));
    assert!(matches!(outcome, AddOutcome::AlreadyInMix { .. }));
    assert_eq!(mix.active().len(), 1);
}

#[test]
fn test_randomize_toggle_reduces_to_one_per_family() {
    let mut mix = MixReconciler::new(MemoryStore::new());
    mix.set_randomize(false);
    mix.add(instance("rain-1", "Rain 1", "nature", 0.7));
    mix.add(instance("rain-2", "Rain 2", "nature", 0.7));
    mix.add(instance("wind", "Wind", "nature", 0.7));
    assert_eq!(mix.active().len(), 3);

    mix.set_randomize(true);
    assert_eq!(mix.active().len(), 2);
    let rain_count = mix
        .active()
        .iter()
        .filter(|s| s.comparison_key() == "Rain")
        .count();
    assert_eq!(rain_count, 1);
}

#[test]
fn test_randomized_catalog_add_picks_known_variant() {
    let dir = tempfile::tempdir().unwrap();
    sounds_tree(dir.path());
    let catalog = load_catalog(dir.path()).unwrap();

    let mut mix = MixReconciler::new(MemoryStore::new());
    let entry = &library::entries(&catalog, true)[0];
    mix.add(entry.clone());

    let added = &mix.active().sounds()[0];
    assert!(catalog[0].variants.contains(&added.path));
    assert!(library::is_in_mix(entry, mix.active(), true));
}

// =============================================================================
// Saved mixes
// =============================================================================

#[test]
fn test_save_load_round_trip_preserves_order() {
    let mut mix = MixReconciler::new(MemoryStore::new());
    mix.add(instance("rain", "Rain", "nature", 0.3));
    mix.add(instance("cafe", "Cafe", "urban", 0.9));
    mix.add(instance("wind", "Wind", "nature", 0.5));
    let expected: Vec<SoundInstance> = mix.active().sounds().to_vec();

    let id = mix.save_mix("Focus", None).unwrap().unwrap();
    mix.remove("rain");
    mix.update_volume("cafe", 0.1);

    assert!(mix.load_mix(&id));
    let loaded = mix.active().sounds();
    assert_eq!(loaded.len(), 3);
    for (got, want) in loaded.iter().zip(&expected) {
        assert_eq!(got.category, want.category);
        assert_eq!(got.name, want.name);
        assert_eq!(got.volume, want.volume);
        assert_eq!(got.path, want.path);
    }
}

#[test]
fn test_delete_is_idempotent() {
    let mut mix = MixReconciler::new(MemoryStore::new());
    let keep = mix.save_mix("Keep", None).unwrap().unwrap();
    let gone = mix.save_mix("Gone", None).unwrap().unwrap();

    assert!(!mix.delete_mix("missing").unwrap());
    assert_eq!(mix.saved_mixes().len(), 2);

    assert!(mix.delete_mix(&gone).unwrap());
    assert!(!mix.delete_mix(&gone).unwrap());
    let ids: Vec<&str> = mix.saved_mixes().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![keep.as_str()]);
}

#[test]
fn test_mixes_survive_reopening_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");

    {
        let mut mix = MixReconciler::new(JsonFileStore::open(&path).unwrap());
        mix.add(instance("rain", "Rain", "nature", 0.4));
        mix.save_mix("Evening", None).unwrap();
    }

    let mix = MixReconciler::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(mix.saved_mixes().len(), 1);
    assert_eq!(mix.saved_mixes()[0].name, "Evening");
    assert_eq!(mix.saved_mixes()[0].sounds[0].id, "rain");
    assert!(mix.active().is_empty());
}

#[test]
fn test_corrupt_store_starts_empty_and_is_overwritten() {
    let mut store = MemoryStore::new();
    store.set(MIXES_KEY, "definitely not json").unwrap();
    let shared = Rc::new(RefCell::new(store));

    let mut mix = MixReconciler::new(Rc::clone(&shared));
    assert!(mix.saved_mixes().is_empty());

    mix.save_mix("Fresh", None).unwrap();
    let text = shared.get(MIXES_KEY).unwrap().unwrap();
    let stored: Vec<Mix> = serde_json::from_str(&text).unwrap();
    assert_eq!(stored.len(), 1);
}
