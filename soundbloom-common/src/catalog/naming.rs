//! File name normalization for catalog entries
//!
//! Numbered copies of a recording (`ocean-wave.wav`, `ocean-wave (1).wav`)
//! collapse to the same base name so they group under one sound.

use std::path::Path;

/// Names derived from a single audio file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// File stem with any trailing `(N)` suffix removed
    pub base_name: String,
    /// Title-cased display name (`ocean-wave` → `Ocean Wave`)
    pub display_name: String,
    /// Numeric suffix, if the file was a numbered copy
    pub variant_number: Option<u32>,
}

/// Parse an audio file name into its base name and display name
///
/// ```
/// use soundbloom_common::catalog::naming::parse_file_name;
///
/// let parsed = parse_file_name("ocean-wave (1).wav");
/// assert_eq!(parsed.base_name, "ocean-wave");
/// assert_eq!(parsed.display_name, "Ocean Wave");
/// assert_eq!(parsed.variant_number, Some(1));
/// ```
pub fn parse_file_name(file_name: &str) -> ParsedName {
    let stem = file_stem(file_name);
    let (base_name, variant_number) = split_variant_suffix(stem);

    ParsedName {
        display_name: display_name(base_name),
        base_name: base_name.to_string(),
        variant_number,
    }
}

/// Stable catalog identity: `<category>-<base name, whitespace runs as '-'>`
pub fn sound_id(category: &str, base_name: &str) -> String {
    format!("{}-{}", category, hyphenate_whitespace(base_name))
}

/// Split on hyphens and upper-case the first letter of each segment
pub fn display_name(base_name: &str) -> String {
    base_name
        .split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
}

/// Detect `name (N)` with optional whitespace before the parenthesis
fn split_variant_suffix(stem: &str) -> (&str, Option<u32>) {
    let Some(inner) = stem.strip_suffix(')') else {
        return (stem, None);
    };
    let Some(open) = inner.rfind('(') else {
        return (stem, None);
    };

    let digits = &inner[open + 1..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return (stem, None);
    }

    let base = inner[..open].trim_end();
    if base.is_empty() {
        return (stem, None);
    }

    (base, digits.parse().ok())
}

fn hyphenate_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('-');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_is_its_own_base() {
        let parsed = parse_file_name("rain.mp3");
        assert_eq!(parsed.base_name, "rain");
        assert_eq!(parsed.display_name, "Rain");
        assert_eq!(parsed.variant_number, None);
    }

    #[test]
    fn test_numbered_suffix_stripped() {
        let parsed = parse_file_name("ocean-wave (12).flac");
        assert_eq!(parsed.base_name, "ocean-wave");
        assert_eq!(parsed.variant_number, Some(12));
    }

    #[test]
    fn test_suffix_without_space() {
        let parsed = parse_file_name("wind(2).ogg");
        assert_eq!(parsed.base_name, "wind");
        assert_eq!(parsed.variant_number, Some(2));
    }

    #[test]
    fn test_non_numeric_parenthesis_kept() {
        let parsed = parse_file_name("birds (morning).wav");
        assert_eq!(parsed.base_name, "birds (morning)");
        assert_eq!(parsed.variant_number, None);
    }

    #[test]
    fn test_bare_suffix_is_not_stripped() {
        let parsed = parse_file_name("(3).wav");
        assert_eq!(parsed.base_name, "(3)");
    }

    #[test]
    fn test_display_name_multi_segment() {
        assert_eq!(display_name("city-traffic-noise"), "City Traffic Noise");
    }

    #[test]
    fn test_display_name_keeps_inner_case() {
        assert_eq!(display_name("hVAC-hum"), "HVAC Hum");
    }

    #[test]
    fn test_sound_id_replaces_whitespace_runs() {
        assert_eq!(sound_id("nature", "ocean-wave"), "nature-ocean-wave");
        assert_eq!(sound_id("urban", "busy  street"), "urban-busy-street");
    }

    #[test]
    fn test_extension_only_last_dot() {
        let parsed = parse_file_name("lo.fi-hum.mp3");
        assert_eq!(parsed.base_name, "lo.fi-hum");
        assert_eq!(parsed.display_name, "Lo.fi Hum");
    }
}
