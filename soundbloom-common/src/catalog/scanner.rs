//! Sound directory enumeration
//!
//! The sounds root holds one sub-directory per category, each containing
//! looping audio clips. Enumeration yields `(category, file name)` pairs in
//! file-name order; any traversal error aborts the whole scan.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Audio extensions accepted into the catalog (compared case-insensitively)
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];

/// Sound directory scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission denied when accessing path
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Entry name is not valid UTF-8 and cannot be served as a URL path
    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    /// General I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

/// One enumerated audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundFile {
    pub category: String,
    pub file_name: String,
}

/// Category directory scanner
pub struct SoundScanner {
    root: PathBuf,
}

impl SoundScanner {
    /// Create a scanner over the given sounds root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sounds root this scanner reads
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate every audio file one level below each category directory
    pub fn scan(&self) -> Result<Vec<SoundFile>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::PathNotFound(self.root.clone()));
        }

        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(map_walk_error)?;

            // Depth 1 files sit outside any category
            if entry.depth() != 2 || !entry.file_type().is_file() {
                continue;
            }

            if !is_audio_file(entry.path()) {
                continue;
            }

            let file_name = utf8_name(entry.path(), entry.file_name().to_str())?;
            let category = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str());
            let category = utf8_name(entry.path(), category)?;

            files.push(SoundFile {
                category: category.to_string(),
                file_name: file_name.to_string(),
            });
        }

        tracing::debug!(
            "Scanned {}: {} audio files",
            self.root.display(),
            files.len()
        );

        Ok(files)
    }
}

/// Check whether a path carries one of the accepted audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

fn utf8_name<'a>(path: &Path, name: Option<&'a str>) -> Result<&'a str, ScanError> {
    name.ok_or_else(|| ScanError::InvalidFileName(path.to_path_buf()))
}

fn map_walk_error(err: walkdir::Error) -> ScanError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.io_error().map(|e| e.kind()) {
        Some(std::io::ErrorKind::PermissionDenied) => ScanError::PermissionDenied(path),
        Some(std::io::ErrorKind::NotFound) => ScanError::PathNotFound(path),
        _ => ScanError::IoError(err.to_string()),
    }
}
