//! Stylesheet entry-point discovery.
//!
//! At most one stylesheet source is considered per build cycle: the first
//! recognized filename found in the styles directory, in priority order.

use std::path::{Path, PathBuf};

/// Recognized entry-point filenames, in priority order. The first one that
/// exists as a regular file wins, regardless of directory listing order.
pub const STYLE_FILENAMES: [&str; 4] = [
    "style.css.sass",
    "style.sass",
    "style.css.scss",
    "style.scss",
];

/// Result of entry-point discovery for one build cycle.
#[derive(Debug)]
pub enum StyleEntry {
    /// No recognized stylesheet source exists. A normal steady state, not an
    /// error.
    NotFound,
    /// A compilable stylesheet source was found.
    Available(AvailableEntry),
}

/// A located stylesheet source, plus the compiled asset path once known.
#[derive(Debug)]
pub struct AvailableEntry {
    dir: PathBuf,
    filename: &'static str,
    relative_path: Option<String>,
}

impl StyleEntry {
    /// Scan `styles_dir` for the first recognized entry-point filename.
    ///
    /// Pure filesystem query: a missing directory, or I/O errors during the
    /// existence checks, yield [`StyleEntry::NotFound`].
    pub fn locate(styles_dir: &Path) -> Self {
        if !styles_dir.is_dir() {
            return Self::NotFound;
        }
        for filename in STYLE_FILENAMES {
            if styles_dir.join(filename).is_file() {
                return Self::Available(AvailableEntry {
                    dir: styles_dir.to_path_buf(),
                    filename,
                    relative_path: None,
                });
            }
        }
        Self::NotFound
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Site-relative path of the compiled asset, once a compile succeeded.
    pub fn relative_path(&self) -> Option<&str> {
        match self {
            Self::NotFound => None,
            Self::Available(entry) => entry.relative_path.as_deref(),
        }
    }
}

impl AvailableEntry {
    /// Styles directory the entry was found in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Recognized filename of the entry point.
    pub fn filename(&self) -> &str {
        self.filename
    }

    /// Full path of the stylesheet source.
    pub fn source_path(&self) -> PathBuf {
        self.dir.join(self.filename)
    }

    /// Record the compiled asset path. Write-once: later calls within the
    /// same cycle keep the first value.
    pub(crate) fn record_relative_path(&mut self, relative_path: String) {
        self.relative_path.get_or_insert(relative_path);
    }
}
