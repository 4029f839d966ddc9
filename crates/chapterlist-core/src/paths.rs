use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "chapterlist.yaml";

pub const DEFAULT_CHAPTERS_DIR: &str = "translate";
pub const DEFAULT_DOCUMENT: &str = "index.html";
pub const DEFAULT_LIST_ID: &str = "chapterList";

pub const SUMMARY_FILE: &str = "SUMMARY.md";
pub const INTRODUCTION_FILE: &str = "introduction.md";

pub const CHAPTER_PREFIX: &str = "chapter";
pub const CHAPTER_EXTENSION: &str = ".md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub fn summary_path(chapters_dir: &Path) -> PathBuf {
    chapters_dir.join(SUMMARY_FILE)
}

pub fn introduction_path(chapters_dir: &Path) -> PathBuf {
    chapters_dir.join(INTRODUCTION_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
