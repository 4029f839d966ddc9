use crate::error::{ChapterError, Result};
use crate::paths::{CHAPTER_EXTENSION, CHAPTER_PREFIX};
use regex::Regex;
use serde::Serialize;
use std::ffi::OsString;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ChapterRecord
// ---------------------------------------------------------------------------

/// One discovered chapter file.
///
/// `number` is what the host document's navigation refers to (`data-chapter`),
/// so it is the stable identifier; `filename` is only kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    pub number: u32,
    pub title: String,
    pub filename: String,
}

impl ChapterRecord {
    /// Build a record, falling back to `"Chapter <number>"` when no heading was found.
    pub fn new(number: u32, title: Option<String>, filename: impl Into<String>) -> Self {
        Self {
            number,
            title: title.unwrap_or_else(|| fallback_title(number)),
            filename: filename.into(),
        }
    }
}

pub fn fallback_title(number: u32) -> String {
    format!("Chapter {number}")
}

// ---------------------------------------------------------------------------
// Filename and heading patterns
// ---------------------------------------------------------------------------

static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static HEADING_RE: OnceLock<Regex> = OnceLock::new();

fn number_re() -> &'static Regex {
    NUMBER_RE.get_or_init(|| Regex::new(r"chapter(\d+)").unwrap())
}

fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| Regex::new(r"^#+\s+(.+)$").unwrap())
}

/// `chapter*.md`, case-sensitive.
pub fn is_chapter_file(name: &str) -> bool {
    name.starts_with(CHAPTER_PREFIX) && name.ends_with(CHAPTER_EXTENSION)
}

/// The digits right after the first `chapter` in `name`, if they fit in a `u32`.
pub fn chapter_number(name: &str) -> Option<u32> {
    number_re()
        .captures(name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Text of the first markdown heading line (`#`+, whitespace, text), trimmed.
///
/// Lines whose heading text is blank are skipped, so the result is never empty.
pub fn extract_title(markdown: &str) -> Option<String> {
    markdown.lines().find_map(|line| {
        let caps = heading_re().captures(line)?;
        let title = caps[1].trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Scan `dir` for chapter files and return them ordered by chapter number.
///
/// A file whose name has no parseable number sorts as chapter 0. Any read
/// failure aborts the scan; no partial list is returned.
pub fn discover(dir: &Path) -> Result<Vec<ChapterRecord>> {
    if !dir.is_dir() {
        return Err(ChapterError::DirectoryNotFound(dir.to_path_buf()));
    }

    // (number, display name, name on disk)
    let mut candidates: Vec<(u32, String, OsString)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let os_name = entry.file_name();
        let name = os_name.to_string_lossy().into_owned();
        if !is_chapter_file(&name) || !entry.path().is_file() {
            continue;
        }
        let number = chapter_number(&name).unwrap_or_else(|| {
            tracing::warn!(file = %name, "no chapter number in file name, using 0");
            0
        });
        candidates.push((number, name, os_name));
    }
    // Stable: equal numbers keep directory-listing order.
    candidates.sort_by_key(|(number, _, _)| *number);

    let mut chapters = Vec::with_capacity(candidates.len());
    for (number, name, os_name) in candidates {
        let path = dir.join(&os_name);
        let content = std::fs::read_to_string(&path)
            .map_err(|source| ChapterError::FileRead { path, source })?;
        let title = extract_title(&content);
        if title.is_none() {
            tracing::debug!(file = %name, "no heading found, using fallback title");
        }
        chapters.push(ChapterRecord::new(number, title, name));
    }

    tracing::debug!(dir = %dir.display(), count = chapters.len(), "discovered chapters");
    Ok(chapters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
