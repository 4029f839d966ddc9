//! mdBook `SUMMARY.md` generation from the same ordered chapter list.

use crate::chapter::{extract_title, ChapterRecord};
use crate::error::{ChapterError, Result};
use crate::io::write_if_changed;
use crate::paths::{self, INTRODUCTION_FILE};
use std::path::Path;

/// Render a `SUMMARY.md` body. Links are relative to the chapters directory.
///
/// `introduction` is the title of the prefix chapter, when the book has one.
pub fn render_summary(chapters: &[ChapterRecord], introduction: Option<&str>) -> String {
    let mut lines = vec!["# Summary".to_string(), String::new()];
    if let Some(title) = introduction {
        lines.push(format!("[{}](./{INTRODUCTION_FILE})", escape_link_text(title)));
        lines.push(String::new());
    }
    for ch in chapters {
        lines.push(format!(
            "- [{}](./{})",
            escape_link_text(&ch.title),
            ch.filename
        ));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

/// Title of `introduction.md` in `chapters_dir`, if that file exists.
pub fn introduction_title(chapters_dir: &Path) -> Result<Option<String>> {
    let path = paths::introduction_path(chapters_dir);
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|source| ChapterError::FileRead { path, source })?;
    Ok(Some(
        extract_title(&content).unwrap_or_else(|| "Introduction".to_string()),
    ))
}

/// Write the summary to `path`. Returns true if the file changed.
pub fn write_summary(
    path: &Path,
    chapters: &[ChapterRecord],
    introduction: Option<&str>,
) -> Result<bool> {
    let body = render_summary(chapters, introduction);
    let changed = write_if_changed(path, &body)?;
    tracing::debug!(path = %path.display(), changed, "summary written");
    Ok(changed)
}
