use crate::chapter::ChapterRecord;
use crate::config::Config;
use crate::error::{ChapterError, Result};
use crate::io::atomic_write;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// PatchOptions / PatchReport
// ---------------------------------------------------------------------------

/// How the list region is located and how generated lines are laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchOptions {
    pub list_id: String,
    pub item_indent: String,
    pub closing_indent: String,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PatchOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            list_id: cfg.list_id.clone(),
            item_indent: cfg.item_indent.clone(),
            closing_indent: cfg.closing_indent.clone(),
        }
    }
}

impl PatchOptions {
    /// Opening `<ul ... id="ID" ...>`, inner content (non-greedy), first `</ul>`.
    fn region_re(&self) -> Regex {
        let pattern = format!(
            r#"(?s)(<ul\b[^>]*\sid\s*=\s*["']{}["'][^>]*>)(.*?)(</ul>)"#,
            regex::escape(&self.list_id)
        );
        // The id is escaped, so the pattern is always valid.
        Regex::new(&pattern).unwrap()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    /// False when the document was already up to date and nothing was written.
    pub changed: bool,
    pub chapters: usize,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn entity_re() -> &'static Regex {
    ENTITY_RE.get_or_init(|| {
        Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap()
    })
}

/// Escape `& < > "` for element text. Character references the author
/// already wrote (`&amp;`, `&#39;`, `&#x2014;`) are kept as they are.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' if entity_re().is_match(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_item(chapter: &ChapterRecord, indent: &str) -> String {
    format!(
        r##"{indent}<li><a href="#" data-chapter="{}">{}</a></li>"##,
        chapter.number,
        escape_html(&chapter.title)
    )
}

/// One `<li>` line per chapter, newline separated.
pub fn render_list(chapters: &[ChapterRecord], indent: &str) -> String {
    chapters
        .iter()
        .map(|ch| render_item(ch, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace the inner content of the first matching list region in `html`.
///
/// Returns `None` when the document has no such region. The opening and
/// closing tags are kept verbatim; everything else outside them is untouched.
pub fn render_document(
    html: &str,
    chapters: &[ChapterRecord],
    options: &PatchOptions,
) -> Option<String> {
    let caps = options.region_re().captures(html)?;
    let inner = caps.get(2)?;

    let fragment = render_list(chapters, &options.item_indent);
    let mut updated = String::with_capacity(html.len() + fragment.len());
    updated.push_str(&html[..inner.start()]);
    updated.push('\n');
    updated.push_str(&fragment);
    updated.push('\n');
    updated.push_str(&options.closing_indent);
    updated.push_str(&html[inner.end()..]);
    Some(updated)
}

// ---------------------------------------------------------------------------
// Document operations
// ---------------------------------------------------------------------------

fn load_and_render(
    document: &Path,
    chapters: &[ChapterRecord],
    options: &PatchOptions,
) -> Result<(String, String)> {
    if !document.is_file() {
        return Err(ChapterError::DocumentNotFound(document.to_path_buf()));
    }
    let html = std::fs::read_to_string(document)?;
    let updated =
        render_document(&html, chapters, options).ok_or_else(|| ChapterError::RegionNotFound {
            path: document.to_path_buf(),
            id: options.list_id.clone(),
        })?;
    Ok((html, updated))
}

/// Rewrite the chapter list region of `document` in place.
///
/// Nothing is written when the document is missing, has no region, or is
/// already up to date. The write itself is atomic.
pub fn patch(
    document: &Path,
    chapters: &[ChapterRecord],
    options: &PatchOptions,
) -> Result<PatchReport> {
    let (html, updated) = load_and_render(document, chapters, options)?;
    let changed = html != updated;
    if changed {
        atomic_write(document, updated.as_bytes())?;
        tracing::info!(document = %document.display(), chapters = chapters.len(), "chapter list updated");
    } else {
        tracing::debug!(document = %document.display(), "chapter list already up to date");
    }
    Ok(PatchReport {
        changed,
        chapters: chapters.len(),
    })
}

/// True when `patch` would leave `document` unchanged. Never writes.
pub fn is_up_to_date(
    document: &Path,
    chapters: &[ChapterRecord],
    options: &PatchOptions,
) -> Result<bool> {
    let (html, updated) = load_and_render(document, chapters, options)?;
    Ok(html == updated)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <nav>
        <div class="sidebar">
                <ul class="chapter-list" id="chapterList">
                </ul>
        </div>
        <ul class="links"><li>keep me</li></ul>
    </nav>
</body>
</html>
"#;

    fn chapters() -> Vec<ChapterRecord> {
        vec![
            ChapterRecord::new(1, Some("Intro".to_string()), "chapter1.md"),
            ChapterRecord::new(2, Some("Setup Guide".to_string()), "chapter2.md"),
        ]
    }

    #[test]
    fn renders_one_anchor_per_chapter() {
        let list = render_list(&chapters(), "  ");
        assert_eq!(
            list,
            "  <li><a href=\"#\" data-chapter=\"1\">Intro</a></li>\n  \
             <li><a href=\"#\" data-chapter=\"2\">Setup Guide</a></li>"
        );
    }

    #[test]
    fn titles_are_escaped() {
        let ch = ChapterRecord::new(4, Some("Cats & <Dogs>".to_string()), "chapter4.md");
        assert!(render_item(&ch, "").contains(">Cats &amp; &lt;Dogs&gt;<"));
    }

    #[test]
    fn existing_entities_are_not_escaped_twice() {
        assert_eq!(escape_html("Q&amp;A"), "Q&amp;A");
        assert_eq!(escape_html("it&#39;s &#x2014; done"), "it&#39;s &#x2014; done");
        assert_eq!(escape_html("R&D; & more"), "R&D; &amp; more");
        assert_eq!(escape_html("a && b &; c"), "a &amp;&amp; b &amp;; c");
    }

    #[test]
    fn replaces_only_region_interior() {
        let out = render_document(PAGE, &chapters(), &PatchOptions::default()).unwrap();
        let expected_region = format!(
            "<ul class=\"chapter-list\" id=\"chapterList\">\n{0}<li><a href=\"#\" data-chapter=\"1\">Intro</a></li>\n{0}<li><a href=\"#\" data-chapter=\"2\">Setup Guide</a></li>\n{1}</ul>",
            " ".repeat(20),
            " ".repeat(16)
        );
        assert!(out.contains(&expected_region), "{out}");
        assert!(out.starts_with("<!DOCTYPE html>\n<html>\n<body>\n"));
        assert!(out.contains(r#"<ul class="links"><li>keep me</li></ul>"#));
        assert!(out.ends_with("</body>\n</html>\n"));
    }

    #[test]
    fn rendering_is_a_fixed_point() {
        let opts = PatchOptions::default();
        let once = render_document(PAGE, &chapters(), &opts).unwrap();
        let twice = render_document(&once, &chapters(), &opts).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn id_matches_regardless_of_attribute_order() {
        let html = "<ul id='chapterList' class=\"x\"><li>old</li></ul>";
        let out = render_document(html, &chapters(), &PatchOptions::default()).unwrap();
        assert!(!out.contains("old"));
        assert!(out.starts_with("<ul id='chapterList' class=\"x\">\n"));
    }

    #[test]
    fn similar_attributes_do_not_match() {
        let html = r#"<ul data-id="chapterList"></ul><ul id="chapterListing"></ul>"#;
        assert!(render_document(html, &chapters(), &PatchOptions::default()).is_none());
    }

    #[test]
    fn dollar_signs_in_titles_are_literal() {
        let ch = vec![ChapterRecord::new(1, Some("Costs $1 and $2".to_string()), "chapter1.md")];
        let out = render_document(PAGE, &ch, &PatchOptions::default()).unwrap();
        assert!(out.contains(">Costs $1 and $2<"));
    }

    #[test]
    fn patch_writes_then_reports_unchanged() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("index.html");
        std::fs::write(&doc, PAGE).unwrap();
        let opts = PatchOptions::default();

        let first = patch(&doc, &chapters(), &opts).unwrap();
        assert!(first.changed);
        assert_eq!(first.chapters, 2);
        let after_first = std::fs::read(&doc).unwrap();

        let second = patch(&doc, &chapters(), &opts).unwrap();
        assert!(!second.changed);
        assert_eq!(std::fs::read(&doc).unwrap(), after_first);
        assert!(is_up_to_date(&doc, &chapters(), &opts).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn patch_keeps_document_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("index.html");
        std::fs::write(&doc, PAGE).unwrap();
        std::fs::set_permissions(&doc, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(patch(&doc, &chapters(), &PatchOptions::default()).unwrap().changed);
        let mode = std::fs::metadata(&doc).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn patch_writes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.html");
        let link = dir.path().join("index.html");
        std::fs::write(&real, PAGE).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert!(patch(&link, &chapters(), &PatchOptions::default()).unwrap().changed);
        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(std::fs::read_to_string(&real).unwrap().contains(">Setup Guide</a>"));
    }

    #[test]
    fn patch_missing_region_leaves_document_untouched() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("index.html");
        let original = "<html><body><ol id=\"chapterList\"></ol></body></html>";
        std::fs::write(&doc, original).unwrap();

        match patch(&doc, &chapters(), &PatchOptions::default()) {
            Err(ChapterError::RegionNotFound { id, .. }) => assert_eq!(id, "chapterList"),
            other => panic!("expected RegionNotFound, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), original);
    }

    #[test]
    fn patch_missing_document() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("index.html");
        assert!(matches!(
            patch(&doc, &chapters(), &PatchOptions::default()),
            Err(ChapterError::DocumentNotFound(_))
        ));
        assert!(!doc.exists());
    }

    #[test]
    fn stale_document_is_not_up_to_date() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("index.html");
        std::fs::write(&doc, PAGE).unwrap();
        assert!(!is_up_to_date(&doc, &chapters(), &PatchOptions::default()).unwrap());
        assert_eq!(std::fs::read_to_string(&doc).unwrap(), PAGE);
    }

    #[test]
    fn custom_id_and_indent() {
        let opts = PatchOptions {
            list_id: "toc".to_string(),
            item_indent: "\t".to_string(),
            closing_indent: String::new(),
        };
        let out = render_document("<ul id=\"toc\"></ul>", &chapters(), &opts).unwrap();
        assert_eq!(
            out,
            "<ul id=\"toc\">\n\t<li><a href=\"#\" data-chapter=\"1\">Intro</a></li>\n\t<li><a href=\"#\" data-chapter=\"2\">Setup Guide</a></li>\n</ul>"
        );
    }
}
