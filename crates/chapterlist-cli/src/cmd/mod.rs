pub mod check;
pub mod list;
pub mod summary;
pub mod update;

use anyhow::{bail, Context};
use chapterlist_core::{chapter, config::Config, paths, ChapterError, ChapterRecord, PatchOptions};
use std::path::{Path, PathBuf};

/// Resolved locations and settings for one invocation.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub chapters_dir: PathBuf,
    pub document: PathBuf,
}

impl Project {
    /// Load `chapterlist.yaml` under `root`; explicit flags win over the file.
    pub fn load(
        root: &Path,
        chapters_dir: Option<&Path>,
        document: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let config = Config::load(root).context("failed to load chapterlist.yaml")?;
        let chapters_dir = match chapters_dir {
            Some(dir) => paths::resolve(root, dir),
            None => config.chapters_dir(root),
        };
        let document = match document {
            Some(doc) => paths::resolve(root, doc),
            None => config.document(root),
        };
        tracing::debug!(
            root = %root.display(),
            chapters_dir = %chapters_dir.display(),
            document = %document.display(),
            "resolved project"
        );
        Ok(Self {
            root: root.to_path_buf(),
            config,
            chapters_dir,
            document,
        })
    }

    pub fn patch_options(&self) -> PatchOptions {
        PatchOptions::from(&self.config)
    }

    /// Discover chapters, failing with operator guidance when there are none.
    pub fn chapters(&self) -> anyhow::Result<Vec<ChapterRecord>> {
        let chapters = match chapter::discover(&self.chapters_dir) {
            Ok(chapters) => chapters,
            Err(ChapterError::DirectoryNotFound(dir)) => bail!(
                "chapters directory not found: {}\n  create it and add files named chapter1.md, chapter2.md, ...",
                dir.display()
            ),
            Err(e) => return Err(e).context("failed to scan chapters"),
        };
        if chapters.is_empty() {
            bail!(
                "no chapter files in {}\n  add files named chapter1.md, chapter2.md, ...",
                self.chapters_dir.display()
            );
        }
        Ok(chapters)
    }

    /// `path` relative to the project root, for messages.
    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}

pub fn print_chapters(chapters: &[ChapterRecord]) {
    println!("Found {} chapters:", chapters.len());
    for ch in chapters {
        println!("  {}. {} ({})", ch.number, ch.title, ch.filename);
    }
}
