use crate::error::{ChapterError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings read from `chapterlist.yaml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_chapters_dir")]
    pub chapters_dir: PathBuf,
    #[serde(default = "default_document")]
    pub document: PathBuf,
    #[serde(default = "default_list_id")]
    pub list_id: String,
    /// Whitespace placed before each generated `<li>`.
    #[serde(default = "default_item_indent")]
    pub item_indent: String,
    /// Whitespace placed before the closing `</ul>`.
    #[serde(default = "default_closing_indent")]
    pub closing_indent: String,
}

fn default_chapters_dir() -> PathBuf {
    PathBuf::from(paths::DEFAULT_CHAPTERS_DIR)
}

fn default_document() -> PathBuf {
    PathBuf::from(paths::DEFAULT_DOCUMENT)
}

fn default_list_id() -> String {
    paths::DEFAULT_LIST_ID.to_string()
}

fn default_item_indent() -> String {
    " ".repeat(20)
}

fn default_closing_indent() -> String {
    " ".repeat(16)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chapters_dir: default_chapters_dir(),
            document: default_document(),
            list_id: default_list_id(),
            item_indent: default_item_indent(),
            closing_indent: default_closing_indent(),
        }
    }
}

impl Config {
    /// Load `chapterlist.yaml` from `root`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        // An empty file deserializes to null, not to a mapping.
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let id_ok = !self.list_id.is_empty()
            && self
                .list_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !id_ok {
            return Err(ChapterError::InvalidConfig(format!(
                "list_id '{}' must be a non-empty HTML id (letters, digits, '-', '_')",
                self.list_id
            )));
        }
        for (field, value) in [
            ("item_indent", &self.item_indent),
            ("closing_indent", &self.closing_indent),
        ] {
            if !value.chars().all(|c| c == ' ' || c == '\t') {
                return Err(ChapterError::InvalidConfig(format!(
                    "{field} must contain only spaces or tabs"
                )));
            }
        }
        Ok(())
    }

    pub fn chapters_dir(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.chapters_dir)
    }

    pub fn document(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.document)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
