use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("chapters directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to read chapter file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("chapter list <ul id=\"{id}\"> not found in {}", path.display())]
    RegionNotFound { path: PathBuf, id: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ChapterError>;
