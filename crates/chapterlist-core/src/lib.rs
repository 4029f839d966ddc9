pub mod chapter;
pub mod config;
pub mod error;
pub mod io;
pub mod patch;
pub mod paths;
pub mod summary;

pub use chapter::{discover, ChapterRecord};
pub use error::{ChapterError, Result};
pub use patch::{patch, PatchOptions, PatchReport};
