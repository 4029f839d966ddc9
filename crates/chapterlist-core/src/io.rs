use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers see either the old content or the new content, never a mix.
///
/// An existing `path` is written through: symlinks are followed to their
/// target and the target's permissions carry over to the new content.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let target = if path.exists() {
        std::fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    if target.exists() {
        tmp.as_file()
            .set_permissions(std::fs::metadata(&target)?.permissions())?;
    }
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

/// Write `data` only when it differs from what is on disk. Returns true if written.
pub fn write_if_changed(path: &Path, data: &str) -> Result<bool> {
    if path.exists() && std::fs::read_to_string(path)? == data {
        return Ok(false);
    }
    atomic_write(path, data.as_bytes())?;
    Ok(true)
}
