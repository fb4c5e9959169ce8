use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::{PlaylistError, Result};

/// Replace `path` with `contents` in one step.
///
/// The text goes to a temporary file next to the destination, which is then
/// renamed over it. Readers see either the old playlist or the new one. On any
/// failure the temporary file is removed and the old playlist is left as is.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source: std::io::Error| PlaylistError::Write {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_error)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".playlist-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    // The temp file starts out owner-only (0600)
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    tmp.as_file().sync_all().map_err(write_error)?;

    // Dropping the PersistError deletes the temp file.
    tmp.persist(path).map_err(|err| write_error(err.error))?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Permissions for the new playlist: those of the file it replaces, or the
/// default playlist mode for a fresh file.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(
        crate::core::constants::playlist::FILE_MODE,
    ))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
