//! Save, create, trash and delete.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::FileOpError;
use crate::observability::spans::file_op_span;
use crate::Result;

/// Permission bits given to newly created files.
pub const DEFAULT_CREATE_MODE: u32 = 0o600;

/// Permission bits of an existing file.
///
/// # Errors
///
/// Returns an error if the file's metadata cannot be read.
pub fn file_permissions(path: &Path) -> Result<u32> {
    let metadata = fs::metadata(path)?;
    Ok(mode_of(&metadata.permissions()))
}

/// Replace the content of an existing file, keeping its permission bits.
///
/// # Errors
///
/// Returns [`FileOpError::Save`] if the file cannot be stat'ed, the
/// temporary file cannot be written, or the final rename fails. The target
/// is untouched in every failure case.
pub fn save_file(path: &Path, content: &str) -> Result<()> {
    let _span = file_op_span("save", path).entered();
    let to_err = |source| FileOpError::Save {
        path: path.display().to_string(),
        source,
    };

    let permissions = fs::metadata(path).map_err(to_err)?.permissions();
    let temp = temp_path_for(path).map_err(to_err)?;

    let result =
        write_temp(&temp, content, Some(permissions)).and_then(|()| fs::rename(&temp, path));
    if let Err(e) = result {
        discard(&temp);
        return Err(to_err(e).into());
    }

    tracing::info!(bytes = content.len(), "File saved");
    Ok(())
}

/// Create a new file readable and writable only by its owner.
///
/// Missing parent directories are created. An existing file at `path` is
/// never overwritten.
///
/// # Errors
///
/// Returns [`FileOpError::Create`] if the file already exists or any step of
/// writing it fails.
pub fn create_file(path: &Path, content: &str) -> Result<()> {
    let _span = file_op_span("create", path).entered();
    let to_err = |source| FileOpError::Create {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    let temp = temp_path_for(path).map_err(to_err)?;

    let result = write_temp(&temp, content, owner_only_permissions())
        .and_then(|()| move_no_clobber(&temp, path));
    if let Err(e) = result {
        discard(&temp);
        return Err(to_err(e).into());
    }

    tracing::info!(bytes = content.len(), "File created");
    Ok(())
}

/// Move a file to the system trash.
///
/// # Errors
///
/// Returns [`FileOpError::Trash`] with the platform's reason on failure.
pub fn trash_file(path: &Path) -> Result<()> {
    let _span = file_op_span("trash", path).entered();
    if let Err(e) = fs::symlink_metadata(path) {
        return Err(FileOpError::Trash {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into());
    }
    trash::delete(path).map_err(|e| FileOpError::Trash {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!("File moved to trash");
    Ok(())
}

/// Permanently delete a file.
///
/// # Errors
///
/// Returns [`FileOpError::Delete`] with the underlying I/O error.
pub fn delete_file(path: &Path) -> Result<()> {
    let _span = file_op_span("delete", path).entered();
    fs::remove_file(path).map_err(|source| FileOpError::Delete {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("File deleted");
    Ok(())
}

/// Trash every path, continuing past failures.
///
/// # Errors
///
/// Returns [`FileOpError::PartialFailure`] if any path failed; the others
/// are still trashed.
pub fn trash_files<P: AsRef<Path>>(paths: &[P]) -> Result<usize> {
    best_effort(paths, trash_file)
}

/// Delete every path, continuing past failures.
///
/// # Errors
///
/// Returns [`FileOpError::PartialFailure`] if any path failed; the others
/// are still deleted.
pub fn delete_files<P: AsRef<Path>>(paths: &[P]) -> Result<usize> {
    best_effort(paths, delete_file)
}

fn best_effort<P, F>(paths: &[P], op: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> Result<()>,
{
    let mut succeeded = 0;
    let mut errors = Vec::new();

    for path in paths {
        match op(path.as_ref()) {
            Ok(()) => succeeded += 1,
            Err(e) => {
                tracing::error!("{e}");
                errors.push(e.to_string());
            }
        }
    }

    if errors.is_empty() {
        return Ok(succeeded);
    }
    Err(FileOpError::PartialFailure {
        succeeded,
        failed: errors.len(),
        errors,
    }
    .into())
}

fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    if path.file_name().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        ));
    }
    Ok(dir.join(format!(".{}.tmp", uuid::Uuid::new_v4())))
}

/// Write `content` to a fresh file at `temp` and apply `permissions` before
/// it is moved anywhere.
fn write_temp(
    temp: &Path,
    content: &str,
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(DEFAULT_CREATE_MODE);
    }

    let mut file = options.open(temp)?;
    if let Some(permissions) = permissions {
        file.set_permissions(permissions)?;
    }
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

/// Link `temp` to `target` unless `target` exists, then drop the temp name.
///
/// Filesystems without hard links fall back to a checked rename. Once the
/// target is linked the file is in place, so a leftover temp name is only
/// logged.
fn move_no_clobber(temp: &Path, target: &Path) -> io::Result<()> {
    match fs::hard_link(temp, target) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(temp) {
                tracing::warn!(path = %temp.display(), error = %e, "Failed to remove temporary file");
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::Unsupported => {
            tracing::debug!("Hard links unsupported, falling back to rename");
            rename_no_clobber(temp, target)
        }
        Err(e) => Err(e),
    }
}

/// Rename `temp` to `target` unless `target` exists.
fn rename_no_clobber(temp: &Path, target: &Path) -> io::Result<()> {
    if target.symlink_metadata().is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target already exists",
        ));
    }
    fs::rename(temp, target)
}

fn discard(temp: &Path) {
    if let Err(e) = fs::remove_file(temp) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %temp.display(), error = %e, "Failed to remove temporary file");
        }
    }
}

#[cfg(unix)]
fn mode_of(permissions: &fs::Permissions) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    permissions.mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(permissions: &fs::Permissions) -> u32 {
    if permissions.readonly() {
        0o444
    } else {
        0o644
    }
}

#[cfg(unix)]
fn owner_only_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(DEFAULT_CREATE_MODE))
}

#[cfg(not(unix))]
const fn owner_only_permissions() -> Option<fs::Permissions> {
    None
}
