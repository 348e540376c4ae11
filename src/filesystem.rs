//! Async file system primitives shared by the generator and the CLI.
//! Every failure is reported together with the path that caused it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry, File};
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Bundled file names that are renamed on copy. Package registries drop
/// dot-ignore files from published archives, so they ship without the dot.
const RENAMED_ON_COPY: [(&str, &str); 1] = [("gitignore", ".gitignore")];

/// Recursively creates `path`. Calling it on an existing directory is not an
/// error.
///
/// # Errors
/// * `Error::Io` if a component exists as a file or cannot be created
pub async fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match tokio::fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Writes `content` to `path` in a single call, replacing any existing file.
/// The parent directory must already exist.
pub async fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing file: {}", path.display());
    tokio::fs::write(path, content).await.map_err(|e| Error::io(path, e))
}

/// Reads a whole UTF-8 file.
pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path).await.map_err(|e| Error::io(path, e))
}

/// Copies the tree under `source` into `dest` verbatim and returns the
/// destination paths of the copied files.
///
/// # Errors
/// * `Error::Io` naming the entry that could not be read or written
pub async fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    dest: Q,
) -> Result<Vec<PathBuf>> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    let mut copied = Vec::new();

    // walkdir is synchronous; the skeleton is a handful of entries.
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            Error::io(path, e.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::io(entry.path(), std::io::Error::other(e)))?;
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(copy_target_name(relative));

        if entry.file_type().is_dir() {
            ensure_dir(&target).await?;
        } else {
            debug!("Copying file: {}", target.display());
            tokio::fs::copy(entry.path(), &target)
                .await
                .map_err(|e| Error::io(&target, e))?;
            copied.push(target);
        }
    }
    Ok(copied)
}

/// Writes the files of a directory embedded in the binary into `dest`,
/// creating parent directories as needed.
///
/// # Arguments
/// * `source` - Embedded directory; its own path is stripped from every file
/// * `dest` - Directory receiving the files
///
/// # Returns
/// Destination paths of the written files, sorted by source path
///
/// # Errors
/// * `Error::Io` if a directory or file cannot be written
pub async fn copy_embedded(source: &'static Dir<'static>, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<&'static File<'static>> = Vec::new();
    let mut pending = vec![source];
    while let Some(dir) = pending.pop() {
        for entry in dir.entries() {
            match entry {
                DirEntry::Dir(sub) => pending.push(sub),
                DirEntry::File(file) => files.push(file),
            }
        }
    }
    files.sort_by(|a, b| a.path().cmp(b.path()));

    let mut copied = Vec::new();
    for file in files {
        let relative = file
            .path()
            .strip_prefix(source.path())
            .map_err(|e| Error::io(file.path(), std::io::Error::other(e)))?;
        let target = dest.join(copy_target_name(relative));
        if let Some(parent) = target.parent() {
            ensure_dir(parent).await?;
        }
        debug!("Copying file: {}", target.display());
        tokio::fs::write(&target, file.contents())
            .await
            .map_err(|e| Error::io(&target, e))?;
        copied.push(target);
    }
    Ok(copied)
}

/// Maps a bundled relative path to the name it gets in the project.
pub fn copy_target_name(relative: &Path) -> PathBuf {
    let renamed = relative.file_name().and_then(|name| {
        RENAMED_ON_COPY
            .iter()
            .find(|(from, _)| name == *from)
            .map(|(_, to)| relative.with_file_name(to))
    });
    renamed.unwrap_or_else(|| relative.to_path_buf())
}

/// Returns true when `dir` exists and contains at least one entry.
pub fn is_non_empty_dir<P: AsRef<Path>>(dir: P) -> bool {
    std::fs::read_dir(dir).map(|mut entries| entries.next().is_some()).unwrap_or(false)
}
