//! Read-only access to the template assets bundled with the generator.
//!
//! The bundled set is compiled into the binary, so a relocated executable
//! keeps working. A directory on disk can replace it (`--templates`).

use std::io;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use log::debug;

use crate::error::{Error, Result};
use crate::filesystem::{copy_embedded, copy_tree, read_file};

/// Directory holding the bundled templates, relative to the crate root.
pub const TEMPLATES_DIR: &str = "templates";

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

#[derive(Debug, Clone)]
enum Source {
    Embedded(&'static Dir<'static>),
    Directory(PathBuf),
}

/// Template assets addressed by logical name, a path relative to the root.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: Source,
}

impl TemplateStore {
    /// Store rooted at a directory on disk.
    ///
    /// # Arguments
    /// * `root` - Directory laid out like the bundled `templates/`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { source: Source::Directory(root.into()) }
    }

    /// Store over the templates compiled into the binary.
    pub fn bundled() -> Self {
        Self { source: Source::Embedded(&BUNDLED) }
    }

    /// Directory the store reads from, `None` for the bundled set.
    pub fn root(&self) -> Option<&Path> {
        match &self.source {
            Source::Embedded(_) => None,
            Source::Directory(root) => Some(root),
        }
    }

    /// Resolves a logical name to the location of the asset.
    ///
    /// # Returns
    /// The absolute path for a store on disk, or `templates/<name>` for a
    /// bundled asset
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no file or directory has that name
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let (path, exists) = match &self.source {
            Source::Embedded(dir) => {
                let exists = dir.get_file(name).is_some() || dir.get_dir(name).is_some();
                (Path::new(TEMPLATES_DIR).join(name), exists)
            }
            Source::Directory(root) => {
                let path = root.join(name);
                let exists = path.exists();
                (path, exists)
            }
        };
        if !exists {
            return Err(Error::TemplateNotFound { name: name.to_string(), path });
        }
        debug!("Resolved template '{}' to {}", name, path.display());
        Ok(path)
    }

    /// Reads the raw text of a template.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the asset is missing
    /// * `Error::Io` if it cannot be read or is not UTF-8
    pub async fn read(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        match &self.source {
            Source::Embedded(dir) => dir
                .get_file(name)
                .and_then(|file| file.contents_utf8())
                .map(str::to_string)
                .ok_or_else(|| Error::io(path, io::Error::from(io::ErrorKind::InvalidData))),
            Source::Directory(_) => read_file(path).await,
        }
    }

    /// Copies the template directory `name` verbatim into `dest`.
    ///
    /// # Returns
    /// Destination paths of the copied files
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no directory has that name
    /// * `Error::Io` if a file cannot be written
    pub async fn copy_tree(&self, name: &str, dest: &Path) -> Result<Vec<PathBuf>> {
        let path = self.resolve(name)?;
        match &self.source {
            Source::Embedded(dir) => match dir.get_dir(name) {
                Some(tree) => copy_embedded(tree, dest).await,
                None => Err(Error::TemplateNotFound { name: name.to_string(), path }),
            },
            Source::Directory(_) => copy_tree(path, dest).await,
        }
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        TemplateStore::bundled()
    }
}
