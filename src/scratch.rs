//! Scratch-directory lifetime
//!
//! Each run stages its substituted copy into a fresh scratch directory.
//! Removal is scoped: dropping the handle deletes the directory on every
//! exit path, success or failure, unless the caller keeps it for
//! inspection.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A freshly created scratch directory, removed on drop unless kept.
#[derive(Debug)]
pub struct Scratch {
    dir: tempfile::TempDir,
}

impl Scratch {
    /// Create a scratch directory under `parent`, or under the system
    /// temp directory when `parent` is `None`.
    pub fn new(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("substage-");

        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Filesystem {
            message: format!("can't create scratch directory: {}", e),
        })?;

        Ok(Scratch { dir })
    }

    /// The scratch directory's path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Disarm cleanup and hand the directory over to the caller; it now
    /// outlives the run.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scratch_is_removed_on_drop() {
        let scratch = Scratch::new(None).unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_scratch_keep_retains_the_directory() {
        let parent = TempDir::new().unwrap();
        let scratch = Scratch::new(Some(parent.path())).unwrap();

        let kept = scratch.keep();
        assert!(kept.is_dir());
        assert!(kept.starts_with(parent.path()));

        fs::remove_dir_all(kept).unwrap();
    }

    #[test]
    fn test_scratch_is_placed_under_the_requested_parent() {
        let parent = TempDir::new().unwrap();
        let scratch = Scratch::new(Some(parent.path())).unwrap();

        assert!(scratch.path().starts_with(parent.path()));
        let name = scratch.path().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("substage-"));
    }

    #[test]
    fn test_scratch_rejects_missing_parent() {
        let parent = TempDir::new().unwrap();
        let result = Scratch::new(Some(&parent.path().join("nope")));

        assert!(matches!(result, Err(Error::Filesystem { .. })));
    }
}
