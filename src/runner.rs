//! # The Build Pipeline
//!
//! [`Runner`] ties the stages together: accumulate the target tree, create
//! a scratch directory, materialize the substituted copy into it, and hand
//! the staged overlay to a render engine.
//!
//! Staging and rendering are split so the debug path can stop after
//! staging and keep the scratch directory for inspection.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::accumulate::accumulate;
use crate::error::Result;
use crate::materialize::materialize;
use crate::path::{normalize_path, relative_to};
use crate::render::Render;
use crate::scratch::Scratch;

/// Configuration for one build run.
#[derive(Debug)]
pub struct Runner {
    /// Ordered substitution environment, captured once by the caller.
    pub env: Vec<(String, String)>,
    /// Where to create the scratch directory; system temp when `None`.
    pub scratch_parent: Option<PathBuf>,
}

impl Runner {
    /// Accumulate `target` and materialize the substituted copy into a
    /// fresh scratch directory.
    pub fn stage(&self, target: &Path) -> Result<Staged> {
        let tree = accumulate(target)?;
        let scratch = Scratch::new(self.scratch_parent.as_deref())?;
        let files = materialize(tree.top(), scratch.path(), &self.env)?;

        let target_relative = {
            let top = tree.top().borrow();
            let origin = tree.origin().borrow();
            relative_to(top.root(), origin.root())
        };

        Ok(Staged {
            scratch,
            files,
            target_relative,
        })
    }
}

/// A staged, substituted copy of one build target and everything it
/// references. Dropping it removes the scratch directory.
#[derive(Debug)]
pub struct Staged {
    scratch: Scratch,
    files: BTreeMap<PathBuf, PathBuf>,
    target_relative: PathBuf,
}

impl Staged {
    /// Root of the scratch directory holding the copy.
    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Mapping of absolute source paths to their staged relative paths.
    pub fn files(&self) -> &BTreeMap<PathBuf, PathBuf> {
        &self.files
    }

    /// The original build target's path relative to the tree's top.
    pub fn target_relative(&self) -> &Path {
        &self.target_relative
    }

    /// The staged directory the engine renders: the original target's
    /// position inside the scratch tree.
    pub fn render_dir(&self) -> PathBuf {
        normalize_path(&self.scratch.path().join(&self.target_relative))
    }

    /// Render the staged overlay.
    pub fn render(&self, engine: &dyn Render) -> Result<Vec<u8>> {
        engine.render(&self.render_dir())
    }

    /// Keep the scratch directory past the run and return its path.
    pub fn keep(self) -> PathBuf {
        self.scratch.keep()
    }
}
