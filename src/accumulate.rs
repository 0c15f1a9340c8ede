//! # Reference Accumulation
//!
//! The accumulation walk builds the target tree. Starting from the
//! user-supplied build directory, it reads each directory's kustomization
//! manifest, follows every local reference it exposes, and records the
//! outcome on the tree:
//!
//! - Remote references (anything with a URL scheme) are skipped; they are
//!   fetched by the render engine, never copied.
//! - References that do not resolve to anything on disk are skipped as
//!   well; they may be plugin identifiers or other non-local names.
//! - Directories are resolved to tree nodes and walked in turn.
//! - Regular files are recorded on the referencing node.
//!
//! Each directory is walked at most once per run. Two overlays referencing
//! the same base therefore share one node, and its manifest is read once.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::kustomization;
use crate::path::{absolutize, normalize_path};
use crate::target::{TargetRef, TargetTree};

/// Build the target tree for the directory at `root`.
///
/// `root` may be relative to the working directory. It must exist and be a
/// directory containing exactly one recognized kustomization file. The
/// returned tree's origin is the node for `root`; its top may sit higher if
/// the walk followed upward references.
pub fn accumulate(root: &Path) -> Result<TargetTree> {
    let root = absolutize(root)?;

    let is_dir = fs::metadata(&root)
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(Error::NotADirectory { path: root });
    }

    let mut tree = TargetTree::new(root);
    let origin = Rc::clone(tree.origin());
    accumulate_target(&mut tree, &origin)?;

    Ok(tree)
}

/// Walk one directory's manifest, following every reference.
fn accumulate_target(tree: &mut TargetTree, target: &TargetRef) -> Result<()> {
    if target.borrow().is_accumulated() {
        return Ok(());
    }

    // Marked up front so reference cycles terminate.
    target.borrow_mut().mark_accumulated();

    let root = target.borrow().root().to_path_buf();
    let (manifest, manifest_name) = kustomization::read(&root)?;

    // The manifest itself is copied along with everything it references.
    target.borrow_mut().push_file(manifest_name.into());

    for reference in manifest.references() {
        accumulate_entry(tree, target, reference)?;
    }

    Ok(())
}

/// Classify a single manifest reference and record it.
fn accumulate_entry(tree: &mut TargetTree, target: &TargetRef, reference: &str) -> Result<()> {
    if is_remote(reference) {
        log::debug!("skipping remote reference '{}'", reference);
        return Ok(());
    }

    let reference_path = Path::new(reference);
    let absolute = {
        let node = target.borrow();
        if reference_path.is_absolute() {
            normalize_path(reference_path)
        } else {
            normalize_path(&node.root().join(reference_path))
        }
    };

    let metadata = match fs::metadata(&absolute) {
        Ok(metadata) => metadata,
        Err(err) => {
            // Not something on disk; could be a plugin identifier.
            log::debug!("skipping '{}': {}", reference, err);
            return Ok(());
        }
    };

    if metadata.is_dir() {
        let child = tree.resolve(target, reference_path)?;
        accumulate_target(tree, &child)
    } else if metadata.is_file() {
        target.borrow_mut().push_file(reference_path.to_path_buf());
        Ok(())
    } else {
        Err(Error::InvalidReference { path: absolute })
    }
}

/// A reference with a URL scheme lives on the network, not on disk.
fn is_remote(reference: &str) -> bool {
    url::Url::parse(reference).is_ok()
}
