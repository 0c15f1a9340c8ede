//! # The Target Tree
//!
//! A `Target` represents one physical directory participating in a build.
//! Targets form a bidirectional tree: parents own their children, children
//! keep a non-owning back-link to their parent, and every physical
//! directory touched during accumulation is represented by exactly one
//! node. Two overlays referencing the same base directory therefore share a
//! single node rather than duplicating it.
//!
//! The tree grows lazily in both directions:
//!
//! - Resolving a downward reference (`bases/app`) creates intermediate
//!   child nodes one segment at a time.
//! - Resolving an upward reference (`../../bases`) synthesizes a new parent
//!   above the current top, re-rooting the tree.
//!
//! Because parent links are [`Weak`], a synthesized top would be dropped as
//! soon as resolution returned if nothing owned it. [`TargetTree`] is that
//! owner: it anchors a strong reference to the current top and updates it
//! whenever upward growth replaces it. All resolution goes through
//! [`TargetTree::resolve`].
//!
//! The flattening operations ([`Target::absolute_files`],
//! [`Target::relative_files`]) are run on the top node to project the whole
//! tree into a mapping of absolute source paths to paths relative to the
//! top root, which is the layout mirrored into the scratch directory.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};
use crate::path::{normalize_path, relative_to};

/// Shared handle to a node of the target tree.
pub type TargetRef = Rc<RefCell<Target>>;

/// One physical directory participating in the build.
#[derive(Debug)]
pub struct Target {
    /// Absolute, normalized directory path. Unique per node in a tree.
    root: PathBuf,
    /// File paths recorded for this directory, relative to `root`.
    files: Vec<PathBuf>,
    /// Set once this node's manifest has been walked.
    accumulated: bool,
    /// Non-owning back-link; absent only at the tree's top.
    parent: Option<Weak<RefCell<Target>>>,
    /// Immediate subdirectories, keyed by single path segment.
    children: BTreeMap<String, TargetRef>,
}

impl Target {
    fn new(root: PathBuf) -> TargetRef {
        Rc::new(RefCell::new(Target {
            root,
            files: Vec::new(),
            accumulated: false,
            parent: None,
            children: BTreeMap::new(),
        }))
    }

    /// The absolute directory path this node stands for.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File entries recorded on this node, relative to its root.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Record a file entry, relative to this node's root.
    pub fn push_file(&mut self, file: PathBuf) {
        self.files.push(file);
    }

    /// Upgraded parent link, if this node has one.
    pub fn parent(&self) -> Option<TargetRef> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Immediate children, keyed by path segment.
    pub fn children(&self) -> &BTreeMap<String, TargetRef> {
        &self.children
    }

    pub(crate) fn is_accumulated(&self) -> bool {
        self.accumulated
    }

    pub(crate) fn mark_accumulated(&mut self) {
        self.accumulated = true;
    }

    /// Follow parent links to the topmost ancestor. The top defines the
    /// root against which all files are made relative for output.
    pub fn top(this: &TargetRef) -> TargetRef {
        match this.borrow().parent() {
            Some(parent) => Target::top(&parent),
            None => Rc::clone(this),
        }
    }

    /// Collect every file of this node and its descendants as absolute,
    /// normalized paths. Branches with neither files nor children yield
    /// nothing.
    pub fn absolute_files(this: &TargetRef) -> Vec<PathBuf> {
        let node = this.borrow();

        if node.files.is_empty() && node.children.is_empty() {
            return Vec::new();
        }

        let mut result = Vec::new();

        for file in &node.files {
            result.push(normalize_path(&node.root.join(file)));
        }

        for child in node.children.values() {
            result.extend(Self::absolute_files(child));
        }

        result
    }

    /// Map every file of this node and its descendants from its absolute
    /// path to its path relative to this node's root. Files that do not
    /// fall under this node's root (an upward file reference above every
    /// accumulated directory) are skipped with a warning; copying them
    /// would escape the staged layout.
    pub fn relative_files(this: &TargetRef) -> BTreeMap<PathBuf, PathBuf> {
        let root = this.borrow().root.clone();
        let mut result = BTreeMap::new();

        for absolute in Self::absolute_files(this) {
            match absolute.strip_prefix(&root) {
                Ok(relative) => {
                    result.insert(absolute.clone(), relative.to_path_buf());
                }
                Err(_) => {
                    log::warn!(
                        "dropping {}: not reachable under {}",
                        absolute.display(),
                        root.display()
                    );
                }
            }
        }

        result
    }
}

/// Owner of a target tree.
///
/// Holds the original build target and a strong anchor to the current top,
/// which [`TargetTree::resolve`] keeps up to date as upward references grow
/// the tree.
#[derive(Debug)]
pub struct TargetTree {
    origin: TargetRef,
    top: TargetRef,
}

impl TargetTree {
    /// Create a tree whose single node is rooted at `root` (absolute,
    /// normalized).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let origin = Target::new(root.into());
        let top = Rc::clone(&origin);
        TargetTree { origin, top }
    }

    /// The node the tree was created from (the user-supplied build target).
    pub fn origin(&self) -> &TargetRef {
        &self.origin
    }

    /// The current topmost node.
    pub fn top(&self) -> &TargetRef {
        &self.top
    }

    /// Convenience projection of the whole tree; see
    /// [`Target::relative_files`].
    pub fn relative_files(&self) -> BTreeMap<PathBuf, PathBuf> {
        Target::relative_files(&self.top)
    }

    /// Resolve `reference` (absolute, or relative to `origin`'s root,
    /// possibly with upward segments) to the tree node for that directory,
    /// creating intermediate nodes as needed.
    ///
    /// Repeated resolution of the same physical directory always yields the
    /// same node, no matter which node it is resolved from.
    pub fn resolve(&mut self, origin: &TargetRef, reference: &Path) -> Result<TargetRef> {
        let (origin_root, absolute) = {
            let node = origin.borrow();
            let absolute = if reference.is_absolute() {
                normalize_path(reference)
            } else {
                normalize_path(&node.root.join(reference))
            };
            (node.root.clone(), absolute)
        };

        let relative = relative_to(&origin_root, &absolute);

        self.resolve_relative(origin, &relative)
    }

    /// Walk one leading segment of `relative` from `origin`, then recurse
    /// on the remainder.
    fn resolve_relative(&mut self, origin: &TargetRef, relative: &Path) -> Result<TargetRef> {
        let mut components = relative.components();

        let first = match components.next() {
            None | Some(Component::CurDir) => return Ok(Rc::clone(origin)),
            Some(component) => component,
        };

        let rest = components.as_path().to_path_buf();

        match first {
            Component::ParentDir => {
                let (root, existing) = {
                    let node = origin.borrow();
                    (node.root.clone(), node.parent())
                };

                let parent_root = root.parent().map(Path::to_path_buf).ok_or_else(|| {
                    Error::Path {
                        message: format!(
                            "can't resolve above the filesystem root from {}",
                            root.display()
                        ),
                    }
                })?;

                let parent = match existing {
                    Some(parent) => {
                        if parent.borrow().root != parent_root {
                            let found = parent.borrow().root.clone();
                            return Err(Error::ParentMismatch {
                                root,
                                expected: parent_root,
                                found,
                            });
                        }
                        parent
                    }
                    None => self.grow_parent(origin, parent_root)?,
                };

                self.resolve_relative(&parent, &rest)
            }
            Component::Normal(segment) => {
                let key = segment.to_string_lossy().into_owned();

                let child = {
                    let mut node = origin.borrow_mut();
                    if let Some(existing) = node.children.get(&key) {
                        Rc::clone(existing)
                    } else {
                        let child = Target::new(node.root.join(segment));
                        child.borrow_mut().parent = Some(Rc::downgrade(origin));
                        node.children.insert(key, Rc::clone(&child));
                        child
                    }
                };

                if rest.as_os_str().is_empty() {
                    Ok(child)
                } else {
                    self.resolve_relative(&child, &rest)
                }
            }
            other => Err(Error::Path {
                message: format!(
                    "unexpected component {:?} in relative path {}",
                    other,
                    relative.display()
                ),
            }),
        }
    }

    /// Synthesize a parent node above `origin` (which must be parentless,
    /// i.e. the current top of its line), register `origin` as its child
    /// under `origin`'s base name, and move the tree anchor up to it.
    fn grow_parent(&mut self, origin: &TargetRef, parent_root: PathBuf) -> Result<TargetRef> {
        let key = {
            let node = origin.borrow();
            node.root
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| Error::Path {
                    message: format!("{} has no base name", node.root.display()),
                })?
        };

        let parent = Target::new(parent_root);
        parent.borrow_mut().children.insert(key, Rc::clone(origin));
        origin.borrow_mut().parent = Some(Rc::downgrade(&parent));

        if Rc::ptr_eq(origin, &self.top) {
            self.top = Rc::clone(&parent);
        }

        Ok(parent)
    }
}
