//! # Substage Library
//!
//! This library prepares a self-contained, environment-substituted copy of
//! a kustomize overlay tree and renders it with an external engine. It is
//! designed to be used by the `substage` command-line tool but can also be
//! embedded in other applications that need to stage overlay trees.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use std::rc::Rc;
//! use substage::target::TargetTree;
//!
//! // The in-memory directory tree at the core of the pipeline.
//! let mut tree = TargetTree::new("/deploy/overlays/dev");
//! let origin = Rc::clone(tree.origin());
//!
//! // Upward references grow the tree lazily.
//! let bases = tree.resolve(&origin, Path::new("../../bases")).unwrap();
//! assert_eq!(bases.borrow().root(), Path::new("/deploy/bases"));
//! assert_eq!(tree.top().borrow().root(), Path::new("/deploy"));
//!
//! // Repeated resolution reuses the same node.
//! let again = tree.resolve(&origin, Path::new("../../bases")).unwrap();
//! assert!(Rc::ptr_eq(&bases, &again));
//! ```
//!
//! ## Core Concepts
//!
//! - **Target Tree (`target`)**: an in-memory tree with one node per
//!   physical directory participating in a build, growing lazily in both
//!   directions as references are resolved.
//! - **Kustomization (`kustomization`)**: discovery and decoding of the
//!   manifest file that enumerates a directory's references.
//! - **Accumulation (`accumulate`)**: the transitive walk that follows
//!   every local reference and populates the tree.
//! - **Substitution (`substitute`)**: non-failing environment-variable
//!   expansion over an explicit, ordered key/value list.
//! - **Materialization (`materialize`)**: flattening the tree into a
//!   scratch directory that mirrors the original relative layout, with
//!   substitution applied to every copied file.
//! - **Rendering (`render`)**: the seam to the external build engine that
//!   turns the staged overlay into final manifest bytes.
//!
//! ## Execution Flow
//!
//! The `runner` module ties the stages together:
//!
//! 1. **Accumulate**: walk the manifests from the build target, following
//!    references upward and downward to build the target tree.
//! 2. **Stage**: create a fresh scratch directory and materialize every
//!    accumulated file into it at its top-relative path.
//! 3. **Render**: invoke the engine on the target's position inside the
//!    scratch tree and collect the output bytes.
//!
//! The scratch directory is removed on every exit path unless explicitly
//! kept for inspection.

pub mod accumulate;
pub mod error;
pub mod kustomization;
pub mod materialize;
pub mod output;
pub mod path;
pub mod render;
pub mod runner;
pub mod scratch;
pub mod substitute;
pub mod target;

#[cfg(test)]
mod path_proptest;
