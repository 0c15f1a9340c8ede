//! # Error Handling
//!
//! Centralized error handling for `substage`, built on `thiserror`. The
//! `Error` enum covers every failure mode of the build pipeline:
//!
//! - Target validation (not a directory).
//! - Kustomization discovery and decoding (none found, several found,
//!   unparseable YAML).
//! - Reference accumulation (irregular filesystem entry types).
//! - Target-tree invariant violations during upward resolution.
//! - Filesystem operations while staging the substituted copy.
//! - Render-engine invocation.
//!
//! Each variant carries enough context (paths, counts, engine stderr) to be
//! actionable on its own, and the `Result<T>` alias is used throughout the
//! library to keep signatures short.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for substage operations
#[derive(Error, Debug)]
pub enum Error {
    /// The requested build target is not a directory.
    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    /// A directory must contain exactly one recognized kustomization file.
    #[error("expected one kustomization file in {dir}, found {count}")]
    AmbiguousKustomization { dir: PathBuf, count: usize },

    /// A kustomization file was found but could not be decoded.
    #[error("can't decode {path}: {message}")]
    KustomizationParse { path: PathBuf, message: String },

    /// A manifest reference pointed at something that is neither a regular
    /// file nor a directory (socket, fifo, device).
    #[error("can't accumulate {path}: not a regular file or directory")]
    InvalidReference { path: PathBuf },

    /// Upward resolution found an existing parent link that does not match
    /// the filesystem parent of the node's root.
    #[error("invalid parent for {root}: expected {expected}, found {found}")]
    ParentMismatch {
        root: PathBuf,
        expected: PathBuf,
        found: PathBuf,
    },

    /// An error occurred with a path-related operation.
    #[error("path operation error: {message}")]
    Path { message: String },

    /// A contextual filesystem failure while staging or writing output.
    #[error("filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The external render engine failed or could not be invoked.
    ///
    /// Includes an optional hint for resolution (e.g. when the engine binary
    /// is missing from PATH).
    #[error("render error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Render {
        message: String,
        /// Optional hint for how to resolve the render failure
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
