//! # Staging the Substituted Copy
//!
//! Materialization flattens a finished target tree into the scratch
//! directory: every accumulated file is read, run through environment
//! substitution, and written at its top-relative path, so relative
//! references between the copies resolve exactly as they did in the
//! original layout.
//!
//! Staged files are written read-only. The render engine consumes the
//! scratch tree; nothing is expected to modify it afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::substitute;
use crate::target::{Target, TargetRef};

/// Mode for staged files: readable and traversable, never writable.
const STAGED_MODE: u32 = 0o555;

/// Copy every file under `top` into `scratch_root`, substituting `env`
/// references on the way.
///
/// Returns the staged mapping of absolute source paths to their paths
/// relative to `top`'s root (and thus to `scratch_root`). Any read or
/// write failure aborts the whole run.
pub fn materialize(
    top: &TargetRef,
    scratch_root: &Path,
    env: &[(String, String)],
) -> Result<BTreeMap<PathBuf, PathBuf>> {
    let files = Target::relative_files(top);

    for (source, relative) in &files {
        let destination = scratch_root.join(relative);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("can't create directory '{}': {}", parent.display(), e),
            })?;
        }

        let data = fs::read(source).map_err(|e| Error::Filesystem {
            message: format!("can't read '{}': {}", source.display(), e),
        })?;

        // Substitution is defined on text; generator sources may be
        // binary and must survive the copy untouched.
        let data = match std::str::from_utf8(&data) {
            Ok(text) => substitute::substitute(text, env).into_bytes(),
            Err(_) => data,
        };

        fs::write(&destination, data).map_err(|e| Error::Filesystem {
            message: format!("can't write '{}': {}", destination.display(), e),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&destination, fs::Permissions::from_mode(STAGED_MODE)).map_err(
                |e| Error::Filesystem {
                    message: format!(
                        "can't set permissions on '{}': {}",
                        destination.display(),
                        e
                    ),
                },
            )?;
        }
    }

    log::debug!(
        "staged {} files into {}",
        files.len(),
        scratch_root.display()
    );

    Ok(files)
}
