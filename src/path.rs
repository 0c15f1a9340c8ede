//! Lexical path utilities for the target tree

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize a path lexically, collapsing `.` and `..` segments without
/// touching the filesystem.
///
/// A `..` that would climb above the root of an absolute path is dropped;
/// a `..` at the front of a relative path is kept, since there is nothing
/// to collapse it against.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Make a path absolute against the current working directory, then
/// normalize it. Never resolves symlinks.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }

    let cwd = std::env::current_dir().map_err(|e| Error::Path {
        message: format!("can't determine working directory: {}", e),
    })?;

    Ok(normalize_path(&cwd.join(path)))
}

/// Compute `path` relative to `base`, producing `..` segments where `path`
/// lies outside `base`. Both arguments are expected to be absolute and
/// normalized. Returns `.` when the two are equal.
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base_components: Vec<Component> = base.components().collect();
    let path_components: Vec<Component> = path.components().collect();

    let common = base_components
        .iter()
        .zip(path_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();

    for _ in common..base_components.len() {
        relative.push("..");
    }

    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }

    relative
}
