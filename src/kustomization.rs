//! # Kustomization Discovery and Decoding
//!
//! This module locates and decodes the kustomization manifest of a target
//! directory. A directory participates in a build only if it contains
//! exactly one of the recognized manifest file names; zero or several is an
//! error, since the build would otherwise be ambiguous.
//!
//! Only the fields that can reference other files or directories are
//! modeled — that is all the accumulation walk needs. Everything else in
//! the manifest (name prefixes, images, replicas, ...) is left to the
//! render engine and ignored here, so manifest dialect growth does not
//! affect tree or resolution logic.
//!
//! ```yaml
//! resources:
//!   - ../../bases
//!   - service.yaml
//! patches:
//!   - path: patch.yaml
//! configMapGenerator:
//!   - name: app-config
//!     files:
//!       - config.properties
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Manifest file names recognized in a target directory.
pub const RECOGNIZED_FILE_NAMES: [&str; 3] =
    ["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// The file-referencing subset of a kustomization manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kustomization {
    /// Base directories (deprecated upstream, still honored).
    #[serde(default)]
    pub bases: Vec<String>,
    /// Resource files, directories, or remote references.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Component directories.
    #[serde(default)]
    pub components: Vec<String>,
    /// Custom resource definition files.
    #[serde(default)]
    pub crds: Vec<String>,
    /// Transformer configuration files.
    #[serde(default)]
    pub configurations: Vec<String>,
    /// Validator plugin configuration files.
    #[serde(default)]
    pub validators: Vec<String>,
    /// Transformer plugin configuration files.
    #[serde(default)]
    pub transformers: Vec<String>,
    /// Generator plugin configuration files.
    #[serde(default)]
    pub generators: Vec<String>,
    /// Strategic-merge patches: file paths or inline documents.
    #[serde(default)]
    pub patches_strategic_merge: Vec<String>,
    /// Patches with an optional file path or inline content.
    #[serde(default)]
    pub patches: Vec<Patch>,
    /// JSON 6902 patches.
    #[serde(default)]
    pub patches_json6902: Vec<Patch>,
    /// ConfigMap generators with file sources.
    #[serde(default)]
    pub config_map_generator: Vec<GeneratorArgs>,
    /// Secret generators with file sources.
    #[serde(default)]
    pub secret_generator: Vec<GeneratorArgs>,
    /// Helm chart inflations with local repo paths and values files.
    #[serde(default)]
    pub helm_charts: Vec<HelmChart>,
}

impl Kustomization {
    /// Every file and directory reference in the manifest, flattened in
    /// category order. This order fixes the traversal order of the
    /// accumulation walk, and with it the layout of the staged copy.
    pub fn references(&self) -> Vec<&str> {
        let mut references: Vec<&str> = Vec::new();

        references.extend(self.bases.iter().map(String::as_str));
        references.extend(self.resources.iter().map(String::as_str));
        references.extend(self.components.iter().map(String::as_str));
        references.extend(self.crds.iter().map(String::as_str));
        references.extend(self.configurations.iter().map(String::as_str));
        references.extend(self.validators.iter().map(String::as_str));
        references.extend(self.transformers.iter().map(String::as_str));
        references.extend(self.generators.iter().map(String::as_str));
        references.extend(self.patches_strategic_merge.iter().map(String::as_str));
        references.extend(self.patches.iter().filter_map(|p| p.path.as_deref()));
        references.extend(self.patches_json6902.iter().filter_map(|p| p.path.as_deref()));
        references.extend(
            self.config_map_generator
                .iter()
                .flat_map(|g| g.files.iter().map(String::as_str)),
        );
        references.extend(
            self.secret_generator
                .iter()
                .flat_map(|g| g.files.iter().map(String::as_str)),
        );
        for chart in &self.helm_charts {
            references.extend(chart.repo.as_deref());
            references.extend(chart.values_file.as_deref());
        }

        references
    }
}

/// A patch entry: either a file reference or an inline document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// Path to the patch file, relative to the manifest's directory.
    #[serde(default)]
    pub path: Option<String>,
    /// Inline patch content; never touches the filesystem.
    #[serde(default)]
    pub patch: Option<String>,
}

/// A configMap/secret generator entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorArgs {
    #[serde(default)]
    pub name: Option<String>,
    /// File sources, optionally in `key=path` form.
    #[serde(default)]
    pub files: Vec<String>,
}

/// A helm chart entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChart {
    #[serde(default)]
    pub name: Option<String>,
    /// Local chart repository path (remote URLs are skipped downstream).
    #[serde(default)]
    pub repo: Option<String>,
    /// Values file for the inflation.
    #[serde(default)]
    pub values_file: Option<String>,
}

/// Locate and decode the single kustomization manifest of `dir`.
///
/// Returns the decoded manifest together with the file name it was read
/// from; the caller records that name so the manifest is copied along with
/// everything it references.
pub fn read(dir: &Path) -> Result<(Kustomization, String)> {
    let mut found = Vec::new();

    for name in RECOGNIZED_FILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            found.push((candidate, name));
        }
    }

    if found.len() != 1 {
        return Err(Error::AmbiguousKustomization {
            dir: dir.to_path_buf(),
            count: found.len(),
        });
    }

    let (path, name) = &found[0];
    let data = fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("can't read '{}': {}", path.display(), e),
    })?;

    // An empty or null document is a valid, empty manifest.
    let manifest = if data.trim().is_empty() {
        Kustomization::default()
    } else {
        serde_yaml::from_str::<Option<Kustomization>>(&data)
            .map_err(|e| Error::KustomizationParse {
                path: path.clone(),
                message: e.to_string(),
            })?
            .unwrap_or_default()
    };

    Ok((manifest, name.to_string()))
}
