//! # Render Engine Invocation
//!
//! The render engine is an external collaborator: given the staged
//! directory of a single overlay, it produces the final manifest bytes.
//! The [`Render`] trait is the seam; [`Kustomize`] is the production
//! implementation, shelling out to the system `kustomize` binary.
//!
//! Using the system binary means the user's installed engine version,
//! plugins, and helm setup apply unchanged.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Renders a staged overlay directory into manifest bytes.
pub trait Render {
    fn render(&self, dir: &Path) -> Result<Vec<u8>>;
}

/// The `kustomize build` engine.
#[derive(Debug)]
pub struct Kustomize {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl Kustomize {
    /// Locate the engine binary.
    ///
    /// `binary` overrides the default lookup; both a bare name (searched
    /// on PATH) and an explicit path are accepted. `extra_args` are passed
    /// through to `kustomize build` verbatim.
    pub fn locate(binary: Option<&Path>, extra_args: Vec<String>) -> Result<Self> {
        let binary = match binary {
            Some(requested) => which::which(requested).map_err(|e| Error::Render {
                message: format!("can't find render engine '{}': {}", requested.display(), e),
                hint: None,
            })?,
            None => which::which("kustomize").map_err(|_| Error::Render {
                message: "kustomize not found in PATH".to_string(),
                hint: Some(
                    "install kustomize or point --kustomize at the binary to use".to_string(),
                ),
            })?,
        };

        Ok(Kustomize { binary, extra_args })
    }

    /// The resolved engine binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Render for Kustomize {
    fn render(&self, dir: &Path) -> Result<Vec<u8>> {
        log::debug!("running {} build {}", self.binary.display(), dir.display());

        let output = Command::new(&self.binary)
            .arg("build")
            .arg("--enable-helm")
            .args(&self.extra_args)
            .arg(dir)
            .output()
            .map_err(|e| Error::Render {
                message: format!("can't run '{}': {}", self.binary.display(), e),
                hint: None,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            let hint = if stderr.contains("helm") {
                Some("helm chart inflation needs the helm binary on PATH".to_string())
            } else {
                None
            };

            return Err(Error::Render {
                message: format!(
                    "'{} build {}' failed: {}",
                    self.binary.display(),
                    dir.display(),
                    stderr.trim()
                ),
                hint,
            });
        }

        Ok(output.stdout)
    }
}
