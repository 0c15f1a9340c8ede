//! Shared test utilities for E2E tests.
//!
//! This module provides common fixtures and helpers to reduce duplication
//! across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_overlay().with_fake_engine();
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Common manifest snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Overlay pulling in a base two levels up plus a local patch.
    pub const DEV_OVERLAY: &str = r#"
bases:
  - ../../bases
patchesStrategicMerge:
  - patch.yaml
"#;

    /// Base kustomization listing its resource files.
    pub const BASE: &str = r#"
resources:
  - deployment.yaml
  - routing.yaml
"#;

    /// Deployment manifest interpolating the LC_* variables.
    pub const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: $LC_APP
spec:
  template:
    spec:
      containers:
        - name: $LC_APP
          image: nginx:$LC_NGINX_VERSION
"#;

    /// Service manifest interpolating the LC_* variables.
    pub const ROUTING: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: $LC_APP
spec:
  ports:
    - port: $LC_PORT
"#;

    /// Strategic-merge patch bumping the replica count.
    pub const PATCH: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: $LC_APP
spec:
  replicas: 2
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "resources: {not a list";
}

/// A test fixture providing a temporary directory with a kustomize layout.
///
/// The canonical layout is the two-level overlay used across the E2E
/// tests: `bases/` holding the shared manifests and `overlays/dev/`
/// referencing them with an upward path.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Lay out the canonical `bases` + `overlays/dev` fixture.
    pub fn with_overlay(self) -> Self {
        self.with_file("bases/kustomization.yaml", manifests::BASE)
            .with_file("bases/deployment.yaml", manifests::DEPLOYMENT)
            .with_file("bases/routing.yaml", manifests::ROUTING)
            .with_file("overlays/dev/kustomization.yaml", manifests::DEV_OVERLAY)
            .with_file("overlays/dev/patch.yaml", manifests::PATCH)
    }

    /// Install a stand-in render engine script.
    ///
    /// The script ignores the `build` flags, takes its last argument as
    /// the staged overlay directory, and emits the staged base deployment
    /// followed by the staged local patch. That exercises exactly the
    /// relative layout the staging step must reproduce.
    #[cfg(unix)]
    pub fn with_fake_engine(self) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let script = "#!/bin/sh\n\
                      for arg; do dir=\"$arg\"; done\n\
                      cat \"$dir/../../bases/deployment.yaml\" \"$dir/patch.yaml\"\n";
        let fixture = self.with_file("engine.sh", script);

        std::fs::set_permissions(
            fixture.engine_path(),
            std::fs::Permissions::from_mode(0o755),
        )
        .expect("Failed to mark engine script executable");

        fixture
    }

    /// Path of the stand-in engine script.
    pub fn engine_path(&self) -> PathBuf {
        self.temp_dir.path().join("engine.sh")
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("substage");
        cmd.current_dir(self.path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_overlay_layout() {
        let fixture = TestFixture::new().with_overlay();
        assert!(fixture.path().join("bases/deployment.yaml").exists());
        assert!(fixture
            .path()
            .join("overlays/dev/kustomization.yaml")
            .exists());
    }

    #[test]
    fn test_manifests_are_valid_yaml() {
        let manifests = [
            manifests::DEV_OVERLAY,
            manifests::BASE,
            manifests::DEPLOYMENT,
            manifests::ROUTING,
            manifests::PATCH,
        ];

        for manifest in manifests {
            serde_yaml::from_str::<serde_yaml::Value>(manifest)
                .expect("Manifest should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(manifests::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
