use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use release_core::PluginError;
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::debug;

use crate::error::NpmError;

pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    name: Option<String>,
    version: Option<String>,
    private: Option<Value>,
    publish_config: Option<PublishConfig>,
    workspaces: Option<WorkspacesField>,
}

#[derive(Debug, Deserialize)]
struct PublishConfig {
    registry: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkspacesField {
    Patterns(Vec<String>),
    Object { packages: Option<Vec<String>> },
    Unsupported(IgnoredAny),
}

/// A loaded `package.json` with the fields the publish lifecycle needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: Option<String>,
    pub private: bool,
    /// `publishConfig.registry`, when set.
    pub publish_registry: Option<String>,
    /// Whether the manifest has a `workspaces` key at all.
    pub declares_workspaces: bool,
    /// Workspace globs, when `workspaces` is an array or has a `packages` array.
    pub workspace_patterns: Option<Vec<String>>,
    pub dir: PathBuf,
}

impl Package {
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join(MANIFEST_FILE)
    }

    /// The `@scope` of a scoped package, or the bare name otherwise.
    #[must_use]
    pub fn scope(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }
}

/// Reads `<dir>/package.json`.
///
/// # Errors
///
/// Returns [`PluginError::MissingPackage`] when the file does not exist,
/// [`PluginError::MissingPackageName`] when it has no usable `name`, and
/// [`NpmError::ManifestParse`] when it is not valid JSON.
pub fn read_package(dir: &Path) -> Result<Package, NpmError> {
    let path = dir.join(MANIFEST_FILE);
    debug!(path = %path.display(), "reading package manifest");

    let content = std::fs::read_to_string(&path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            NpmError::Plugin(PluginError::MissingPackage {
                package_dir: dir.to_path_buf(),
            })
        } else {
            NpmError::ManifestRead {
                path: path.clone(),
                source,
            }
        }
    })?;

    let raw: RawManifest =
        serde_json::from_str(&content).map_err(|source| NpmError::ManifestParse {
            path: path.clone(),
            source,
        })?;

    let name = raw
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| PluginError::MissingPackageName {
            package_dir: dir.to_path_buf(),
        })?;

    let declares_workspaces = raw.workspaces.is_some();
    let workspace_patterns = match raw.workspaces {
        Some(WorkspacesField::Patterns(patterns)) => Some(patterns),
        Some(WorkspacesField::Object { packages }) => packages,
        Some(WorkspacesField::Unsupported(_)) | None => None,
    };

    Ok(Package {
        name,
        version: raw.version,
        private: raw.private == Some(Value::Bool(true)),
        publish_registry: raw
            .publish_config
            .and_then(|config| config.registry)
            .filter(|registry| !registry.is_empty()),
        declares_workspaces,
        workspace_patterns,
        dir: dir.to_path_buf(),
    })
}
