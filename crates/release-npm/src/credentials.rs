use std::path::{Path, PathBuf};

use release_core::{Env, PluginError};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::NpmError;
use crate::rc::NpmRc;
use crate::registry::{auth_for, nerf_dart};

const TOKEN_VAR: &str = "NPM_TOKEN";

/// Temporary `.npmrc` handed to every npm invocation of a release run.
///
/// The file is rewritten before each authentication check, so callers must
/// not authenticate two registries concurrently.
#[derive(Debug)]
pub struct CredentialsFile {
    _dir: TempDir,
    path: PathBuf,
}

impl CredentialsFile {
    /// # Errors
    ///
    /// Returns an IO error if the temporary directory cannot be created.
    pub fn new() -> Result<Self, NpmError> {
        let dir = tempfile::Builder::new().prefix("kuzzle-release").tempdir()?;
        let path = dir.path().join(".npmrc");
        Ok(Self { _dir: dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the configuration npm needs to authenticate against `registry`.
    ///
    /// Existing config files are copied as-is when they already hold
    /// credentials for the registry; otherwise a token entry referencing
    /// `${NPM_TOKEN}` is appended.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::NoNpmToken`] when neither the config files nor
    /// `NPM_TOKEN` provide a credential, and [`NpmError::CredentialsWrite`] if
    /// the file cannot be written.
    pub fn write_auth(&self, registry: &str, rc: &NpmRc, env: &Env) -> Result<(), NpmError> {
        info!("Verify authentication for registry {registry}");

        if !rc.configs().is_empty() {
            let sources: Vec<String> = rc
                .configs()
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            info!("Reading npm config from {}", sources.join(", "));
        }

        let current = rc
            .configs()
            .iter()
            .map(|path| {
                std::fs::read_to_string(path).map_err(|source| NpmError::RcRead {
                    path: path.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?
            .join("\n");

        if auth_for(registry, rc, env)?.is_some() {
            debug!(path = %self.path.display(), "writing existing npm config");
            return self.write(&current);
        }

        if env.non_empty(TOKEN_VAR).is_none() {
            return Err(PluginError::NoNpmToken {
                registry: registry.to_string(),
            }
            .into());
        }

        let separator = if current.is_empty() { "" } else { "\n" };
        let content = format!(
            "{current}{separator}{}:_authToken = ${{{TOKEN_VAR}}}",
            nerf_dart(registry)?
        );
        self.write(&content)?;
        info!("Wrote {TOKEN_VAR} to {}", self.path.display());
        Ok(())
    }

    fn write(&self, content: &str) -> Result<(), NpmError> {
        std::fs::write(&self.path, content).map_err(|source| NpmError::CredentialsWrite {
            path: self.path.clone(),
            source,
        })
    }
}
