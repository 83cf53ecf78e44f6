use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use release_core::{
    NextRelease, PluginConfig, PluginError, RawPluginConfig, ReleaseContext, ReleaseInfo,
};
use release_npm::{
    CredentialsFile, NpmCommand, NpmRc, Package, WorkspaceQuery, discover_workspaces, dist_tag,
    read_package, resolve_registry,
};
use tracing::{debug, info, warn};

use super::plugin_order::check_plugin_order;
use crate::traits::{GitProvider, NpmClient};
use crate::{OperationError, Result, VerificationErrors};

/// Where a coordinator stands in the publish lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Unverified,
    Verified,
    Prepared,
    Published,
}

/// A workspace that passed verification, with the registry it publishes to.
#[derive(Debug, Clone)]
struct Workspace {
    package: Package,
    registry: String,
}

/// Drives `verify → prepare → publish` and `add_channel` for one release run.
///
/// Hooks can be called out of order: a hook that needs the workspaces or the
/// bumped manifests runs the missing earlier steps itself.
pub struct ReleaseCoordinator<N, G> {
    npm: N,
    git: G,
    credentials: CredentialsFile,
    stage: Stage,
    root: Option<Package>,
    workspaces: IndexMap<PathBuf, Workspace>,
}

impl<N, G> ReleaseCoordinator<N, G>
where
    N: NpmClient,
    G: GitProvider,
{
    /// # Errors
    ///
    /// Returns an error if the temporary credentials file cannot be created.
    pub fn new(npm: N, git: G) -> Result<Self> {
        Ok(Self {
            npm,
            git,
            credentials: CredentialsFile::new()?,
            stage: Stage::Unverified,
            root: None,
            workspaces: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        self.credentials.path()
    }

    /// Packages that will be released, in discovery order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.workspaces.values().map(|workspace| &workspace.package)
    }

    /// Checks the plugin setup, the `npmPublish` option, and that every
    /// workspace has a manifest and valid registry credentials.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Verification`] listing every problem found.
    pub fn verify_conditions(
        &mut self,
        config: &RawPluginConfig,
        context: &ReleaseContext,
    ) -> Result<()> {
        let mut errors: Vec<OperationError> = Vec::new();

        if let Err(err) = check_plugin_order(&context.options.plugins) {
            errors.push(err.into());
        }

        let plugin_config = config.validate().unwrap_or_else(|err| {
            errors.push(err.into());
            config.lenient()
        });

        match self.load_workspaces(plugin_config, context) {
            Ok(()) => {}
            Err(OperationError::Verification(found)) => errors.extend(found),
            Err(err) => errors.push(err),
        }

        if let Some(errors) = VerificationErrors::try_from_vec(errors) {
            return Err(OperationError::Verification(errors));
        }

        self.stage = self.stage.max(Stage::Verified);
        Ok(())
    }

    /// Writes the next version into every workspace manifest and stages it.
    ///
    /// # Errors
    ///
    /// Returns an error if the context has no next release, if workspace
    /// discovery fails, or if `npm version` fails.
    pub fn prepare(&mut self, config: &RawPluginConfig, context: &ReleaseContext) -> Result<()> {
        let plugin_config = config.validate()?;
        self.prepare_with(plugin_config, context)
    }

    /// Publishes every public workspace and reports the root package release.
    ///
    /// Returns `None` without touching the registry when `npmPublish` is `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if a skipped earlier step fails or if `npm publish` fails.
    pub fn publish(
        &mut self,
        config: &RawPluginConfig,
        context: &ReleaseContext,
    ) -> Result<Option<ReleaseInfo>> {
        let plugin_config = config.validate()?;
        if plugin_config.publish_disabled() {
            info!("Skip publishing to npm registry as npmPublish is false");
            return Ok(None);
        }

        let next_release = require_next_release(context, "publish")?;
        self.ensure_workspaces(plugin_config, context)?;
        if self.stage < Stage::Prepared {
            self.prepare_with(plugin_config, context)?;
        }

        let tag = dist_tag(next_release.channel.as_deref());
        let version = &next_release.version;

        for (dir, workspace) in &self.workspaces {
            let package = &workspace.package;
            if package.private {
                info!(
                    "Skip publishing {} to npm registry as package.json's private property is true",
                    package.name
                );
                continue;
            }

            info!("Publishing version {version} to npm registry on dist-tag {tag}");
            let command =
                NpmCommand::publish(&tag, &workspace.registry, self.credentials.path());
            self.npm.run(&command, dir, &context.env)?;
            info!(
                "Published {}@{version} to dist-tag @{tag} on {}",
                package.name, workspace.registry
            );
        }

        self.stage = Stage::Published;
        let root = self.root_package(context)?;
        Ok(Some(ReleaseInfo::new(&root.name, &next_release.name, &tag)))
    }

    /// Points the channel's dist-tag at the released version of every public workspace.
    ///
    /// Returns `None` when `npmPublish` is `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if workspace discovery fails or if `npm dist-tag add` fails.
    pub fn add_channel(
        &mut self,
        config: &RawPluginConfig,
        context: &ReleaseContext,
    ) -> Result<Option<ReleaseInfo>> {
        let plugin_config = config.validate()?;
        if plugin_config.publish_disabled() {
            info!("Skip adding to npm channel as npmPublish is false");
            return Ok(None);
        }

        let next_release = require_next_release(context, "add channel")?;
        self.ensure_workspaces(plugin_config, context)?;

        let tag = dist_tag(next_release.channel.as_deref());
        let version = &next_release.version;

        for workspace in self.workspaces.values() {
            let package = &workspace.package;
            if package.private {
                info!(
                    "Skip adding {} to npm channel as package.json's private property is true",
                    package.name
                );
                continue;
            }

            info!("Adding version {version} to npm registry on dist-tag {tag}");
            let command = NpmCommand::dist_tag_add(
                &package.name,
                version,
                &tag,
                &workspace.registry,
                self.credentials.path(),
            );
            self.npm.run(&command, &context.cwd, &context.env)?;
            info!(
                "Added {}@{version} to dist-tag @{tag} on {}",
                package.name, workspace.registry
            );
        }

        let root = self.root_package(context)?;
        Ok(Some(ReleaseInfo::new(&root.name, &next_release.name, &tag)))
    }

    fn prepare_with(&mut self, config: PluginConfig, context: &ReleaseContext) -> Result<()> {
        let next_release = require_next_release(context, "prepare")?;
        self.ensure_workspaces(config, context)?;

        for (dir, workspace) in &self.workspaces {
            let package = &workspace.package;
            info!("Update \"{}\" to {}", package.name, next_release.version);

            let command = NpmCommand::version(&next_release.version, self.credentials.path());
            self.npm.run(&command, dir, &context.env)?;

            let manifest = package.manifest_path();
            match self.git.stage_files(&context.cwd, &[manifest.as_path()]) {
                Ok(skipped) if !skipped.is_empty() => {
                    warn!(path = %manifest.display(), "manifest not found, not staged");
                }
                Ok(_) => debug!(path = %manifest.display(), "staged manifest"),
                Err(err) => warn!(path = %manifest.display(), error = %err, "failed to stage manifest"),
            }
        }

        self.stage = self.stage.max(Stage::Prepared);
        Ok(())
    }

    fn ensure_workspaces(&mut self, config: PluginConfig, context: &ReleaseContext) -> Result<()> {
        if self.stage == Stage::Unverified {
            debug!("verification did not run in this process, discovering workspaces");
            self.load_workspaces(config, context)?;
            self.stage = Stage::Verified;
        }
        Ok(())
    }

    /// Reads every workspace manifest and authenticates against its registry.
    ///
    /// The workspace map is only replaced when every workspace succeeds.
    fn load_workspaces(&mut self, config: PluginConfig, context: &ReleaseContext) -> Result<()> {
        if config.publish_disabled() {
            debug!("npmPublish is false, skipping workspace discovery");
            return Ok(());
        }

        let root = read_package(&context.cwd)?;
        let dirs = discover_workspaces(&root, &WorkspaceQuery::default())?;
        let rc = NpmRc::load(&context.cwd, &context.env)?;

        let manifests = read_manifests(&dirs);

        let mut errors = Vec::new();
        let mut loaded = IndexMap::new();
        for (dir, manifest) in manifests {
            let result = manifest.and_then(|package| {
                let registry = resolve_registry(&package, &context.env, &rc);
                self.authenticate(&registry, &rc, context)?;
                Ok(Workspace { package, registry })
            });

            match result {
                Ok(workspace) => {
                    loaded.insert(dir, workspace);
                }
                Err(err) => errors.push(err),
            }
        }

        if let Some(errors) = VerificationErrors::try_from_vec(errors) {
            return Err(OperationError::Verification(errors));
        }

        debug!(count = loaded.len(), "workspaces ready for release");
        self.root = Some(root);
        self.workspaces = loaded;
        Ok(())
    }

    fn authenticate(&self, registry: &str, rc: &NpmRc, context: &ReleaseContext) -> Result<()> {
        self.credentials.write_auth(registry, rc, &context.env)?;

        let command = NpmCommand::whoami(registry, self.credentials.path())
            .without_env("DEFAULT_NPM_REGISTRY");
        match self.npm.run(&command, &context.cwd, &context.env) {
            Ok(output) => {
                debug!(registry, user = output.stdout.trim(), "npm authentication verified");
                Ok(())
            }
            Err(err) => {
                debug!(registry, error = %err, "npm whoami failed");
                Err(PluginError::InvalidNpmToken {
                    registry: registry.to_string(),
                }
                .into())
            }
        }
    }

    fn root_package(&self, context: &ReleaseContext) -> Result<Package> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(read_package(&context.cwd)?),
        }
    }
}

fn require_next_release<'a>(context: &'a ReleaseContext, hook: &'static str) -> Result<&'a NextRelease> {
    context
        .next_release
        .as_ref()
        .ok_or(OperationError::MissingNextRelease { hook })
}

/// Reads the manifests of `dirs` concurrently, keeping the order of `dirs`.
fn read_manifests(dirs: &[PathBuf]) -> Vec<(PathBuf, Result<Package>)> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = dirs
            .iter()
            .map(|dir| (dir, scope.spawn(move || read_package(dir))))
            .collect();

        handles
            .into_iter()
            .map(|(dir, handle)| {
                let manifest = handle
                    .join()
                    .map_err(|_| OperationError::ManifestWorker { dir: dir.clone() })
                    .and_then(|result| result.map_err(OperationError::from));
                (dir.clone(), manifest)
            })
            .collect()
    })
}
