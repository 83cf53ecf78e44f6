use std::path::{Path, PathBuf};

use clap::Args;
use release_core::{Env, NextRelease, PluginSpec, RawPluginConfig, ReleaseContext};
use release_preset::Preset;
use serde_json::Value;
use tracing::debug;

use crate::error::{CliError, Result};

/// Where a hook gets its release context and plugin options from.
#[derive(Args, Debug, Default)]
pub(crate) struct HookArgs {
    /// Release context as JSON, in the host's shape (cwd, env, nextRelease, options)
    #[arg(long, value_name = "FILE")]
    context: Option<PathBuf>,

    /// Version being released
    #[arg(long = "version", value_name = "VERSION", conflicts_with = "context")]
    release_version: Option<String>,

    /// Release channel (default: the release branch)
    #[arg(long, conflicts_with = "context")]
    channel: Option<String>,

    /// Release name (default: v<VERSION>)
    #[arg(long, conflicts_with = "context")]
    release_name: Option<String>,

    /// Plugin options as JSON, e.g. '{"npmPublish": true}'
    #[arg(long, value_name = "JSON", conflicts_with = "npm_publish")]
    plugin_config: Option<String>,

    /// Shorthand for the `npmPublish` plugin option
    #[arg(long, value_name = "BOOL")]
    npm_publish: Option<bool>,
}

/// A resolved hook invocation.
pub(crate) struct HookInput {
    pub config: RawPluginConfig,
    pub context: ReleaseContext,
}

impl HookArgs {
    pub(crate) fn resolve(self, start_path: &Path) -> Result<HookInput> {
        let context = match &self.context {
            Some(path) => read_context(path, start_path)?,
            None => self.context_from_process(start_path),
        };

        let config = match (self.plugin_config, self.npm_publish) {
            (Some(json), _) => serde_json::from_str(&json).map_err(CliError::PluginConfig)?,
            (None, Some(npm_publish)) => RawPluginConfig {
                npm_publish: Some(Value::Bool(npm_publish)),
                mock: None,
            },
            (None, None) => listed_config(&context.options.plugins),
        };

        Ok(HookInput { config, context })
    }

    /// Builds a context from the process environment, with the preset standing
    /// in for the host's plugin list.
    fn context_from_process(&self, start_path: &Path) -> ReleaseContext {
        let env = Env::from_process();
        let plugins = Preset::from_env(&env, start_path).plugins;
        let mut context = ReleaseContext::new(start_path.to_path_buf(), env).with_plugins(plugins);

        if let Some(version) = &self.release_version {
            let mut next_release = NextRelease::new(version);
            if let Some(channel) = &self.channel {
                next_release = next_release.with_channel(channel);
            }
            if let Some(name) = &self.release_name {
                next_release = next_release.with_name(name);
            }
            context = context.with_next_release(next_release);
        }

        context
    }
}

fn read_context(path: &Path, start_path: &Path) -> Result<ReleaseContext> {
    let path = start_path.join(path);
    let content = std::fs::read_to_string(&path).map_err(|source| CliError::ContextRead {
        path: path.clone(),
        source,
    })?;
    let mut context: ReleaseContext =
        serde_json::from_str(&content).map_err(|source| CliError::ContextParse {
            path: path.clone(),
            source,
        })?;

    if context.cwd.is_relative() {
        context.cwd = start_path.join(&context.cwd);
    }
    debug!(path = %path.display(), cwd = %context.cwd.display(), "loaded release context");
    Ok(context)
}

/// Options attached to the publish plugin entry of the plugin list, if any.
fn listed_config(plugins: &[PluginSpec]) -> RawPluginConfig {
    plugins
        .iter()
        .find_map(|plugin| match plugin {
            PluginSpec::Publish { config, .. } => Some(config.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use release_core::GIT_PLUGIN;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn npm_publish_flag_becomes_plugin_option() {
        let args = HookArgs {
            npm_publish: Some(false),
            ..HookArgs::default()
        };

        let input = args.resolve(Path::new("/repo")).expect("resolves");

        assert_eq!(input.config.npm_publish, Some(Value::Bool(false)));
    }

    #[test]
    fn plugin_config_keeps_invalid_values_for_verification() {
        let args = HookArgs {
            plugin_config: Some(r#"{"npmPublish": "yes"}"#.to_string()),
            ..HookArgs::default()
        };

        let input = args.resolve(Path::new("/repo")).expect("resolves");

        assert_eq!(input.config.npm_publish, Some(Value::String("yes".into())));
    }

    #[test]
    fn version_flags_build_next_release() {
        let args = HookArgs {
            release_version: Some("2.0.0".to_string()),
            channel: Some("beta".to_string()),
            ..HookArgs::default()
        };

        let input = args.resolve(Path::new("/repo")).expect("resolves");

        assert_eq!(
            input.context.next_release,
            Some(NextRelease::new("2.0.0").with_channel("beta"))
        );
    }

    #[test]
    fn context_file_is_read_relative_to_start_path() {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(
            dir.path().join("context.json"),
            r#"{
                "cwd": "project",
                "env": {"NPM_TOKEN": "secret"},
                "nextRelease": {"version": "1.1.0", "name": "v1.1.0"},
                "options": {"plugins": [
                    "semantic-release-config-kuzzle/plugin",
                    ["@semantic-release/git", {"assets": ["package.json"]}]
                ]}
            }"#,
        )
        .expect("write context");
        let args = HookArgs {
            context: Some(PathBuf::from("context.json")),
            ..HookArgs::default()
        };

        let input = args.resolve(dir.path()).expect("resolves");

        assert_eq!(input.context.cwd, dir.path().join("project"));
        assert_eq!(input.context.env.get("NPM_TOKEN"), Some("secret"));
        assert_eq!(input.context.options.plugins[1].name(), GIT_PLUGIN);
        assert_eq!(input.config, RawPluginConfig::default());
    }

    #[test]
    fn listed_publish_options_are_used_by_default() {
        let plugins = vec![PluginSpec::publish(true)];

        assert_eq!(
            listed_config(&plugins).npm_publish,
            Some(Value::Bool(true))
        );
        assert_eq!(listed_config(&[]), RawPluginConfig::default());
    }
}
