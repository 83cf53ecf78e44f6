use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::env::Env;
use crate::plugin::PluginSpec;

/// The release the host is about to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRelease {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Human-readable release name, usually the git tag.
    #[serde(default)]
    pub name: String,
}

impl NextRelease {
    #[must_use]
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            channel: None,
            name: format!("v{version}"),
        }
    }

    #[must_use]
    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

/// Global options of the host run that the plugin inspects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostOptions {
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

/// Per-call context supplied by the release host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContext {
    pub cwd: PathBuf,
    #[serde(default)]
    pub env: Env,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_release: Option<NextRelease>,
    #[serde(default)]
    pub options: HostOptions,
}

impl ReleaseContext {
    #[must_use]
    pub fn new(cwd: PathBuf, env: Env) -> Self {
        Self {
            cwd,
            env,
            next_release: None,
            options: HostOptions::default(),
        }
    }

    #[must_use]
    pub fn with_next_release(mut self, next_release: NextRelease) -> Self {
        self.next_release = Some(next_release);
        self
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Vec<PluginSpec>) -> Self {
        self.options.plugins = plugins;
        self
    }
}
