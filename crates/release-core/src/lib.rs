mod config;
mod context;
mod env;
pub mod error;
mod plugin;
mod types;

pub use config::{PluginConfig, RawPluginConfig};
pub use context::{HostOptions, NextRelease, ReleaseContext};
pub use env::Env;
pub use error::{PluginError, Result};
pub use plugin::{
    CHANGELOG_PLUGIN, COMMIT_ANALYZER, GIT_PLUGIN, GITHUB_PLUGIN, NPM_PLUGIN, PUBLISH_PLUGIN,
    PluginSpec, RELEASE_NOTES_GENERATOR, SLACK_PLUGIN,
};
pub use types::ReleaseInfo;
