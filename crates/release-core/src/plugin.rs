use serde::de::Deserializer;
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::RawPluginConfig;

pub const COMMIT_ANALYZER: &str = "@semantic-release/commit-analyzer";
pub const RELEASE_NOTES_GENERATOR: &str = "@semantic-release/release-notes-generator";
pub const CHANGELOG_PLUGIN: &str = "@semantic-release/changelog";
pub const GIT_PLUGIN: &str = "@semantic-release/git";
pub const GITHUB_PLUGIN: &str = "@semantic-release/github";
pub const NPM_PLUGIN: &str = "@semantic-release/npm";
pub const PUBLISH_PLUGIN: &str = "semantic-release-config-kuzzle/plugin";
pub const SLACK_PLUGIN: &str = "semantic-release-slack-bot";

/// A step in the host's plugin list, with its options when it has any.
///
/// On the wire a plugin is either a bare module name or a `[name, options]`
/// pair; unknown modules are kept verbatim in [`PluginSpec::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum PluginSpec {
    CommitAnalyzer {
        preset: Option<String>,
    },
    ReleaseNotesGenerator {
        preset: Option<String>,
    },
    Changelog {
        changelog_file: Option<String>,
    },
    Git {
        assets: Option<Vec<String>>,
    },
    Github,
    Npm {
        npm_publish: Option<bool>,
    },
    /// This crate's own publish plugin, possibly referenced through a path.
    Publish {
        module: String,
        config: RawPluginConfig,
    },
    SlackBot {
        notify_on_fail: bool,
        notify_on_success: bool,
        slack_webhook: String,
    },
    Other {
        name: String,
        options: Option<Value>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresetOptions {
    preset: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangelogOptions {
    changelog_file: Option<String>,
}

#[derive(Deserialize)]
struct GitOptions {
    assets: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NpmOptions {
    npm_publish: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlackOptions {
    #[serde(default)]
    notify_on_fail: bool,
    #[serde(default)]
    notify_on_success: bool,
    slack_webhook: String,
}

impl PluginSpec {
    #[must_use]
    pub fn publish(npm_publish: bool) -> Self {
        Self::Publish {
            module: PUBLISH_PLUGIN.to_string(),
            config: RawPluginConfig {
                npm_publish: Some(Value::Bool(npm_publish)),
                mock: None,
            },
        }
    }

    /// Module name as the host resolves it.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::CommitAnalyzer { .. } => COMMIT_ANALYZER,
            Self::ReleaseNotesGenerator { .. } => RELEASE_NOTES_GENERATOR,
            Self::Changelog { .. } => CHANGELOG_PLUGIN,
            Self::Git { .. } => GIT_PLUGIN,
            Self::Github => GITHUB_PLUGIN,
            Self::Npm { .. } => NPM_PLUGIN,
            Self::Publish { module, .. } => module,
            Self::SlackBot { .. } => SLACK_PLUGIN,
            Self::Other { name, .. } => name,
        }
    }

    #[must_use]
    pub fn is_publish_plugin(&self) -> bool {
        matches!(self, Self::Publish { .. })
    }

    /// Matches on the module name, so a git entry with options this crate
    /// does not model still counts.
    #[must_use]
    pub fn is_git_plugin(&self) -> bool {
        self.name() == GIT_PLUGIN
    }

    #[must_use]
    pub fn options(&self) -> Option<Value> {
        match self {
            Self::CommitAnalyzer { preset } | Self::ReleaseNotesGenerator { preset } => {
                preset.as_ref().map(|preset| json!({ "preset": preset }))
            }
            Self::Changelog { changelog_file } => changelog_file
                .as_ref()
                .map(|file| json!({ "changelogFile": file })),
            Self::Git { assets } => assets.as_ref().map(|assets| json!({ "assets": assets })),
            Self::Github => None,
            Self::Npm { npm_publish } => npm_publish.map(|flag| json!({ "npmPublish": flag })),
            Self::Publish { config, .. } => {
                if config.npm_publish.is_none() && config.mock.is_none() {
                    None
                } else {
                    serde_json::to_value(config).ok()
                }
            }
            Self::SlackBot {
                notify_on_fail,
                notify_on_success,
                slack_webhook,
            } => Some(json!({
                "notifyOnFail": notify_on_fail,
                "notifyOnSuccess": notify_on_success,
                "slackWebhook": slack_webhook,
            })),
            Self::Other { options, .. } => options.clone(),
        }
    }

    /// Builds a spec from a module name and its raw options.
    ///
    /// Options that do not match the expected shape of a known module keep the
    /// plugin as [`PluginSpec::Other`] so nothing the host configured is lost.
    #[must_use]
    pub fn from_parts(name: &str, options: Option<Value>) -> Self {
        let typed = match name {
            COMMIT_ANALYZER => parse_options::<PresetOptions>(options.as_ref())
                .map(|o| Self::CommitAnalyzer { preset: o.preset }),
            RELEASE_NOTES_GENERATOR => parse_options::<PresetOptions>(options.as_ref())
                .map(|o| Self::ReleaseNotesGenerator { preset: o.preset }),
            CHANGELOG_PLUGIN => parse_options::<ChangelogOptions>(options.as_ref()).map(|o| {
                Self::Changelog {
                    changelog_file: o.changelog_file,
                }
            }),
            GIT_PLUGIN => parse_options::<GitOptions>(options.as_ref())
                .map(|o| Self::Git { assets: o.assets }),
            GITHUB_PLUGIN if options.is_none() => Some(Self::Github),
            NPM_PLUGIN => parse_options::<NpmOptions>(options.as_ref()).map(|o| Self::Npm {
                npm_publish: o.npm_publish,
            }),
            SLACK_PLUGIN => options
                .clone()
                .and_then(|o| serde_json::from_value::<SlackOptions>(o).ok())
                .map(|o| Self::SlackBot {
                    notify_on_fail: o.notify_on_fail,
                    notify_on_success: o.notify_on_success,
                    slack_webhook: o.slack_webhook,
                }),
            module if module.contains(PUBLISH_PLUGIN) => {
                parse_options::<RawPluginConfig>(options.as_ref()).map(|config| Self::Publish {
                    module: module.to_string(),
                    config,
                })
            }
            _ => None,
        };

        typed.unwrap_or_else(|| Self::Other {
            name: name.to_string(),
            options,
        })
    }
}

fn parse_options<T>(options: Option<&Value>) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    match options {
        None => serde_json::from_value(json!({})).ok(),
        Some(value) => serde_json::from_value(value.clone()).ok(),
    }
}

impl Serialize for PluginSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.options() {
            None => serializer.serialize_str(self.name()),
            Some(options) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(self.name())?;
                tuple.serialize_element(&options)?;
                tuple.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WirePlugin {
    Name(String),
    WithOptions(String, Value),
    Bare((String,)),
}

impl<'de> Deserialize<'de> for PluginSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WirePlugin::deserialize(deserializer)? {
            WirePlugin::Name(name) | WirePlugin::Bare((name,)) => Self::from_parts(&name, None),
            WirePlugin::WithOptions(name, options) => Self::from_parts(&name, Some(options)),
        })
    }
}
