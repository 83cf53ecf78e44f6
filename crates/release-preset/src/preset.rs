use std::path::Path;

use release_core::{Env, PluginSpec};
use serde::Serialize;
use tracing::warn;

use crate::branch::{BranchSpec, branches};
use crate::channel::{changelog_file, release_channel};

const CONVENTIONAL_COMMITS: &str = "conventionalcommits";
const NPM_PUBLISH_VAR: &str = "SEMANTIC_RELEASE_NPM_PUBLISH";
const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
const SLACK_WEBHOOK_VAR: &str = "SEMANTIC_RELEASE_SLACK_WEBHOOK";

/// Host configuration: release branches and the ordered plugin pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preset {
    pub branches: Vec<BranchSpec>,
    pub plugins: Vec<PluginSpec>,
}

impl Preset {
    /// Assembles the preset for the repository at `cwd`.
    ///
    /// The publish plugin is only configured when `cwd` holds a `package.json`,
    /// and it always precedes the git plugin so bumped manifests land in the
    /// release commit.
    #[must_use]
    pub fn from_env(env: &Env, cwd: &Path) -> Self {
        let channel = release_channel(env);
        let changelog = changelog_file(&channel);

        let mut plugins = vec![
            PluginSpec::CommitAnalyzer {
                preset: Some(CONVENTIONAL_COMMITS.to_string()),
            },
            PluginSpec::ReleaseNotesGenerator {
                preset: Some(CONVENTIONAL_COMMITS.to_string()),
            },
            PluginSpec::Changelog {
                changelog_file: Some(changelog.clone()),
            },
        ];

        if cwd.join("package.json").exists() {
            let npm_publish = env.get(NPM_PUBLISH_VAR) == Some("true");
            plugins.push(PluginSpec::publish(npm_publish));
        } else {
            warn!("could not infer package type, assuming publication is handled externally");
        }

        if env.non_empty(GITHUB_TOKEN_VAR).is_some() {
            plugins.push(PluginSpec::Github);
        }

        plugins.push(PluginSpec::Git {
            assets: Some(vec![changelog]),
        });

        if let Some(webhook) = env.non_empty(SLACK_WEBHOOK_VAR) {
            plugins.push(PluginSpec::SlackBot {
                notify_on_fail: false,
                notify_on_success: true,
                slack_webhook: webhook.to_string(),
            });
        }

        Self {
            branches: branches(env),
            plugins,
        }
    }

    #[must_use]
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(PluginSpec::name).collect()
    }
}
