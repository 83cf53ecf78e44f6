use release_core::Env;
use tracing::debug;

use crate::branch::release_branch;

const RELEASE_CHANNEL_VAR: &str = "RELEASE_CHANNEL";
const HEADS_PREFIX: &str = "refs/heads/";

/// A CI system exposing the current branch through an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelProvider {
    pub name: &'static str,
    pub variable: &'static str,
}

impl ChannelProvider {
    fn lookup<'a>(&self, env: &'a Env) -> Option<&'a str> {
        env.non_empty(self.variable)
    }
}

/// Branch providers in precedence order; the first one set wins.
pub const BRANCH_PROVIDERS: &[ChannelProvider] = &[
    ChannelProvider {
        name: "GitHub Actions",
        variable: "GITHUB_REF_NAME",
    },
    ChannelProvider {
        name: "GitHub Actions (pull request)",
        variable: "GITHUB_HEAD_REF",
    },
    ChannelProvider {
        name: "GitLab CI",
        variable: "CI_COMMIT_BRANCH",
    },
    ChannelProvider {
        name: "GitLab CI (ref)",
        variable: "CI_COMMIT_REF_NAME",
    },
    ChannelProvider {
        name: "Bitbucket Pipelines",
        variable: "BITBUCKET_BRANCH",
    },
    ChannelProvider {
        name: "CircleCI",
        variable: "CIRCLE_BRANCH",
    },
    ChannelProvider {
        name: "Travis CI",
        variable: "TRAVIS_BRANCH",
    },
    ChannelProvider {
        name: "Jenkins",
        variable: "BRANCH_NAME",
    },
    ChannelProvider {
        name: "GitHub Actions (full ref)",
        variable: "GITHUB_REF",
    },
];

/// Derives the channel from the CI branch, keeping only its last path segment.
#[must_use]
pub fn infer_release_channel(env: &Env) -> Option<String> {
    let (provider, reference) = BRANCH_PROVIDERS
        .iter()
        .find_map(|provider| provider.lookup(env).map(|value| (provider, value)))?;

    debug!(provider = provider.name, reference, "inferring release channel");

    let branch = reference.strip_prefix(HEADS_PREFIX).unwrap_or(reference);
    branch.rsplit('/').next().map(ToString::to_string)
}

/// `RELEASE_CHANNEL`, else the CI branch, else the release branch.
#[must_use]
pub fn release_channel(env: &Env) -> String {
    env.non_empty(RELEASE_CHANNEL_VAR)
        .map(ToString::to_string)
        .or_else(|| infer_release_channel(env).filter(|channel| !channel.is_empty()))
        .unwrap_or_else(|| release_branch(env).to_string())
}

#[must_use]
pub fn changelog_file(channel: &str) -> String {
    format!("changelogs/CHANGELOG_{channel}.md")
}
