use release_core::Env;
use serde::Serialize;

pub const DEFAULT_RELEASE_BRANCH: &str = "main";
pub const DEFAULT_DEVELOP_BRANCH: &str = "develop";

const RELEASE_BRANCH_VAR: &str = "SEMANTIC_RELEASE_RELEASE_BRANCH";
const DEVELOP_BRANCH_VAR: &str = "SEMANTIC_RELEASE_DEVELOP_BRANCH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchSpec {
    pub name: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prerelease: bool,
}

pub(crate) fn release_branch(env: &Env) -> &str {
    env.get(RELEASE_BRANCH_VAR).unwrap_or(DEFAULT_RELEASE_BRANCH)
}

/// The stable release branch followed by the prerelease branch.
#[must_use]
pub fn branches(env: &Env) -> Vec<BranchSpec> {
    vec![
        BranchSpec {
            name: release_branch(env).to_string(),
            prerelease: false,
        },
        BranchSpec {
            name: env
                .get(DEVELOP_BRANCH_VAR)
                .unwrap_or(DEFAULT_DEVELOP_BRANCH)
                .to_string(),
            prerelease: true,
        },
    ]
}
