mod branch;
mod channel;
mod preset;

pub use branch::{BranchSpec, DEFAULT_DEVELOP_BRANCH, DEFAULT_RELEASE_BRANCH, branches};
pub use channel::{
    BRANCH_PROVIDERS, ChannelProvider, changelog_file, infer_release_channel, release_channel,
};
pub use preset::Preset;
