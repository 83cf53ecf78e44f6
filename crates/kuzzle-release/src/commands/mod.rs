mod hooks;
mod input;
mod preset;
mod workspaces;

use std::path::Path;

use clap::Subcommand;

use crate::error::Result;

pub(crate) use hooks::Hook;
pub(crate) use input::HookArgs;
pub(crate) use workspaces::WorkspacesArgs;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Check the plugin setup and npm credentials of every workspace
    VerifyConditions(HookArgs),
    /// Write the next version into every workspace manifest and stage it
    Prepare(HookArgs),
    /// Publish every public workspace and print the release info
    Publish(HookArgs),
    /// Point the channel dist-tag at the released version
    AddChannel(HookArgs),
    /// Verify, prepare and publish in one run
    Release(HookArgs),
    /// Print the release preset as JSON
    Preset,
    /// List the workspaces that would be released
    Workspaces(WorkspacesArgs),
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::VerifyConditions(args) => hooks::run(Hook::VerifyConditions, start_path, args),
            Self::Prepare(args) => hooks::run(Hook::Prepare, start_path, args),
            Self::Publish(args) => hooks::run(Hook::Publish, start_path, args),
            Self::AddChannel(args) => hooks::run(Hook::AddChannel, start_path, args),
            Self::Release(args) => hooks::run(Hook::Release, start_path, args),
            Self::Preset => preset::run(start_path),
            Self::Workspaces(args) => workspaces::run(start_path, &args),
        }
    }
}
