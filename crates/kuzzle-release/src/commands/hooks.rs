use std::path::Path;

use release_core::ReleaseInfo;
use release_operations::lifecycle::ReleaseCoordinator;
use release_operations::providers::{Git2Provider, ProcessNpmClient};

use super::HookArgs;
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    VerifyConditions,
    Prepare,
    Publish,
    AddChannel,
    /// `VerifyConditions`, `Prepare` then `Publish` with one coordinator.
    Release,
}

pub(crate) fn run(hook: Hook, start_path: &Path, args: HookArgs) -> Result<()> {
    let input = args.resolve(start_path)?;
    let (config, context) = (&input.config, &input.context);
    let mut coordinator = ReleaseCoordinator::new(ProcessNpmClient::new(), Git2Provider::new())?;

    match hook {
        Hook::VerifyConditions => coordinator.verify_conditions(config, context)?,
        Hook::Prepare => coordinator.prepare(config, context)?,
        Hook::Publish => print_release(coordinator.publish(config, context)?)?,
        Hook::AddChannel => print_release(coordinator.add_channel(config, context)?)?,
        Hook::Release => {
            coordinator.verify_conditions(config, context)?;
            coordinator.prepare(config, context)?;
            print_release(coordinator.publish(config, context)?)?;
        }
    }

    Ok(())
}

/// Prints the release info as JSON, or `null` when nothing was released.
fn print_release(info: Option<ReleaseInfo>) -> Result<()> {
    let json = serde_json::to_string_pretty(&info).map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}
