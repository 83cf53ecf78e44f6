use std::path::Path;

use release_core::Env;
use release_npm::{CommandOutput, NpmCommand};

use crate::Result;

pub trait NpmClient: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if `npm` cannot be started or exits unsuccessfully.
    fn run(&self, command: &NpmCommand, cwd: &Path, env: &Env) -> Result<CommandOutput>;
}
