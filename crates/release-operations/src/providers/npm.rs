use std::path::Path;

use release_core::Env;
use release_npm::{CommandOutput, NpmCommand};

use crate::Result;
use crate::traits::NpmClient;

/// Runs `npm` as a child process.
pub struct ProcessNpmClient;

impl ProcessNpmClient {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessNpmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NpmClient for ProcessNpmClient {
    fn run(&self, command: &NpmCommand, cwd: &Path, env: &Env) -> Result<CommandOutput> {
        Ok(command.run(cwd, env)?)
    }
}
