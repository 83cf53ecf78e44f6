use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use release_core::Env;
use release_npm::{CommandOutput, NpmCommand, NpmError};

use crate::Result;
use crate::traits::{GitProvider, NpmClient};

pub struct MockNpmClient {
    failing: HashSet<String>,
    calls: Mutex<Vec<(NpmCommand, PathBuf)>>,
}

impl MockNpmClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes every call of `subcommand` exit unsuccessfully.
    #[must_use]
    pub fn failing(mut self, subcommand: &str) -> Self {
        self.failing.insert(subcommand.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(NpmCommand, PathBuf)> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn subcommands(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(command, _)| command.subcommand().to_string())
            .collect()
    }
}

impl Default for MockNpmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NpmClient for MockNpmClient {
    fn run(&self, command: &NpmCommand, cwd: &Path, _env: &Env) -> Result<CommandOutput> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((command.clone(), cwd.to_path_buf()));

        if self.failing.contains(command.subcommand()) {
            return Err(NpmError::CommandFailed {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "npm ERR! code E401".to_string(),
            }
            .into());
        }

        Ok(CommandOutput::default())
    }
}

pub struct MockGitProvider {
    fail: bool,
    staged_files: Mutex<Vec<PathBuf>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fail: false,
            staged_files: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            staged_files: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn staged_files(&self) -> Vec<PathBuf> {
        self.staged_files.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<Vec<PathBuf>> {
        if self.fail {
            return Err(release_git::GitError::NotARepository {
                path: project_root.to_path_buf(),
            }
            .into());
        }
        self.staged_files
            .lock()
            .expect("lock poisoned")
            .extend(paths.iter().map(|p| p.to_path_buf()));
        Ok(Vec::new())
    }
}
