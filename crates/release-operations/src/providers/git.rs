use std::path::{Path, PathBuf};

use release_git::Repository;

use crate::Result;
use crate::traits::GitProvider;

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.stage_files(paths)?)
    }
}
