use std::path::{Path, PathBuf};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Stages `paths`, returning the ones that were not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the index cannot be written.
    fn stage_files(&self, project_root: &Path, paths: &[&Path]) -> Result<Vec<PathBuf>>;
}
