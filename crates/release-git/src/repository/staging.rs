use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Result;

use super::Repository;

impl Repository {
    /// Stages `paths` into the index, ignored files included.
    ///
    /// Paths that do not exist in the working tree are left alone and returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be read, updated or written.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<Vec<PathBuf>> {
        let mut index = self.inner.index()?;
        let mut skipped = Vec::new();

        for path in paths {
            let relative_path = self.to_relative_path(path);

            if self.root().join(&relative_path).exists() {
                debug!(path = %relative_path.display(), "staging file");
                index.add_path(&relative_path)?;
            } else {
                skipped.push(path.to_path_buf());
            }
        }

        index.write()?;
        Ok(skipped)
    }
}
