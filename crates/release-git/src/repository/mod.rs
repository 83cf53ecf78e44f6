mod staging;

use std::path::{Component, Path, PathBuf};

use crate::{GitError, Result};

/// The git repository enclosing a release working directory.
pub struct Repository {
    pub(crate) inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Finds the repository containing `path`, searching parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if no enclosing repository has a working tree.
    pub fn open(path: &Path) -> Result<Self> {
        let not_a_repository = || GitError::NotARepository {
            path: path.to_path_buf(),
        };

        let inner = git2::Repository::discover(path).map_err(|_| not_a_repository())?;
        // Bare repositories have nothing to stage into.
        let workdir = inner
            .workdir()
            .map(|dir| dunce::simplified(dir).to_path_buf())
            .ok_or_else(not_a_repository)?;

        Ok(Self { inner, workdir })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.workdir
    }

    /// Index paths are relative to the working tree.
    ///
    /// A relative input is read from the process working directory when that
    /// lands inside the tree, and from the tree root otherwise.
    pub(crate) fn to_relative_path(&self, path: &Path) -> PathBuf {
        let canonical = |p: &Path| dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
        let workdir = canonical(&self.workdir);
        let inside = |p: &Path| canonical(p).strip_prefix(&workdir).map(Path::to_path_buf).ok();

        if path.is_absolute() {
            return inside(path).unwrap_or_else(|| path.to_path_buf());
        }

        std::path::absolute(path)
            .ok()
            .and_then(|absolute| inside(&absolute))
            .unwrap_or_else(|| {
                path.components()
                    .filter(|component| !matches!(component, Component::CurDir))
                    .collect()
            })
    }
}
