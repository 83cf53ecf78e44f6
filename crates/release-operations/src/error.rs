use std::path::PathBuf;

use release_core::PluginError;
use release_git::GitError;
use release_npm::NpmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error(transparent)]
    Npm(NpmError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("{0}")]
    Verification(VerificationErrors),

    #[error("the {hook} step needs a next release in the context")]
    MissingNextRelease { hook: &'static str },

    #[error("reading the manifest in '{}' panicked", dir.display())]
    ManifestWorker { dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl From<NpmError> for OperationError {
    fn from(err: NpmError) -> Self {
        match err {
            NpmError::Plugin(plugin) => Self::Plugin(plugin),
            other => Self::Npm(other),
        }
    }
}

impl OperationError {
    /// Error code understood by the release host, for plugin-facing failures.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Plugin(err) => Some(err.code()),
            _ => None,
        }
    }
}

/// Every problem found while verifying release conditions. Never empty.
#[derive(Debug)]
pub struct VerificationErrors {
    first: Box<OperationError>,
    rest: Vec<OperationError>,
}

impl VerificationErrors {
    /// Creates a new `VerificationErrors` from a vector, returning `None` if empty.
    #[must_use]
    pub fn try_from_vec(mut errors: Vec<OperationError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        let first = Box::new(errors.remove(0));
        Some(Self {
            first,
            rest: errors,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<OperationError> {
        let mut errors = vec![*self.first];
        errors.extend(self.rest);
        errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationError> {
        std::iter::once(self.first.as_ref()).chain(self.rest.iter())
    }

    /// Host error codes in report order, skipping errors that carry none.
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.iter().filter_map(OperationError::code).collect()
    }
}

impl std::fmt::Display for VerificationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "verification failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            match error {
                OperationError::Plugin(plugin) => {
                    writeln!(f, "  {}. [{}] {plugin}", i + 1, plugin.code())?;
                    for line in plugin.details().lines() {
                        if line.is_empty() {
                            writeln!(f)?;
                        } else {
                            writeln!(f, "     {line}")?;
                        }
                    }
                }
                other => writeln!(f, "  {}. {other}", i + 1)?,
            }
        }
        Ok(())
    }
}

impl IntoIterator for VerificationErrors {
    type Item = OperationError;
    type IntoIter = std::vec::IntoIter<OperationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
