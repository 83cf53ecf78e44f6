use std::path::PathBuf;

use release_core::PluginError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NpmError {
    #[error(transparent)]
    Plugin(#[from] PluginError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to read npm config at '{path}'")]
    RcRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write credentials file '{path}'")]
    CredentialsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry URL '{url}'")]
    RegistryUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to run `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
}
