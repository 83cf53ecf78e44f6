use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("release step failed")]
    Operation(#[from] release_operations::OperationError),

    #[error("npm project error")]
    Npm(#[from] release_npm::NpmError),

    #[error("failed to read release context '{path}'")]
    ContextRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid release context '{path}'")]
    ContextParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid plugin configuration")]
    PluginConfig(#[source] serde_json::Error),

    #[error("failed to serialize output")]
    Output(#[source] serde_json::Error),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("project directory '{path}' is not accessible")]
    StartPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
