mod command;
mod credentials;
mod dist_tag;
mod error;
mod manifest;
mod rc;
mod registry;
mod workspaces;

pub use command::{CommandOutput, NpmCommand};
pub use credentials::CredentialsFile;
pub use dist_tag::dist_tag;
pub use error::NpmError;
pub use manifest::{MANIFEST_FILE, Package, read_package};
pub use rc::NpmRc;
pub use registry::{DEFAULT_REGISTRY, RegistryAuth, auth_for, nerf_dart, resolve_registry};
pub use workspaces::{DEFAULT_IGNORE, WorkspaceQuery, discover_workspaces};

pub type Result<T> = std::result::Result<T, NpmError>;
