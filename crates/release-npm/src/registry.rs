use release_core::Env;
use url::Url;

use crate::error::NpmError;
use crate::manifest::Package;
use crate::rc::NpmRc;

pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org/";

/// Credentials found in the npm configuration for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryAuth {
    Token(String),
    Basic(String),
    Password { username: String, password: String },
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

/// Picks the registry a package publishes to.
///
/// Order: `publishConfig.registry`, `NPM_CONFIG_REGISTRY`, the `<scope>:registry`
/// entry of the npm config, then its `registry` entry.
#[must_use]
pub fn resolve_registry(package: &Package, env: &Env, rc: &NpmRc) -> String {
    if let Some(registry) = &package.publish_registry {
        return with_trailing_slash(registry);
    }
    if let Some(registry) = env.non_empty("NPM_CONFIG_REGISTRY") {
        return with_trailing_slash(registry);
    }

    let scoped = format!("{}:registry", package.scope());
    let registry = rc
        .get(&scoped)
        .or_else(|| rc.get("registry"))
        .unwrap_or(DEFAULT_REGISTRY);
    with_trailing_slash(registry)
}

/// Maps a registry URL to the protocol-less key npm scopes credentials with,
/// e.g. `https://user@npm.example.com/api/npm?x=1` becomes `//npm.example.com/api/`.
///
/// # Errors
///
/// Returns [`NpmError::RegistryUrl`] when `registry` is not an absolute URL.
pub fn nerf_dart(registry: &str) -> Result<String, NpmError> {
    let parse_error = |source: url::ParseError| NpmError::RegistryUrl {
        url: registry.to_string(),
        source,
    };
    let url = Url::parse(registry).map_err(parse_error)?;
    let directory = url.join(".").map_err(parse_error)?;
    Ok(format!("//{}{}", host_with_port(&directory), directory.path()))
}

fn host_with_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Looks up credentials for `registry`, walking from its path up to the host root.
///
/// Values written as `${VAR}` are read from `env`; a reference to an unset
/// variable does not count as a credential.
///
/// # Errors
///
/// Returns [`NpmError::RegistryUrl`] when `registry` is not an absolute URL.
pub fn auth_for(registry: &str, rc: &NpmRc, env: &Env) -> Result<Option<RegistryAuth>, NpmError> {
    let url = Url::parse(registry).map_err(|source| NpmError::RegistryUrl {
        url: registry.to_string(),
        source,
    })?;
    let host = host_with_port(&url);
    let mut path = url.path().to_string();

    loop {
        let prefix = format!("//{host}{}", path.trim_end_matches('/'));
        if let Some(auth) = auth_at(&prefix, rc, env) {
            return Ok(Some(auth));
        }

        match parent_path(&path) {
            Some(parent) => path = parent,
            None => return Ok(None),
        }
    }
}

fn auth_at(prefix: &str, rc: &NpmRc, env: &Env) -> Option<RegistryAuth> {
    let lookup = |key: &str| {
        rc.get(&format!("{prefix}:{key}"))
            .or_else(|| rc.get(&format!("{prefix}/:{key}")))
            .and_then(|value| expand(value, env))
    };

    if let Some(token) = lookup("_authToken") {
        return Some(RegistryAuth::Token(token));
    }
    if let Some(auth) = lookup("_auth") {
        return Some(RegistryAuth::Basic(auth));
    }
    match (lookup("username"), lookup("_password")) {
        (Some(username), Some(password)) => Some(RegistryAuth::Password { username, password }),
        _ => None,
    }
}

fn expand(value: &str, env: &Env) -> Option<String> {
    let reference = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'));
    match reference {
        Some(variable) => env.non_empty(variable).map(ToString::to_string),
        None if value.is_empty() => None,
        None => Some(value.to_string()),
    }
}

/// `/a/b/` -> `/a/`, `/a` -> `/`, `/` -> `None`.
fn parent_path(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .rfind('/')
        .map(|index| trimmed[..=index].to_string())
}
