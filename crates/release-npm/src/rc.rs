use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use release_core::Env;
use tracing::debug;

use crate::error::NpmError;
use crate::registry::DEFAULT_REGISTRY;

const RC_FILE: &str = ".npmrc";
const ENV_PREFIX: &str = "npm_config_";

/// Merged npm configuration, plus the list of files it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NpmRc {
    values: BTreeMap<String, String>,
    configs: Vec<PathBuf>,
}

impl NpmRc {
    /// Loads the npm configuration visible from `cwd`.
    ///
    /// Sources, later ones overriding earlier ones: `$HOME/.npmrc`, the nearest
    /// `.npmrc` above `cwd`, the user config (`NPM_CONFIG_USERCONFIG` or
    /// `<cwd>/.npmrc`), then `npm_config_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`NpmError::RcRead`] if an existing config file cannot be read.
    pub fn load(cwd: &Path, env: &Env) -> Result<Self, NpmError> {
        let user_config = env
            .get("NPM_CONFIG_USERCONFIG")
            .or_else(|| env.get("npm_config_userconfig"))
            .filter(|path| !path.is_empty())
            .map_or_else(|| cwd.join(RC_FILE), |path| cwd.join(path));

        let mut candidates = Vec::new();
        if let Some(home) = env.non_empty("HOME") {
            candidates.push(Path::new(home).join(RC_FILE));
        }
        if let Some(project) = find_project_rc(cwd) {
            candidates.push(project);
        }
        candidates.push(user_config);

        let mut rc = Self::default();
        rc.values
            .insert("registry".to_string(), DEFAULT_REGISTRY.to_string());

        for path in candidates {
            if rc.configs.contains(&path) || !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "reading npm config");
            let content = std::fs::read_to_string(&path).map_err(|source| NpmError::RcRead {
                path: path.clone(),
                source,
            })?;
            rc.values.extend(parse(&content));
            rc.configs.push(path);
        }

        for (key, value) in env.iter() {
            let lowered = key.to_ascii_lowercase();
            if let Some(name) = lowered.strip_prefix(ENV_PREFIX) {
                if !name.is_empty() && name != "userconfig" {
                    rc.values.insert(name.to_string(), value.to_string());
                }
            }
        }

        Ok(rc)
    }

    /// Parses a single config text, without any file lookup.
    #[must_use]
    pub fn from_content(content: &str) -> Self {
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        values.insert("registry".to_string(), DEFAULT_REGISTRY.to_string());
        values.extend(parse(content));
        Self {
            values,
            configs: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Config files that were actually read, in load order.
    #[must_use]
    pub fn configs(&self) -> &[PathBuf] {
        &self.configs
    }
}

fn find_project_rc(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(RC_FILE))
        .find(|candidate| candidate.is_file())
}

fn parse(content: &str) -> impl Iterator<Item = (String, String)> + '_ {
    content.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') || line.starts_with('[')
        {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        let key = key.trim().trim_end_matches("[]");
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), unquote(value.trim()).to_string()))
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
