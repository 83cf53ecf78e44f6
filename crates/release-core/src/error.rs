use std::path::PathBuf;

use thiserror::Error;

/// User-facing failures reported back to the release host.
///
/// Each variant maps to a stable error code (see [`PluginError::code`]) and
/// carries a long-form explanation (see [`PluginError::details`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("Invalid `npmPublish` option.")]
    InvalidNpmPublish { value: String },

    #[error("No npm token specified.")]
    NoNpmToken { registry: String },

    #[error("Invalid npm token.")]
    InvalidNpmToken { registry: String },

    #[error("Missing 'name' property in '{}'.", package_dir.join("package.json").display())]
    MissingPackageName { package_dir: PathBuf },

    #[error("Missing 'package.json' file in '{}'.", package_dir.display())]
    MissingPackage { package_dir: PathBuf },

    #[error("This plugin should be defined before plugin `{git_plugin}`")]
    InvalidSetup { git_plugin: String },
}

impl PluginError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidNpmPublish { .. } => "EINVALIDNPMPUBLISH",
            Self::NoNpmToken { .. } => "ENONPMTOKEN",
            Self::InvalidNpmToken { .. } => "EINVALIDNPMTOKEN",
            Self::MissingPackageName { .. } => "ENOPKGNAME",
            Self::MissingPackage { .. } => "ENOPKG",
            Self::InvalidSetup { .. } => "EINVALIDSETUP",
        }
    }

    #[must_use]
    pub fn details(&self) -> String {
        match self {
            Self::InvalidNpmPublish { value } => format!(
                "If the npmPublish option is defined, it must be a `Boolean`.\n\n\
                 Your configuration for the `npmPublish` option is `{value}`."
            ),
            Self::NoNpmToken { registry } => format!(
                "An npm token must be created and set in the `NPM_TOKEN` environment variable \
                 on your CI environment.\n\n\
                 The token must allow to publish to the registry `{registry}`."
            ),
            Self::InvalidNpmToken { registry } => format!(
                "The npm token configured in the `NPM_TOKEN` environment variable must be a \
                 valid token allowing to publish to the registry `{registry}`.\n\n\
                 If your account uses two-factor authentication, set its level to \
                 \"Authorization only\": publishing is impossible with the default \
                 \"Authorization and writes\" level."
            ),
            Self::MissingPackageName { .. } => {
                "The `package.json` `name` property is required in order to publish a package \
                 to the npm registry.\n\n\
                 Please make sure to add a valid `name` for your package in your `package.json`."
                    .to_string()
            }
            Self::MissingPackage { .. } => {
                "A `package.json` file at the root of your project is required to release on \
                 npm."
                    .to_string()
            }
            Self::InvalidSetup { git_plugin } => format!(
                "Move the publish plugin before `{git_plugin}` in the `plugins` list so that \
                 bumped manifests are part of the release commit."
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_kind() {
        let errors = [
            PluginError::InvalidNpmPublish {
                value: "\"yes\"".to_string(),
            },
            PluginError::NoNpmToken {
                registry: "https://registry.npmjs.org/".to_string(),
            },
            PluginError::InvalidNpmToken {
                registry: "https://registry.npmjs.org/".to_string(),
            },
            PluginError::MissingPackageName {
                package_dir: PathBuf::from("/repo"),
            },
            PluginError::MissingPackage {
                package_dir: PathBuf::from("/repo"),
            },
            PluginError::InvalidSetup {
                git_plugin: "@semantic-release/git".to_string(),
            },
        ];

        let mut codes: Vec<_> = errors.iter().map(PluginError::code).collect();
        codes.sort_unstable();
        codes.dedup();

        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn missing_name_points_at_manifest() {
        let err = PluginError::MissingPackageName {
            package_dir: PathBuf::from("/repo/packages/a"),
        };

        assert!(err.to_string().contains("package.json"));
        assert!(err.to_string().contains("/repo/packages/a"));
    }

    #[test]
    fn token_details_mention_registry() {
        let err = PluginError::NoNpmToken {
            registry: "https://npm.example.com/".to_string(),
        };

        assert!(err.details().contains("https://npm.example.com/"));
        assert!(err.details().contains("NPM_TOKEN"));
    }

    #[test]
    fn invalid_publish_details_echo_value() {
        let err = PluginError::InvalidNpmPublish {
            value: "42".to_string(),
        };

        assert!(err.details().contains("`42`"));
    }
}
