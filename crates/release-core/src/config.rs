use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PluginError;

/// Plugin options exactly as the host passed them.
///
/// `npm_publish` stays untyped so that verification can report a non-boolean
/// value instead of failing to deserialize. An explicit `null` is kept as
/// `Some(Value::Null)` so it can be told apart from an absent key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPluginConfig {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub npm_publish: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Validated plugin options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PluginConfig {
    pub npm_publish: Option<bool>,
    pub mock: bool,
}

impl PluginConfig {
    #[must_use]
    pub fn publishing(npm_publish: bool) -> Self {
        Self {
            npm_publish: Some(npm_publish),
            mock: false,
        }
    }

    /// Publication only stops when it is explicitly disabled.
    #[must_use]
    pub fn publish_disabled(&self) -> bool {
        self.npm_publish == Some(false)
    }
}

impl RawPluginConfig {
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidNpmPublish`] if `npmPublish` is set to anything
    /// but a boolean.
    pub fn validate(&self) -> Result<PluginConfig, PluginError> {
        let npm_publish = match &self.npm_publish {
            None => None,
            Some(Value::Bool(flag)) => Some(*flag),
            Some(other) => {
                return Err(PluginError::InvalidNpmPublish {
                    value: other.to_string(),
                });
            }
        };

        Ok(PluginConfig {
            npm_publish,
            mock: self.mock.unwrap_or(false),
        })
    }

    /// Best-effort view used once verification has already reported problems:
    /// an invalid `npmPublish` is treated as unset.
    #[must_use]
    pub fn lenient(&self) -> PluginConfig {
        self.validate().unwrap_or(PluginConfig {
            npm_publish: None,
            mock: self.mock.unwrap_or(false),
        })
    }
}

impl From<PluginConfig> for RawPluginConfig {
    fn from(config: PluginConfig) -> Self {
        Self {
            npm_publish: config.npm_publish.map(Value::Bool),
            mock: config.mock.then_some(true),
        }
    }
}
