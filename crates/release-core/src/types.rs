use serde::{Deserialize, Serialize};

/// What the plugin reports back to the host after publishing or tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub name: String,
    pub channel: String,
}

impl ReleaseInfo {
    #[must_use]
    pub fn new(package_name: &str, release_name: &str, dist_tag: &str) -> Self {
        Self {
            name: format!("npm package {package_name} {release_name} (@{dist_tag} dist-tag)"),
            channel: dist_tag.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_mentions_package_release_and_tag() {
        let info = ReleaseInfo::new("@kuzzleio/sdk", "v1.2.0", "beta");

        assert_eq!(info.name, "npm package @kuzzleio/sdk v1.2.0 (@beta dist-tag)");
        assert_eq!(info.channel, "beta");
    }
}
