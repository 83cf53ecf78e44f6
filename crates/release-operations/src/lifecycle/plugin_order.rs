use release_core::{GIT_PLUGIN, PUBLISH_PLUGIN, PluginError, PluginSpec};

/// The publish plugin bumps manifests in `prepare`, so it has to run before the
/// git plugin commits them.
///
/// # Errors
///
/// Returns [`PluginError::InvalidSetup`] when the publish plugin is listed after
/// `@semantic-release/git`.
pub fn check_plugin_order(plugins: &[PluginSpec]) -> Result<(), PluginError> {
    let Some(git_index) = plugins.iter().position(PluginSpec::is_git_plugin) else {
        return Ok(());
    };

    let publish_index = plugins
        .iter()
        .position(|plugin| plugin.name().contains(PUBLISH_PLUGIN));

    match publish_index {
        Some(index) if index > git_index => Err(PluginError::InvalidSetup {
            git_plugin: GIT_PLUGIN.to_string(),
        }),
        _ => Ok(()),
    }
}
