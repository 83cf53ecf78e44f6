use std::path::Path;

use release_core::Env;
use release_preset::Preset;

use crate::error::{CliError, Result};

pub(crate) fn run(start_path: &Path) -> Result<()> {
    let preset = Preset::from_env(&Env::from_process(), start_path);
    let json = serde_json::to_string_pretty(&preset).map_err(CliError::Output)?;
    println!("{json}");
    Ok(())
}
