use std::path::Path;

use clap::Args;
use release_npm::{WorkspaceQuery, discover_workspaces, read_package};

use crate::error::Result;

#[derive(Args, Debug, Default)]
pub(crate) struct WorkspacesArgs {
    /// Glob matching workspace manifests, used when package.json declares no workspaces
    #[arg(long = "pattern", value_name = "GLOB")]
    patterns: Vec<String>,

    /// Glob to exclude (default: **/node_modules/**)
    #[arg(long = "ignore", value_name = "GLOB")]
    ignore: Vec<String>,
}

impl WorkspacesArgs {
    fn query(&self) -> WorkspaceQuery {
        let mut query = WorkspaceQuery::default();
        if !self.patterns.is_empty() {
            query = query.with_patterns(self.patterns.clone());
        }
        if !self.ignore.is_empty() {
            query = query.with_ignore(self.ignore.clone());
        }
        query
    }
}

pub(crate) fn run(start_path: &Path, args: &WorkspacesArgs) -> Result<()> {
    let root = read_package(start_path)?;
    let dirs = discover_workspaces(&root, &args.query())?;

    for dir in dirs {
        let relative = dir.strip_prefix(&root.dir).unwrap_or(&dir);
        if relative.as_os_str().is_empty() {
            println!(".");
        } else {
            println!("{}", relative.display());
        }
    }

    Ok(())
}
