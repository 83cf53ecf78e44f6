use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;

use crate::error::NpmError;
use crate::manifest::{MANIFEST_FILE, Package};

/// Ignore set applied to custom patterns when the caller gives none.
pub const DEFAULT_IGNORE: &[&str] = &["**/node_modules/**"];

const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Caller-supplied discovery options, used when the root manifest declares no workspaces.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceQuery {
    pub patterns: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
}

impl WorkspaceQuery {
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = Some(patterns);
        self
    }

    #[must_use]
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = Some(ignore);
        self
    }
}

/// Lists the workspace directories of the repository rooted at `root.dir`.
///
/// Declared `workspaces` globs win and match directories only; without them the
/// root itself is the single workspace. Custom query patterns are only used when
/// the manifest has no `workspaces` key, and keep the parent directory of every
/// matching `package.json`.
///
/// # Errors
///
/// Returns [`NpmError::GlobPattern`] for an invalid pattern and an IO error if
/// the tree cannot be walked.
pub fn discover_workspaces(
    root: &Package,
    query: &WorkspaceQuery,
) -> Result<Vec<PathBuf>, NpmError> {
    let base = root.dir.as_path();

    let mut dirs = match (&query.patterns, root.declares_workspaces) {
        (Some(patterns), false) => {
            let default_ignore: Vec<String> =
                DEFAULT_IGNORE.iter().map(ToString::to_string).collect();
            let ignore = query.ignore.as_ref().unwrap_or(&default_ignore);
            glob_manifest_dirs(base, patterns, ignore)?
        }
        _ => match &root.workspace_patterns {
            Some(patterns) => glob_workspace_dirs(base, patterns)?,
            None => vec![base.to_path_buf()],
        },
    };

    dirs.sort();
    dirs.dedup();
    debug!(count = dirs.len(), "discovered workspaces");
    Ok(dirs)
}

fn compile(pattern: &str) -> Result<GlobMatcher, NpmError> {
    let trimmed = pattern.trim_start_matches("./");
    let trimmed = trimmed.trim_end_matches('/');
    Ok(GlobBuilder::new(trimmed)
        .literal_separator(true)
        .build()
        .map_err(|source| NpmError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher())
}

/// Splits npm-style patterns into includes and `!`-prefixed excludes.
fn split_patterns(patterns: &[String]) -> Result<(Vec<GlobMatcher>, Vec<GlobMatcher>), NpmError> {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();
    for pattern in patterns {
        match pattern.strip_prefix('!') {
            Some(negated) => excludes.push(compile(negated)?),
            None => includes.push(compile(pattern)?),
        }
    }
    Ok((includes, excludes))
}

fn glob_workspace_dirs(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, NpmError> {
    let (includes, excludes) = split_patterns(patterns)?;
    let mut results = Vec::new();
    walk(base, base, &mut |path, relative, is_dir| {
        if is_dir
            && includes.iter().any(|glob| glob.is_match(relative))
            && !excludes.iter().any(|glob| glob.is_match(relative))
        {
            results.push(path.to_path_buf());
        }
        Walk::Descend
    })?;
    Ok(results)
}

fn glob_manifest_dirs(
    base: &Path,
    patterns: &[String],
    ignore: &[String],
) -> Result<Vec<PathBuf>, NpmError> {
    let (includes, mut excludes) = split_patterns(patterns)?;
    let mut pruned = Vec::new();
    for pattern in ignore {
        excludes.push(compile(pattern)?);
        // `dir/**` ignores everything below `dir`, so the walk can skip it entirely.
        if let Some(dir) = pattern.strip_suffix("/**") {
            pruned.push(compile(dir)?);
        }
    }

    let mut results = Vec::new();
    walk(base, base, &mut |path, relative, is_dir| {
        if is_dir {
            if pruned.iter().any(|glob| glob.is_match(relative)) {
                return Walk::Skip;
            }
            return Walk::Descend;
        }

        let is_manifest = path.file_name().is_some_and(|name| name == MANIFEST_FILE);
        if is_manifest
            && includes.iter().any(|glob| glob.is_match(relative))
            && !excludes.iter().any(|glob| glob.is_match(relative))
        {
            if let Some(parent) = path.parent() {
                results.push(parent.to_path_buf());
            }
        }
        Walk::Descend
    })?;
    Ok(results)
}

enum Walk {
    Descend,
    Skip,
}

fn walk(
    base: &Path,
    current: &Path,
    visit: &mut dyn FnMut(&Path, &Path, bool) -> Walk,
) -> Result<(), NpmError> {
    let mut entries = std::fs::read_dir(current)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(std::fs::DirEntry::path);

    for entry in entries {
        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();
        let relative = path.strip_prefix(base).unwrap_or(&path);

        if is_dir
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name))
        {
            continue;
        }

        if matches!(visit(&path, relative, is_dir), Walk::Descend) && is_dir {
            walk(base, &path, visit)?;
        }
    }

    Ok(())
}
