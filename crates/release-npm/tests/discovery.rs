use std::fs;
use std::path::Path;

use release_core::{Env, PluginError};
use release_npm::{
    NpmError, NpmRc, WorkspaceQuery, discover_workspaces, read_package, resolve_registry,
};
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn monorepo() -> anyhow::Result<TempDir> {
    let dir = TempDir::new()?;
    write(
        dir.path(),
        "package.json",
        r#"{"name": "monorepo", "private": true, "workspaces": ["packages/*"]}"#,
    )?;
    write(
        dir.path(),
        "packages/sdk/package.json",
        r#"{"name": "@kuzzleio/sdk", "version": "1.0.0"}"#,
    )?;
    write(
        dir.path(),
        "packages/cli/package.json",
        r#"{"name": "kuzzle-cli", "version": "1.0.0", "publishConfig": {"registry": "https://npm.example.com"}}"#,
    )?;
    write(
        dir.path(),
        ".npmrc",
        "@kuzzleio:registry=https://npm.pkg.github.com/\n",
    )?;
    Ok(dir)
}

#[test]
fn every_workspace_resolves_its_own_registry() -> anyhow::Result<()> {
    let dir = monorepo()?;
    let env = Env::new();
    let rc = NpmRc::load(dir.path(), &env)?;

    let root = read_package(dir.path())?;
    let workspaces = discover_workspaces(&root, &WorkspaceQuery::default())?;
    let registries = workspaces
        .iter()
        .map(|workspace| {
            read_package(workspace).map(|pkg| (pkg.name.clone(), resolve_registry(&pkg, &env, &rc)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(
        registries,
        vec![
            (
                "kuzzle-cli".to_string(),
                "https://npm.example.com/".to_string()
            ),
            (
                "@kuzzleio/sdk".to_string(),
                "https://npm.pkg.github.com/".to_string()
            ),
        ]
    );
    Ok(())
}

#[test]
fn workspace_without_manifest_surfaces_missing_package() -> anyhow::Result<()> {
    let dir = monorepo()?;
    fs::create_dir_all(dir.path().join("packages/empty"))?;

    let root = read_package(dir.path())?;
    let workspaces = discover_workspaces(&root, &WorkspaceQuery::default())?;
    let failures: Vec<NpmError> = workspaces
        .iter()
        .filter_map(|workspace| read_package(workspace).err())
        .collect();

    assert_eq!(failures.len(), 1);
    assert!(matches!(
        &failures[0],
        NpmError::Plugin(PluginError::MissingPackage { package_dir }) if package_dir.ends_with("packages/empty")
    ));
    Ok(())
}
