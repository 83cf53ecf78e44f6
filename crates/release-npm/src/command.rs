use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;

use release_core::Env;
use tracing::debug;

use crate::error::NpmError;

const NPM: &str = "npm";

/// An `npm` invocation, built from the handful of subcommands a release needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmCommand {
    args: Vec<String>,
    unset_env: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl NpmCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            unset_env: Vec::new(),
        }
    }

    /// Writes `version` into the manifest of the working directory, without tagging.
    #[must_use]
    pub fn version(version: &str, userconfig: &Path) -> Self {
        Self::new([
            "version",
            version,
            "--userconfig",
            userconfig.display().to_string().as_str(),
            "--no-git-tag-version",
            "--allow-same-version",
        ])
    }

    #[must_use]
    pub fn publish(dist_tag: &str, registry: &str, userconfig: &Path) -> Self {
        Self::new([
            "publish",
            "--dry-run",
            "--userconfig",
            userconfig.display().to_string().as_str(),
            "--tag",
            dist_tag,
            "--registry",
            registry,
        ])
    }

    #[must_use]
    pub fn dist_tag_add(
        name: &str,
        version: &str,
        dist_tag: &str,
        registry: &str,
        userconfig: &Path,
    ) -> Self {
        Self::new([
            "dist-tag",
            "add",
            format!("{name}@{version}").as_str(),
            dist_tag,
            "--userconfig",
            userconfig.display().to_string().as_str(),
            "--registry",
            registry,
        ])
    }

    #[must_use]
    pub fn whoami(registry: &str, userconfig: &Path) -> Self {
        Self::new([
            "whoami",
            "--userconfig",
            userconfig.display().to_string().as_str(),
            "--registry",
            registry,
        ])
    }

    /// Drops `variable` from the environment the command runs with.
    #[must_use]
    pub fn without_env(mut self, variable: &str) -> Self {
        self.unset_env.push(variable.to_string());
        self
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn subcommand(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    /// Runs the command in `cwd`, preferring an `npm` installed under
    /// `node_modules/.bin`.
    ///
    /// # Errors
    ///
    /// Returns [`NpmError::CommandSpawn`] if `npm` cannot be started and
    /// [`NpmError::CommandFailed`] if it exits unsuccessfully.
    pub fn run(&self, cwd: &Path, env: &Env) -> Result<CommandOutput, NpmError> {
        let mut command = Command::new(NPM);
        command.args(&self.args).current_dir(cwd);

        let env = self
            .unset_env
            .iter()
            .fold(env.clone(), |env, unset| env.without(unset));
        command.envs(env.iter());
        for unset in &self.unset_env {
            command.env_remove(unset);
        }
        command.env("PATH", local_path(cwd, &env));

        let output = command.output().map_err(|source| NpmError::CommandSpawn {
            command: self.to_string(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %self, stdout = %result.stdout, stderr = %result.stderr, "npm finished");

        if !output.status.success() {
            return Err(NpmError::CommandFailed {
                command: self.to_string(),
                status: output.status.to_string(),
                stderr: result.stderr.trim().to_string(),
            });
        }

        Ok(result)
    }
}

fn local_path(cwd: &Path, env: &Env) -> OsString {
    let mut dirs = vec![cwd.join("node_modules").join(".bin")];
    if let Some(path) = env
        .get("PATH")
        .map(OsString::from)
        .or_else(|| std::env::var_os("PATH"))
    {
        dirs.extend(std::env::split_paths(&path));
    }
    std::env::join_paths(dirs).unwrap_or_default()
}

impl fmt::Display for NpmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{NPM} {}", self.args.join(" "))
    }
}
