//! Self-rebuild collaborator
//!
//! Switches the working copy to a branch and rebuilds the binary. The
//! caller is responsible for stopping the process afterwards so that the
//! supervisor starts the fresh build.

use std::path::PathBuf;
use std::process::Stdio;
use futures::future::BoxFuture;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, error, info};
use crate::config::RebuildConfig;
use crate::utils::errors::{RebuildError, RebuildResult};
use crate::utils::helpers::is_valid_branch_name;

/// Something that can rebuild the running program from a branch
pub trait Rebuilder: Send + Sync {
    fn attempt_rebuild<'a>(&'a self, branch: &'a str) -> BoxFuture<'a, RebuildResult<()>>;
}

/// Runs git and the configured build command as child processes
#[derive(Debug, Clone)]
pub struct ShellRebuilder {
    config: RebuildConfig,
}

impl ShellRebuilder {
    pub fn new(config: RebuildConfig) -> Self {
        Self { config }
    }

    /// Commands executed for `branch`, in order
    pub fn steps(&self, branch: &str) -> Vec<Vec<String>> {
        fn git(args: &[&str]) -> Vec<String> {
            std::iter::once("git")
                .chain(args.iter().copied())
                .map(str::to_string)
                .collect()
        }

        vec![
            git(&["fetch", "--all"]),
            git(&["checkout", branch]),
            git(&["pull"]),
            self.config.build_command.clone(),
        ]
    }

    fn work_dir(&self) -> PathBuf {
        self.config.work_dir.clone()
    }

    async fn run(&self, branch: &str) -> RebuildResult<()> {
        if !self.config.enabled {
            return Err(RebuildError::Disabled);
        }
        if !is_valid_branch_name(branch) {
            return Err(RebuildError::InvalidBranch(branch.to_string()));
        }

        let deadline = Instant::now() + self.config.timeout();
        info!(branch = branch, work_dir = %self.config.work_dir.display(), "Starting rebuild");

        for step in self.steps(branch) {
            let Some((program, args)) = step.split_first() else {
                continue;
            };
            let label = step.join(" ");
            debug!(step = %label, "Running rebuild step");

            let child = Command::new(program)
                .args(args)
                .current_dir(self.work_dir())
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| RebuildError::Spawn { step: label.clone(), source })?;

            let output = match tokio::time::timeout_at(deadline, child.wait_with_output()).await {
                Ok(result) => result.map_err(|source| RebuildError::Spawn { step: label.clone(), source })?,
                Err(_) => {
                    error!(step = %label, "Rebuild step timed out");
                    return Err(RebuildError::Timeout {
                        step: label,
                        seconds: self.config.timeout_seconds,
                    });
                }
            };

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                error!(step = %label, status = %output.status, stderr = %stderr, "Rebuild step failed");
                return Err(RebuildError::StepFailed {
                    step: label,
                    status: output.status.to_string(),
                    stderr,
                });
            }
        }

        info!(branch = branch, "Rebuild finished");
        Ok(())
    }
}

impl Rebuilder for ShellRebuilder {
    fn attempt_rebuild<'a>(&'a self, branch: &'a str) -> BoxFuture<'a, RebuildResult<()>> {
        Box::pin(self.run(branch))
    }
}
