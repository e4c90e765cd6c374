use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use portal_core::AppResult;

/// One bounded external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    /// Program resolved through `PATH`.
    pub program: String,
    /// Literal arguments; never interpreted by a shell.
    pub args: Vec<String>,
    /// Working directory for the child.
    pub working_dir: PathBuf,
    /// Hard bound on wall-clock runtime.
    pub timeout: Duration,
}

/// How an external invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The child exited with a status code.
    Exited(i32),
    /// The child was terminated by a signal.
    Terminated,
    /// The timeout elapsed and the child was killed.
    TimedOut,
}

/// Captured result of an external invocation, possibly partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Completion status.
    pub status: ProcessStatus,
}

impl ProcessOutput {
    /// Returns whether the child exited with status zero.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.status == ProcessStatus::Exited(0)
    }

    /// Describes a failed run, or `None` on success.
    #[must_use]
    pub fn failure_message(&self, timeout: Duration) -> Option<String> {
        let stderr = self.stderr.trim();
        let message = match self.status {
            ProcessStatus::Exited(0) => return None,
            ProcessStatus::Exited(code) => format!("Command failed with exit code {code}"),
            ProcessStatus::Terminated => "Command terminated by signal".to_owned(),
            ProcessStatus::TimedOut => {
                format!("Command timed out after {}s", timeout.as_secs_f64())
            }
        };

        if stderr.is_empty() {
            Some(message)
        } else {
            Some(format!("{message}: {stderr}"))
        }
    }
}

/// Port for running whitelisted external programs.
///
/// Timeouts and non-zero exits are reported through [`ProcessOutput`];
/// `Err` is reserved for failures to start the program at all.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Runs one invocation to completion or timeout.
    async fn run(&self, invocation: ScriptInvocation) -> AppResult<ProcessOutput>;
}
