use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use portal_application::{ProcessOutput, ProcessStatus, ScriptInvocation, ScriptRunner};
use portal_core::{AppError, AppResult};

const DEFAULT_PIPE_DRAIN_GRACE: Duration = Duration::from_millis(250);
const READ_CHUNK_BYTES: usize = 4096;

/// Runs external programs with `tokio::process`.
///
/// Output is drained while the child runs so a timed-out child still yields
/// whatever it printed. After a kill the runner waits at most the drain
/// grace for the pipes, since grandchildren may keep them open.
#[derive(Debug, Clone)]
pub struct TokioScriptRunner {
    pipe_drain_grace: Duration,
}

impl Default for TokioScriptRunner {
    fn default() -> Self {
        Self {
            pipe_drain_grace: DEFAULT_PIPE_DRAIN_GRACE,
        }
    }
}

impl TokioScriptRunner {
    /// Creates a runner with the default drain grace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

struct DrainedPipe {
    buffer: Arc<Mutex<Vec<u8>>>,
    task: Option<JoinHandle<()>>,
}

impl DrainedPipe {
    fn spawn<R>(reader: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let task = reader.map(|mut reader| {
            let buffer = buffer.clone();
            tokio::spawn(async move {
                let mut chunk = [0_u8; READ_CHUNK_BYTES];
                loop {
                    match reader.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => buffer.lock().await.extend_from_slice(&chunk[..read]),
                    }
                }
            })
        });

        Self { buffer, task }
    }

    async fn collect(self, grace: Duration) -> String {
        if let Some(mut task) = self.task {
            if tokio::time::timeout(grace, &mut task).await.is_err() {
                task.abort();
            }
        }

        let bytes = self.buffer.lock().await;
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[async_trait]
impl ScriptRunner for TokioScriptRunner {
    async fn run(&self, invocation: ScriptInvocation) -> AppResult<ProcessOutput> {
        let mut child = Command::new(invocation.program.as_str())
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                AppError::Internal(format!("failed to start {}: {error}", invocation.program))
            })?;

        let stdout = DrainedPipe::spawn(child.stdout.take());
        let stderr = DrainedPipe::spawn(child.stderr.take());

        let status = match tokio::time::timeout(invocation.timeout, child.wait()).await {
            Ok(Ok(status)) => status
                .code()
                .map_or(ProcessStatus::Terminated, ProcessStatus::Exited),
            Ok(Err(error)) => {
                return Err(AppError::Internal(format!(
                    "failed to wait for {}: {error}",
                    invocation.program
                )));
            }
            Err(_) => {
                if let Err(error) = child.kill().await {
                    warn!(
                        program = %invocation.program,
                        error = %error,
                        "failed to kill timed out process"
                    );
                }
                ProcessStatus::TimedOut
            }
        };

        Ok(ProcessOutput {
            stdout: stdout.collect(self.pipe_drain_grace).await,
            stderr: stderr.collect(self.pipe_drain_grace).await,
            status,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use portal_application::{ProcessStatus, ScriptInvocation, ScriptRunner};

    use super::TokioScriptRunner;

    fn shell(script: &str, timeout: Duration) -> ScriptInvocation {
        ScriptInvocation {
            program: "sh".to_owned(),
            args: vec!["-c".to_owned(), script.to_owned()],
            working_dir: std::env::temp_dir(),
            timeout,
        }
    }

    #[tokio::test]
    async fn captures_output_and_exit_code() {
        let output = TokioScriptRunner::new()
            .run(shell("echo out; echo err >&2; exit 3", Duration::from_secs(5)))
            .await;

        assert!(matches!(
            output,
            Ok(ref output) if output.stdout == "out\n"
                && output.stderr == "err\n"
                && output.status == ProcessStatus::Exited(3)
        ));
    }

    #[tokio::test]
    async fn timeout_returns_partial_output_promptly() {
        let started_at = Instant::now();

        let output = TokioScriptRunner::new()
            .run(shell("echo partial; exec sleep 5", Duration::from_millis(300)))
            .await;

        assert!(started_at.elapsed() < Duration::from_secs(3));
        assert!(matches!(
            output,
            Ok(ref output) if output.stdout == "partial\n"
                && output.status == ProcessStatus::TimedOut
        ));
    }

    #[tokio::test]
    async fn runs_in_the_requested_directory() {
        let working_dir = std::env::temp_dir();
        let expected = match working_dir.canonicalize() {
            Ok(path) => path,
            Err(error) => panic!("temp dir must resolve: {error}"),
        };

        let output = TokioScriptRunner::new()
            .run(shell("pwd -P", Duration::from_secs(5)))
            .await;

        assert!(matches!(
            output,
            Ok(ref output) if PathBuf::from(output.stdout.trim()) == expected
        ));
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let output = TokioScriptRunner::new()
            .run(ScriptInvocation {
                program: "portal-definitely-missing-program".to_owned(),
                args: Vec::new(),
                working_dir: std::env::temp_dir(),
                timeout: Duration::from_secs(1),
            })
            .await;

        assert!(output.is_err());
    }
}
