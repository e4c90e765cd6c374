use super::*;

/// Runs `bash <args>` in the project root and reports whatever it printed.
///
/// Timeouts, non-zero exits and spawn failures all become output; none of
/// them fail the command.
pub(crate) struct ScriptCommandHandler {
    runner: Arc<dyn ScriptRunner>,
    working_dir: PathBuf,
    args: Vec<String>,
    audit_detail: &'static str,
}

impl ScriptCommandHandler {
    pub(crate) fn new(
        runner: Arc<dyn ScriptRunner>,
        working_dir: PathBuf,
        args: Vec<String>,
        audit_detail: &'static str,
    ) -> Self {
        Self {
            runner,
            working_dir,
            args,
            audit_detail,
        }
    }
}

#[async_trait]
impl CommandHandler for ScriptCommandHandler {
    async fn run(&self, context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError> {
        let timeout = context.timeout.unwrap_or(FALLBACK_TIMEOUT);
        let invocation = ScriptInvocation {
            program: "bash".to_owned(),
            args: self.args.clone(),
            working_dir: self.working_dir.clone(),
            timeout,
        };

        let outcome = match self.runner.run(invocation).await {
            Ok(process) => match process.failure_message(timeout) {
                None => CommandOutcome::new(process.stdout.trim(), self.audit_detail),
                Some(failure) => {
                    let stdout = process.stdout.trim();
                    let output = if stdout.is_empty() {
                        failure.clone()
                    } else {
                        stdout.to_owned()
                    };
                    CommandOutcome::new(output, format!("{} ({failure})", self.audit_detail))
                }
            },
            Err(error) => CommandOutcome::new(
                error.message(),
                format!("{} ({})", self.audit_detail, error.message()),
            ),
        };

        Ok(outcome)
    }
}
