use super::*;

pub(crate) struct RestartCommandHandler {
    grace: Duration,
}

impl RestartCommandHandler {
    pub(crate) fn new(grace: Duration) -> Self {
        Self { grace }
    }
}

#[async_trait]
impl CommandHandler for RestartCommandHandler {
    async fn run(&self, _context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError> {
        Ok(CommandOutcome::new(
            "Server restart initiated. Please refresh page in 3 seconds.",
            "Server restart initiated",
        )
        .with_deferred(DeferredAction::Shutdown { grace: self.grace }))
    }
}
