use super::*;

pub(crate) struct ServerStatusCommandHandler {
    metrics_provider: Arc<dyn ProcessMetricsProvider>,
    port: u16,
}

impl ServerStatusCommandHandler {
    pub(crate) fn new(metrics_provider: Arc<dyn ProcessMetricsProvider>, port: u16) -> Self {
        Self {
            metrics_provider,
            port,
        }
    }
}

#[async_trait]
impl CommandHandler for ServerStatusCommandHandler {
    async fn run(&self, _context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError> {
        let metrics = self
            .metrics_provider
            .snapshot()
            .map_err(|error| TerminalError::HandlerException(error.message().to_owned()))?;

        let output = [
            "Server Status:".to_owned(),
            "  Status: ONLINE".to_owned(),
            format!("  Port: {}", self.port),
            format!("  Uptime: {} minutes", metrics.uptime_minutes()),
            format!("  Memory: {} MB", metrics.resident_memory_mb()),
        ]
        .join("\n");

        Ok(CommandOutcome::new(output, "Status checked"))
    }
}
