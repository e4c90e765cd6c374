use super::*;

pub(crate) struct DbStatsCommandHandler {
    runner: Arc<dyn ScriptRunner>,
    stats_repository: Arc<dyn PortalStatsRepository>,
    working_dir: PathBuf,
    database_file: Option<PathBuf>,
}

impl DbStatsCommandHandler {
    pub(crate) fn new(
        runner: Arc<dyn ScriptRunner>,
        stats_repository: Arc<dyn PortalStatsRepository>,
        working_dir: PathBuf,
        database_file: Option<PathBuf>,
    ) -> Self {
        Self {
            runner,
            stats_repository,
            working_dir,
            database_file,
        }
    }

    /// Human-readable size from `ls -lh`, or `N/A`.
    async fn file_size(&self, timeout: Duration) -> String {
        let Some(database_file) = &self.database_file else {
            return "N/A".to_owned();
        };

        let invocation = ScriptInvocation {
            program: "ls".to_owned(),
            args: vec!["-lh".to_owned(), database_file.display().to_string()],
            working_dir: self.working_dir.clone(),
            timeout,
        };

        let size = match self.runner.run(invocation).await {
            Ok(process) if process.succeeded() => parse_listing_size(&process.stdout),
            _ => None,
        };
        size.unwrap_or_else(|| "N/A".to_owned())
    }
}

/// Fifth column of a long listing line.
fn parse_listing_size(listing: &str) -> Option<String> {
    listing
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(4))
        .map(str::to_owned)
}

#[async_trait]
impl CommandHandler for DbStatsCommandHandler {
    async fn run(&self, context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError> {
        let file_size = self
            .file_size(context.timeout.unwrap_or(FALLBACK_TIMEOUT))
            .await;
        let statistics = self
            .stats_repository
            .statistics()
            .await
            .map_err(|error| TerminalError::HandlerException(error.message().to_owned()))?;

        let output = [
            "Database Statistics:".to_owned(),
            format!("  File Size: {file_size}"),
            format!("  Total Users: {}", statistics.total_users),
            format!("  Support Tickets: {}", statistics.total_support_tickets),
        ]
        .join("\n");

        Ok(CommandOutcome::new(
            output,
            format!(
                "Users: {}, Tickets: {}",
                statistics.total_users, statistics.total_support_tickets
            ),
        ))
    }
}
