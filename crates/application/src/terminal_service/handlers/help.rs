use super::*;

pub(crate) struct HelpCommandHandler;

#[async_trait]
impl CommandHandler for HelpCommandHandler {
    async fn run(&self, _context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError> {
        Ok(CommandOutcome::new(TerminalCommand::help_text(), ""))
    }
}
