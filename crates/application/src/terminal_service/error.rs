use portal_core::AppError;
use thiserror::Error;

/// Failures surfaced by the terminal executor.
///
/// External program failures are not listed: the script handlers fold them
/// into the command output.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// The command line was empty or whitespace.
    #[error("Command required")]
    MissingCommand,

    /// The trimmed command line is not a whitelisted literal.
    #[error("Unknown command. Type \"help\" for available commands.")]
    UnknownCommand,

    /// A recognized handler failed unexpectedly.
    #[error("{0}")]
    HandlerException(String),
}

impl From<TerminalError> for AppError {
    fn from(value: TerminalError) -> Self {
        match value {
            TerminalError::MissingCommand | TerminalError::UnknownCommand => {
                Self::Validation(value.to_string())
            }
            TerminalError::HandlerException(message) => Self::Internal(message),
        }
    }
}
