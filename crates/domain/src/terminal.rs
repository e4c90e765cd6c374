use crate::AdminAction;

/// Literal commands accepted by the admin terminal.
///
/// Matching is exact and case-sensitive against the whole trimmed command
/// line. Compound commands such as `logs show` are single literals, not a
/// verb with an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalCommand {
    /// Schedules a process restart.
    Restart,
    /// Runs the external verification script.
    Verify,
    /// Runs the external log-viewing script.
    LogsShow,
    /// Reports storage file size and row counts.
    DbStats,
    /// Reports in-process uptime, memory and port.
    ServerStatus,
    /// Lists the supported commands.
    Help,
}

impl TerminalCommand {
    /// Returns every whitelisted command in help order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[TerminalCommand] = &[
            TerminalCommand::Restart,
            TerminalCommand::Verify,
            TerminalCommand::LogsShow,
            TerminalCommand::DbStats,
            TerminalCommand::ServerStatus,
            TerminalCommand::Help,
        ];

        ALL
    }

    /// Returns the literal the caller must type.
    #[must_use]
    pub fn literal(&self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Verify => "verify",
            Self::LogsShow => "logs show",
            Self::DbStats => "db stats",
            Self::ServerStatus => "server status",
            Self::Help => "help",
        }
    }

    /// Returns the one-line description shown by `help`.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Restart => "Restart the server",
            Self::Verify => "Run verification script",
            Self::LogsShow => "Display system logs",
            Self::DbStats => "Show database statistics",
            Self::ServerStatus => "Show server status",
            Self::Help => "Show this help message",
        }
    }

    /// Returns the audit action written for a successful run.
    ///
    /// `help` is informational and writes nothing.
    #[must_use]
    pub fn audit_action(&self) -> Option<AdminAction> {
        match self {
            Self::Restart => Some(AdminAction::ServerRestart),
            Self::Verify => Some(AdminAction::VerifyRun),
            Self::LogsShow => Some(AdminAction::LogsViewed),
            Self::DbStats => Some(AdminAction::DbStats),
            Self::ServerStatus => Some(AdminAction::ServerStatusCheck),
            Self::Help => None,
        }
    }

    /// Resolves a raw command line by trimming it and matching a literal.
    #[must_use]
    pub fn resolve(raw_command: &str) -> Option<Self> {
        let trimmed = raw_command.trim();
        Self::all()
            .iter()
            .copied()
            .find(|command| command.literal() == trimmed)
    }

    /// Renders the static command listing.
    #[must_use]
    pub fn help_text() -> String {
        let mut lines = vec!["Available Commands:".to_owned()];
        lines.extend(
            Self::all()
                .iter()
                .map(|command| format!("  {:<18}- {}", command.literal(), command.summary())),
        );
        lines.join("\n")
    }
}
