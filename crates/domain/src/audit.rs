use std::fmt::{Display, Formatter};
use std::str::FromStr;

use portal_core::AppError;
use serde::{Deserialize, Serialize};

/// Stable audit actions written by privileged operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminAction {
    /// Terminal `restart` scheduled a process shutdown.
    ServerRestart,
    /// Terminal `verify` ran the verification script.
    VerifyRun,
    /// Terminal `logs show` ran the log-viewing script.
    LogsViewed,
    /// Terminal `db stats` reported storage statistics.
    DbStats,
    /// Terminal `server status` reported process state.
    ServerStatusCheck,
    /// A recognized terminal command failed unexpectedly.
    CommandError,
    /// An admin listed all customer accounts.
    ///
    /// This and the remaining variants are written into the same log by the
    /// user and ticket moderation endpoints, which live outside this service.
    /// They are known here so log views can filter on them; the terminal
    /// never produces them.
    ViewAllUsers,
    /// An admin opened one customer account.
    ViewUser,
    /// An admin suspended a customer account.
    SuspendUser,
    /// An admin reactivated a customer account.
    ReactivateUser,
    /// An admin listed support tickets.
    ViewSupportTickets,
    /// An admin changed a support ticket status.
    UpdateTicket,
}

impl AdminAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServerRestart => "SERVER_RESTART",
            Self::VerifyRun => "VERIFY_RUN",
            Self::LogsViewed => "LOGS_VIEWED",
            Self::DbStats => "DB_STATS",
            Self::ServerStatusCheck => "SERVER_STATUS_CHECK",
            Self::CommandError => "COMMAND_ERROR",
            Self::ViewAllUsers => "VIEW_ALL_USERS",
            Self::ViewUser => "VIEW_USER",
            Self::SuspendUser => "SUSPEND_USER",
            Self::ReactivateUser => "REACTIVATE_USER",
            Self::ViewSupportTickets => "VIEW_SUPPORT_TICKETS",
            Self::UpdateTicket => "UPDATE_TICKET",
        }
    }

    /// Returns all known actions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AdminAction] = &[
            AdminAction::ServerRestart,
            AdminAction::VerifyRun,
            AdminAction::LogsViewed,
            AdminAction::DbStats,
            AdminAction::ServerStatusCheck,
            AdminAction::CommandError,
            AdminAction::ViewAllUsers,
            AdminAction::ViewUser,
            AdminAction::SuspendUser,
            AdminAction::ReactivateUser,
            AdminAction::ViewSupportTickets,
            AdminAction::UpdateTicket,
        ];

        ALL
    }
}

impl Display for AdminAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AdminAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown audit action '{value}'")))
    }
}
