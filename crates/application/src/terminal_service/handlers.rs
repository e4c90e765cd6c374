use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use portal_domain::TerminalCommand;

use crate::{PortalStatsRepository, ProcessMetricsProvider, ScriptInvocation, ScriptRunner};

use super::{CommandContext, CommandHandler, CommandOutcome, DeferredAction, TerminalError};

mod db_stats;
mod help;
mod restart;
mod scripts;
mod server_status;

pub(super) use db_stats::DbStatsCommandHandler;
pub(super) use help::HelpCommandHandler;
pub(super) use restart::RestartCommandHandler;
pub(super) use scripts::ScriptCommandHandler;
pub(super) use server_status::ServerStatusCommandHandler;

const FALLBACK_TIMEOUT: Duration = Duration::from_secs(10);
