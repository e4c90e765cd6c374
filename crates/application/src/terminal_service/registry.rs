use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use portal_core::AdminIdentity;
use portal_domain::TerminalCommand;

use super::handlers::{
    DbStatsCommandHandler, HelpCommandHandler, RestartCommandHandler, ScriptCommandHandler,
    ServerStatusCommandHandler,
};
use super::settings::{DB_LISTING_TIMEOUT, LOGS_SHOW_TIMEOUT, VERIFY_TIMEOUT};
use super::{TerminalDependencies, TerminalError, TerminalSettings};

/// Per-invocation inputs handed to a command handler.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    /// Admin issuing the command.
    pub actor: &'a AdminIdentity,
    /// Bound applied to external programs, if the command has one.
    pub timeout: Option<Duration>,
}

/// Work the executor performs after the audit row is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Terminate the process once `grace` has elapsed.
    Shutdown {
        /// Delay that lets the HTTP response flush.
        grace: Duration,
    },
}

/// Result of a handler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Text returned to the caller.
    pub output: String,
    /// Text stored in the audit row's `details`.
    pub audit_detail: String,
    /// Follow-up action scheduled by the executor.
    pub deferred: Option<DeferredAction>,
}

impl CommandOutcome {
    /// Creates an outcome without deferred work.
    #[must_use]
    pub fn new(output: impl Into<String>, audit_detail: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            audit_detail: audit_detail.into(),
            deferred: None,
        }
    }

    /// Attaches deferred work.
    #[must_use]
    pub fn with_deferred(mut self, deferred: DeferredAction) -> Self {
        self.deferred = Some(deferred);
        self
    }
}

/// Behavior bound to one whitelisted command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command for the caller in `context`.
    async fn run(&self, context: CommandContext<'_>) -> Result<CommandOutcome, TerminalError>;
}

/// Registry entry binding a literal to its handler.
#[derive(Clone)]
pub struct CommandDefinition {
    command: TerminalCommand,
    timeout: Option<Duration>,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    /// Creates a definition.
    #[must_use]
    pub fn new(
        command: TerminalCommand,
        timeout: Option<Duration>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            command,
            timeout,
            handler,
        }
    }

    /// Returns the whitelisted command.
    #[must_use]
    pub fn command(&self) -> TerminalCommand {
        self.command
    }

    /// Returns the external-program bound.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the bound handler.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }
}

/// Immutable mapping from whitelisted literals to handlers.
pub struct CommandRegistry {
    definitions: HashMap<TerminalCommand, CommandDefinition>,
}

impl CommandRegistry {
    /// Creates a registry from explicit definitions; later duplicates win.
    #[must_use]
    pub fn new(definitions: impl IntoIterator<Item = CommandDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.command, definition))
                .collect(),
        }
    }

    /// Creates the registry with every built-in command.
    #[must_use]
    pub fn builtin(settings: &TerminalSettings, dependencies: TerminalDependencies) -> Self {
        let project_root = settings.project_root.clone();
        let runner = dependencies.script_runner;

        Self::new([
            CommandDefinition::new(
                TerminalCommand::Restart,
                None,
                Arc::new(RestartCommandHandler::new(settings.restart_grace)),
            ),
            CommandDefinition::new(
                TerminalCommand::Verify,
                Some(VERIFY_TIMEOUT),
                Arc::new(ScriptCommandHandler::new(
                    runner.clone(),
                    project_root.clone(),
                    vec![settings.verify_script.clone()],
                    "Verify script executed",
                )),
            ),
            CommandDefinition::new(
                TerminalCommand::LogsShow,
                Some(LOGS_SHOW_TIMEOUT),
                Arc::new(ScriptCommandHandler::new(
                    runner.clone(),
                    project_root,
                    vec![settings.log_script.clone(), "show".to_owned()],
                    "Admin viewed system logs",
                )),
            ),
            CommandDefinition::new(
                TerminalCommand::DbStats,
                Some(DB_LISTING_TIMEOUT),
                Arc::new(DbStatsCommandHandler::new(
                    runner,
                    dependencies.stats_repository,
                    settings.project_root.clone(),
                    settings.database_file.clone(),
                )),
            ),
            CommandDefinition::new(
                TerminalCommand::ServerStatus,
                None,
                Arc::new(ServerStatusCommandHandler::new(
                    dependencies.metrics_provider,
                    settings.server_port,
                )),
            ),
            CommandDefinition::new(TerminalCommand::Help, None, Arc::new(HelpCommandHandler)),
        ])
    }

    /// Looks up a raw command line by exact trimmed match.
    #[must_use]
    pub fn resolve(&self, raw_command: &str) -> Option<&CommandDefinition> {
        TerminalCommand::resolve(raw_command).and_then(|command| self.definitions.get(&command))
    }

    /// Returns registered commands in help order.
    #[must_use]
    pub fn commands(&self) -> Vec<TerminalCommand> {
        TerminalCommand::all()
            .iter()
            .copied()
            .filter(|command| self.definitions.contains_key(command))
            .collect()
    }
}
