//! Admin terminal: a fixed whitelist of literal commands and the executor
//! that runs them and writes the audit trail.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use portal_core::{AdminIdentity, AppError, AppResult, NonEmptyString};
use portal_domain::AdminAction;

use crate::{
    AuditLogService, PortalStatsRepository, ProcessMetricsProvider, ScriptRunner,
    ShutdownScheduler,
};

mod error;
mod handlers;
mod registry;
mod settings;


pub use error::TerminalError;
pub use registry::{
    CommandContext, CommandDefinition, CommandHandler, CommandOutcome, CommandRegistry,
    DeferredAction,
};
pub use settings::TerminalSettings;

/// Successful terminal response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandExecution {
    /// Multi-line output rendered verbatim by the terminal UI.
    pub output: String,
    /// Always `true` for values returned through `Ok`.
    pub success: bool,
}

/// Ports the built-in command handlers depend on.
#[derive(Clone)]
pub struct TerminalDependencies {
    /// External program runner.
    pub script_runner: Arc<dyn ScriptRunner>,
    /// Row counts for `db stats`.
    pub stats_repository: Arc<dyn PortalStatsRepository>,
    /// Process introspection for `server status`.
    pub metrics_provider: Arc<dyn ProcessMetricsProvider>,
    /// Deferred termination for `restart`.
    pub shutdown_scheduler: Arc<dyn ShutdownScheduler>,
}

/// Command executor over an immutable registry.
#[derive(Clone)]
pub struct TerminalService {
    registry: Arc<CommandRegistry>,
    audit_log_service: AuditLogService,
    shutdown_scheduler: Arc<dyn ShutdownScheduler>,
}

impl TerminalService {
    /// Builds the executor with the built-in command registry.
    #[must_use]
    pub fn new(
        settings: &TerminalSettings,
        dependencies: TerminalDependencies,
        audit_log_service: AuditLogService,
    ) -> Self {
        let shutdown_scheduler = dependencies.shutdown_scheduler.clone();
        Self::with_registry(
            CommandRegistry::builtin(settings, dependencies),
            audit_log_service,
            shutdown_scheduler,
        )
    }

    /// Builds the executor over an explicit registry.
    #[must_use]
    pub fn with_registry(
        registry: CommandRegistry,
        audit_log_service: AuditLogService,
        shutdown_scheduler: Arc<dyn ShutdownScheduler>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            audit_log_service,
            shutdown_scheduler,
        }
    }

    /// Returns the registry used for lookups.
    #[must_use]
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Executes one raw command line on behalf of an admin.
    ///
    /// Empty and unknown commands are rejected before any handler runs and
    /// leave no audit row. A recognized command writes exactly one row:
    /// its own action on success, `COMMAND_ERROR` on a handler fault.
    /// `help` is the exception and never writes.
    ///
    /// Once a command is resolved it runs on its own task, so dropping the
    /// returned future does not cancel the handler or its audit row.
    pub async fn execute(
        &self,
        actor: &AdminIdentity,
        raw_command: &str,
    ) -> AppResult<CommandExecution> {
        let raw_command =
            NonEmptyString::new(raw_command).map_err(|_| TerminalError::MissingCommand)?;
        let Some(definition) = self.registry.resolve(raw_command.as_str()) else {
            info!(
                actor_id = actor.admin_id(),
                command = %raw_command.as_str().trim(),
                "rejected unknown terminal command"
            );
            return Err(TerminalError::UnknownCommand.into());
        };

        let service = self.clone();
        let actor = actor.clone();
        let definition = definition.clone();
        tokio::spawn(async move { service.run_definition(&actor, &definition).await })
            .await
            .map_err(|error| AppError::Internal(format!("terminal command task failed: {error}")))?
    }

    async fn run_definition(
        &self,
        actor: &AdminIdentity,
        definition: &CommandDefinition,
    ) -> AppResult<CommandExecution> {
        let command = definition.command();
        let started_at = Instant::now();
        let context = CommandContext {
            actor,
            timeout: definition.timeout(),
        };

        match definition.handler().run(context).await {
            Ok(CommandOutcome {
                output,
                audit_detail,
                deferred,
            }) => {
                if let Some(action) = command.audit_action() {
                    self.audit_log_service
                        .record(Some(actor.admin_id()), action, audit_detail)
                        .await;
                }

                if let Some(deferred) = deferred {
                    self.run_deferred(deferred);
                }

                info!(
                    actor_id = actor.admin_id(),
                    command = command.literal(),
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "terminal command executed"
                );

                Ok(CommandExecution {
                    output,
                    success: true,
                })
            }
            Err(error) => {
                let message = error.to_string();
                self.audit_log_service
                    .record(
                        Some(actor.admin_id()),
                        AdminAction::CommandError,
                        format!("Error: {message}"),
                    )
                    .await;

                warn!(
                    actor_id = actor.admin_id(),
                    command = command.literal(),
                    error = %message,
                    "terminal command failed"
                );

                Err(error.into())
            }
        }
    }

    fn run_deferred(&self, deferred: DeferredAction) {
        match deferred {
            DeferredAction::Shutdown { grace } => {
                info!(
                    grace_ms = grace.as_millis() as u64,
                    "scheduling server shutdown"
                );
                self.shutdown_scheduler.schedule_shutdown(grace);
            }
        }
    }
}
