use portal_application::CommandExecution;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for terminal command execution.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/execute-command-request.ts"
)]
pub struct ExecuteCommandRequest {
    #[serde(default)]
    #[ts(optional)]
    pub command: Option<String>,
}

/// Terminal command result.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/execute-command-response.ts"
)]
pub struct ExecuteCommandResponse {
    pub output: String,
    pub success: bool,
}

impl From<CommandExecution> for ExecuteCommandResponse {
    fn from(value: CommandExecution) -> Self {
        Self {
            output: value.output,
            success: value.success,
        }
    }
}
