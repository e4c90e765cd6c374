use axum::Json;
use axum::extract::{Extension, State};
use portal_core::AdminIdentity;

use crate::dto::{ExecuteCommandRequest, ExecuteCommandResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn execute_command_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
    Json(payload): Json<ExecuteCommandRequest>,
) -> ApiResult<Json<ExecuteCommandResponse>> {
    let execution = state
        .terminal_service
        .execute(&admin, payload.command.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(execution.into()))
}
