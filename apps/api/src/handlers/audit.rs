use std::str::FromStr;

use axum::Json;
use axum::extract::{Query, State};
use portal_application::AuditLogQuery;
use portal_domain::AdminAction;

use crate::dto::{AdminLogsQuery, AuditLogEntryResponse};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 500;

/// Lists the newest admin log entries, optionally filtered.
pub async fn list_admin_logs_handler(
    State(state): State<AppState>,
    Query(query): Query<AdminLogsQuery>,
) -> ApiResult<Json<Vec<AuditLogEntryResponse>>> {
    let action = query
        .action
        .as_deref()
        .map(AdminAction::from_str)
        .transpose()?;

    let entries = state
        .audit_log_service
        .list(AuditLogQuery {
            limit: query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            action: action.map(|action| action.as_str().to_owned()),
            actor_id: query.actor_id,
        })
        .await?
        .into_iter()
        .map(AuditLogEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
