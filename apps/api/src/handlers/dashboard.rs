use axum::Json;
use axum::extract::State;

use crate::dto::{
    OverviewResponse, ServerStatusResponse, StatisticsResponse, SystemLogResponse,
    UptimeResponse, UptimeSampleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

const SYSTEM_LOG_LINES: usize = 100;

pub async fn overview_handler(State(state): State<AppState>) -> ApiResult<Json<OverviewResponse>> {
    let overview = state.live_view_service.overview().await?;
    Ok(Json(overview.into()))
}

pub async fn statistics_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<StatisticsResponse>> {
    let statistics = state.live_view_service.statistics().await?;
    Ok(Json(statistics.into()))
}

pub async fn uptime_handler(State(state): State<AppState>) -> ApiResult<Json<UptimeResponse>> {
    let uptime = state.live_view_service.uptime()?;
    Ok(Json(uptime.into()))
}

pub async fn server_status_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ServerStatusResponse>> {
    let status = state.live_view_service.server_status()?;
    Ok(Json(status.into()))
}

/// Placeholder availability history; values are generated, not measured.
pub async fn uptime_history_handler(
    State(state): State<AppState>,
) -> Json<Vec<UptimeSampleResponse>> {
    Json(
        state
            .live_view_service
            .uptime_history()
            .into_iter()
            .map(UptimeSampleResponse::from)
            .collect(),
    )
}

pub async fn system_logs_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<SystemLogResponse>> {
    let tail = state
        .live_view_service
        .system_log_tail(SYSTEM_LOG_LINES)
        .await?;
    Ok(Json(tail.into()))
}
