use axum::extract::{Extension, State};
use axum::response::sse::{Event, Sse};
use futures_util::{Stream, StreamExt};
use portal_application::LiveLogFrame;
use portal_core::AdminIdentity;
use tracing::info;

use crate::dto::LiveLogEventResponse;
use crate::state::AppState;

/// Server-sent live log tail.
///
/// Dropping the response body on disconnect drops the stream, which stops
/// its keep-alive timer.
pub async fn live_logs_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!(actor_id = admin.admin_id(), "live log stream opened");

    let frames = state.live_view_service.subscribe().map(|frame| match frame {
        LiveLogFrame::Line(line) => Event::default().json_data(LiveLogEventResponse::from(line)),
        LiveLogFrame::KeepAlive => Ok(Event::default().comment("keep-alive")),
    });

    Sse::new(frames)
}
