use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /    -> list_events
/// POST   /    -> ingest_event
/// DELETE /    -> clear_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(events::list_events)
            .post(events::ingest_event)
            .delete(events::clear_events),
    )
}
