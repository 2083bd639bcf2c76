use axum::routing::get;
use axum::Router;

use crate::handlers::registry;
use crate::state::AppState;

/// Registry routes.
///
/// ```text
/// GET /workers         -> list_workers
/// GET /workstations    -> list_workstations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/workers", get(registry::list_workers))
        .route("/workstations", get(registry::list_workstations))
}
