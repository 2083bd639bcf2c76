use axum::routing::post;
use axum::Router;

use crate::handlers::sample_data;
use crate::state::AppState;

/// Routes mounted at `/sample-data`.
///
/// ```text
/// POST /    -> generate_sample_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(sample_data::generate_sample_data))
}
