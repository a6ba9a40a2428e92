use axum::{
    Router,
    routing::{get, post},
};

use crate::auth::{self, AppState};
use crate::messages;

/// All routes, with state attached. Transport layers (CORS, tracing) are
/// added by the server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get-token", post(auth::get_token))
        .route("/send-message", post(messages::send_message))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> &'static str {
    "ok"
}
