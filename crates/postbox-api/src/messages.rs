use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use postbox_types::api::{HistoryEntry, MESSAGE_ADDED, SendMessageRequest};

use crate::auth::AppState;
use crate::authorize::authorize;
use crate::blocking;
use crate::command::Command;
use crate::error::ApiError;

/// POST /send-message
///
/// The body is parsed before the token is looked at, so a broken body is a
/// 400 even without credentials. After authorization the text either reads
/// the global history (`history N`) or is stored as a new message from the
/// authorized user.
pub async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;

    let user = authorize(&state, &headers, &req.name).await?;

    match Command::parse(&req.message) {
        Command::History(count) => {
            let db = state.clone();
            let rows = blocking(move || db.db.get_recent_messages(count)).await?;

            debug!("{} read {} of the last {} messages", user.name, rows.len(), count);

            let history: Vec<HistoryEntry> = rows
                .into_iter()
                .map(|row| HistoryEntry {
                    message: row.text,
                    name: row.author_name,
                })
                .collect();

            Ok(Json(history).into_response())
        }
        Command::Post(text) => {
            let db = state.clone();
            let text = text.to_string();
            let author_id = user.id.clone();
            let row = blocking(move || db.db.insert_message(&text, &author_id)).await?;

            info!("{} posted message {}", user.name, row.id);

            Ok(Json(MESSAGE_ADDED).into_response())
        }
    }
}
