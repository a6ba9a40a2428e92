use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::info;

use postbox_auth::{TokenService, verify_password};
use postbox_db::Database;
use postbox_types::api::{TokenRequest, TokenResponse};

use crate::blocking;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

/// Process-wide state, built once at startup and read-only afterwards.
pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenService,
}

pub const BAD_CREDENTIALS: &str = "Incorrect name or password";

/// POST /get-token: exchange a name and password for an access token.
pub async fn get_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = payload?;

    // Lookup and Argon2 verification both block
    let db = state.clone();
    let name = req.name.clone();
    let verified = blocking(move || {
        let Some(user) = db.db.get_user_by_name(&req.name)? else {
            return Ok(false);
        };
        Ok(verify_password(&req.password, &user.password))
    })
    .await?;

    if !verified {
        return Err(ApiError::Unauthorized(BAD_CREDENTIALS));
    }

    let token = state.tokens.issue(&name)?;
    info!("Issued token for {}", name);

    Ok(Json(TokenResponse { token }))
}
