pub mod auth;
pub mod authorize;
pub mod command;
pub mod error;
pub mod messages;
pub mod routes;

use tracing::error;

use crate::error::ApiError;

/// Run blocking store or hashing work off the async runtime.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("spawn_blocking join error: {}", e)
        })?
        .map_err(ApiError::from)
}
