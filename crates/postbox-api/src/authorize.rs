use axum::http::{HeaderMap, header};

use postbox_db::models::UserRow;

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiError;

/// Literal prefix of the Authorization header value. Note the underscore:
/// clients send `Bearer_<token>`, not `Bearer <token>`.
pub const BEARER_PREFIX: &str = "Bearer_";

pub const MISSING_PREFIX: &str = "Authorization token must have Bearer_ as a prefix";
pub const INVALID_TOKEN: &str = "Invalid token";
pub const NAME_MISMATCH: &str = "Names in the token and in the body do not match";
pub const UNKNOWN_USER: &str = "User with this name does not exist";

/// Bind the bearer token to the name claimed in the request body.
///
/// Checks run in order and stop at the first failure:
/// 1. the header carries the `Bearer_` prefix
/// 2. the token verifies and has not expired
/// 3. the token's name equals `claimed_name` exactly
/// 4. that user exists
///
/// Returns the stored user on success.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    claimed_name: &str,
) -> Result<UserRow, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized(MISSING_PREFIX))?;

    let subject = state
        .tokens
        .subject_of(token)
        .ok_or(ApiError::Unauthorized(INVALID_TOKEN))?;

    if subject != claimed_name {
        return Err(ApiError::Unauthorized(NAME_MISMATCH));
    }

    let db = state.clone();
    blocking(move || db.db.get_user_by_name(&subject))
        .await?
        .ok_or(ApiError::Unauthorized(UNKNOWN_USER))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn strips_custom_prefix() {
        assert_eq!(bearer_token(&headers("Bearer_abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Bearer_")), Some(""));
    }

    #[test]
    fn conventional_prefix_is_not_accepted() {
        assert_eq!(bearer_token(&headers("Bearer abc")), None);
        assert_eq!(bearer_token(&headers("bearer_abc")), None);
        assert_eq!(bearer_token(&headers("abc")), None);
    }

    #[test]
    fn missing_header_has_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn non_ascii_header_has_no_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer_\xff").unwrap(),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
