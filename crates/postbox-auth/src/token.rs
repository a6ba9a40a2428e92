use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use postbox_types::api::Claims;

/// Issues and validates HS256 access tokens.
///
/// Built once from the configured secret; holds no per-token state, so there
/// is nothing to revoke. Expiry is the only lifetime bound.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `{name, exp: now + ttl}`.
    pub fn issue(&self, name: &str) -> Result<String> {
        let claims = Claims {
            name: name.to_string(),
            exp: (Utc::now() + self.ttl).timestamp() as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Name carried by a token, or `None` if the token is malformed, forged,
    /// expired or lacks a name. The failure cases are deliberately collapsed.
    pub fn subject_of(&self, token: &str) -> Option<String> {
        let data = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                debug!("Token rejected: {}", e);
                return None;
            }
        };

        // jsonwebtoken accepts exp == now; a token is only valid strictly before exp
        if data.claims.exp as i64 <= Utc::now().timestamp() {
            debug!("Token rejected: expired at {}", data.claims.exp);
            return None;
        }

        Some(data.claims.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    fn service() -> TokenService {
        TokenService::new(SECRET, Duration::minutes(30))
    }

    #[test]
    fn issue_then_validate_returns_name() {
        let tokens = service();
        let token = tokens.issue("john").unwrap();
        assert_eq!(tokens.subject_of(&token).as_deref(), Some("john"));
    }

    #[test]
    fn expiry_is_ttl_from_now() {
        let tokens = service();
        let token = tokens.issue("john").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();

        let expected = (Utc::now() + Duration::minutes(30)).timestamp();
        assert!((data.claims.exp as i64 - expected).abs() <= 2);
    }

    #[test]
    fn expired_token_rejected() {
        let expired = TokenService::new(SECRET, Duration::minutes(-5));
        let token = expired.issue("john").unwrap();

        // Same key, so only the expiry can fail
        assert!(service().subject_of(&token).is_none());
        assert!(expired.subject_of(&token).is_none());
    }

    #[test]
    fn other_secret_rejected() {
        let token = TokenService::new("another-secret", Duration::minutes(30))
            .issue("john")
            .unwrap();
        assert!(service().subject_of(&token).is_none());
    }

    #[test]
    fn any_changed_character_rejected() {
        let tokens = service();
        let token = tokens.issue("john").unwrap();

        for (i, c) in token.char_indices() {
            let replacement = if c == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(i..i + c.len_utf8(), &replacement.to_string());
            assert!(
                tokens.subject_of(&tampered).is_none(),
                "tampered token at index {} was accepted",
                i
            );
        }

        assert!(tokens.subject_of(&format!("{}1", token)).is_none());
    }

    #[test]
    fn malformed_strings_rejected() {
        let tokens = service();
        for garbage in ["", "abc", "a.b.c", "Bearer_abc", "..."] {
            assert!(tokens.subject_of(garbage).is_none());
        }
    }

    #[test]
    fn missing_name_claim_rejected() {
        #[derive(Serialize)]
        struct NoName {
            exp: usize,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoName {
                exp: (Utc::now() + Duration::minutes(30)).timestamp() as usize,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().subject_of(&token).is_none());
    }

    #[test]
    fn missing_exp_claim_rejected() {
        #[derive(Serialize)]
        struct NoExp {
            name: String,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoExp { name: "john".into() },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().subject_of(&token).is_none());
    }

    #[test]
    fn other_algorithm_rejected() {
        let claims = Claims {
            name: "john".into(),
            exp: (Utc::now() + Duration::minutes(30)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().subject_of(&token).is_none());
    }
}
