use anyhow::{Result, anyhow};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Argon2 cost parameters. Defaults match the argon2 crate's recommended
/// settings (19 MiB, 2 passes, 1 lane).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher configured once at startup.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Result<Self> {
        let params = Params::new(params.memory_kib, params.iterations, params.parallelism, None)
            .map_err(|e| anyhow!("Invalid Argon2 parameters: {}", e))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password into a PHC string. The random salt and the cost
    /// parameters are embedded in the output.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| anyhow!("Password hashing failed: {}", e))?;

        Ok(hash.to_string())
    }
}

/// Check a password against a stored PHC string, using the parameters
/// recorded in the hash. A stored value that does not parse is a non-match.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn hash_verify_roundtrip() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password", &hash));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = cheap_hasher().hash("password").unwrap();
        assert!(!verify_password("Password", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn salt_differs_per_hash() {
        let hasher = cheap_hasher();
        let a = hasher.hash("password").unwrap();
        let b = hasher.hash("password").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("password", &a));
        assert!(verify_password("password", &b));
    }

    #[test]
    fn malformed_hash_is_a_non_match() {
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "password"));
        assert!(!verify_password("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn invalid_params_rejected() {
        let result = PasswordHasher::new(HashParams {
            memory_kib: 0,
            iterations: 1,
            parallelism: 1,
        });
        assert!(result.is_err());
    }
}
