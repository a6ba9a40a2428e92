use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Duration;

use postbox_auth::HashParams;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// A user created at startup. There is no API for creating users.
pub struct SeedUser {
    pub name: String,
    pub password: String,
}

/// Server configuration, read once from the environment at startup.
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub token_ttl: Duration,
    pub hash_params: HashParams,
    pub seed_users: Vec<SeedUser>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("POSTBOX_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("POSTBOX_JWT_SECRET is unset or still a placeholder; set it in .env and restart");
        }

        let db_path = get("POSTBOX_DB_PATH").unwrap_or_else(|| "postbox.db".into()).into();
        let host = get("POSTBOX_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&get, "POSTBOX_PORT", 3000u16)?;

        let ttl_minutes = parse_or(&get, "POSTBOX_TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
        if ttl_minutes <= 0 {
            bail!("POSTBOX_TOKEN_TTL_MINUTES must be positive, got {}", ttl_minutes);
        }

        let defaults = HashParams::default();
        let hash_params = HashParams {
            memory_kib: parse_or(&get, "POSTBOX_ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&get, "POSTBOX_ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&get, "POSTBOX_ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        let seed_users = parse_seed_users(&get("POSTBOX_SEED_USERS").unwrap_or_default())?;

        Ok(Self {
            jwt_secret,
            db_path,
            host,
            port,
            token_ttl: Duration::minutes(ttl_minutes),
            hash_params,
            seed_users,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

/// `name:password` pairs separated by commas. The first `:` splits an entry,
/// so passwords may contain colons but names may not.
fn parse_seed_users(raw: &str) -> Result<Vec<SeedUser>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<SeedUser> {
            let Some((name, password)) = entry.split_once(':') else {
                bail!("POSTBOX_SEED_USERS entry has no ':' separator");
            };
            if name.is_empty() || password.is_empty() {
                bail!("POSTBOX_SEED_USERS entry has an empty name or password");
            }
            Ok(SeedUser {
                name: name.to_string(),
                password: password.to_string(),
            })
        })
        .collect()
}
