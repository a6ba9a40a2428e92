use anyhow::Result;
use tracing::{debug, info};
use uuid::Uuid;

use postbox_auth::PasswordHasher;
use postbox_db::Database;

use crate::config::SeedUser;

/// Create the configured users that do not exist yet. Existing users keep
/// their original password hash.
pub fn seed_users(db: &Database, hasher: &PasswordHasher, users: &[SeedUser]) -> Result<()> {
    for user in users {
        if db.get_user_by_name(&user.name)?.is_some() {
            debug!("Seed user {} already exists", user.name);
            continue;
        }

        let password_hash = hasher.hash(&user.password)?;
        if db.ensure_user(&Uuid::new_v4().to_string(), &user.name, &password_hash)? {
            info!("Seeded user {}", user.name);
        }
    }

    Ok(())
}
