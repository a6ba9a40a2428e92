//! Postbox authentication core
//!
//! - Argon2id password hashing with per-hash random salts
//! - HS256 access tokens carrying `{name, exp}`
//!
//! Both halves are pure computations over immutable configuration and can run
//! on any number of threads at once.

pub mod password;
pub mod token;

pub use password::{HashParams, PasswordHasher, verify_password};
pub use token::TokenService;
