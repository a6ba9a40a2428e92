use serde::{Deserialize, Serialize};

// -- JWT Claims --

/// Claims carried by every access token. `name` is the subject; there is no
/// separate `sub` claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub name: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// -- Messages --

/// Body of `/send-message`. `message` is either new content or a
/// `history N` command.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub name: String,
}

/// Acknowledgement returned after a message is stored.
pub const MESSAGE_ADDED: &str = "Message has been added";

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
