use serde::{Deserialize, Serialize};

pub mod device;
pub mod playback;

/// Answer from the token endpoint for a refresh-token grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub scope: Option<String>,
}
