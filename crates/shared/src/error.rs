use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status reported when no HTTP response was received at all.
pub const NETWORK_FAILURE_STATUS: i32 = -1;
/// Status text reported when a response arrived but its body could not be used.
pub const MALFORMED_RESPONSE_STATUS_TEXT: &str = "Malformed Response";

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupError {
    #[error("You need to enter a valid Github user name!")]
    Validation,
    #[error("Network Error {status} {status_text}")]
    Transport { status: i32, status_text: String },
}

impl LookupError {
    pub fn network_failure() -> Self {
        Self::Transport {
            status: NETWORK_FAILURE_STATUS,
            status_text: String::new(),
        }
    }

    pub fn malformed_response(status: u16) -> Self {
        Self::Transport {
            status: i32::from(status),
            status_text: MALFORMED_RESPONSE_STATUS_TEXT.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation)
    }
}
