use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LookupError;

/// Decoded body of a successful user lookup. Stored verbatim, never inspected.
pub type Profile = Map<String, Value>;

/// A validated username, ready to be sent to the users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub username: String,
}

impl Query {
    /// Accepts any present, non-empty input. No trimming and no character-set
    /// checks are applied; `"  "` is a valid username as far as validation goes.
    pub fn parse(input: Option<&str>) -> Result<Self, LookupError> {
        match input {
            Some(username) if !username.is_empty() => Ok(Self {
                username: username.to_string(),
            }),
            _ => Err(LookupError::Validation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LookupResult {
    Success { profile: Profile },
    Failure { message: String },
}

impl LookupResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<Profile, LookupError>> for LookupResult {
    fn from(value: Result<Profile, LookupError>) -> Self {
        match value {
            Ok(profile) => Self::Success { profile },
            Err(err) => Self::Failure {
                message: err.to_string(),
            },
        }
    }
}

/// Per-invocation lifecycle of a lookup.
///
/// `Idle -> Validating -> {Rejected | Requesting} -> {Resolved | Rejected}`.
/// `Rejected` and `Resolved` are terminal for one invocation; the next lookup
/// starts again at `Validating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPhase {
    #[default]
    Idle,
    Validating,
    Requesting,
    Resolved,
    Rejected,
}

impl LookupPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}
