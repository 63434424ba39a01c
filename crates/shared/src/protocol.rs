use serde::{Deserialize, Serialize};

use crate::domain::{LookupPhase, Profile};

/// Notifications published by the lookup controller to whatever view is bound
/// to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum LookupEvent {
    Requested {
        username: String,
    },
    Resolved {
        username: String,
        profile: Profile,
    },
    Rejected {
        username: Option<String>,
        message: String,
    },
}

impl LookupEvent {
    /// Phase the controller is in right after emitting this event.
    pub fn phase(&self) -> LookupPhase {
        match self {
            Self::Requested { .. } => LookupPhase::Requesting,
            Self::Resolved { .. } => LookupPhase::Resolved,
            Self::Rejected { .. } => LookupPhase::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_adjacent_tagging() {
        let event = LookupEvent::Rejected {
            username: None,
            message: "You need to enter a valid Github user name!".into(),
        };
        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["type"], "rejected");
        assert_eq!(
            json["payload"]["message"],
            "You need to enter a valid Github user name!"
        );
        assert_eq!(event.phase(), LookupPhase::Rejected);
    }
}
