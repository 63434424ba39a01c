use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use shared::{
    domain::{LookupPhase, LookupResult, Profile, Query},
    error::LookupError,
    protocol::LookupEvent,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};
use url::Url;

pub mod endpoint;
pub mod transport;

pub use endpoint::{ApiEndpoint, EndpointError, DEFAULT_API_BASE_URL};
pub use transport::{
    ReqwestTransport, Transport, TransportConfig, TransportError, TransportResponse,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Observable state of a [`LookupController`].
///
/// `result` and `error` are never both set after a request resolves. A
/// rejected validation only touches `error`, so a profile from an earlier
/// lookup stays visible next to the validation message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupState {
    pub phase: LookupPhase,
    pub username: Option<String>,
    pub result: Option<Profile>,
    pub error: Option<String>,
}

impl LookupState {
    /// The latest outcome, if any field is populated. An error wins over a
    /// stale result.
    pub fn latest(&self) -> Option<LookupResult> {
        if let Some(message) = &self.error {
            return Some(LookupResult::Failure {
                message: message.clone(),
            });
        }
        self.result.as_ref().map(|profile| LookupResult::Success {
            profile: profile.clone(),
        })
    }
}

/// Turns a username into either a profile or a displayable error, using
/// exactly one request per accepted input.
///
/// Overlapping lookups are neither cancelled nor ordered; whichever request
/// completes last decides the final state.
pub struct LookupController {
    transport: Arc<dyn Transport>,
    endpoint: ApiEndpoint,
    state: Mutex<LookupState>,
    events: broadcast::Sender<LookupEvent>,
}

impl LookupController {
    pub fn new(transport: Arc<dyn Transport>, endpoint: ApiEndpoint) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            endpoint,
            state: Mutex::new(LookupState::default()),
            events,
        }
    }

    /// Controller against the public GitHub API.
    pub fn github(transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self::new(transport, ApiEndpoint::github()?))
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LookupEvent> {
        self.events.subscribe()
    }

    pub async fn lookup(&self, username: &str) {
        self.lookup_input(Some(username)).await;
    }

    /// Same as [`lookup`](Self::lookup) but accepts a missing input, which is
    /// rejected like an empty one.
    pub async fn lookup_input(&self, input: Option<&str>) {
        {
            let mut state = self.state.lock().await;
            state.phase = LookupPhase::Validating;
            state.username = input.map(str::to_owned);
        }

        let (query, url) = match self.prepare_request(input) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(input = ?input, %err, "rejected lookup input");
                self.reject(input, err).await;
                return;
            }
        };

        {
            let mut state = self.state.lock().await;
            state.phase = LookupPhase::Requesting;
            state.error = None;
            self.emit(LookupEvent::Requested {
                username: query.username.clone(),
            });
        }

        match self.fetch_profile(url).await {
            Ok(profile) => {
                info!(username = %query.username, "user lookup resolved");
                let mut state = self.state.lock().await;
                state.phase = LookupPhase::Resolved;
                state.result = Some(profile.clone());
                state.error = None;
                self.emit(LookupEvent::Resolved {
                    username: query.username,
                    profile,
                });
            }
            Err(err) => {
                warn!(username = %query.username, %err, "user lookup failed");
                self.reject(Some(&query.username), err).await;
            }
        }
    }

    /// Runs a lookup on the current tokio runtime without waiting for it.
    pub fn spawn_lookup(self: &Arc<Self>, username: impl Into<String>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let username = username.into();
        tokio::spawn(async move {
            controller.lookup(&username).await;
        })
    }

    pub async fn result(&self) -> Option<Profile> {
        self.state.lock().await.result.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn phase(&self) -> LookupPhase {
        self.state.lock().await.phase
    }

    pub async fn snapshot(&self) -> LookupState {
        self.state.lock().await.clone()
    }

    /// Events are sent while the state lock is held, so subscribers observe
    /// writes in the same order as the state does.
    async fn reject(&self, username: Option<&str>, err: LookupError) {
        let message = err.to_string();
        let mut state = self.state.lock().await;
        state.phase = LookupPhase::Rejected;
        state.error = Some(message.clone());
        // A rejected input leaves the previous profile in place.
        if !err.is_validation() {
            state.result = None;
        }
        self.emit(LookupEvent::Rejected {
            username: username.map(str::to_owned),
            message,
        });
    }

    fn prepare_request(&self, input: Option<&str>) -> Result<(Query, Url), LookupError> {
        let query = Query::parse(input)?;
        let url = match self.endpoint.user_url(&query.username) {
            Ok(url) => url,
            Err(EndpointError::DotSegment(_)) => return Err(LookupError::Validation),
            Err(err) => {
                error!(%err, "failed to build lookup url");
                return Err(LookupError::network_failure());
            }
        };
        Ok((query, url))
    }

    async fn fetch_profile(&self, url: Url) -> Result<Profile, LookupError> {
        debug!(%url, "dispatching user lookup");

        let response = self.transport.get_json(url).await?;
        match response.body {
            Value::Object(profile) => Ok(profile),
            other => {
                warn!(
                    status = response.status,
                    body_kind = json_kind(&other),
                    "lookup body is not a JSON object"
                );
                Err(LookupError::malformed_response(response.status))
            }
        }
    }

    fn emit(&self, event: LookupEvent) {
        // No subscribers is the normal case for headless use.
        let _ = self.events.send(event);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
