//! Request construction and dispatch

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::value_objects::{Endpoint, FuzzCase};
use crate::infrastructure::client::{FuzzRequest, ServiceClient, TransportError};

/// Transport failure messages are cut to this many characters
pub const MAX_FAILURE_MESSAGE_CHARS: usize = 200;

/// Result of dispatching one case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// No response was obtained
    TransportFailure { message: String },
    /// The service answered
    Response { status: u16, body: String },
}

/// Truncate to at most [`MAX_FAILURE_MESSAGE_CHARS`] characters
pub fn truncate_message(message: &str) -> String {
    message.chars().take(MAX_FAILURE_MESSAGE_CHARS).collect()
}

/// Builds concrete requests and issues exactly one per call
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn ServiceClient>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ServiceClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Substitute placeholder-bound values into the path and route the rest
    /// to the query string (GET/DELETE) or a JSON body (other verbs).
    ///
    /// For body verbs with no out-of-band values left, the whole case is
    /// sent as the body, placeholder-bound values included.
    pub fn build_request(endpoint: &Endpoint, case: &FuzzCase) -> FuzzRequest {
        let mut path = endpoint.path.clone();
        let mut out_of_band = FuzzCase::empty();

        for (name, value) in case.iter() {
            let placeholder = Endpoint::placeholder(name);
            if path.contains(&placeholder) {
                path = path.replace(&placeholder, &value.to_string());
            } else {
                out_of_band.insert(name.clone(), value.clone());
            }
        }

        if endpoint.method.sends_query() {
            let query = out_of_band
                .iter()
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect();
            FuzzRequest {
                method: endpoint.method,
                path,
                query,
                body: None,
            }
        } else {
            let body = if out_of_band.is_empty() {
                case.clone()
            } else {
                out_of_band
            };
            FuzzRequest {
                method: endpoint.method,
                path,
                query: Vec::new(),
                body: Some(body),
            }
        }
    }

    /// Dispatch one case. Never fails: transport errors and timeouts come
    /// back as [`RawOutcome::TransportFailure`].
    pub async fn dispatch(&self, endpoint: &Endpoint, case: &FuzzCase) -> RawOutcome {
        let request = Self::build_request(endpoint, case);
        debug!(endpoint = %endpoint, path_len = request.path.len(), "Dispatching case");

        let result = match tokio::time::timeout(self.timeout, self.client.execute(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        };

        match result {
            Ok(response) => RawOutcome::Response {
                status: response.status,
                body: response.body,
            },
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "Transport failure while fuzzing");
                RawOutcome::TransportFailure {
                    message: truncate_message(&e.to_string()),
                }
            }
        }
    }
}
