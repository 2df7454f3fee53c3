use std::fmt;

use async_trait::async_trait;

use crate::core::meal::{MealForm, PredictionSeries};

/// Errors a real agent backend can surface. The mock never produces these,
/// but the screens already know how to display them (failed request state,
/// prior data left intact, retry allowed).
#[derive(Debug)]
pub enum BackendError {
    /// Backend misconfigured (missing credentials, bad endpoint). Not retryable.
    Config(String),
    /// Network-level failure (timeout, connection refused). Retryable.
    Network(String),
    /// The agent rejected the request.
    Rejected(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Config(msg) => write!(f, "config error: {msg}"),
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Rejected(msg) => write!(f, "request rejected: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The agent the dashboard fronts.
///
/// Both operations are request/response: a user message yields a reply, a
/// meal form yields a response curve. Delays, streaming, and transport are
/// the implementation's business.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Send one user message, receive the agent's reply text.
    async fn send_user_message(&self, text: &str) -> Result<String, BackendError>;

    /// Ask the agent to simulate the glucose response to a meal.
    async fn simulate_meal(&self, form: &MealForm) -> Result<PredictionSeries, BackendError>;
}
