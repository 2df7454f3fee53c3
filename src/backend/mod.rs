//! # Backend Collaborators
//!
//! The seams where the demo's canned behavior would be replaced by real
//! services: an agent (chat replies, meal simulation) and a settings store.
//! The rest of the app talks only to these traits, so swapping the mock for
//! a Bedrock-backed client changes no caller code.

pub mod agent;
pub mod mock;
pub mod settings_store;

pub use agent::{AgentBackend, BackendError};
pub use mock::MockAgent;
pub use settings_store::{JsonFileStore, MemoryStore, SettingsStore, StoreError};
