//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{MemoryStore, MockAgent};
use crate::core::state::App;

/// Creates a test App over the mock collaborators with zero delays.
pub fn test_app() -> App {
    let backend = Arc::new(MockAgent::new(Duration::ZERO, Duration::ZERO));
    App::new(backend, Arc::new(MemoryStore::new()))
}
