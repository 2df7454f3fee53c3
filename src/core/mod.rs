//! # Core Application Logic
//!
//! This module contains glucodash's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    Web     │      │    API     │
//!     │  Adapter   │      │  Adapter   │      │  (future)  │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum — everything that can happen in the app
//! - [`nav`]: Routes and the active-menu-item contract
//! - [`request`]: One-in-flight tracking for timer-delayed mock operations
//! - [`chat`], [`trends`], [`meal`], [`settings`]: per-screen view state
//! - [`config`]: TOML config with defaults → file → env → CLI resolution

pub mod action;
pub mod chat;
pub mod config;
pub mod meal;
pub mod nav;
pub mod request;
pub mod settings;
pub mod state;
pub mod trends;
