//! # Application State
//!
//! Core business state for glucodash. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn AgentBackend>      // chat replies, meal simulation
//! ├── settings_store: Arc<dyn SettingsStore>
//! ├── route: Route                        // active screen
//! ├── chat: ChatState                     // conversation + draft
//! ├── trends: TrendsState                 // filter + sample series
//! ├── meal: MealSimState                  // form + prediction
//! ├── settings: SettingsState             // in-memory edits
//! ├── status_message: String              // header toast text
//! └── next_ticket: u64                    // request ticket counter
//! ```
//!
//! Each screen's state is owned for exactly as long as that screen is
//! active: navigating away tears it down and the next visit mounts fresh
//! defaults. Nothing here persists.
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::debug;

use crate::backend::{AgentBackend, SettingsStore};
use crate::core::chat::ChatState;
use crate::core::config::ResolvedConfig;
use crate::core::meal::MealSimState;
use crate::core::nav::Route;
use crate::core::settings::SettingsState;
use crate::core::trends::TrendsState;

pub struct App {
    pub backend: Arc<dyn AgentBackend>,
    pub settings_store: Arc<dyn SettingsStore>,
    pub route: Route,
    pub chat: ChatState,
    pub trends: TrendsState,
    pub meal: MealSimState,
    pub settings: SettingsState,
    pub status_message: String,
    pub next_ticket: u64,
}

impl App {
    pub fn new(backend: Arc<dyn AgentBackend>, settings_store: Arc<dyn SettingsStore>) -> Self {
        Self {
            backend,
            settings_store,
            route: Route::default(),
            chat: ChatState::new(),
            trends: TrendsState::default(),
            meal: MealSimState::new(),
            settings: SettingsState::new(),
            status_message: String::from("Connected to demo agent"),
            next_ticket: 0,
        }
    }

    pub fn from_config(
        backend: Arc<dyn AgentBackend>,
        settings_store: Arc<dyn SettingsStore>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut app = Self::new(backend, settings_store);
        app.route = config.start_screen;
        app
    }

    /// Switch screens. The departed screen's state is torn down: its data
    /// is gone and any in-flight request ticket goes stale with it.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!("Navigating {} -> {}", self.route.path(), route.path());
        match self.route {
            Route::Chat => self.chat = ChatState::new(),
            Route::Trends => self.trends = TrendsState::default(),
            Route::MealSim => self.meal = MealSimState::new(),
            Route::Settings => self.settings = SettingsState::new(),
        }
        self.route = route;
        self.status_message.clear();
    }
}
