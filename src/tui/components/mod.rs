//! # TUI Components
//!
//! One component per screen, plus the shared sidebar.
//!
//! ## Component Architecture
//!
//! Two patterns, as elsewhere in the tree:
//!
//! - **Stateless (props-based)**: `Sidebar`, `TrendsScreen`,
//!   `SettingsScreen` receive everything they draw as struct fields.
//! - **Stateful wrapper**: `ChatScreen` and `MealScreen` are transient
//!   per-frame wrappers around persistent presentation state
//!   (`ChatScreenState`, `MealScreenState`) that lives in `TuiState`.
//!
//! Components read core state (`ChatState`, `TrendsState`, …) as borrowed
//! props and never mutate it; all core mutation goes through
//! `core::action::update`.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── sidebar.rs          (shared nav menu)
//! ├── chat_screen.rs      (message log + draft input)
//! ├── trends_screen.rs    (chart + stat tiles + filter bar)
//! ├── meal_screen.rs      (form + prediction panel)
//! └── settings_screen.rs  (focusable settings list)
//! ```

pub mod chat_screen;
pub mod meal_screen;
pub mod settings_screen;
pub mod sidebar;
pub mod trends_screen;

pub use chat_screen::{ChatScreen, ChatScreenState};
pub use meal_screen::{MealFocus, MealScreen, MealScreenState};
pub use settings_screen::{SettingsFocus, SettingsScreen};
pub use sidebar::{Sidebar, sidebar_width};
pub use trends_screen::TrendsScreen;
