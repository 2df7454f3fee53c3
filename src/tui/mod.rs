//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web, etc.)
//! in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a mock request in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! ## Mock asynchrony
//!
//! Effects returned by `update()` are executed here by spawning tokio
//! tasks against the backend trait. The task sleeps for the configured
//! delay (that's the whole "request"), then sends a completion `Action`
//! over the channel. The loop drains the channel and feeds the actions
//! back through `update()`, where ticket checks drop anything that
//! outlived its screen.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::backend::{AgentBackend, MemoryStore, MockAgent};
use crate::core::action::{Action, Effect, update};
use crate::core::chat::QuickAction;
use crate::core::config::ResolvedConfig;
use crate::core::meal::PRESETS;
use crate::core::nav::Route;
use crate::core::request::Ticket;
use crate::core::state::App;
use crate::tui::components::{ChatScreenState, MealScreenState, SettingsFocus};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic).
///
/// The sidebar collapse flag lives here: the layout owns it, components
/// read it as a prop.
pub struct TuiState {
    pub sidebar_collapsed: bool,
    pub chat: ChatScreenState,
    pub meal: MealScreenState,
    pub settings_focus: SettingsFocus,
    /// Index of the quick prompt the next Ctrl+T selects.
    pub quick_action_index: usize,
}

impl TuiState {
    pub fn new(sidebar_collapsed: bool) -> Self {
        Self {
            sidebar_collapsed,
            chat: ChatScreenState::new(),
            meal: MealScreenState::default(),
            settings_focus: SettingsFocus::default(),
            quick_action_index: 0,
        }
    }

    pub fn next_quick_action(&self) -> QuickAction {
        QuickAction::ALL[self.quick_action_index % QuickAction::ALL.len()]
    }

    /// Presentation state is screen-scoped like core state: navigation
    /// tears it down.
    fn reset_screen_state(&mut self) {
        self.chat = ChatScreenState::new();
        self.meal = MealScreenState::default();
        self.settings_focus = SettingsFocus::default();
        self.quick_action_index = 0;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the demo collaborators from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> Arc<dyn AgentBackend> {
    Arc::new(MockAgent::new(
        Duration::from_millis(config.reply_delay_ms),
        Duration::from_millis(config.simulate_delay_ms),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config);
    let mut app = App::from_config(backend, Arc::new(MemoryStore::new()), &config);
    let mut tui = TuiState::new(config.sidebar_collapsed);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completion actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.chat.awaiting_reply() || app.meal.request.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Quit keys work on every screen
            if matches!(event, TuiEvent::ForceQuit | TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Layout-owned state, never routed through the core
            if matches!(event, TuiEvent::ToggleSidebar) {
                tui.sidebar_collapsed = !tui.sidebar_collapsed;
                continue;
            }

            // Screen cycling tears down the departed screen's state,
            // presentation state included.
            if let TuiEvent::NextScreen | TuiEvent::PrevScreen = event {
                let target = if event == TuiEvent::NextScreen {
                    app.route.next()
                } else {
                    app.route.prev()
                };
                update(&mut app, Action::Navigate(target));
                tui.reset_screen_state();
                continue;
            }

            if let Some(action) = translate_screen_event(&app, &mut tui, event) {
                let effect = update(&mut app, action);
                if run_effect(&mut app, effect, &tx) {
                    should_quit = true;
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle completions from background mock requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(&mut app, effect, &tx) {
                break;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Interpret an event in the context of the active screen. Events that
/// only move presentation state (focus, scroll) are handled here and
/// return no action.
fn translate_screen_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match app.route {
        Route::Chat => match event {
            TuiEvent::InputChar(c) => Some(Action::ChatInput(c)),
            TuiEvent::Backspace => Some(Action::ChatBackspace),
            TuiEvent::Paste(text) => {
                Some(Action::SetChatDraft(format!("{}{}", app.chat.draft, text)))
            }
            TuiEvent::Submit => Some(Action::SubmitChat),
            TuiEvent::QuickAction => {
                let quick = tui.next_quick_action();
                tui.quick_action_index += 1;
                Some(Action::SelectQuickAction(quick))
            }
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                tui.chat.scroll_up();
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                tui.chat.scroll_down();
                None
            }
            _ => None,
        },
        Route::Trends => match event {
            TuiEvent::CursorLeft => Some(shift_date_range(app, -7)),
            TuiEvent::CursorRight => Some(shift_date_range(app, 7)),
            TuiEvent::InputChar('f') => {
                Some(Action::SetMealFilter(app.trends.filter.meal_filter.next()))
            }
            _ => None,
        },
        Route::MealSim => match event {
            TuiEvent::CursorUp => {
                tui.meal.focus = tui.meal.focus.prev();
                None
            }
            TuiEvent::CursorDown => {
                tui.meal.focus = tui.meal.focus.next();
                None
            }
            TuiEvent::InputChar(' ') if tui.meal.focus.field().is_none() => {
                Some(Action::CycleGlycemicIndex)
            }
            TuiEvent::InputChar(c) => {
                tui.meal.focus.field().map(|field| Action::MealInput(field, c))
            }
            TuiEvent::Backspace => tui.meal.focus.field().map(Action::MealBackspace),
            TuiEvent::Paste(text) => tui.meal.focus.field().map(|field| {
                Action::SetMealField(field, format!("{}{}", app.meal.form.field(field), text))
            }),
            TuiEvent::Submit => Some(Action::RunSimulation),
            TuiEvent::ApplyPreset => {
                let index = tui.meal.preset_index;
                tui.meal.preset_index = (index + 1) % PRESETS.len();
                Some(Action::ApplyPreset(index))
            }
            _ => None,
        },
        Route::Settings => match event {
            TuiEvent::CursorUp => {
                tui.settings_focus = tui.settings_focus.prev();
                None
            }
            TuiEvent::CursorDown => {
                tui.settings_focus = tui.settings_focus.next();
                None
            }
            TuiEvent::InputChar(' ') if tui.settings_focus.is_toggle() => {
                Some(toggle_action(tui.settings_focus))
            }
            TuiEvent::InputChar(c) => tui
                .settings_focus
                .field()
                .map(|field| Action::SettingsInput(field, c)),
            TuiEvent::Backspace => tui.settings_focus.field().map(Action::SettingsBackspace),
            TuiEvent::Submit => Some(Action::SaveSettings),
            _ => None,
        },
    }
}

fn shift_date_range(app: &App, days: i64) -> Action {
    let delta = chrono::Duration::days(days);
    Action::SetDateRange {
        start: app.trends.filter.start_date + delta,
        end: app.trends.filter.end_date + delta,
    }
}

fn toggle_action(focus: SettingsFocus) -> Action {
    match focus {
        SettingsFocus::DarkMode => Action::ToggleDarkMode,
        SettingsFocus::Notifications => Action::ToggleNotifications,
        SettingsFocus::GlucoseUnit => Action::ToggleGlucoseUnit,
        // is_toggle() admits the three rows above plus DataRetention.
        _ => Action::CycleDataRetention,
    }
}

/// Execute an effect. Returns true when the app should quit.
fn run_effect(app: &mut App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::RequestAgentReply { ticket, text } => {
            spawn_agent_reply(app.backend.clone(), ticket, text, tx.clone());
            false
        }
        Effect::RequestPrediction { ticket } => {
            spawn_simulation(app.backend.clone(), ticket, app.meal.form.clone(), tx.clone());
            false
        }
        Effect::PersistSettings => {
            // The in-memory store answers immediately; no task needed.
            let result = app
                .settings_store
                .save(&app.settings.settings)
                .map_err(|e| e.to_string());
            update(app, Action::SettingsPersisted(result));
            false
        }
    }
}

fn spawn_agent_reply(
    backend: Arc<dyn AgentBackend>,
    ticket: Ticket,
    text: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning agent reply request");
    tokio::spawn(async move {
        let action = match backend.send_user_message(&text).await {
            Ok(reply) => Action::AgentReplyArrived { ticket, text: reply },
            Err(e) => Action::AgentReplyFailed { ticket, error: e.to_string() },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver agent reply: receiver dropped");
        }
    });
}

fn spawn_simulation(
    backend: Arc<dyn AgentBackend>,
    ticket: Ticket,
    form: crate::core::meal::MealForm,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning meal simulation for '{}'", form.description);
    tokio::spawn(async move {
        let action = match backend.simulate_meal(&form).await {
            Ok(series) => Action::PredictionArrived { ticket, series },
            Err(e) => Action::PredictionFailed { ticket, error: e.to_string() },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver simulation result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_chat_typing_translates_to_draft_edits() {
        let app = test_app();
        let mut tui = TuiState::new(false);
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::InputChar('h')),
            Some(Action::ChatInput('h'))
        ));
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::Backspace),
            Some(Action::ChatBackspace)
        ));
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::Submit),
            Some(Action::SubmitChat)
        ));
    }

    #[test]
    fn test_quick_action_cycles_through_prompts() {
        let app = test_app();
        let mut tui = TuiState::new(false);
        let mut seen = Vec::new();
        for _ in 0..QuickAction::ALL.len() {
            match translate_screen_event(&app, &mut tui, TuiEvent::QuickAction) {
                Some(Action::SelectQuickAction(q)) => seen.push(q),
                other => panic!("expected quick action, got {other:?}"),
            }
        }
        assert_eq!(seen, QuickAction::ALL);
    }

    #[test]
    fn test_meal_space_cycles_gi_only_on_gi_row() {
        let mut app = test_app();
        app.navigate(Route::MealSim);
        let mut tui = TuiState::new(false);

        // Description row: space is a character.
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::InputChar(' ')),
            Some(Action::MealInput(_, ' '))
        ));

        tui.meal.focus = crate::tui::components::MealFocus::GlycemicIndex;
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::InputChar(' ')),
            Some(Action::CycleGlycemicIndex)
        ));
        // Typing into the GI row does nothing.
        assert!(translate_screen_event(&app, &mut tui, TuiEvent::InputChar('x')).is_none());
    }

    #[test]
    fn test_trends_arrows_shift_week() {
        let mut app = test_app();
        app.navigate(Route::Trends);
        let mut tui = TuiState::new(false);
        let start = app.trends.filter.start_date;

        match translate_screen_event(&app, &mut tui, TuiEvent::CursorLeft) {
            Some(Action::SetDateRange { start: new_start, .. }) => {
                assert_eq!(new_start, start - chrono::Duration::days(7));
            }
            other => panic!("expected SetDateRange, got {other:?}"),
        }
    }

    #[test]
    fn test_settings_space_toggles_focused_row() {
        let mut app = test_app();
        app.navigate(Route::Settings);
        let mut tui = TuiState::new(false);

        tui.settings_focus = SettingsFocus::DarkMode;
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::InputChar(' ')),
            Some(Action::ToggleDarkMode)
        ));

        tui.settings_focus = SettingsFocus::DataRetention;
        assert!(matches!(
            translate_screen_event(&app, &mut tui, TuiEvent::InputChar(' ')),
            Some(Action::CycleDataRetention)
        ));
    }

    #[test]
    fn test_persist_settings_effect_updates_status() {
        let mut app = test_app();
        let (tx, _rx) = mpsc::channel();
        let quit = run_effect(&mut app, Effect::PersistSettings, &tx);
        assert!(!quit);
        assert_eq!(app.status_message, "Settings saved");
    }
}
