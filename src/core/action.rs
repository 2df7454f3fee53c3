//! # Actions
//!
//! Everything that can happen in glucodash becomes an `Action`.
//! User presses Enter in the chat? That's `Action::SubmitChat`.
//! The mock reply timer fires? That's `Action::AgentReplyArrived`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the shell what (if anything)
//! to schedule. No I/O here — the run loop in `tui` executes effects by
//! spawning backend tasks whose completions come back as more actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes every interaction testable without a terminal or a runtime:
//! feed actions, assert on state, and deliver completion actions by hand
//! to stand in for elapsed timers.

use chrono::NaiveDate;

use crate::core::chat::QuickAction;
use crate::core::meal::{MealField, PredictionSeries, PRESETS};
use crate::core::nav::Route;
use crate::core::request::Ticket;
use crate::core::settings::SettingsField;
use crate::core::state::App;
use crate::core::trends::MealFilter;

#[derive(Debug)]
pub enum Action {
    Quit,
    Navigate(Route),

    // Chat screen
    SetChatDraft(String),
    ChatInput(char),
    ChatBackspace,
    SelectQuickAction(QuickAction),
    SubmitChat,
    AgentReplyArrived { ticket: Ticket, text: String },
    AgentReplyFailed { ticket: Ticket, error: String },

    // Meal simulator screen
    SetMealField(MealField, String),
    MealInput(MealField, char),
    MealBackspace(MealField),
    CycleGlycemicIndex,
    ApplyPreset(usize),
    RunSimulation,
    PredictionArrived { ticket: Ticket, series: PredictionSeries },
    PredictionFailed { ticket: Ticket, error: String },

    // Trends screen
    SetDateRange { start: NaiveDate, end: NaiveDate },
    SetMealFilter(MealFilter),

    // Settings screen
    SettingsInput(SettingsField, char),
    SettingsBackspace(SettingsField),
    ToggleDarkMode,
    ToggleNotifications,
    ToggleGlucoseUnit,
    CycleDataRetention,
    SaveSettings,
    SettingsPersisted(Result<(), String>),
}

/// What the shell must do after an update. Only the run loop touches I/O.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Ask the backend for the agent's reply to `text`, then deliver
    /// `AgentReplyArrived`/`AgentReplyFailed` with this ticket.
    RequestAgentReply { ticket: Ticket, text: String },
    /// Ask the backend to simulate the current meal, then deliver
    /// `PredictionArrived`/`PredictionFailed` with this ticket.
    RequestPrediction { ticket: Ticket },
    /// Write the current settings through the store, then deliver
    /// `SettingsPersisted`.
    PersistSettings,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Navigate(route) => {
            app.navigate(route);
            Effect::None
        }

        // ------------------------------------------------------------------
        // Chat
        // ------------------------------------------------------------------
        Action::SetChatDraft(text) => {
            app.chat.set_draft(text);
            Effect::None
        }
        Action::ChatInput(c) => {
            app.chat.draft.push(c);
            Effect::None
        }
        Action::ChatBackspace => {
            app.chat.draft.pop();
            Effect::None
        }
        Action::SelectQuickAction(quick) => {
            app.chat.select_quick_action(quick);
            Effect::None
        }
        Action::SubmitChat => {
            let text = app.chat.draft.clone();
            let ticket = Ticket::next(&mut app.next_ticket);
            if app.chat.append_user_message(&text, ticket) {
                Effect::RequestAgentReply { ticket, text: text.trim().to_string() }
            } else {
                Effect::None
            }
        }
        Action::AgentReplyArrived { ticket, text } => {
            app.chat.deliver_agent_reply(ticket, text);
            Effect::None
        }
        Action::AgentReplyFailed { ticket, error } => {
            if app.chat.reply_request.fail(ticket, error.clone()) {
                app.status_message = format!("Agent reply failed: {error}");
            }
            Effect::None
        }

        // ------------------------------------------------------------------
        // Meal simulator
        // ------------------------------------------------------------------
        Action::SetMealField(field, value) => {
            app.meal.set_field(field, value);
            Effect::None
        }
        Action::MealInput(field, c) => {
            app.meal.form.field_mut(field).push(c);
            Effect::None
        }
        Action::MealBackspace(field) => {
            app.meal.form.field_mut(field).pop();
            Effect::None
        }
        Action::CycleGlycemicIndex => {
            app.meal.cycle_glycemic_index();
            Effect::None
        }
        Action::ApplyPreset(index) => {
            if let Some(preset) = PRESETS.get(index) {
                app.meal.apply_preset(preset);
            }
            Effect::None
        }
        Action::RunSimulation => {
            let ticket = Ticket::next(&mut app.next_ticket);
            if app.meal.simulate(ticket) {
                Effect::RequestPrediction { ticket }
            } else {
                Effect::None
            }
        }
        Action::PredictionArrived { ticket, series } => {
            app.meal.deliver_prediction(ticket, series);
            Effect::None
        }
        Action::PredictionFailed { ticket, error } => {
            if app.meal.request.fail(ticket, error.clone()) {
                app.status_message = format!("Simulation failed: {error}");
            }
            Effect::None
        }

        // ------------------------------------------------------------------
        // Trends
        // ------------------------------------------------------------------
        Action::SetDateRange { start, end } => {
            app.trends.set_date_range(start, end);
            Effect::None
        }
        Action::SetMealFilter(filter) => {
            app.trends.set_meal_filter(filter);
            Effect::None
        }

        // ------------------------------------------------------------------
        // Settings
        // ------------------------------------------------------------------
        Action::SettingsInput(field, c) => {
            app.settings.field_mut(field).push(c);
            Effect::None
        }
        Action::SettingsBackspace(field) => {
            app.settings.field_mut(field).pop();
            Effect::None
        }
        Action::ToggleDarkMode => {
            app.settings.settings.dark_mode = !app.settings.settings.dark_mode;
            Effect::None
        }
        Action::ToggleNotifications => {
            app.settings.settings.notifications = !app.settings.settings.notifications;
            Effect::None
        }
        Action::ToggleGlucoseUnit => {
            app.settings.settings.glucose_unit = app.settings.settings.glucose_unit.toggle();
            Effect::None
        }
        Action::CycleDataRetention => {
            app.settings.settings.data_retention = app.settings.settings.data_retention.next();
            Effect::None
        }
        Action::SaveSettings => Effect::PersistSettings,
        Action::SettingsPersisted(result) => {
            app.status_message = match result {
                Ok(()) => String::from("Settings saved"),
                Err(error) => format!("Save failed: {error}"),
            };
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::meal::sample_prediction;
    use crate::test_support::test_app;

    /// Pull the ticket out of a request effect, panicking on anything else.
    fn reply_ticket(effect: Effect) -> Ticket {
        match effect {
            Effect::RequestAgentReply { ticket, .. } => ticket,
            other => panic!("expected RequestAgentReply, got {other:?}"),
        }
    }

    fn prediction_ticket(effect: Effect) -> Ticket {
        match effect {
            Effect::RequestPrediction { ticket } => ticket,
            other => panic!("expected RequestPrediction, got {other:?}"),
        }
    }

    #[test]
    fn test_chat_round_trip() {
        let mut app = test_app();
        update(&mut app, Action::SetChatDraft("Why did I spike?".to_string()));

        let ticket = reply_ticket(update(&mut app, Action::SubmitChat));
        assert_eq!(app.chat.messages.len(), 2);
        assert!(app.chat.awaiting_reply());

        // Sends while awaiting are no-ops and schedule nothing.
        update(&mut app, Action::SetChatDraft("again".to_string()));
        assert_eq!(update(&mut app, Action::SubmitChat), Effect::None);
        assert_eq!(app.chat.messages.len(), 2);

        let effect = update(
            &mut app,
            Action::AgentReplyArrived { ticket, text: "Carbs beat insulin today.".to_string() },
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(app.chat.messages.len(), 3);
        assert!(!app.chat.awaiting_reply());
    }

    #[test]
    fn test_empty_submit_schedules_nothing() {
        let mut app = test_app();
        update(&mut app, Action::SetChatDraft("   ".to_string()));
        assert_eq!(update(&mut app, Action::SubmitChat), Effect::None);
        assert_eq!(app.chat.messages.len(), 1); // greeting only
    }

    #[test]
    fn test_reply_after_navigation_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::SetChatDraft("hello".to_string()));
        let ticket = reply_ticket(update(&mut app, Action::SubmitChat));

        update(&mut app, Action::Navigate(Route::Settings));
        update(&mut app, Action::Navigate(Route::Chat));

        update(&mut app, Action::AgentReplyArrived { ticket, text: "late".to_string() });
        assert_eq!(app.chat.messages.len(), 1); // greeting only
        assert!(!app.chat.awaiting_reply());
    }

    #[test]
    fn test_simulation_requires_filled_form() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::RunSimulation), Effect::None);

        update(&mut app, Action::SetMealField(MealField::Description, "Ramen".to_string()));
        update(&mut app, Action::SetMealField(MealField::CarbsGrams, "80".to_string()));
        let ticket = prediction_ticket(update(&mut app, Action::RunSimulation));
        assert!(app.meal.request.is_pending());

        update(&mut app, Action::PredictionArrived { ticket, series: sample_prediction() });
        assert!(!app.meal.request.is_pending());
        assert_eq!(app.meal.prediction.as_ref().unwrap().points.len(), 13);
    }

    #[test]
    fn test_prediction_failure_keeps_prior_series() {
        let mut app = test_app();
        update(&mut app, Action::SetMealField(MealField::Description, "Ramen".to_string()));
        update(&mut app, Action::SetMealField(MealField::CarbsGrams, "80".to_string()));

        let first = prediction_ticket(update(&mut app, Action::RunSimulation));
        update(&mut app, Action::PredictionArrived { ticket: first, series: sample_prediction() });

        let second = prediction_ticket(update(&mut app, Action::RunSimulation));
        update(
            &mut app,
            Action::PredictionFailed { ticket: second, error: "timed out".to_string() },
        );
        // Prior displayed data intact, error surfaced, retry possible.
        assert!(app.meal.prediction.is_some());
        assert_eq!(app.meal.request.error(), Some("timed out"));
        assert!(app.status_message.contains("timed out"));
        assert!(matches!(
            update(&mut app, Action::RunSimulation),
            Effect::RequestPrediction { .. }
        ));
    }

    #[test]
    fn test_save_settings_effect_and_confirmation() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SaveSettings), Effect::PersistSettings);
        update(&mut app, Action::SettingsPersisted(Ok(())));
        assert_eq!(app.status_message, "Settings saved");

        update(&mut app, Action::SettingsPersisted(Err("disk full".to_string())));
        assert_eq!(app.status_message, "Save failed: disk full");
    }

    #[test]
    fn test_quick_action_fills_draft_only() {
        let mut app = test_app();
        update(&mut app, Action::SelectQuickAction(QuickAction::MealAdvice));
        assert_eq!(app.chat.draft, QuickAction::MealAdvice.prompt());
        assert!(app.chat.messages.is_empty());
    }
}
