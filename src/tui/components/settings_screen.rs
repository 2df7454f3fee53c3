//! # Settings Screen Component
//!
//! A focusable list of fields: free-text rows edited in place, boolean and
//! enum rows toggled with Space. Enter saves through the settings store.
//! The API key renders masked.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::settings::{SettingsField, SettingsState};
use crate::tui::component::Component;

/// Which settings row has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsFocus {
    #[default]
    ApiKey,
    DarkMode,
    Notifications,
    GlucoseUnit,
    TargetMin,
    TargetMax,
    EmergencyContact,
    DataRetention,
}

impl SettingsFocus {
    const ORDER: [SettingsFocus; 8] = [
        SettingsFocus::ApiKey,
        SettingsFocus::DarkMode,
        SettingsFocus::Notifications,
        SettingsFocus::GlucoseUnit,
        SettingsFocus::TargetMin,
        SettingsFocus::TargetMax,
        SettingsFocus::EmergencyContact,
        SettingsFocus::DataRetention,
    ];

    pub fn next(&self) -> SettingsFocus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> SettingsFocus {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The text field this row edits, if it is a text row.
    pub fn field(&self) -> Option<SettingsField> {
        match self {
            SettingsFocus::ApiKey => Some(SettingsField::ApiKey),
            SettingsFocus::TargetMin => Some(SettingsField::TargetMin),
            SettingsFocus::TargetMax => Some(SettingsField::TargetMax),
            SettingsFocus::EmergencyContact => Some(SettingsField::EmergencyContact),
            _ => None,
        }
    }

    /// True for rows whose value is changed with Space.
    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            SettingsFocus::DarkMode
                | SettingsFocus::Notifications
                | SettingsFocus::GlucoseUnit
                | SettingsFocus::DataRetention
        )
    }
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        String::from("(not set)")
    } else {
        "•".repeat(key.chars().count())
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub struct SettingsScreen<'a> {
    pub state: &'a SettingsState,
    pub focus: SettingsFocus,
}

impl<'a> SettingsScreen<'a> {
    fn row(&self, focus: SettingsFocus, label: &'static str, value: String) -> Line<'static> {
        let focused = self.focus == focus;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if focused { "▸ " } else { "  " };
        let hint = if focused && focus.is_toggle() { "  (Space)" } else { "" };
        Line::from(vec![
            Span::styled(format!("{marker}{label:<20}"), label_style),
            Span::styled(value, Style::default().fg(Color::White)),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl<'a> Component for SettingsScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let s = &self.state.settings;
        let lines = vec![
            self.row(SettingsFocus::ApiKey, "Agent API key", mask_key(&s.api_key)),
            self.row(SettingsFocus::DarkMode, "Dark mode", on_off(s.dark_mode).to_string()),
            self.row(
                SettingsFocus::Notifications,
                "Notifications",
                on_off(s.notifications).to_string(),
            ),
            self.row(
                SettingsFocus::GlucoseUnit,
                "Glucose unit",
                s.glucose_unit.label().to_string(),
            ),
            self.row(
                SettingsFocus::TargetMin,
                "Target range min",
                s.target_range.min.clone(),
            ),
            self.row(
                SettingsFocus::TargetMax,
                "Target range max",
                s.target_range.max.clone(),
            ),
            self.row(
                SettingsFocus::EmergencyContact,
                "Emergency contact",
                s.emergency_contact.clone(),
            ),
            self.row(
                SettingsFocus::DataRetention,
                "Data retention",
                s.data_retention.label().to_string(),
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::styled(" save", Style::default().fg(Color::White)),
                Span::styled(
                    "   changes are lost when you navigate away",
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];

        let block = Block::bordered().title("Settings");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(state: &SettingsState, focus: SettingsFocus) -> String {
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut screen = SettingsScreen { state, focus };
        terminal.draw(|f| screen.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_defaults() {
        let state = SettingsState::new();
        let text = render_to_text(&state, SettingsFocus::default());
        assert!(text.contains("(not set)"));
        assert!(text.contains("mg/dL"));
        assert!(text.contains("6 months"));
        assert!(text.contains("70"));
        assert!(text.contains("180"));
    }

    #[test]
    fn test_api_key_is_masked() {
        let mut state = SettingsState::new();
        state.set_field(SettingsField::ApiKey, "sk-demo-secret".to_string());
        let text = render_to_text(&state, SettingsFocus::default());
        assert!(!text.contains("sk-demo-secret"));
        assert!(text.contains('•'));
    }

    #[test]
    fn test_focus_order_cycles() {
        let mut focus = SettingsFocus::ApiKey;
        for _ in 0..SettingsFocus::ORDER.len() {
            focus = focus.next();
        }
        assert_eq!(focus, SettingsFocus::ApiKey);
        assert_eq!(SettingsFocus::ApiKey.prev(), SettingsFocus::DataRetention);
    }

    #[test]
    fn test_toggle_rows() {
        assert!(SettingsFocus::DarkMode.is_toggle());
        assert!(SettingsFocus::DataRetention.is_toggle());
        assert!(!SettingsFocus::ApiKey.is_toggle());
        assert_eq!(SettingsFocus::TargetMin.field(), Some(SettingsField::TargetMin));
        assert_eq!(SettingsFocus::GlucoseUnit.field(), None);
    }
}
