//! # Sidebar Component
//!
//! The shared navigation menu. Stateless: the active route and the
//! collapse flag are props, owned by `App` and the layout respectively.
//! Highlighting goes through `nav::is_active`, so a menu entry lights up
//! only on an exact path match.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::nav::{Route, is_active};
use crate::tui::component::Component;

/// Sidebar width in columns, by collapse state.
pub fn sidebar_width(collapsed: bool) -> u16 {
    if collapsed { 6 } else { 22 }
}

pub struct Sidebar {
    pub current: Route,
    pub collapsed: bool,
}

impl Sidebar {
    pub fn new(current: Route, collapsed: bool) -> Self {
        Self { current, collapsed }
    }

    fn item_line(&self, route: Route) -> Line<'static> {
        let active = is_active(self.current.path(), route.path());
        let style = if active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        let text = if self.collapsed {
            // First letter stands in for the label when collapsed.
            route.title().chars().next().map(String::from).unwrap_or_default()
        } else {
            format!(" {} ", route.title())
        };
        Line::from(Span::styled(text, style))
    }
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.collapsed { " g " } else { " glucodash " };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .padding(Padding::new(0, 0, 1, 0));

        let mut lines = Vec::new();
        for route in Route::ALL {
            lines.push(self.item_line(route));
            lines.push(Line::default());
        }
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
