//! # Chat Screen Component
//!
//! Conversation with the demo agent: scrollable message log, a composing
//! indicator while the reply timer runs, the draft input, and a hint line
//! for the quick prompts.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ChatScreenState` (scroll position) lives in `TuiState`
//! - `ChatScreen` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::chat::{Author, ChatMessage, ChatState, QuickAction};
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 6] = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"];

/// Scroll state for the message log. Must be persisted in `TuiState`.
pub struct ChatScreenState {
    pub scroll: ScrollViewState,
    /// When true, keep the view pinned to the newest message.
    pub stick_to_bottom: bool,
}

impl Default for ChatScreenState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatScreenState {
    pub fn new() -> Self {
        Self { scroll: ScrollViewState::default(), stick_to_bottom: true }
    }

    pub fn scroll_up(&mut self) {
        self.scroll.scroll_up();
        self.stick_to_bottom = false;
    }

    pub fn scroll_down(&mut self) {
        self.scroll.scroll_down();
    }
}

struct RenderedMessage<'a> {
    paragraph: Paragraph<'a>,
    height: u16,
}

impl<'a> RenderedMessage<'a> {
    fn new(message: &'a ChatMessage, width: u16) -> Self {
        let (role, style) = match message.author {
            Author::User => ("you", Style::default().fg(Color::Cyan)),
            Author::Agent => ("agent", Style::default().fg(Color::Green)),
        };
        let title = format!("{} · {}", role, message.sent_at.format("%H:%M"));
        let paragraph = Paragraph::new(message.text.as_str())
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(style.add_modifier(Modifier::DIM))
                    .title_style(style),
            )
            .style(style)
            .wrap(Wrap { trim: true });
        let inner_width = width.saturating_sub(2);
        let height = paragraph.line_count(inner_width) as u16;
        RenderedMessage { paragraph, height }
    }
}

pub struct ChatScreen<'a> {
    pub chat: &'a ChatState,
    pub state: &'a mut ChatScreenState,
    pub spinner_frame: usize,
    pub next_quick_action: QuickAction,
}

impl<'a> ChatScreen<'a> {
    fn draw_messages(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1);
        let rendered: Vec<RenderedMessage> = self
            .chat
            .messages
            .iter()
            .map(|m| RenderedMessage::new(m, content_width))
            .collect();

        let composing_height: u16 = if self.chat.awaiting_reply() { 1 } else { 0 };
        let total_height: u16 =
            rendered.iter().map(|m| m.height).sum::<u16>() + composing_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for message in rendered {
            let rect = Rect::new(0, y, content_width, message.height);
            scroll_view.render_widget(message.paragraph, rect);
            y += message.height;
        }

        if self.chat.awaiting_reply() {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let line = Line::from(Span::styled(
                format!("{spinner} agent is composing…"),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
            scroll_view.render_widget(Paragraph::new(line), Rect::new(0, y, content_width, 1));
        }

        if self.state.stick_to_bottom {
            let max_y = total_height.saturating_sub(area.height);
            self.state.scroll.set_offset(Position { x: 0, y: max_y });
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);

        // Re-pin once a manual scroll lands back on the bottom edge.
        let max_y = total_height.saturating_sub(area.height);
        if self.state.scroll.offset().y >= max_y {
            self.state.stick_to_bottom = true;
        }
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title("Message");
        let input = Paragraph::new(self.chat.draft.as_str())
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let cursor_x = area.x + 1 + self.chat.draft.width() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

impl<'a> Component for ChatScreen<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [messages_area, input_area, hint_area] =
            Layout::vertical([Min(0), Length(3), Length(1)]).areas(area);

        self.draw_messages(frame, messages_area);
        self.draw_input(frame, input_area);

        let hint = Line::from(vec![
            Span::styled("Ctrl+T", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" quick prompt: {}", self.next_quick_action.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(hint), hint_area);
    }
}
