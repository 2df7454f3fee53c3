use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEventKind};

/// TUI-specific input events. Screen-specific meaning (which field a char
/// edits, what Enter submits) is decided by the run loop from the active
/// route.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    /// Ctrl+C — always quits, regardless of screen.
    ForceQuit,
    /// Esc
    Quit,
    /// Tab / Shift+Tab — cycle through the sidebar screens.
    NextScreen,
    PrevScreen,
    /// Ctrl+B — collapse/expand the sidebar.
    ToggleSidebar,
    /// Enter — send / simulate / save, depending on the screen.
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    ScrollUp,
    ScrollDown,
    /// Ctrl+T — cycle the canned quick prompts into the chat draft.
    QuickAction,
    /// Ctrl+P — apply the next meal preset.
    ApplyPreset,
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(TuiEvent::ToggleSidebar),
                (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::QuickAction),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::ApplyPreset),
                (_, KeyCode::BackTab) => Some(TuiEvent::PrevScreen),
                (_, KeyCode::Tab) => Some(TuiEvent::NextScreen),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
