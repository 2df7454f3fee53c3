//! # Chat Conversation State
//!
//! Append-only message log plus the draft being typed. Sending arms the
//! reply request; the agent's (canned) answer is appended when the delayed
//! completion comes back through the reducer.
//!
//! Display order is append order, always. The composing indicator is shown
//! iff a reply is awaited, and that flag is derived from the request state
//! rather than stored, so it cannot drift.

use chrono::{DateTime, Utc};

use crate::core::request::{PendingRequest, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Agent,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Monotonically increasing within one conversation.
    pub id: u64,
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Canned prompts reachable from the chat screen. Selecting one overwrites
/// the draft; it never sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    ExplainSpike,
    MealAdvice,
    TrendSummary,
    InsulinTiming,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::ExplainSpike,
        QuickAction::MealAdvice,
        QuickAction::TrendSummary,
        QuickAction::InsulinTiming,
    ];

    pub fn prompt(&self) -> &'static str {
        match self {
            QuickAction::ExplainSpike => "Why did my glucose spike after lunch?",
            QuickAction::MealAdvice => {
                "What should I eat this afternoon to keep my glucose steady?"
            }
            QuickAction::TrendSummary => "Summarize my glucose trends over the past week.",
            QuickAction::InsulinTiming => {
                "When should I take my insulin for a high-carb dinner?"
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::ExplainSpike => "Explain spike",
            QuickAction::MealAdvice => "Meal advice",
            QuickAction::TrendSummary => "Trend summary",
            QuickAction::InsulinTiming => "Insulin timing",
        }
    }
}

/// The seeded opener every fresh conversation starts with.
pub const GREETING: &str =
    "Hi — I'm your glucose agent. Ask about a spike, a meal, or your weekly trend.";

pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub reply_request: PendingRequest,
    next_message_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// A fresh conversation: the agent's greeting is already in the log.
    pub fn new() -> Self {
        let mut chat = Self {
            messages: Vec::new(),
            draft: String::new(),
            reply_request: PendingRequest::new(),
            next_message_id: 0,
        };
        chat.push(Author::Agent, GREETING.to_string());
        chat
    }

    /// True while a send is in flight. New sends are refused until the
    /// agent message lands.
    pub fn awaiting_reply(&self) -> bool {
        self.reply_request.is_pending()
    }

    /// Unconditional draft assignment.
    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    /// Overwrite the draft with the quick action's prompt. Does not send.
    pub fn select_quick_action(&mut self, action: QuickAction) {
        self.draft = action.prompt().to_string();
    }

    /// Append a user message and arm the reply request.
    ///
    /// No-op (returns false, nothing changes) when the trimmed text is
    /// empty or a reply is already awaited. On success the draft is
    /// cleared and `ticket` identifies the reply cycle the caller must
    /// schedule.
    pub fn append_user_message(&mut self, text: &str, ticket: Ticket) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.awaiting_reply() {
            return false;
        }
        self.push(Author::User, trimmed.to_string());
        self.draft.clear();
        self.reply_request.start(ticket)
    }

    /// Append the agent's reply iff `ticket` is still the live cycle.
    /// Stale deliveries (screen reset since the send) are dropped.
    pub fn deliver_agent_reply(&mut self, ticket: Ticket, text: String) -> bool {
        if !self.reply_request.complete(ticket) {
            return false;
        }
        self.push(Author::Agent, text);
        true
    }

    fn push(&mut self, author: Author, text: String) {
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_message_id,
            author,
            text,
            sent_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(chat: &mut ChatState, counter: &mut u64, text: &str) -> Ticket {
        let ticket = Ticket::next(counter);
        assert!(chat.append_user_message(text, ticket));
        ticket
    }

    #[test]
    fn test_fresh_conversation_opens_with_greeting() {
        let chat = ChatState::new();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].author, Author::Agent);
        assert_eq!(chat.messages[0].text, GREETING);
        assert!(!chat.awaiting_reply());
    }

    #[test]
    fn test_send_appends_user_message_and_clears_draft() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        chat.set_draft("Why did I spike?".to_string());

        let text = chat.draft.clone();
        send(&mut chat, &mut counter, &text);

        assert_eq!(chat.messages.len(), 2);
        let last = chat.messages.last().unwrap();
        assert_eq!(last.author, Author::User);
        assert_eq!(last.text, "Why did I spike?");
        assert!(chat.draft.is_empty());
        assert!(chat.awaiting_reply());
    }

    #[test]
    fn test_empty_and_whitespace_sends_are_noops() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        chat.set_draft("keep me".to_string());

        for text in ["", "   ", "\n\t"] {
            let ticket = Ticket::next(&mut counter);
            assert!(!chat.append_user_message(text, ticket));
        }
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.draft, "keep me");
        assert!(!chat.awaiting_reply());
    }

    #[test]
    fn test_send_refused_while_awaiting_reply() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        send(&mut chat, &mut counter, "first");

        let ticket = Ticket::next(&mut counter);
        assert!(!chat.append_user_message("second", ticket));
        assert_eq!(chat.messages.len(), 2);
    }

    #[test]
    fn test_reply_appends_after_user_and_clears_awaiting() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        let ticket = send(&mut chat, &mut counter, "hello");

        assert!(chat.deliver_agent_reply(ticket, "hi there".to_string()));
        assert_eq!(chat.messages.len(), 3);
        assert_eq!(chat.messages.last().unwrap().author, Author::Agent);
        assert!(!chat.awaiting_reply());

        // Message ids stay monotonic in append order.
        assert!(chat.messages.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        let old = send(&mut chat, &mut counter, "hello");

        // Screen torn down by navigation; conversation starts over.
        chat = ChatState::new();
        assert!(!chat.deliver_agent_reply(old, "too late".to_string()));
        assert_eq!(chat.messages.len(), 1);
    }

    #[test]
    fn test_quick_action_overwrites_draft_without_sending() {
        let mut chat = ChatState::new();
        chat.set_draft("half-typed".to_string());
        chat.select_quick_action(QuickAction::TrendSummary);
        assert_eq!(chat.draft, QuickAction::TrendSummary.prompt());
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn test_trims_sent_text() {
        let mut chat = ChatState::new();
        let mut counter = 0;
        send(&mut chat, &mut counter, "  padded  ");
        assert_eq!(chat.messages[0].text, "padded");
    }
}
