use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A one-tap follow-up offered beneath a bot response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct QuickReply {
    /// Identifier, unique within a single reply payload.
    #[validate(length(min = 1))]
    pub id: String,
    /// Text shown on the button and sent as the user's utterance when clicked.
    #[validate(length(min = 1))]
    pub label: String,
    /// Intent tag. `navigate-*` tags are page transitions, not utterances.
    #[validate(length(min = 1))]
    pub intent: String,
}

impl QuickReply {
    pub fn new(id: &str, label: &str, intent: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            intent: intent.to_string(),
        }
    }
}

/// The payload handed back to the chat UI for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    /// The canned response text.
    pub response: String,
    /// Suggested follow-ups, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quick_replies: Vec<QuickReply>,
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Bot,
}

/// Represents a single message within a chat transcript.
///
/// Messages only live as long as the session that holds them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The unique identifier for the message (UUID v4).
    pub id: String,
    /// The text content of the message.
    pub text: String,
    /// Whether the user or the bot sent it.
    pub sender: MessageSender,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: MessageSender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, MessageSender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, MessageSender::Bot)
    }
}
