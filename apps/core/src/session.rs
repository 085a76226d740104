//! A single customer's chat: the transcript and the quick replies currently
//! on offer. Held in memory only.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::actors::traits::ReplyEngine;
use crate::matcher::{NavigationTarget, QuickReplyAction};
use crate::models::{BotReply, ChatMessage, QuickReply};

/// What happened on one turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The bot answered; both messages were appended to the transcript.
    Replied {
        user: ChatMessage,
        bot: ChatMessage,
        quick_replies: Vec<QuickReply>,
    },
    /// The UI should change page. The transcript is unchanged.
    Navigate {
        target: NavigationTarget,
        route: String,
    },
    /// Blank input; nothing was recorded.
    Ignored,
}

/// A point-in-time copy of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
    pub quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    created_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
    quick_replies: Vec<QuickReply>,
}

impl ChatSession {
    /// Open a session seeded with the engine's welcome message.
    pub fn new<E: ReplyEngine + ?Sized>(engine: &E) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            messages: vec![ChatMessage::bot(engine.welcome_message())],
            quick_replies: engine.initial_quick_replies(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            created_at: self.created_at,
            messages: self.messages.clone(),
            quick_replies: self.quick_replies.clone(),
        }
    }

    /// Handle text the customer typed.
    pub fn send_text<E: ReplyEngine + ?Sized>(&mut self, engine: &E, text: &str) -> TurnOutcome {
        let text = text.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }
        let reply = engine.respond(text);
        self.record(text, reply)
    }

    /// Handle a clicked quick reply.
    ///
    /// Navigation leaves the transcript alone; anything else is recorded as
    /// if the customer had typed the label.
    pub fn select_quick_reply<E: ReplyEngine + ?Sized>(
        &mut self,
        engine: &E,
        reply: &QuickReply,
    ) -> TurnOutcome {
        let label = reply.label.trim();
        if label.is_empty() && NavigationTarget::from_tag(&reply.intent).is_none() {
            return TurnOutcome::Ignored;
        }
        match engine.handle_quick_reply(reply) {
            QuickReplyAction::Navigate { target } => TurnOutcome::Navigate {
                target,
                route: target.route().to_string(),
            },
            QuickReplyAction::Respond { reply: bot_reply } => self.record(label, bot_reply),
        }
    }

    fn record(&mut self, user_text: &str, reply: BotReply) -> TurnOutcome {
        let user = ChatMessage::user(user_text);
        let bot = ChatMessage::bot(reply.response);
        self.messages.push(user.clone());
        self.messages.push(bot.clone());
        self.quick_replies = reply.quick_replies;

        TurnOutcome::Replied {
            user,
            bot,
            quick_replies: self.quick_replies.clone(),
        }
    }
}
