use crate::matcher::{IntentMatcher, QuickReplyAction};
use crate::models::{BotReply, QuickReply};

/// Defines the public interface of whatever answers chat turns.
///
/// This trait abstracts the reply source so the supervisor and sessions can be
/// driven by the intent matcher in production and by fixed engines in tests.
pub trait ReplyEngine: Send + Sync + 'static {
    /// The bot message a new chat opens with.
    fn welcome_message(&self) -> String;

    /// Quick replies offered alongside the welcome message.
    fn initial_quick_replies(&self) -> Vec<QuickReply>;

    /// Answers one free-text turn. Must not fail for any input.
    fn respond(&self, message: &str) -> BotReply;

    /// Answers a clicked quick reply.
    fn handle_quick_reply(&self, reply: &QuickReply) -> QuickReplyAction {
        crate::matcher::dispatch::dispatch(reply, |label| self.respond(label))
    }
}

impl ReplyEngine for IntentMatcher {
    fn welcome_message(&self) -> String {
        IntentMatcher::welcome_message(self).to_string()
    }

    fn initial_quick_replies(&self) -> Vec<QuickReply> {
        IntentMatcher::initial_quick_replies(self)
    }

    fn respond(&self, message: &str) -> BotReply {
        IntentMatcher::respond(self, message)
    }

    fn handle_quick_reply(&self, reply: &QuickReply) -> QuickReplyAction {
        IntentMatcher::handle_quick_reply(self, reply)
    }
}
