//! Response selection: score every intent, trust the winner only above the
//! confidence threshold, otherwise ask the customer to clarify.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::catalog::IntentCatalog;
use super::dispatch::{dispatch, QuickReplyAction};
use super::intent::Intent;
use super::normalize::NormalizedText;
use crate::models::{BotReply, QuickReply};

/// Minimum winning score before a canned answer is trusted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: u32 = 10;

/// Normalized inputs shorter than this skip scoring when the guard is on.
pub const DEFAULT_MIN_INPUT_CHARS: usize = 3;

const WELCOME_MESSAGE: &str = "Hello! I'm here to help you with any questions about our handcrafted oxidized silver jewelry. What would you like to know?";

const SHORT_INPUT_RESPONSE: &str = "I'd love to help! Could you tell me a bit more about what you're looking for? For example, are you interested in a specific type of jewelry, or do you have questions about shipping, returns, or ordering?";

const LOW_CONFIDENCE_RESPONSE: &str = "I want to make sure I understand correctly. Are you asking about our products, shipping and delivery, returns and exchanges, payment options, or something else? Feel free to be more specific!";

fn initial_replies() -> Vec<QuickReply> {
    vec![
        QuickReply::new("init1", "Browse products", "navigate-shop"),
        QuickReply::new("init2", "Shipping info", "shipping"),
        QuickReply::new("init3", "Place an order", "navigate-order"),
        QuickReply::new("init4", "Contact us", "navigate-contact"),
    ]
}

fn short_input_replies() -> Vec<QuickReply> {
    vec![
        QuickReply::new("clarify1", "Browse products", "navigate-shop"),
        QuickReply::new("clarify2", "Shipping info", "shipping"),
        QuickReply::new("clarify3", "Returns policy", "return"),
        QuickReply::new("clarify4", "Contact us", "navigate-contact"),
    ]
}

fn low_confidence_replies() -> Vec<QuickReply> {
    vec![
        QuickReply::new("clarify5", "Products & materials", "shop"),
        QuickReply::new("clarify6", "Shipping & delivery", "shipping"),
        QuickReply::new("clarify7", "Returns & exchanges", "return"),
        QuickReply::new("clarify8", "Payment options", "payment"),
        QuickReply::new("clarify9", "Contact us", "navigate-contact"),
    ]
}

/// The two tunables of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Minimum winning score for a specific answer.
    pub confidence_threshold: u32,
    /// Answer one-word or very short inputs with a clarification, unscored.
    pub short_input_guard: bool,
    /// Character floor used by the guard.
    pub min_input_chars: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            short_input_guard: true,
            min_input_chars: DEFAULT_MIN_INPUT_CHARS,
        }
    }
}

/// Which path the selector took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyBranch {
    /// An intent cleared the threshold.
    Matched,
    /// The short-input guard answered without scoring.
    ShortInput,
    /// Nothing (or nothing confident) matched.
    LowConfidence,
}

/// One intent's score for an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentScore {
    pub intent: String,
    pub score: u32,
}

impl IntentScore {
    fn new(intent: &Intent, score: u32) -> Self {
        Self {
            intent: intent.name().to_string(),
            score,
        }
    }
}

/// A reply together with how it was chosen.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub reply: BotReply,
    pub branch: ReplyBranch,
    /// The winning intent, present only for `Matched`.
    pub matched: Option<IntentScore>,
    /// Intents with a positive score, best first, ties in catalog order.
    pub candidates: Vec<IntentScore>,
}

/// Scores user text against a catalog and picks a reply.
///
/// Pure over (catalog, policy, input): safe to share between sessions.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    catalog: Arc<IntentCatalog>,
    policy: MatchPolicy,
}

impl IntentMatcher {
    pub fn new(catalog: Arc<IntentCatalog>, policy: MatchPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The greeting a new chat opens with.
    pub fn welcome_message(&self) -> &'static str {
        WELCOME_MESSAGE
    }

    /// Quick replies offered before the customer has said anything.
    pub fn initial_quick_replies(&self) -> Vec<QuickReply> {
        initial_replies()
    }

    /// Pick the reply for a message.
    pub fn respond(&self, message: &str) -> BotReply {
        self.explain(message).reply
    }

    /// Answer a clicked quick reply.
    pub fn handle_quick_reply(&self, reply: &QuickReply) -> QuickReplyAction {
        dispatch(reply, |label| self.respond(label))
    }

    /// Every intent with a positive score, best first.
    ///
    /// The sort is stable, so intents with equal scores keep catalog order.
    fn scored<'a>(&'a self, text: &NormalizedText) -> Vec<(&'a Intent, u32)> {
        let mut scored: Vec<(&Intent, u32)> = self
            .catalog
            .iter()
            .map(|intent| (intent, intent.score_normalized(text)))
            .filter(|(_, score)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
    }

    /// Ranked positive scores for a message, for diagnostics.
    pub fn rank(&self, message: &str) -> Vec<IntentScore> {
        self.scored(&NormalizedText::new(message))
            .into_iter()
            .map(|(intent, score)| IntentScore::new(intent, score))
            .collect()
    }

    /// Pick the reply for a message and report how it was chosen.
    pub fn explain(&self, message: &str) -> MatchReport {
        let text = NormalizedText::new(message);

        if self.policy.short_input_guard
            && (text.char_len() < self.policy.min_input_chars || text.token_count() <= 1)
        {
            debug!(input = text.as_str(), "short input, asking for more detail");
            return MatchReport {
                reply: BotReply {
                    response: SHORT_INPUT_RESPONSE.to_string(),
                    quick_replies: short_input_replies(),
                },
                branch: ReplyBranch::ShortInput,
                matched: None,
                candidates: vec![],
            };
        }

        let scored = self.scored(&text);
        let candidates: Vec<IntentScore> = scored
            .iter()
            .map(|(intent, score)| IntentScore::new(intent, *score))
            .collect();

        if let Some((intent, score)) = scored.first() {
            if *score >= self.policy.confidence_threshold {
                debug!(
                    intent = intent.name(),
                    score = *score,
                    candidates = candidates.len(),
                    "matched intent"
                );
                return MatchReport {
                    reply: intent.reply(),
                    branch: ReplyBranch::Matched,
                    matched: Some(IntentScore::new(intent, *score)),
                    candidates,
                };
            }
        }

        debug!(
            input = text.as_str(),
            best = candidates.first().map(|c| c.score).unwrap_or(0),
            threshold = self.policy.confidence_threshold,
            "no confident match"
        );
        MatchReport {
            reply: BotReply {
                response: LOW_CONFIDENCE_RESPONSE.to_string(),
                quick_replies: low_confidence_replies(),
            },
            branch: ReplyBranch::LowConfidence,
            matched: None,
            candidates,
        }
    }
}
