//! Intent records and the keyword/phrase scorer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::normalize::{normalize, NormalizedText};
use crate::error::AppError;
use crate::models::{BotReply, QuickReply};

/// Points for each catalog phrase found in the input, per word of the phrase.
pub const PHRASE_WORD_POINTS: u32 = 10;

/// Flat points for each catalog keyword found in the input.
pub const KEYWORD_POINTS: u32 = 3;

/// An intent as authored in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IntentDefinition {
    /// Unique name, used in logs and reports only.
    #[validate(length(min = 1))]
    pub name: String,
    /// Single tokens or short literals; each hit is worth a flat score.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Multi-word literals; each hit is worth more the longer it is.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Multiplier applied to the raw score.
    #[validate(range(min = 1))]
    pub specificity: u32,
    /// The canned reply.
    #[validate(length(min = 1))]
    pub response: String,
    #[serde(default)]
    pub quick_replies: Vec<QuickReply>,
}

#[derive(Debug, Clone)]
struct CompiledPhrase {
    text: String,
    words: u32,
}

/// A validated intent with its literals normalized up front.
///
/// Built once when the catalog loads; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Intent {
    name: String,
    keywords: Vec<String>,
    phrases: Vec<CompiledPhrase>,
    specificity: u32,
    response: String,
    quick_replies: Vec<QuickReply>,
}

impl Intent {
    /// Validate a definition and normalize its keywords and phrases.
    pub fn compile(definition: IntentDefinition) -> Result<Self, AppError> {
        let name = definition.name.clone();
        definition
            .validate()
            .map_err(|e| AppError::Catalog(format!("intent '{}': {}", name, e)))?;

        if definition.keywords.is_empty() && definition.phrases.is_empty() {
            return Err(AppError::Catalog(format!(
                "intent '{}' has neither keywords nor phrases",
                name
            )));
        }

        let mut keywords = Vec::with_capacity(definition.keywords.len());
        for keyword in &definition.keywords {
            let normalized = normalize(keyword);
            if normalized.is_empty() {
                return Err(AppError::Catalog(format!(
                    "intent '{}': keyword {:?} is empty after normalization",
                    name, keyword
                )));
            }
            keywords.push(normalized);
        }

        let mut phrases = Vec::with_capacity(definition.phrases.len());
        for phrase in &definition.phrases {
            let normalized = normalize(phrase);
            if normalized.is_empty() {
                return Err(AppError::Catalog(format!(
                    "intent '{}': phrase {:?} is empty after normalization",
                    name, phrase
                )));
            }
            let words = normalized.split(' ').count() as u32;
            phrases.push(CompiledPhrase {
                text: normalized,
                words,
            });
        }

        let mut seen_ids = std::collections::HashSet::new();
        for reply in &definition.quick_replies {
            reply.validate().map_err(|e| {
                AppError::Catalog(format!(
                    "intent '{}': quick reply {:?}: {}",
                    name, reply.id, e
                ))
            })?;
            if !seen_ids.insert(reply.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "intent '{}': duplicate quick reply id '{}'",
                    name, reply.id
                )));
            }
        }

        Ok(Self {
            name,
            keywords,
            phrases,
            specificity: definition.specificity,
            response: definition.response,
            quick_replies: definition.quick_replies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specificity(&self) -> u32 {
        self.specificity
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.quick_replies
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// The reply payload this intent answers with.
    pub fn reply(&self) -> BotReply {
        BotReply {
            response: self.response.clone(),
            quick_replies: self.quick_replies.clone(),
        }
    }

    /// Score raw user text against this intent.
    pub fn score(&self, user_text: &str) -> u32 {
        self.score_normalized(&NormalizedText::new(user_text))
    }

    /// Score already-normalized text.
    ///
    /// Every phrase is checked independently and adds `10 × words` when it is
    /// a substring of the input. Every keyword adds 3 when it equals a token
    /// or is a substring of the input. A positive sum is then multiplied by
    /// the specificity.
    pub fn score_normalized(&self, text: &NormalizedText) -> u32 {
        let mut score: u32 = 0;

        for phrase in &self.phrases {
            if text.contains(&phrase.text) {
                score = score.saturating_add(PHRASE_WORD_POINTS.saturating_mul(phrase.words));
            }
        }

        for keyword in &self.keywords {
            if text.has_token(keyword) || text.contains(keyword) {
                score = score.saturating_add(KEYWORD_POINTS);
            }
        }

        if score > 0 {
            score = score.saturating_mul(self.specificity);
        }

        score
    }
}
