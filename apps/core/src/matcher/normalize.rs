//! Text normalization shared by catalog literals and live user input.
//!
//! Lowercases, turns anything that is not a letter, digit or whitespace into
//! a space, collapses whitespace runs and trims. The result contains only
//! lowercase letters, digits and single spaces, so normalizing twice is a
//! no-op.

use regex::Regex;
use std::sync::LazyLock;

// NOTE: expect() is acceptable for these statics: the patterns are literals.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("Invalid regex: non-word pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace pattern"));

/// Normalize text for matching.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// User input after normalization, with token access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self {
            text: normalize(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split(' ').filter(|t| !t.is_empty())
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens().any(|t| t == token)
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.text.contains(literal)
    }
}
