//! # Matcher Module
//!
//! Rule-based intent matching for the storefront support chat.
//! No model, no learning: free text is scored against a static catalog of
//! keyword and phrase literals and the best confident intent answers.
//!
//! ## Components
//! - `normalize`: case and punctuation folding shared by catalog and input
//! - `intent`: intent records and the keyword/phrase scorer
//! - `catalog`: validated, ordered, read-only intent list
//! - `selector`: confidence threshold, short-input guard and fallback replies
//! - `dispatch`: navigation shortcuts versus canned utterances

pub mod catalog;
pub mod dispatch;
pub mod intent;
pub mod normalize;
pub mod selector;

pub use catalog::IntentCatalog;
pub use dispatch::{NavigationTarget, QuickReplyAction};
pub use intent::{Intent, IntentDefinition};
pub use normalize::{normalize, NormalizedText};
pub use selector::{IntentMatcher, IntentScore, MatchPolicy, MatchReport, ReplyBranch};
