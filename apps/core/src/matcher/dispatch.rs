//! Quick-reply dispatch: navigation shortcuts versus canned utterances.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{BotReply, QuickReply};

/// Storefront pages a quick reply can jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    Shop,
    Contact,
    OrderRequest,
    About,
    Shipping,
    Returns,
    Faq,
    PaymentMethods,
    OrderTracking,
    Privacy,
    Terms,
    Collections,
    Customization,
    Quality,
    Blog,
    Reviews,
}

impl NavigationTarget {
    pub const ALL: [NavigationTarget; 16] = [
        NavigationTarget::Shop,
        NavigationTarget::Contact,
        NavigationTarget::OrderRequest,
        NavigationTarget::About,
        NavigationTarget::Shipping,
        NavigationTarget::Returns,
        NavigationTarget::Faq,
        NavigationTarget::PaymentMethods,
        NavigationTarget::OrderTracking,
        NavigationTarget::Privacy,
        NavigationTarget::Terms,
        NavigationTarget::Collections,
        NavigationTarget::Customization,
        NavigationTarget::Quality,
        NavigationTarget::Blog,
        NavigationTarget::Reviews,
    ];

    /// The quick-reply tag that selects this target.
    pub fn tag(&self) -> &'static str {
        match self {
            NavigationTarget::Shop => "navigate-shop",
            NavigationTarget::Contact => "navigate-contact",
            NavigationTarget::OrderRequest => "navigate-order",
            NavigationTarget::About => "navigate-about",
            NavigationTarget::Shipping => "navigate-shipping",
            NavigationTarget::Returns => "navigate-returns",
            NavigationTarget::Faq => "navigate-faq",
            NavigationTarget::PaymentMethods => "navigate-payment",
            NavigationTarget::OrderTracking => "navigate-order-tracking",
            NavigationTarget::Privacy => "navigate-privacy",
            NavigationTarget::Terms => "navigate-terms",
            NavigationTarget::Collections => "navigate-collections",
            NavigationTarget::Customization => "navigate-customization",
            NavigationTarget::Quality => "navigate-quality",
            NavigationTarget::Blog => "navigate-blog",
            NavigationTarget::Reviews => "navigate-reviews",
        }
    }

    /// Client route the UI router should transition to.
    pub fn route(&self) -> &'static str {
        match self {
            NavigationTarget::Shop => "/shop",
            NavigationTarget::Contact => "/contact",
            NavigationTarget::OrderRequest => "/order-request",
            NavigationTarget::About => "/about",
            NavigationTarget::Shipping => "/shipping",
            NavigationTarget::Returns => "/returns",
            NavigationTarget::Faq => "/faq",
            NavigationTarget::PaymentMethods => "/payment-methods",
            NavigationTarget::OrderTracking => "/order-tracking",
            NavigationTarget::Privacy => "/privacy",
            NavigationTarget::Terms => "/terms",
            NavigationTarget::Collections => "/collections",
            NavigationTarget::Customization => "/customization",
            NavigationTarget::Quality => "/certifications-quality",
            NavigationTarget::Blog => "/blog",
            NavigationTarget::Reviews => "/reviews",
        }
    }

    /// Look up a target by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.tag() == tag)
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route())
    }
}

/// Whether a tag looks like a navigation tag, known or not.
pub fn is_navigation_tag(tag: &str) -> bool {
    tag.starts_with("navigate-")
}

/// What the caller should do with a clicked quick reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuickReplyAction {
    /// Transition to a page; no chat response is produced.
    Navigate { target: NavigationTarget },
    /// The label was answered as if the user had typed it.
    Respond { reply: BotReply },
}

/// Classify a quick reply and, for non-navigation tags, answer its label.
///
/// Unknown `navigate-*` tags are not navigation; their label is answered
/// like any other utterance.
pub fn dispatch<F>(reply: &QuickReply, respond: F) -> QuickReplyAction
where
    F: FnOnce(&str) -> BotReply,
{
    match NavigationTarget::from_tag(&reply.intent) {
        Some(target) => QuickReplyAction::Navigate { target },
        None => QuickReplyAction::Respond {
            reply: respond(&reply.label),
        },
    }
}
