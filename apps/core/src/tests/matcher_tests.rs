//! Matcher Tests
//!
//! Conversations against the embedded storefront catalog.

use crate::matcher::{
    normalize, IntentCatalog, IntentMatcher, MatchPolicy, NavigationTarget, QuickReplyAction,
    ReplyBranch,
};
use crate::models::QuickReply;
use std::sync::Arc;

fn storefront() -> IntentMatcher {
    let catalog = IntentCatalog::builtin().expect("embedded catalog must load");
    IntentMatcher::new(Arc::new(catalog), MatchPolicy::default())
}

fn winner(matcher: &IntentMatcher, message: &str) -> Option<(String, u32)> {
    matcher
        .explain(message)
        .matched
        .map(|m| (m.intent, m.score))
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = IntentCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 57);
        let first = catalog.iter().next().unwrap();
        assert_eq!(first.name(), "greeting");
        for name in ["rings", "sizing", "returns", "shipping", "care", "farewell"] {
            assert!(catalog.get(name).is_some(), "missing intent {}", name);
        }
    }

    #[test]
    fn test_every_builtin_intent_has_a_response() {
        let catalog = IntentCatalog::builtin().unwrap();
        for intent in catalog.iter() {
            assert!(!intent.response().is_empty(), "{} has no response", intent.name());
            assert!(intent.specificity() >= 1);
        }
    }
}

#[cfg(test)]
mod conversation_tests {
    use super::*;

    #[test]
    fn test_single_word_greeting_asks_for_more() {
        let m = storefront();
        let report = m.explain("hi");
        assert_eq!(report.branch, ReplyBranch::ShortInput);
        assert_eq!(report.reply.quick_replies.len(), 4);
        assert_eq!(report.reply.quick_replies[0].intent, "navigate-shop");
    }

    #[test]
    fn test_phrase_beats_category_keyword() {
        let m = storefront();
        let report = m.explain("do you have gold rings");
        assert_eq!(report.branch, ReplyBranch::Matched);
        assert_eq!(winner(&m, "do you have gold rings"), Some(("gold_and_gemstones".into(), 344)));
        assert_eq!(report.candidates[1].intent, "rings");
        assert_eq!(report.candidates[1].score, 42);
    }

    #[test]
    fn test_return_policy_answer_is_verbatim() {
        let m = storefront();
        let returns = m.catalog().get("returns").unwrap();
        let reply = m.respond("what is your return policy");
        assert_eq!(reply.response, returns.response());
        assert_eq!(reply.quick_replies, returns.quick_replies());
        assert_eq!(winner(&m, "what is your return policy"), Some(("returns".into(), 208)));
    }

    #[test]
    fn test_gibberish_never_fails() {
        let m = storefront();
        for input in ["xyz", "", "   ", "hello!!", "🙂🙂🙂", "qwerty asdf zxcv"] {
            let report = m.explain(input);
            assert_ne!(report.branch, ReplyBranch::Matched, "{:?} matched", input);
            assert!(!report.reply.response.is_empty());
        }
    }

    #[test]
    fn test_ties_go_to_first_registered_intent() {
        let m = storefront();
        let report = m.explain("Ring sizing help");
        assert_eq!(report.matched.unwrap().intent, "rings");
        let scores: Vec<(&str, u32)> = report
            .candidates
            .iter()
            .map(|c| (c.intent.as_str(), c.score))
            .collect();
        assert_eq!(scores, vec![("rings", 21), ("sizing", 21), ("help", 12)]);
    }

    #[test]
    fn test_weak_greeting_falls_to_low_confidence() {
        let m = storefront();
        let report = m.explain("hello there");
        assert_eq!(report.branch, ReplyBranch::LowConfidence);
        assert_eq!(report.candidates[0].intent, "greeting");
        assert_eq!(report.candidates[0].score, 6);
        assert_eq!(report.reply.quick_replies.len(), 5);
    }

    #[test]
    fn test_common_questions() {
        let m = storefront();
        let cases = [
            ("ring size", "sizing"),
            ("what is your ring size guide", "sizing"),
            ("Shipping info", "shipping"),
            ("Care tips", "care"),
            ("Returns policy", "returns"),
            ("Payment options", "payment_methods"),
            ("Products & materials", "materials"),
            ("thank you so much", "thanks"),
            ("I received a broken necklace", "damaged_items"),
            ("how do I clean my bracelet", "care"),
            ("can I pay with credit card", "card_payments"),
            ("is this real silver", "authenticity"),
        ];
        for (input, expected) in cases {
            let got = winner(&m, input).map(|(name, _)| name);
            assert_eq!(got.as_deref(), Some(expected), "input {:?}", input);
        }
    }

    #[test]
    fn test_longer_phrase_scores_higher() {
        let m = storefront();
        let sizing = m.catalog().get("sizing").unwrap();
        assert!(sizing.score("ring size") >= sizing.score("size"));
        assert_eq!(sizing.score("ring size"), 161);
    }

    #[test]
    fn test_empty_input_scores_zero_everywhere() {
        let m = storefront();
        assert!(m.catalog().iter().all(|intent| intent.score("") == 0));
        assert!(m.rank("").is_empty());
    }

    #[test]
    fn test_respond_is_deterministic() {
        let m = storefront();
        let input = "do you ship internationally";
        let first = m.respond(input);
        for _ in 0..10 {
            assert_eq!(m.respond(input), first);
        }
    }

    #[test]
    fn test_normalization_does_not_change_the_answer() {
        let m = storefront();
        let input = "What's your RETURN policy?!";
        assert_eq!(m.respond(input), m.respond(&normalize(input)));
    }
}

#[cfg(test)]
mod quick_reply_tests {
    use super::*;

    #[test]
    fn test_navigate_shop_has_no_text() {
        let m = storefront();
        let action = m.handle_quick_reply(&QuickReply::new("init1", "Browse products", "navigate-shop"));
        assert_eq!(
            action,
            QuickReplyAction::Navigate {
                target: NavigationTarget::Shop
            }
        );
    }

    #[test]
    fn test_text_quick_reply_answers_its_label() {
        let m = storefront();
        let action = m.handle_quick_reply(&QuickReply::new("init2", "Shipping info", "shipping"));
        match action {
            QuickReplyAction::Respond { reply } => {
                assert_eq!(reply.response, m.catalog().get("shipping").unwrap().response());
            }
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_navigation_tag_is_sent_as_text() {
        let m = storefront();
        let action = m.handle_quick_reply(&QuickReply::new("x", "Care tips", "navigate-nowhere"));
        assert_eq!(
            action,
            QuickReplyAction::Respond {
                reply: m.respond("Care tips")
            }
        );
    }

    #[test]
    fn test_single_word_labels_hit_the_guard() {
        let m = storefront();
        for label in ["Rings", "Necklaces", "Earrings", "Materials"] {
            assert_eq!(m.explain(label).branch, ReplyBranch::ShortInput, "{}", label);
        }
    }
}

#[cfg(test)]
mod preflight_tests {
    use super::*;
    use crate::preflight::run_preflight;

    #[test]
    fn test_builtin_catalog_is_ready_with_warnings() {
        let report = run_preflight(&storefront());
        assert!(report.ready_to_start);
        assert!(!report.all_passed);
        assert!(report.check("catalog_loaded").unwrap().passed);
        assert!(report.check("navigation_tags").unwrap().passed);

        let dead_ends = report.check("quick_reply_resolution").unwrap();
        assert!(!dead_ends.passed);
        assert_eq!(
            dead_ends.details.as_deref(),
            Some("Materials, Rings, Necklaces, Earrings")
        );

        let reach = report.check("single_keyword_reach").unwrap();
        assert_eq!(reach.details.as_deref(), Some("greeting, browse_catalog"));
    }

    #[test]
    fn test_disabling_the_guard_clears_dead_ends() {
        let catalog = IntentCatalog::builtin().unwrap();
        let m = IntentMatcher::new(
            Arc::new(catalog),
            MatchPolicy {
                short_input_guard: false,
                ..MatchPolicy::default()
            },
        );
        let report = run_preflight(&m);
        assert!(report.check("quick_reply_resolution").unwrap().passed);
    }
}
