//! Preflight Check System
//!
//! Verifies a loaded catalog before the chat opens: that it has intents, that
//! every navigation shortcut is routable, and which answers the customer
//! cannot actually reach under the active policy.

use crate::matcher::dispatch::is_navigation_tag;
use crate::matcher::intent::KEYWORD_POINTS;
use crate::matcher::{IntentMatcher, NavigationTarget, ReplyBranch};
use crate::models::QuickReply;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub ready_to_start: bool,
    pub summary: String,
}

impl PreflightReport {
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Runs every catalog check against the matcher's catalog and policy.
pub fn run_preflight(matcher: &IntentMatcher) -> PreflightReport {
    info!(
        intents = matcher.catalog().len(),
        threshold = matcher.policy().confidence_threshold,
        "running catalog preflight"
    );

    let checks = vec![
        check_catalog_loaded(matcher),
        check_navigation_tags(matcher),
        check_quick_reply_resolution(matcher),
        check_single_keyword_reach(matcher),
    ];

    let all_passed = checks.iter().all(|c| c.passed);
    let critical_passed = checks
        .iter()
        .filter(|c| is_critical_check(&c.name))
        .all(|c| c.passed);

    let summary = if all_passed {
        "All checks passed. Catalog ready.".to_string()
    } else if critical_passed {
        "Some non-critical checks failed. Chat can start with warnings.".to_string()
    } else {
        "Critical checks failed. Chat cannot start.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!(check = %check.name, "{}", check.message);
        } else {
            warn!(
                check = %check.name,
                details = check.details.as_deref().unwrap_or(""),
                "{}",
                check.message
            );
        }
    }
    info!(ready = critical_passed, "{}", summary);

    PreflightReport {
        all_passed,
        checks,
        ready_to_start: critical_passed,
        summary,
    }
}

fn is_critical_check(name: &str) -> bool {
    matches!(name, "catalog_loaded" | "navigation_tags")
}

/// Every quick reply a customer can be shown, paired with where it lives.
fn offered_quick_replies(matcher: &IntentMatcher) -> Vec<(String, QuickReply)> {
    let mut offered: Vec<(String, QuickReply)> = matcher
        .initial_quick_replies()
        .into_iter()
        .map(|reply| ("welcome".to_string(), reply))
        .collect();
    for intent in matcher.catalog().iter() {
        for reply in intent.quick_replies() {
            offered.push((intent.name().to_string(), reply.clone()));
        }
    }
    offered
}

// --- Individual Checks ---

fn check_catalog_loaded(matcher: &IntentMatcher) -> CheckResult {
    let catalog = matcher.catalog();
    if catalog.is_empty() {
        return CheckResult::fail("catalog_loaded", "Catalog has no intents", None);
    }
    let keywords: usize = catalog.iter().map(|i| i.keyword_count()).sum();
    let phrases: usize = catalog.iter().map(|i| i.phrase_count()).sum();
    CheckResult::pass(
        "catalog_loaded",
        &format!(
            "{} intents ({} keywords, {} phrases)",
            catalog.len(),
            keywords,
            phrases
        ),
    )
}

fn check_navigation_tags(matcher: &IntentMatcher) -> CheckResult {
    let unknown: Vec<String> = offered_quick_replies(matcher)
        .into_iter()
        .filter(|(_, reply)| {
            is_navigation_tag(&reply.intent) && NavigationTarget::from_tag(&reply.intent).is_none()
        })
        .map(|(owner, reply)| format!("{}: {} ({})", owner, reply.id, reply.intent))
        .collect();

    if unknown.is_empty() {
        CheckResult::pass("navigation_tags", "All navigation tags are routable")
    } else {
        CheckResult::fail(
            "navigation_tags",
            "Unknown navigation tags would be sent as text",
            Some(unknown.join(", ")),
        )
    }
}

fn check_quick_reply_resolution(matcher: &IntentMatcher) -> CheckResult {
    let mut dead_ends: Vec<String> = Vec::new();
    let mut checked = 0usize;

    for (_, reply) in offered_quick_replies(matcher) {
        if is_navigation_tag(&reply.intent) {
            continue;
        }
        checked += 1;
        if matcher.explain(&reply.label).branch != ReplyBranch::Matched
            && !dead_ends.contains(&reply.label)
        {
            dead_ends.push(reply.label);
        }
    }

    if dead_ends.is_empty() {
        CheckResult::pass(
            "quick_reply_resolution",
            &format!("All {} text quick replies resolve to an intent", checked),
        )
    } else {
        CheckResult::fail(
            "quick_reply_resolution",
            "Some quick replies fall through to a clarification",
            Some(dead_ends.join(", ")),
        )
    }
}

fn check_single_keyword_reach(matcher: &IntentMatcher) -> CheckResult {
    let threshold = matcher.policy().confidence_threshold;
    let weak: Vec<String> = matcher
        .catalog()
        .iter()
        .filter(|intent| KEYWORD_POINTS.saturating_mul(intent.specificity()) < threshold)
        .map(|intent| intent.name().to_string())
        .collect();

    if weak.is_empty() {
        CheckResult::pass(
            "single_keyword_reach",
            "Every intent can match on a single keyword",
        )
    } else {
        CheckResult::fail(
            "single_keyword_reach",
            &format!("Intents needing more than one keyword to reach {}", threshold),
            Some(weak.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{IntentCatalog, IntentDefinition, MatchPolicy};
    use std::sync::Arc;

    fn matcher_with(replies: Vec<QuickReply>, specificity: u32) -> IntentMatcher {
        let catalog = IntentCatalog::from_definitions(vec![IntentDefinition {
            name: "silver".to_string(),
            keywords: vec!["silver".to_string()],
            phrases: vec!["sterling silver".to_string()],
            specificity,
            response: "All our silver is 925.".to_string(),
            quick_replies: replies,
        }])
        .unwrap();
        IntentMatcher::new(Arc::new(catalog), MatchPolicy::default())
    }

    #[test]
    fn test_routable_catalog_is_ready_with_warnings() {
        let m = matcher_with(
            vec![
                QuickReply::new("s1", "Sterling silver", "silver"),
                QuickReply::new("s2", "Browse shop", "navigate-shop"),
            ],
            4,
        );
        let report = run_preflight(&m);
        // the welcome "Shipping info" reply has no intent in this catalog
        assert!(!report.check("quick_reply_resolution").unwrap().passed);
        assert!(report.check("catalog_loaded").unwrap().passed);
        assert!(report.check("navigation_tags").unwrap().passed);
        assert!(report.check("single_keyword_reach").unwrap().passed);
        assert!(report.ready_to_start);
        assert!(!report.all_passed);
    }

    #[test]
    fn test_unknown_navigation_tag_is_critical() {
        let m = matcher_with(vec![QuickReply::new("s1", "Lookbook", "navigate-lookbook")], 4);
        let report = run_preflight(&m);
        let check = report.check("navigation_tags").unwrap();
        assert!(!check.passed);
        assert!(check.details.as_deref().unwrap().contains("silver: s1 (navigate-lookbook)"));
        assert!(!report.ready_to_start);
    }

    #[test]
    fn test_weak_intent_is_reported() {
        let m = matcher_with(vec![], 3);
        let check = run_preflight(&m).check("single_keyword_reach").cloned().unwrap();
        assert!(!check.passed);
        assert_eq!(check.details.as_deref(), Some("silver"));
    }
}
