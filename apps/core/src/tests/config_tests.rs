//! Startup Tests
//!
//! Configuration from the environment through to a working matcher.

use crate::config::{Config, ENV_CATALOG_PATH, ENV_CONFIDENCE_THRESHOLD};
use crate::error::AppError;
use crate::matcher::ReplyBranch;
use crate::build_matcher;
use std::io::Write;
use tempfile::NamedTempFile;

const CUSTOM_CATALOG: &str = r#"{
  "intents": [
    {
      "name": "engraving",
      "keywords": ["engrave", "engraving"],
      "phrases": ["can you engrave"],
      "specificity": 5,
      "response": "We engrave up to 12 characters.",
      "quick_replies": [
        { "id": "e1", "label": "Contact us", "intent": "navigate-contact" }
      ]
    }
  ]
}"#;

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_environment_uses_embedded_catalog() {
    temp_env::with_vars(
        [
            (ENV_CATALOG_PATH, None::<&str>),
            (ENV_CONFIDENCE_THRESHOLD, None),
        ],
        || {
            let config = Config::from_env().unwrap();
            let matcher = build_matcher(&config).unwrap();
            assert_eq!(matcher.catalog().len(), 57);
        },
    );
}

#[test]
fn test_catalog_path_overrides_embedded_catalog() {
    let file = catalog_file(CUSTOM_CATALOG);
    let path = file.path().to_str().unwrap().to_string();

    temp_env::with_vars([(ENV_CATALOG_PATH, Some(path.as_str()))], || {
        let config = Config::from_env().unwrap();
        let matcher = build_matcher(&config).unwrap();
        assert_eq!(matcher.catalog().len(), 1);

        let report = matcher.explain("can you engrave my initials");
        assert_eq!(report.branch, ReplyBranch::Matched);
        // phrase 30 + "engrave" 3, times 5
        assert_eq!(report.matched.unwrap().score, 165);
        assert_eq!(report.reply.response, "We engrave up to 12 characters.");
    });
}

#[test]
fn test_threshold_from_environment_is_applied() {
    temp_env::with_vars(
        [
            (ENV_CATALOG_PATH, None),
            (ENV_CONFIDENCE_THRESHOLD, Some("5")),
        ],
        || {
            let config = Config::from_env().unwrap();
            let matcher = build_matcher(&config).unwrap();
            // greeting scores 6: low confidence at 10, matched at 5
            assert_eq!(matcher.explain("hello there").branch, ReplyBranch::Matched);
        },
    );
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    temp_env::with_vars(
        [(ENV_CATALOG_PATH, Some("/nonexistent/lunara/intents.json"))],
        || {
            let config = Config::from_env().unwrap();
            assert!(build_matcher(&config).is_err());
        },
    );
}

#[test]
fn test_malformed_catalog_file_is_rejected() {
    let file = catalog_file(r#"{"intents": [{"name": "x"#);
    let path = file.path().to_str().unwrap().to_string();

    temp_env::with_vars([(ENV_CATALOG_PATH, Some(path.as_str()))], || {
        let config = Config::from_env().unwrap();
        assert!(matches!(build_matcher(&config), Err(AppError::Catalog(_))));
    });
}
