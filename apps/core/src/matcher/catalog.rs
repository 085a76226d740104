//! The intent catalog: an ordered, validated, read-only list of intents.
//!
//! Catalog order is significant: when two intents tie on score the one
//! registered first wins.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::intent::{Intent, IntentDefinition};
use crate::error::AppError;

/// The storefront catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/intents.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    intents: Vec<IntentDefinition>,
}

/// Immutable intent catalog.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
}

impl IntentCatalog {
    /// Validate and compile a list of definitions, keeping their order.
    pub fn from_definitions(definitions: Vec<IntentDefinition>) -> Result<Self, AppError> {
        if definitions.is_empty() {
            return Err(AppError::Catalog("catalog contains no intents".to_string()));
        }

        let mut names = HashSet::new();
        let mut intents = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if !definition.name.is_empty() && !names.insert(definition.name.clone()) {
                return Err(AppError::Catalog(format!(
                    "duplicate intent name '{}'",
                    definition.name
                )));
            }
            let intent = Intent::compile(definition)?;
            debug!(
                intent = intent.name(),
                keywords = intent.keyword_count(),
                phrases = intent.phrase_count(),
                specificity = intent.specificity(),
                "compiled intent"
            );
            intents.push(intent);
        }

        Ok(Self { intents })
    }

    /// Parse a catalog from its JSON form: `{"intents": [...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("invalid catalog JSON: {}", e)))?;
        Self::from_definitions(file.intents)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("cannot read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            intents = catalog.len(),
            "loaded intent catalog from file"
        );
        Ok(catalog)
    }

    /// The storefront catalog embedded in the binary.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Intents in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.name() == name)
    }
}
